use anyhow::{Context, Result, anyhow};

use super::logging::LogFormat;

const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECONDS: i64 = 10 * 24 * 60 * 60;
const MIN_JWT_SECRET_CHARS: usize = 32;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub access_token_ttl_seconds: i64,
    pub refresh_token_ttl_seconds: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub log_format: LogFormat,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let database_url = env.required("DATABASE_URL")?;
        let database_max_connections = env.positive::<u32>("DATABASE_MAX_CONNECTIONS", 10)?;

        let jwt_secret = env.required("JWT_SECRET")?;
        if jwt_secret.chars().count() < MIN_JWT_SECRET_CHARS {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }
        let access_token_ttl_seconds =
            env.positive::<i64>("ACCESS_TOKEN_TTL_SECONDS", DEFAULT_ACCESS_TOKEN_TTL_SECONDS)?;
        let refresh_token_ttl_seconds =
            env.positive::<i64>("REFRESH_TOKEN_TTL_SECONDS", DEFAULT_REFRESH_TOKEN_TTL_SECONDS)?;

        let http_addr = env
            .optional("HTTP_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            &env.optional("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
        );
        let log_level = env
            .optional("LOG_LEVEL")
            .or_else(|| env.optional("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let log_format = env
            .optional("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        let http_request_body_limit_bytes =
            env.positive::<usize>("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = env.positive::<usize>("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = env.positive::<u64>("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            http_addr,
            cors_origins,
            log_level,
            log_format,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .ok_or_else(|| anyhow!("{key} is required and must not be empty"))
    }

    fn positive<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + PartialOrd + Default + std::fmt::Display,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let value = match self.optional(key) {
            Some(raw) => raw
                .parse::<T>()
                .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
            None => default,
        };

        if value <= T::default() {
            return Err(anyhow!("{key} must be > 0"));
        }
        Ok(value)
    }
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;
    use crate::infrastructure::logging::LogFormat;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_are_applied() {
        let settings = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
        ])
        .expect("settings must load");

        assert_eq!(settings.access_token_ttl_seconds, 24 * 60 * 60);
        assert_eq!(settings.refresh_token_ttl_seconds, 10 * 24 * 60 * 60);
        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Compact);
        assert_eq!(settings.database_max_connections, 10);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = load(&[("JWT_SECRET", SECRET)]).expect_err("must fail");
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", "short"),
        ])
        .expect_err("must fail");
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn zero_and_garbage_numbers_are_rejected() {
        let zero = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
            ("HTTP_CONCURRENCY_LIMIT", "0"),
        ]);
        assert!(zero.is_err());

        let negative_ttl = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
            ("REFRESH_TOKEN_TTL_SECONDS", "-5"),
        ]);
        assert!(negative_ttl.is_err());

        let garbage = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
            ("ACCESS_TOKEN_TTL_SECONDS", "soon"),
        ]);
        assert!(garbage.is_err());
    }

    #[test]
    fn cors_origins_and_log_format_are_parsed() {
        let settings = load(&[
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("JWT_SECRET", SECRET),
            ("CORS_ORIGINS", " http://a.test , ,http://b.test"),
            ("LOG_FORMAT", "json"),
            ("RUST_LOG", "debug"),
        ])
        .expect("settings must load");

        assert_eq!(settings.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.log_level, "debug");
    }
}
