use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub(crate) enum TokenError {
    #[error("token signature or signing method is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,

    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("random source unavailable: {0}")]
    Entropy(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) exp: i64,
}

/// Issues HS256 access tokens and opaque refresh tokens. The signing secret is
/// fixed at construction.
pub(crate) struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::seconds(ttl_seconds),
        }
    }

    pub(crate) fn issue_access(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            username: username.into(),
            email: email.into(),
            exp: (Utc::now() + self.access_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Hex-encoded random bytes with no embedded structure; only meaningful as
    /// a lookup key into the refresh token table.
    pub(crate) fn issue_refresh(&self) -> Result<String, TokenError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| TokenError::Entropy(err.to_string()))?;

        Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub(crate) fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(classify)?;

        if Utc::now().timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(token_data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidKeyFormat => {
            TokenError::InvalidSignature
        }
        _ => TokenError::Malformed,
    }
}
