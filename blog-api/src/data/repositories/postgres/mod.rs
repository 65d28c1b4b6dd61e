use crate::domain::error::DomainError;

pub(crate) mod activity_repository;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Translates constraint violations into domain errors; `resource` names
/// the thing a foreign key pointed at.
pub(crate) fn map_db_error(err: sqlx::Error, resource: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let what = match db_err.constraint() {
                    Some("users_username_key") => "username",
                    Some("users_email_key") => "email",
                    _ => resource,
                };
                return DomainError::AlreadyExists(what.to_string());
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return DomainError::NotFound(resource.to_string());
            }
            _ => {}
        }
    }
    DomainError::Unexpected(err.to_string())
}
