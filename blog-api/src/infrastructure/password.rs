use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _,
        SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

/// Longest plaintext accepted for hashing or verification, in bytes.
pub(crate) const MAX_PASSWORD_BYTES: usize = 1024;

#[derive(Debug, Error)]
pub(crate) enum PasswordError {
    #[error("password must be at most {max} bytes")]
    TooLong { max: usize },

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Argon2id work factor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HashCost {
    pub(crate) memory_kib: u32,
    pub(crate) iterations: u32,
    pub(crate) parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Clone)]
pub(crate) struct PasswordHasher {
    argon2: Argon2<'static>,
    // verified against when the account does not exist, so both paths cost the same
    decoy_hash: String,
}

impl PasswordHasher {
    pub(crate) fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|err| PasswordError::Hash(err.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut hasher = Self {
            argon2,
            decoy_hash: String::new(),
        };
        hasher.decoy_hash = hasher.hash("decoy-password-for-unknown-accounts")?;
        Ok(hasher)
    }

    pub(crate) fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        check_length(plaintext)?;
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordError::Hash(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    /// `Ok(false)` on mismatch; `Err` only when the input or stored hash is unusable.
    pub(crate) fn verify(&self, password_hash: &str, plaintext: &str) -> Result<bool, PasswordError> {
        check_length(plaintext)?;
        let parsed_hash =
            PasswordHash::new(password_hash).map_err(|err| PasswordError::Hash(err.to_string()))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(PasswordError::Hash(err.to_string())),
        }
    }

    /// Burns one verification's worth of work; the outcome is ignored.
    pub(crate) fn verify_decoy(&self, plaintext: &str) {
        let _ = self.verify(&self.decoy_hash, plaintext);
    }
}

fn check_length(plaintext: &str) -> Result<(), PasswordError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong {
            max: MAX_PASSWORD_BYTES,
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_hasher() -> PasswordHasher {
    PasswordHasher::new(HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("test hasher must build")
}
