//! Salted and hashed passwords for stored users.
//!
//! Signing in is handled by an external identity provider, so passwords are
//! only ever hashed on the way into the database and never sent back out.

use std::fmt::Display;

use bcrypt::hash;

use crate::Error;

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `raw_password` with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// A value of at least 12 is recommended. Pass in [PasswordHash::DEFAULT_COST] to use the
    /// recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        match hash(raw_password, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    #[cfg(test)]
    pub fn verify(&self, raw_password: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod password_hash_tests {
    use crate::{Error, PasswordHash};

    #[test]
    fn verify_password_succeeds_for_valid_password() {
        let password = "turtle";
        let hash = PasswordHash::from_raw_password(password, 4).unwrap();

        assert!(hash.verify(password).unwrap());
    }

    #[test]
    fn verify_password_fails_for_invalid_password() {
        let hash = PasswordHash::from_raw_password("turtle", 4).unwrap();

        assert!(!hash.verify("tortoise").unwrap());
    }

    #[test]
    fn hash_is_salted() {
        let first = PasswordHash::from_raw_password("turtle", 4).unwrap();
        let second = PasswordHash::from_raw_password("turtle", 4).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn invalid_cost_is_a_hashing_error() {
        let result = PasswordHash::from_raw_password("turtle", 0);

        assert!(matches!(result, Err(Error::HashingError(_))));
    }
}
