//! Errors from signing in and managing accounts.

use thiserror::Error;

use crate::db::RepositoryError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] livestock_core::EmailError),

    /// Unknown email or wrong password. Sign-in never says which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account for this email (operator commands only).
    #[error("no account for {0}")]
    UnknownAccount(String),

    #[error("an account already exists for this email")]
    UserAlreadyExists,

    #[error("password rejected: {0}")]
    WeakPassword(String),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("could not hash password")]
    PasswordHash,
}
