//! Domain service for authentication and user management.
//!
//! Handles registration, login, bearer token validation, and logout.

use thiserror::Error;

use crate::models::user::{Role, User};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("Password hashing task failed: {err}"))
    }
}

/// Login result containing the issued bearer token and the account behind it.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub user: User,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateUser`] if the lowercased email is taken,
    /// [`AuthError::Validation`] for a malformed email or a short password.
    async fn register(&self, email: &str, password: &str, role: Role) -> Result<String, AuthError>;

    /// Verifies credentials and issues a new bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the user is unknown,
    /// inactive, or the password does not verify.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves a bearer token to the calling user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] if the token was never issued, was
    /// revoked, or its user no longer exists or is inactive.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Revokes a token. Returns whether it was live.
    async fn logout(&self, token: &str) -> Result<bool, AuthError>;

    /// Creates the bootstrap admin if no account holds that email yet.
    /// Returns `true` when an account was created.
    async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AuthError>;
}
