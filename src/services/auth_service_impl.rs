//! In-memory implementation of the `AuthService` trait.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use tokio::task;
use tracing::{info, warn};

use crate::constants::crypto::TOKEN_BYTES;
use crate::db::Store;
use crate::models::user::{Role, User, is_valid_email, normalize_email};
use crate::services::auth_service::{AuthError, AuthService, LoginResult};
use crate::services::password::{PasswordHasher, UNKNOWN_ACCOUNT_RECORD};

pub struct InMemoryAuthService {
    store: Store,
    hasher: PasswordHasher,
    min_password_length: usize,
}

impl InMemoryAuthService {
    #[must_use]
    pub const fn new(store: Store, hasher: PasswordHasher, min_password_length: usize) -> Self {
        Self {
            store,
            hasher,
            min_password_length,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let password = password.to_string();
        // PBKDF2 at 100k rounds is CPU-bound; keep it off the async workers.
        Ok(task::spawn_blocking(move || hasher.hash(&password)).await?)
    }

    async fn verify_password(&self, password: &str, record: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        let password = password.to_string();
        let record = record.to_string();
        Ok(task::spawn_blocking(move || hasher.verify(&password, &record)).await?)
    }

    async fn create_user(&self, email: &str, password: &str, role: Role) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::Validation(format!(
                "Invalid email address: {email}"
            )));
        }

        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        if password.chars().count() < self.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.min_password_length
            )));
        }

        Ok(User {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email,
            password_hash: self.hash_password(password).await?,
            role,
            is_active: true,
            created_at: chrono::Utc::now().to_rfc3339(),
            permissions: role.default_permissions(),
        })
    }
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn register(&self, email: &str, password: &str, role: Role) -> Result<String, AuthError> {
        // Cheap pre-check so a duplicate does not pay for a hash.
        if self.store.get_user_by_email(email).await.is_some() {
            return Err(AuthError::DuplicateUser);
        }

        let user = self.create_user(email, password, role).await?;
        let user_id = user.id.clone();
        let email = user.email.clone();

        if !self.store.insert_user(user).await {
            return Err(AuthError::DuplicateUser);
        }

        info!(user_id = %user_id, email = %email, role = %role, "User registered");
        Ok(user_id)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some(user) = self.store.get_user_by_email(email).await else {
            self.verify_password(password, UNKNOWN_ACCOUNT_RECORD).await?;
            warn!("Login rejected: unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active || !self.verify_password(password, &user.password_hash).await? {
            warn!(user_id = %user.id, "Login rejected: bad password or inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = generate_token();
        self.store
            .insert_session(access_token.clone(), user.id.clone())
            .await;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { access_token, user })
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self
            .store
            .get_session_user_id(token)
            .await
            .ok_or(AuthError::Unauthorized)?;

        match self.store.get_user_by_id(&user_id).await {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AuthError::Unauthorized),
        }
    }

    async fn logout(&self, token: &str) -> Result<bool, AuthError> {
        let revoked = self.store.remove_session(token).await;
        if revoked {
            info!("Session token revoked");
        }
        Ok(revoked)
    }

    async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        match self.register(email, password, Role::Admin).await {
            Ok(_) => Ok(true),
            Err(AuthError::DuplicateUser) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// 32 random bytes as URL-safe base64 without padding (43 characters).
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}
