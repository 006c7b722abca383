//! Account registration, login, and session issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use biblios_auth::password::PasswordHasher;
use biblios_auth::token::TokenCodec;
use biblios_core::config::AuthConfig;
use biblios_core::error::AppError;
use biblios_database::repositories::user::UserRepository;
use biblios_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Request to register a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password.
    pub password: String,
    /// Display name (optional).
    pub display_name: Option<String>,
}

/// Result of a successful login: the user plus a signed session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Signed session token to place in the session cookie.
    pub token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

/// Handles registration, credential verification, and session tokens.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token codec.
    codec: Arc<TokenCodec>,
    /// Minimum password length from configuration.
    password_min_length: usize,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        codec: Arc<TokenCodec>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            codec,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new member account.
    ///
    /// New accounts always start as members; role changes go through
    /// the admin user service.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        if req.password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: req.email,
                password_hash,
                display_name: req.display_name,
                role: UserRole::Member,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "account registered");
        Ok(user)
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to
    /// the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let (token, expires_at) =
            self.codec
                .generate_session_token(user.id, &user.role, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "user logged in");
        Ok(LoginOutcome {
            user,
            token,
            expires_at,
        })
    }

    /// Fetches the profile of the authenticated user.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.find_user(ctx.user_id).await
    }

    async fn find_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
