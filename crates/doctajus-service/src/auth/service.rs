//! Credential checks and token issuing.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use doctajus_auth::jwt::JwtEncoder;
use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_entity::user::{User, UserRole};

use crate::context::RequestContext;
use crate::user::{NewUser, UserService};

/// Token plus the user it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

/// Self-registration input. The role is always `cliente`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

/// Handles login and registration.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserService>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, encoder: Arc<JwtEncoder>) -> Self {
        Self { users, encoder }
    }

    /// Exchange credentials for a token. Unknown email, wrong password and
    /// inactive accounts are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let invalid = || AppError::unauthorized("Invalid credentials");

        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login failed: unknown email");
            return Err(invalid());
        };
        if !user.can_login() {
            warn!(user_id = %user.id, "Login failed: inactive account");
            return Err(invalid());
        }
        if !self.users.verify_password(&user, password)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }

        self.users.touch_last_login(user.id).await?;
        let access_token = self.encoder.generate_access_token(&user)?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession { access_token, user })
    }

    /// Create a client account and log it in.
    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        let user = self
            .users
            .create_account(NewUser {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                password: registration.password,
                role: Some(UserRole::Cliente),
                profile_picture: registration.profile_picture,
            })
            .await?;

        let access_token = self.encoder.generate_access_token(&user)?;
        info!(user_id = %user.id, "User registered");
        Ok(AuthSession { access_token, user })
    }

    /// The caller's own account.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users.find_one(ctx.user_id).await
    }
}
