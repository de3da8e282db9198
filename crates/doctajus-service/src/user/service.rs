//! User CRUD with password hashing and email uniqueness.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use doctajus_auth::password::{PasswordHasher, PasswordValidator};
use doctajus_core::error::AppError;
use doctajus_core::result::AppResult;
use doctajus_database::repositories::user::UserRepository;
use doctajus_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Input for creating a user. The password is plaintext here and hashed
/// before it reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    pub profile_picture: Option<String>,
}

/// Partial update. A new password is re-hashed.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub profile_picture: Option<String>,
    pub is_active: Option<bool>,
}

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(format!("User with ID \"{id}\" not found"))
}

fn require_admin(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Only administrators can manage users"))
    }
}

/// Only admins and abogados see the user directory.
fn require_directory_access(ctx: &RequestContext) -> AppResult<()> {
    if matches!(ctx.role, UserRole::Admin | UserRole::Abogado) {
        Ok(())
    } else {
        Err(AppError::forbidden("You are not allowed to list users"))
    }
}

/// Admins may change any account. Everyone else may only edit their own
/// profile fields, never the role or the active flag.
fn authorize_update(ctx: &RequestContext, id: Uuid, changes: &UserChanges) -> AppResult<()> {
    if ctx.is_admin() {
        return Ok(());
    }
    if ctx.user_id != id {
        return Err(AppError::forbidden("You can only update your own account"));
    }
    if changes.role.is_some() || changes.is_active.is_some() {
        return Err(AppError::forbidden(
            "Only administrators can change a user's role or status",
        ));
    }
    Ok(())
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
        }
    }

    /// Create an account on behalf of an administrator.
    pub async fn create(&self, ctx: &RequestContext, input: NewUser) -> AppResult<User> {
        require_admin(ctx)?;
        let user = self.create_account(input).await?;
        info!(actor = %ctx.user_id, user_id = %user.id, "User created by administrator");
        Ok(user)
    }

    /// Insert an account without a caller check. Duplicate emails are
    /// rejected with a conflict.
    pub(crate) async fn create_account(&self, input: NewUser) -> AppResult<User> {
        self.validator.validate(&input.password)?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
                role: input.role.unwrap_or_default(),
                profile_picture: input.profile_picture,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn find_all(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        require_directory_access(ctx)?;
        self.user_repo.find_all().await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Look up by email, returning `None` when absent.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_email(email).await
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UserChanges,
    ) -> AppResult<User> {
        authorize_update(ctx, id, &changes)?;

        let password_hash = match changes.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        if let Some(email) = changes.email.as_deref() {
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Email already registered"));
                }
            }
        }

        let user = self
            .user_repo
            .update(
                id,
                &UpdateUser {
                    first_name: changes.first_name,
                    last_name: changes.last_name,
                    email: changes.email,
                    password_hash,
                    role: changes.role,
                    profile_picture: changes.profile_picture,
                    is_active: changes.is_active,
                },
            )
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(actor = %ctx.user_id, user_id = %id, "User updated");
        Ok(user)
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, id: Uuid) -> AppResult<()> {
        self.user_repo.update_last_login(id).await
    }

    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        require_admin(ctx)?;
        if !self.user_repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(actor = %ctx.user_id, user_id = %id, "User deleted");
        Ok(())
    }

    /// Verify a plaintext password against the user's stored hash.
    pub fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        self.hasher.verify_password(password, &user.password_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: UserRole) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), role, "x@doctajus.pe".into(), None, None)
    }

    #[test]
    fn test_only_admin_manages_accounts() {
        assert!(require_admin(&ctx(UserRole::Admin)).is_ok());
        for role in [UserRole::Abogado, UserRole::Asistente, UserRole::Cliente] {
            let err = require_admin(&ctx(role)).unwrap_err();
            assert_eq!(err.kind, doctajus_core::error::ErrorKind::Forbidden);
        }
    }

    #[test]
    fn test_directory_is_admin_and_abogado_only() {
        assert!(require_directory_access(&ctx(UserRole::Admin)).is_ok());
        assert!(require_directory_access(&ctx(UserRole::Abogado)).is_ok());
        assert!(require_directory_access(&ctx(UserRole::Asistente)).is_err());
        assert!(require_directory_access(&ctx(UserRole::Cliente)).is_err());
    }

    #[test]
    fn test_self_update_cannot_escalate() {
        let cliente = ctx(UserRole::Cliente);

        let own_name = UserChanges {
            first_name: Some("Rosa".into()),
            ..Default::default()
        };
        assert!(authorize_update(&cliente, cliente.user_id, &own_name).is_ok());

        let promote = UserChanges {
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        assert!(authorize_update(&cliente, cliente.user_id, &promote).is_err());

        let reactivate = UserChanges {
            is_active: Some(true),
            ..Default::default()
        };
        assert!(authorize_update(&cliente, cliente.user_id, &reactivate).is_err());

        assert!(authorize_update(&cliente, Uuid::new_v4(), &own_name).is_err());
    }

    #[test]
    fn test_admin_updates_anyone() {
        let admin = ctx(UserRole::Admin);
        let promote = UserChanges {
            role: Some(UserRole::Abogado),
            is_active: Some(false),
            ..Default::default()
        };
        assert!(authorize_update(&admin, Uuid::new_v4(), &promote).is_ok());
    }
}
