//! User administration: listing accounts and changing roles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::user::UserRepository;
use biblios_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Admin-only user management.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Lists all accounts with pagination. Admin only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        ctx.require_admin()?;
        self.user_repo.find_all(&page).await
    }

    /// Changes an account's role. Admin only.
    ///
    /// Admins cannot demote themselves; this keeps at least the acting
    /// admin in place after the change.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        ctx.require_admin()?;

        if user_id == ctx.user_id && role != UserRole::Admin {
            return Err(AppError::conflict("Admins cannot demote their own account"));
        }

        let user = self.user_repo.update_role(user_id, role).await?;
        info!(user_id = %user.id, role = %user.role, by = %ctx.username, "user role changed");
        Ok(user)
    }
}
