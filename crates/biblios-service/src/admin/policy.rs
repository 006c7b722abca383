//! Library policies. Core policies are protected from deletion.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::policy::PolicyRepository;
use biblios_entity::policy::{CreatePolicy, Policy};

use crate::context::RequestContext;

/// Manages library policies. Writes are admin-only.
#[derive(Debug, Clone)]
pub struct PolicyService {
    /// Policy repository.
    policy_repo: Arc<PolicyRepository>,
}

impl PolicyService {
    /// Creates a new policy service.
    pub fn new(policy_repo: Arc<PolicyRepository>) -> Self {
        Self { policy_repo }
    }

    /// Lists policies with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Policy>, AppError> {
        self.policy_repo.find_all(&page).await
    }

    /// Gets a policy by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Policy, AppError> {
        self.policy_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Policy not found"))
    }

    /// Creates a policy. Admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreatePolicy,
    ) -> Result<Policy, AppError> {
        ctx.require_admin()?;

        if data.property.trim().is_empty() {
            return Err(AppError::validation("Policy property cannot be empty"));
        }

        let policy = self.policy_repo.create(&data).await?;
        info!(policy_id = %policy.id, property = %policy.property, by = %ctx.username,
              "policy created");
        Ok(policy)
    }

    /// Updates a policy's value. Admin only.
    ///
    /// The property name and core flag are fixed at creation.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        value: &str,
    ) -> Result<Policy, AppError> {
        ctx.require_admin()?;
        self.policy_repo.update(id, value).await
    }

    /// Deletes a policy. Core policies cannot be deleted.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;

        let policy = self
            .policy_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Policy not found"))?;

        if policy.is_core {
            return Err(AppError::conflict("Core policies cannot be deleted."));
        }

        self.policy_repo.delete(id).await?;
        info!(policy_id = %id, property = %policy.property, by = %ctx.username,
              "policy deleted");
        Ok(())
    }
}
