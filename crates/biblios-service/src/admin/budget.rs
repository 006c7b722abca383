//! Budget entries with money-range and date-range filters.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::budget::BudgetRepository;
use biblios_entity::budget::{Budget, CreateBudget, UpdateBudget};

use crate::context::RequestContext;

/// Manages budget entries. Writes are admin-only.
#[derive(Debug, Clone)]
pub struct BudgetService {
    /// Budget repository.
    budget_repo: Arc<BudgetRepository>,
}

impl BudgetService {
    /// Creates a new budget service.
    pub fn new(budget_repo: Arc<BudgetRepository>) -> Self {
        Self { budget_repo }
    }

    /// Lists budget entries with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Budget>, AppError> {
        self.budget_repo.find_all(&page).await
    }

    /// Gets a budget entry by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Budget, AppError> {
        self.budget_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Budget entry not found"))
    }

    /// Lists entries whose amount falls within `[min, max]`.
    pub async fn list_by_money_range(
        &self,
        _ctx: &RequestContext,
        min: f64,
        max: f64,
        page: PageRequest,
    ) -> Result<PageResponse<Budget>, AppError> {
        if min > max {
            return Err(AppError::validation(
                "Minimum amount must not exceed maximum amount",
            ));
        }
        self.budget_repo.find_by_money_range(min, max, &page).await
    }

    /// Lists entries spent within a date range (inclusive).
    pub async fn list_by_date_range(
        &self,
        _ctx: &RequestContext,
        start: NaiveDate,
        end: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<Budget>, AppError> {
        if start > end {
            return Err(AppError::validation("Start date must not be after end date"));
        }
        self.budget_repo.find_by_date_range(start, end, &page).await
    }

    /// Records a budget entry. Admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateBudget,
    ) -> Result<Budget, AppError> {
        ctx.require_admin()?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Budget title cannot be empty"));
        }
        if !data.amount.is_finite() {
            return Err(AppError::validation("Budget amount must be a finite number"));
        }

        let budget = self.budget_repo.create(&data).await?;
        info!(budget_id = %budget.id, amount = budget.amount, by = %ctx.username,
              "budget entry recorded");
        Ok(budget)
    }

    /// Updates a budget entry. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        data: UpdateBudget,
    ) -> Result<Budget, AppError> {
        ctx.require_admin()?;

        if let Some(amount) = data.amount
            && !amount.is_finite()
        {
            return Err(AppError::validation("Budget amount must be a finite number"));
        }
        self.budget_repo.update(&data).await
    }

    /// Deletes a budget entry. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;

        if !self.budget_repo.delete(id).await? {
            return Err(AppError::not_found("Budget entry not found"));
        }
        info!(budget_id = %id, by = %ctx.username, "budget entry deleted");
        Ok(())
    }
}
