//! Budget repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::budget::{Budget, CreateBudget, UpdateBudget};

/// Repository for budget CRUD and query operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    /// Create a new budget repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a budget entry by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Budget>> {
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find budget by id", e)
            })
    }

    /// List all budget entries with pagination, most recent first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Budget>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM budgets")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count budgets", e))?;

        let budgets = sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets ORDER BY spent_on DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list budgets", e))?;

        Ok(PageResponse::new(
            budgets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List budget entries with amounts within a range (inclusive).
    pub async fn find_by_money_range(
        &self,
        min: f64,
        max: f64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Budget>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM budgets WHERE amount BETWEEN $1 AND $2")
                .bind(min)
                .bind(max)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count budgets in range", e)
                })?;

        let budgets = sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets WHERE amount BETWEEN $1 AND $2 \
             ORDER BY amount DESC LIMIT $3 OFFSET $4",
        )
        .bind(min)
        .bind(max)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list budgets in range", e)
        })?;

        Ok(PageResponse::new(
            budgets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List budget entries spent within a date range (inclusive).
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Budget>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM budgets WHERE spent_on BETWEEN $1 AND $2")
                .bind(start)
                .bind(end)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count budgets in range", e)
                })?;

        let budgets = sqlx::query_as::<_, Budget>(
            "SELECT * FROM budgets WHERE spent_on BETWEEN $1 AND $2 \
             ORDER BY spent_on DESC LIMIT $3 OFFSET $4",
        )
        .bind(start)
        .bind(end)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list budgets in range", e)
        })?;

        Ok(PageResponse::new(
            budgets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new budget entry.
    pub async fn create(&self, data: &CreateBudget) -> AppResult<Budget> {
        sqlx::query_as::<_, Budget>(
            "INSERT INTO budgets (title, amount, spent_on, note) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(data.amount)
        .bind(data.spent_on)
        .bind(&data.note)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create budget", e))
    }

    /// Update a budget entry's fields.
    pub async fn update(&self, data: &UpdateBudget) -> AppResult<Budget> {
        sqlx::query_as::<_, Budget>(
            "UPDATE budgets SET title = COALESCE($2, title), \
                                amount = COALESCE($3, amount), \
                                spent_on = COALESCE($4, spent_on), \
                                note = COALESCE($5, note), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(data.amount)
        .bind(data.spent_on)
        .bind(&data.note)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update budget", e))?
        .ok_or_else(|| AppError::not_found(format!("Budget {} not found", data.id)))
    }

    /// Delete a budget entry by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete budget", e))?;

        Ok(result.rows_affected() > 0)
    }
}
