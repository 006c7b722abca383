//! Policy repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::policy::{CreatePolicy, Policy};

/// Repository for policy CRUD operations.
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Create a new policy repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a policy by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Policy>> {
        sqlx::query_as::<_, Policy>("SELECT * FROM policies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find policy by id", e)
            })
    }

    /// List all policies with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Policy>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM policies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count policies", e)
            })?;

        let policies = sqlx::query_as::<_, Policy>(
            "SELECT * FROM policies ORDER BY property ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list policies", e))?;

        Ok(PageResponse::new(
            policies,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new policy.
    pub async fn create(&self, data: &CreatePolicy) -> AppResult<Policy> {
        sqlx::query_as::<_, Policy>(
            "INSERT INTO policies (property, value, is_core) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(&data.property)
        .bind(&data.value)
        .bind(data.is_core)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("policies_property_key") =>
            {
                AppError::conflict(format!("Policy '{}' already exists", data.property))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create policy", e),
        })
    }

    /// Update a policy's value.
    pub async fn update(&self, id: Uuid, value: &str) -> AppResult<Policy> {
        sqlx::query_as::<_, Policy>(
            "UPDATE policies SET value = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update policy", e))?
        .ok_or_else(|| AppError::not_found(format!("Policy {id} not found")))
    }

    /// Delete a policy by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete policy", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
