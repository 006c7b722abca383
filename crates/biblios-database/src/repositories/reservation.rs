//! Reservation repository implementation (reads only; creation, issue,
//! and cancellation go through the circulation repository).

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::reservation::Reservation;

/// Repository for reservation lookups.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation by id", e)
            })
    }

    /// List all reservations with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
            })?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations ORDER BY reserved_on DESC, created_at DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reservations", e))?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List reservations placed within a date range (inclusive).
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE reserved_on BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reservations in range", e)
        })?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE reserved_on BETWEEN $1 AND $2 \
             ORDER BY reserved_on DESC LIMIT $3 OFFSET $4",
        )
        .bind(start)
        .bind(end)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reservations in range", e)
        })?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
