//! Announcement repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Repository for announcement CRUD and query operations.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an announcement by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>> {
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find announcement by id", e)
            })
    }

    /// List all announcements with pagination, most recent first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Announcement>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM announcements")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count announcements", e)
            })?;

        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements ORDER BY published_on DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list announcements", e)
        })?;

        Ok(PageResponse::new(
            announcements,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List announcements published within a date range (inclusive).
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Announcement>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM announcements WHERE published_on BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to count announcements in range",
                e,
            )
        })?;

        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements WHERE published_on BETWEEN $1 AND $2 \
             ORDER BY published_on DESC LIMIT $3 OFFSET $4",
        )
        .bind(start)
        .bind(end)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list announcements in range", e)
        })?;

        Ok(PageResponse::new(
            announcements,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new announcement.
    pub async fn create(&self, data: &CreateAnnouncement) -> AppResult<Announcement> {
        sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (title, body, published_on) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.published_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create announcement", e)
        })
    }

    /// Update an announcement's fields.
    pub async fn update(&self, data: &UpdateAnnouncement) -> AppResult<Announcement> {
        sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET title = COALESCE($2, title), \
                                      body = COALESCE($3, body), \
                                      published_on = COALESCE($4, published_on), \
                                      updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.published_on)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update announcement", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Announcement {} not found", data.id)))
    }

    /// Delete an announcement by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete announcement", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
