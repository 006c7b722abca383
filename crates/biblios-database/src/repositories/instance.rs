//! Book instance repository implementation.
//!
//! Status transitions and the deletion guard live in
//! [`crate::repositories::circulation`]; this repository covers plain
//! CRUD and lookups.

use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::instance::{BookInstance, CreateBookInstance, UpdateBookInstance};

/// Repository for book instance CRUD and query operations.
#[derive(Debug, Clone)]
pub struct InstanceRepository {
    pool: PgPool,
}

impl InstanceRepository {
    /// Create a new instance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a book instance by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find book instance by id", e)
            })
    }

    /// List all book instances with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<BookInstance>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count book instances", e)
            })?;

        let instances = sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list book instances", e)
        })?;

        Ok(PageResponse::new(
            instances,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the copies of a book.
    pub async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        sqlx::query_as::<_, BookInstance>(
            "SELECT * FROM book_instances WHERE book_id = $1 ORDER BY imprint ASC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list copies of book", e)
        })
    }

    /// Count copies registered for a book.
    pub async fn count_by_book(&self, book_id: Uuid) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE book_id = $1")
                .bind(book_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count copies of book", e)
                })?;
        Ok(count as u64)
    }

    /// Register a new copy; new copies start on the shelf.
    pub async fn create(&self, data: &CreateBookInstance) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            "INSERT INTO book_instances (book_id, imprint, status) \
             VALUES ($1, $2, 'available') \
             RETURNING *",
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("book_instances_book_id_fkey") =>
            {
                AppError::validation("Referenced book does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create book instance", e),
        })
    }

    /// Update a copy's descriptive fields.
    pub async fn update(&self, data: &UpdateBookInstance) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET imprint = COALESCE($2, imprint), \
                                       available_by = COALESCE($3, available_by), \
                                       updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.imprint)
        .bind(data.available_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update book instance", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Book instance {} not found", data.id)))
    }
}
