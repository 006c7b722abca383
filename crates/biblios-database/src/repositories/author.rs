//! Author repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::author::{Author, CreateAuthor, UpdateAuthor};

/// Repository for author CRUD and query operations.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// Create a new author repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an author by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find author by id", e)
            })
    }

    /// List all authors with pagination, family name first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Author>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count authors", e))?;

        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY family_name ASC, first_name ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list authors", e))?;

        Ok(PageResponse::new(
            authors,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search authors by name substring.
    pub async fn search(&self, term: &str, page: &PageRequest) -> AppResult<PageResponse<Author>> {
        let pattern = format!("%{term}%");

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM authors WHERE first_name ILIKE $1 OR family_name ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count author search results", e)
        })?;

        let authors = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors WHERE first_name ILIKE $1 OR family_name ILIKE $1 \
             ORDER BY family_name ASC, first_name ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search authors", e))?;

        Ok(PageResponse::new(
            authors,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new author.
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create author", e))
    }

    /// Update an author's fields.
    pub async fn update(&self, data: &UpdateAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "UPDATE authors SET first_name = COALESCE($2, first_name), \
                                family_name = COALESCE($3, family_name), \
                                date_of_birth = COALESCE($4, date_of_birth), \
                                date_of_death = COALESCE($5, date_of_death), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update author", e))?
        .ok_or_else(|| AppError::not_found(format!("Author {} not found", data.id)))
    }

    /// Delete an author by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete author", e))?;

        Ok(result.rows_affected() > 0)
    }
}
