//! Genre repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::genre::{CreateGenre, Genre};

/// Repository for genre CRUD and query operations.
#[derive(Debug, Clone)]
pub struct GenreRepository {
    pool: PgPool,
}

impl GenreRepository {
    /// Create a new genre repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a genre by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        sqlx::query_as::<_, Genre>("SELECT * FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find genre by id", e)
            })
    }

    /// List all genres with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Genre>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count genres", e))?;

        let genres =
            sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name ASC LIMIT $1 OFFSET $2")
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list genres", e)
                })?;

        Ok(PageResponse::new(
            genres,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search genres by name substring.
    pub async fn search(&self, term: &str, page: &PageRequest) -> AppResult<PageResponse<Genre>> {
        let pattern = format!("%{term}%");

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres WHERE name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count genre search results", e)
            })?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT * FROM genres WHERE name ILIKE $1 ORDER BY name ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search genres", e))?;

        Ok(PageResponse::new(
            genres,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new genre.
    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING *")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("genres_name_key") =>
                {
                    AppError::conflict(format!("Genre '{}' already exists", data.name))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to create genre", e),
            })
    }

    /// Rename a genre.
    pub async fn update(&self, id: Uuid, name: &str) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update genre", e))?
        .ok_or_else(|| AppError::not_found(format!("Genre {id} not found")))
    }

    /// Delete a genre by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete genre", e))?;

        Ok(result.rows_affected() > 0)
    }
}
