//! Book repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_entity::book::{Book, BookWithCopyCount, CreateBook, UpdateBook};

/// Repository for book CRUD and query operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a book by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find book by id", e)
            })
    }

    /// List all books with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Book>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count books", e))?;

        let books =
            sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title ASC LIMIT $1 OFFSET $2")
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to list books", e)
                })?;

        Ok(PageResponse::new(
            books,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List books ranked by how many physical copies the library holds.
    pub async fn find_top(&self, page: &PageRequest) -> AppResult<PageResponse<BookWithCopyCount>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count books", e))?;

        let books = sqlx::query_as::<_, BookWithCopyCount>(
            "SELECT b.id, b.title, b.author_id, b.genre_id, b.summary, b.isbn, \
                    COUNT(i.id) AS copy_count \
             FROM books b LEFT JOIN book_instances i ON i.book_id = b.id \
             GROUP BY b.id \
             ORDER BY copy_count DESC, b.title ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list top books", e))?;

        Ok(PageResponse::new(
            books,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Search books by title or ISBN substring.
    pub async fn search(&self, term: &str, page: &PageRequest) -> AppResult<PageResponse<Book>> {
        let pattern = format!("%{term}%");

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1 OR isbn ILIKE $1")
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to count book search results",
                        e,
                    )
                })?;

        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books WHERE title ILIKE $1 OR isbn ILIKE $1 \
             ORDER BY title ASC LIMIT $2 OFFSET $3",
        )
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search books", e))?;

        Ok(PageResponse::new(
            books,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count books referencing an author.
    pub async fn count_by_author(&self, author_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count books by author", e)
            })?;
        Ok(count as u64)
    }

    /// Count books referencing a genre.
    pub async fn count_by_genre(&self, genre_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE genre_id = $1")
            .bind(genre_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count books by genre", e)
            })?;
        Ok(count as u64)
    }

    /// Create a new book.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author_id, genre_id, summary, isbn) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.genre_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("books_author_id_fkey") =>
            {
                AppError::validation("Referenced author does not exist")
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("books_genre_id_fkey") =>
            {
                AppError::validation("Referenced genre does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create book", e),
        })
    }

    /// Update a book's fields.
    pub async fn update(&self, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "UPDATE books SET title = COALESCE($2, title), \
                              author_id = COALESCE($3, author_id), \
                              genre_id = COALESCE($4, genre_id), \
                              summary = COALESCE($5, summary), \
                              isbn = COALESCE($6, isbn), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.genre_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update book", e))?
        .ok_or_else(|| AppError::not_found(format!("Book {} not found", data.id)))
    }

    /// Delete a book by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete book", e))?;

        Ok(result.rows_affected() > 0)
    }
}
