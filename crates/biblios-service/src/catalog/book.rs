//! Book CRUD, search, and the copy-count ranking.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::book::BookRepository;
use biblios_database::repositories::instance::InstanceRepository;
use biblios_entity::book::{Book, BookWithCopyCount, CreateBook, UpdateBook};

use crate::context::RequestContext;

/// Manages books in the catalog.
#[derive(Debug, Clone)]
pub struct BookService {
    /// Book repository.
    book_repo: Arc<BookRepository>,
    /// Instance repository, consulted for the deletion guard.
    instance_repo: Arc<InstanceRepository>,
}

impl BookService {
    /// Creates a new book service.
    pub fn new(book_repo: Arc<BookRepository>, instance_repo: Arc<InstanceRepository>) -> Self {
        Self {
            book_repo,
            instance_repo,
        }
    }

    /// Lists books with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Book>, AppError> {
        self.book_repo.find_all(&page).await
    }

    /// Gets a book by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Book, AppError> {
        self.book_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    /// Lists books ranked by how many copies the library owns.
    pub async fn top(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<BookWithCopyCount>, AppError> {
        self.book_repo.find_top(&page).await
    }

    /// Searches books by title fragment.
    pub async fn search(
        &self,
        _ctx: &RequestContext,
        term: &str,
        page: PageRequest,
    ) -> Result<PageResponse<Book>, AppError> {
        self.book_repo.search(term, &page).await
    }

    /// Creates a book. Librarian and above only.
    ///
    /// Author and genre references are validated by the repository,
    /// which maps foreign-key violations to validation errors.
    pub async fn create(&self, ctx: &RequestContext, data: CreateBook) -> Result<Book, AppError> {
        ctx.require_librarian()?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Book title cannot be empty"));
        }

        let book = self.book_repo.create(&data).await?;
        info!(book_id = %book.id, title = %book.title, by = %ctx.username, "book created");
        Ok(book)
    }

    /// Updates a book. Librarian and above only.
    pub async fn update(&self, ctx: &RequestContext, data: UpdateBook) -> Result<Book, AppError> {
        ctx.require_librarian()?;
        self.book_repo.update(&data).await
    }

    /// Deletes a book. Rejected while any copy of it still exists.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_librarian()?;

        let copies = self.instance_repo.count_by_book(id).await?;
        if copies > 0 {
            return Err(AppError::conflict(format!(
                "Book still has {copies} copies; delete them first"
            )));
        }

        if !self.book_repo.delete(id).await? {
            return Err(AppError::not_found("Book not found"));
        }
        info!(book_id = %id, by = %ctx.username, "book deleted");
        Ok(())
    }
}
