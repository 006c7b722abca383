//! Author CRUD with a referential-integrity deletion guard.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::author::AuthorRepository;
use biblios_database::repositories::book::BookRepository;
use biblios_entity::author::{Author, CreateAuthor, UpdateAuthor};

use crate::context::RequestContext;

/// Manages authors in the catalog.
#[derive(Debug, Clone)]
pub struct AuthorService {
    /// Author repository.
    author_repo: Arc<AuthorRepository>,
    /// Book repository, consulted for the deletion guard.
    book_repo: Arc<BookRepository>,
}

impl AuthorService {
    /// Creates a new author service.
    pub fn new(author_repo: Arc<AuthorRepository>, book_repo: Arc<BookRepository>) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }

    /// Lists authors with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Author>, AppError> {
        self.author_repo.find_all(&page).await
    }

    /// Gets an author by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Author, AppError> {
        self.author_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Author not found"))
    }

    /// Searches authors by name fragment.
    pub async fn search(
        &self,
        _ctx: &RequestContext,
        term: &str,
        page: PageRequest,
    ) -> Result<PageResponse<Author>, AppError> {
        self.author_repo.search(term, &page).await
    }

    /// Creates an author. Librarian and above only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateAuthor,
    ) -> Result<Author, AppError> {
        ctx.require_librarian()?;

        if data.first_name.trim().is_empty() || data.family_name.trim().is_empty() {
            return Err(AppError::validation("Author name cannot be empty"));
        }

        let author = self.author_repo.create(&data).await?;
        info!(author_id = %author.id, by = %ctx.username, "author created");
        Ok(author)
    }

    /// Updates an author. Librarian and above only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        data: UpdateAuthor,
    ) -> Result<Author, AppError> {
        ctx.require_librarian()?;
        self.author_repo.update(&data).await
    }

    /// Deletes an author. Rejected while any book still references them.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_librarian()?;

        let books = self.book_repo.count_by_author(id).await?;
        if books > 0 {
            return Err(AppError::conflict(format!(
                "Author still has {books} book(s); delete or reassign them first"
            )));
        }

        if !self.author_repo.delete(id).await? {
            return Err(AppError::not_found("Author not found"));
        }
        info!(author_id = %id, by = %ctx.username, "author deleted");
        Ok(())
    }
}
