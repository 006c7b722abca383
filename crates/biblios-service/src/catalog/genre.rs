//! Genre CRUD with a referential-integrity deletion guard.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::book::BookRepository;
use biblios_database::repositories::genre::GenreRepository;
use biblios_entity::genre::{CreateGenre, Genre};

use crate::context::RequestContext;

/// Manages genres in the catalog.
#[derive(Debug, Clone)]
pub struct GenreService {
    /// Genre repository.
    genre_repo: Arc<GenreRepository>,
    /// Book repository, consulted for the deletion guard.
    book_repo: Arc<BookRepository>,
}

impl GenreService {
    /// Creates a new genre service.
    pub fn new(genre_repo: Arc<GenreRepository>, book_repo: Arc<BookRepository>) -> Self {
        Self {
            genre_repo,
            book_repo,
        }
    }

    /// Lists genres with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Genre>, AppError> {
        self.genre_repo.find_all(&page).await
    }

    /// Gets a genre by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Genre, AppError> {
        self.genre_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Genre not found"))
    }

    /// Searches genres by name fragment.
    pub async fn search(
        &self,
        _ctx: &RequestContext,
        term: &str,
        page: PageRequest,
    ) -> Result<PageResponse<Genre>, AppError> {
        self.genre_repo.search(term, &page).await
    }

    /// Creates a genre. Librarian and above only.
    pub async fn create(&self, ctx: &RequestContext, data: CreateGenre) -> Result<Genre, AppError> {
        ctx.require_librarian()?;

        if data.name.trim().is_empty() {
            return Err(AppError::validation("Genre name cannot be empty"));
        }

        let genre = self.genre_repo.create(&data).await?;
        info!(genre_id = %genre.id, by = %ctx.username, "genre created");
        Ok(genre)
    }

    /// Renames a genre. Librarian and above only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: &str,
    ) -> Result<Genre, AppError> {
        ctx.require_librarian()?;

        if name.trim().is_empty() {
            return Err(AppError::validation("Genre name cannot be empty"));
        }
        self.genre_repo.update(id, name).await
    }

    /// Deletes a genre. Rejected while any book still references it.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_librarian()?;

        let books = self.book_repo.count_by_genre(id).await?;
        if books > 0 {
            return Err(AppError::conflict(format!(
                "Genre still has {books} book(s); delete or reassign them first"
            )));
        }

        if !self.genre_repo.delete(id).await? {
            return Err(AppError::not_found("Genre not found"));
        }
        info!(genre_id = %id, by = %ctx.username, "genre deleted");
        Ok(())
    }
}
