//! Book copy CRUD and status transitions.
//!
//! Status transitions and the deletion guard run through the circulation
//! repository, which enforces them inside database transactions.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::book::BookRepository;
use biblios_database::repositories::circulation::CirculationRepository;
use biblios_database::repositories::instance::InstanceRepository;
use biblios_entity::instance::{
    BookInstance, CreateBookInstance, InstanceStatus, UpdateBookInstance,
};

use crate::context::RequestContext;

/// Manages physical copies of books.
#[derive(Debug, Clone)]
pub struct InstanceService {
    /// Instance repository for reads and plain field updates.
    instance_repo: Arc<InstanceRepository>,
    /// Book repository, used to validate the owning book on create.
    book_repo: Arc<BookRepository>,
    /// Circulation repository for guarded transitions and deletion.
    circulation_repo: Arc<CirculationRepository>,
}

impl InstanceService {
    /// Creates a new instance service.
    pub fn new(
        instance_repo: Arc<InstanceRepository>,
        book_repo: Arc<BookRepository>,
        circulation_repo: Arc<CirculationRepository>,
    ) -> Self {
        Self {
            instance_repo,
            book_repo,
            circulation_repo,
        }
    }

    /// Lists copies with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<BookInstance>, AppError> {
        self.instance_repo.find_all(&page).await
    }

    /// Gets a copy by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<BookInstance, AppError> {
        self.instance_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Book copy not found"))
    }

    /// Lists all copies of one book.
    pub async fn list_by_book(
        &self,
        _ctx: &RequestContext,
        book_id: Uuid,
    ) -> Result<Vec<BookInstance>, AppError> {
        self.instance_repo.find_by_book(book_id).await
    }

    /// Registers a new copy. Librarian and above only.
    ///
    /// New copies always start as Available.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateBookInstance,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;

        if data.imprint.trim().is_empty() {
            return Err(AppError::validation("Imprint cannot be empty"));
        }
        self.book_repo
            .find_by_id(data.book_id)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found"))?;

        let instance = self.instance_repo.create(&data).await?;
        info!(instance_id = %instance.id, book_id = %instance.book_id, by = %ctx.username,
              "book copy registered");
        Ok(instance)
    }

    /// Updates a copy's imprint or due date. Librarian and above only.
    ///
    /// The due date belongs to an open loan, so it can only be changed
    /// while the copy is Loaned.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        data: UpdateBookInstance,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;

        if data.available_by.is_some() {
            let current = self.get(ctx, data.id).await?;
            if current.status != InstanceStatus::Loaned {
                return Err(AppError::conflict(
                    "Due dates can only be set on loaned copies.",
                ));
            }
        }

        self.instance_repo.update(&data).await
    }

    /// Deletes a copy, allowed only from Available or Maintenance.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_librarian()?;
        self.circulation_repo.delete_instance(id).await?;
        info!(instance_id = %id, by = %ctx.username, "book copy deleted");
        Ok(())
    }

    /// Takes a returned copy back: `Loaned -> Available`.
    pub async fn return_copy(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;
        let instance = self.circulation_repo.return_copy(id).await?;
        info!(instance_id = %id, by = %ctx.username, "copy returned");
        Ok(instance)
    }

    /// Pulls a copy off the shelf for maintenance.
    pub async fn send_to_maintenance(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;
        let instance = self.circulation_repo.send_to_maintenance(id).await?;
        info!(instance_id = %id, by = %ctx.username, "copy sent to maintenance");
        Ok(instance)
    }

    /// Puts a maintained copy back on the shelf: `Maintenance -> Available`.
    pub async fn activate(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;
        let instance = self.circulation_repo.activate(id).await?;
        info!(instance_id = %id, by = %ctx.username, "copy reactivated");
        Ok(instance)
    }
}
