//! Announcements shown to library visitors.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::announcement::AnnouncementRepository;
use biblios_entity::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

use crate::context::RequestContext;

/// Manages announcements. Writes are admin-only.
#[derive(Debug, Clone)]
pub struct AnnouncementService {
    /// Announcement repository.
    announcement_repo: Arc<AnnouncementRepository>,
}

impl AnnouncementService {
    /// Creates a new announcement service.
    pub fn new(announcement_repo: Arc<AnnouncementRepository>) -> Self {
        Self { announcement_repo }
    }

    /// Lists announcements with pagination, most recent first.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Announcement>, AppError> {
        self.announcement_repo.find_all(&page).await
    }

    /// Gets an announcement by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Announcement, AppError> {
        self.announcement_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Announcement not found"))
    }

    /// Lists announcements published within a date range (inclusive).
    pub async fn list_by_date_range(
        &self,
        _ctx: &RequestContext,
        start: NaiveDate,
        end: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<Announcement>, AppError> {
        if start > end {
            return Err(AppError::validation("Start date must not be after end date"));
        }
        self.announcement_repo
            .find_by_date_range(start, end, &page)
            .await
    }

    /// Publishes an announcement. Admin only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: CreateAnnouncement,
    ) -> Result<Announcement, AppError> {
        ctx.require_admin()?;

        if data.title.trim().is_empty() {
            return Err(AppError::validation("Announcement title cannot be empty"));
        }

        let announcement = self.announcement_repo.create(&data).await?;
        info!(announcement_id = %announcement.id, by = %ctx.username, "announcement published");
        Ok(announcement)
    }

    /// Updates an announcement. Admin only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        data: UpdateAnnouncement,
    ) -> Result<Announcement, AppError> {
        ctx.require_admin()?;
        self.announcement_repo.update(&data).await
    }

    /// Deletes an announcement. Admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_admin()?;

        if !self.announcement_repo.delete(id).await? {
            return Err(AppError::not_found("Announcement not found"));
        }
        info!(announcement_id = %id, by = %ctx.username, "announcement deleted");
        Ok(())
    }
}
