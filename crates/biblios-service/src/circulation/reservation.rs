//! Reservation lifecycle: create, issue as a loan, cancel.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::{PageRequest, PageResponse};
use biblios_database::repositories::circulation::CirculationRepository;
use biblios_database::repositories::reservation::ReservationRepository;
use biblios_entity::instance::BookInstance;
use biblios_entity::reservation::Reservation;

use crate::context::RequestContext;

/// Request to reserve a copy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReserveRequest {
    /// The copy to reserve.
    pub instance_id: Uuid,
    /// Who the reservation is for. Defaults to the requesting user;
    /// reserving for someone else requires librarian privileges.
    pub user_id: Option<Uuid>,
}

/// Manages reservations and the issue/cancel workflow.
#[derive(Debug, Clone)]
pub struct ReservationService {
    /// Reservation repository for reads.
    reservation_repo: Arc<ReservationRepository>,
    /// Circulation repository for transactional state changes.
    circulation_repo: Arc<CirculationRepository>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        circulation_repo: Arc<CirculationRepository>,
    ) -> Self {
        Self {
            reservation_repo,
            circulation_repo,
        }
    }

    /// Lists reservations with pagination.
    pub async fn list(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Reservation>, AppError> {
        self.reservation_repo.find_all(&page).await
    }

    /// Gets a reservation by ID.
    pub async fn get(&self, _ctx: &RequestContext, id: Uuid) -> Result<Reservation, AppError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    /// Lists reservations made within a date range (inclusive).
    pub async fn list_by_date_range(
        &self,
        _ctx: &RequestContext,
        start: NaiveDate,
        end: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<Reservation>, AppError> {
        if start > end {
            return Err(AppError::validation("Start date must not be after end date"));
        }
        self.reservation_repo
            .find_by_date_range(start, end, &page)
            .await
    }

    /// Reserves an available copy.
    ///
    /// Members may only reserve for themselves; librarians may reserve
    /// on behalf of any user.
    pub async fn reserve(
        &self,
        ctx: &RequestContext,
        req: ReserveRequest,
    ) -> Result<Reservation, AppError> {
        let user_id = req.user_id.unwrap_or(ctx.user_id);
        if user_id != ctx.user_id {
            ctx.require_librarian()?;
        }

        let reservation = self.circulation_repo.reserve(user_id, req.instance_id).await?;
        info!(reservation_id = %reservation.id, instance_id = %req.instance_id,
              for_user = %user_id, by = %ctx.username, "copy reserved");
        Ok(reservation)
    }

    /// Issues a reserved copy as a loan. Librarian and above only.
    ///
    /// The reservation is consumed; the copy becomes Loaned to the
    /// reservation holder with the given due date.
    pub async fn issue(
        &self,
        ctx: &RequestContext,
        reservation_id: Uuid,
        due: NaiveDate,
    ) -> Result<BookInstance, AppError> {
        ctx.require_librarian()?;

        let instance = self.circulation_repo.issue(reservation_id, due).await?;
        info!(reservation_id = %reservation_id, instance_id = %instance.id,
              due = %due, by = %ctx.username, "reservation issued as loan");
        Ok(instance)
    }

    /// Cancels a reservation and frees the copy.
    ///
    /// Members may only cancel their own reservations.
    pub async fn cancel(&self, ctx: &RequestContext, reservation_id: Uuid) -> Result<(), AppError> {
        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if reservation.user_id != ctx.user_id {
            ctx.require_librarian()?;
        }

        self.circulation_repo.cancel(reservation_id).await?;
        info!(reservation_id = %reservation_id, by = %ctx.username, "reservation cancelled");
        Ok(())
    }
}
