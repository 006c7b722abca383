//! Reservation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use uuid::Uuid;

use biblios_core::types::pagination::PageResponse;
use biblios_entity::instance::BookInstance;
use biblios_entity::reservation::Reservation;
use biblios_service::circulation::reservation::ReserveRequest;

use crate::dto::request::{CreateReservationRequest, IssueRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/reservations
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Reservation>>>, ApiError> {
    let page = state
        .reservation_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/reservations/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state.reservation_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// GET /api/reservations/date/{start}/{end}
pub async fn list_by_date_range(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Reservation>>>, ApiError> {
    let page = state
        .reservation_service
        .list_by_date_range(&auth, start, end, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<Reservation>>, ApiError> {
    let reservation = state
        .reservation_service
        .reserve(
            &auth,
            ReserveRequest {
                instance_id: req.instance_id,
                user_id: req.user_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// POST /api/reservations/{id}/issue
pub async fn issue(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<IssueRequest>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state.reservation_service.issue(&auth, id, req.due).await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// DELETE /api/reservations/{id}
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.reservation_service.cancel(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Reservation cancelled",
    ))))
}
