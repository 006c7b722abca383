//! Announcement handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

use crate::dto::request::{CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/announcements
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Announcement>>>, ApiError> {
    let page = state
        .announcement_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/announcements/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Announcement>>, ApiError> {
    let announcement = state.announcement_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(announcement)))
}

/// GET /api/announcements/date/{start}/{end}
pub async fn list_by_date_range(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Announcement>>>, ApiError> {
    let page = state
        .announcement_service
        .list_by_date_range(&auth, start, end, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/announcements
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<Json<ApiResponse<Announcement>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let announcement = state
        .announcement_service
        .create(
            &auth,
            CreateAnnouncement {
                title: req.title,
                body: req.body,
                published_on: req.published_on,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(announcement)))
}

/// PUT /api/announcements/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> Result<Json<ApiResponse<Announcement>>, ApiError> {
    let announcement = state
        .announcement_service
        .update(
            &auth,
            UpdateAnnouncement {
                id,
                title: req.title,
                body: req.body,
                published_on: req.published_on,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(announcement)))
}

/// DELETE /api/announcements/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.announcement_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Announcement deleted",
    ))))
}
