//! Book copy handlers, including status transitions.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::instance::{BookInstance, CreateBookInstance, UpdateBookInstance};

use crate::dto::request::{CreateInstanceRequest, UpdateInstanceRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/bookinstances
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<BookInstance>>>, ApiError> {
    let page = state
        .instance_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/bookinstances/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state.instance_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// POST /api/bookinstances
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateInstanceRequest>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let instance = state
        .instance_service
        .create(
            &auth,
            CreateBookInstance {
                book_id: req.book_id,
                imprint: req.imprint,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// PUT /api/bookinstances/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInstanceRequest>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state
        .instance_service
        .update(
            &auth,
            UpdateBookInstance {
                id,
                imprint: req.imprint,
                available_by: req.available_by,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// DELETE /api/bookinstances/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.instance_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Book copy deleted",
    ))))
}

/// PUT /api/bookinstances/{id}/return
pub async fn return_copy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state.instance_service.return_copy(&auth, id).await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// PUT /api/bookinstances/{id}/maintenance
pub async fn maintenance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state.instance_service.send_to_maintenance(&auth, id).await?;
    Ok(Json(ApiResponse::ok(instance)))
}

/// PUT /api/bookinstances/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookInstance>>, ApiError> {
    let instance = state.instance_service.activate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(instance)))
}
