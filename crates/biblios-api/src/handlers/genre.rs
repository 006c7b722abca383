//! Genre handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::genre::{CreateGenre, Genre};

use crate::dto::request::GenreRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/genres
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Genre>>>, ApiError> {
    let page = state
        .genre_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/genres/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let genre = state.genre_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(genre)))
}

/// GET /api/genres/search/{term}
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(term): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Genre>>>, ApiError> {
    let page = state
        .genre_service
        .search(&auth, &term, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/genres
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GenreRequest>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let genre = state
        .genre_service
        .create(&auth, CreateGenre { name: req.name })
        .await?;
    Ok(Json(ApiResponse::ok(genre)))
}

/// PUT /api/genres/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<GenreRequest>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let genre = state.genre_service.update(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(genre)))
}

/// DELETE /api/genres/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.genre_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Genre deleted"))))
}
