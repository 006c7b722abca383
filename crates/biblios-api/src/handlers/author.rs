//! Author handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::author::{Author, CreateAuthor, UpdateAuthor};

use crate::dto::request::{AuthorRequest, UpdateAuthorRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/authors
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Author>>>, ApiError> {
    let page = state
        .author_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/authors/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let author = state.author_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(author)))
}

/// GET /api/authors/search/{term}
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(term): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Author>>>, ApiError> {
    let page = state
        .author_service
        .search(&auth, &term, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/authors
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AuthorRequest>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let author = state
        .author_service
        .create(
            &auth,
            CreateAuthor {
                first_name: req.first_name,
                family_name: req.family_name,
                date_of_birth: req.date_of_birth,
                date_of_death: req.date_of_death,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(author)))
}

/// PUT /api/authors/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAuthorRequest>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let author = state
        .author_service
        .update(
            &auth,
            UpdateAuthor {
                id,
                first_name: req.first_name,
                family_name: req.family_name,
                date_of_birth: req.date_of_birth,
                date_of_death: req.date_of_death,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(author)))
}

/// DELETE /api/authors/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.author_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Author deleted"))))
}
