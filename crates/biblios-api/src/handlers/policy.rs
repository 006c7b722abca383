//! Policy handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::policy::{CreatePolicy, Policy};

use crate::dto::request::{CreatePolicyRequest, UpdatePolicyRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/policies
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Policy>>>, ApiError> {
    let page = state
        .policy_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/policies/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Policy>>, ApiError> {
    let policy = state.policy_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(policy)))
}

/// POST /api/policies
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePolicyRequest>,
) -> Result<Json<ApiResponse<Policy>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let policy = state
        .policy_service
        .create(
            &auth,
            CreatePolicy {
                property: req.property,
                value: req.value,
                is_core: req.is_core,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(policy)))
}

/// PUT /api/policies/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePolicyRequest>,
) -> Result<Json<ApiResponse<Policy>>, ApiError> {
    let policy = state.policy_service.update(&auth, id, &req.value).await?;
    Ok(Json(ApiResponse::ok(policy)))
}

/// DELETE /api/policies/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.policy_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Policy deleted"))))
}
