//! User administration handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::user::UserRole;

use crate::dto::request::UpdateRoleRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = state
        .admin_user_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// PUT /api/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let role: UserRole = req
        .role
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown role '{}'", req.role)))?;

    let user = state.admin_user_service.update_role(&auth, id, role).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
