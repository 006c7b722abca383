//! Budget handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::budget::{Budget, CreateBudget, UpdateBudget};

use crate::dto::request::{CreateBudgetRequest, UpdateBudgetRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/budgets
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Budget>>>, ApiError> {
    let page = state
        .budget_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/budgets/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Budget>>, ApiError> {
    let budget = state.budget_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(budget)))
}

/// GET /api/budgets/money/{min}/{max}
pub async fn list_by_money_range(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((min, max)): Path<(f64, f64)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Budget>>>, ApiError> {
    let page = state
        .budget_service
        .list_by_money_range(&auth, min, max, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/budgets/date/{start}/{end}
pub async fn list_by_date_range(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Budget>>>, ApiError> {
    let page = state
        .budget_service
        .list_by_date_range(&auth, start, end, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/budgets
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBudgetRequest>,
) -> Result<Json<ApiResponse<Budget>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let budget = state
        .budget_service
        .create(
            &auth,
            CreateBudget {
                title: req.title,
                amount: req.amount,
                spent_on: req.spent_on,
                note: req.note,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(budget)))
}

/// PUT /api/budgets/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBudgetRequest>,
) -> Result<Json<ApiResponse<Budget>>, ApiError> {
    let budget = state
        .budget_service
        .update(
            &auth,
            UpdateBudget {
                id,
                title: req.title,
                amount: req.amount,
                spent_on: req.spent_on,
                note: req.note,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(budget)))
}

/// DELETE /api/budgets/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.budget_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Budget entry deleted",
    ))))
}
