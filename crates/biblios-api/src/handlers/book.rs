//! Book handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use biblios_core::error::AppError;
use biblios_core::types::pagination::PageResponse;
use biblios_entity::book::{Book, BookWithCopyCount, CreateBook, UpdateBook};
use biblios_entity::instance::BookInstance;

use crate::dto::request::{CreateBookRequest, UpdateBookRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/books
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Book>>>, ApiError> {
    let page = state
        .book_service
        .list(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/books/top
pub async fn top(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<BookWithCopyCount>>>, ApiError> {
    let page = state
        .book_service
        .top(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/books/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let book = state.book_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// GET /api/books/{id}/instances
pub async fn list_instances(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BookInstance>>>, ApiError> {
    let instances = state.instance_service.list_by_book(&auth, id).await?;
    Ok(Json(ApiResponse::ok(instances)))
}

/// GET /api/books/search/{term}
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(term): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Book>>>, ApiError> {
    let page = state
        .book_service
        .search(&auth, &term, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /api/books
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookRequest>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let book = state
        .book_service
        .create(
            &auth,
            CreateBook {
                title: req.title,
                author_id: req.author_id,
                genre_id: req.genre_id,
                summary: req.summary,
                isbn: req.isbn,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// PUT /api/books/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let book = state
        .book_service
        .update(
            &auth,
            UpdateBook {
                id,
                title: req.title,
                author_id: req.author_id,
                genre_id: req.genre_id,
                summary: req.summary,
                isbn: req.isbn,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// DELETE /api/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.book_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Book deleted"))))
}
