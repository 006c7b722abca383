//! Route definitions for the Biblios HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(author_routes())
        .merge(genre_routes())
        .merge(book_routes())
        .merge(instance_routes())
        .merge(reservation_routes())
        .merge(budget_routes())
        .merge(policy_routes())
        .merge(announcement_routes())
        .merge(user_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Author CRUD and search
fn author_routes() -> Router<AppState> {
    Router::new()
        .route("/authors", get(handlers::author::list))
        .route("/authors", post(handlers::author::create))
        .route("/authors/{id}", get(handlers::author::get))
        .route("/authors/{id}", put(handlers::author::update))
        .route("/authors/{id}", delete(handlers::author::delete))
        .route("/authors/search/{term}", get(handlers::author::search))
}

/// Genre CRUD and search
fn genre_routes() -> Router<AppState> {
    Router::new()
        .route("/genres", get(handlers::genre::list))
        .route("/genres", post(handlers::genre::create))
        .route("/genres/{id}", get(handlers::genre::get))
        .route("/genres/{id}", put(handlers::genre::update))
        .route("/genres/{id}", delete(handlers::genre::delete))
        .route("/genres/search/{term}", get(handlers::genre::search))
}

/// Book CRUD, search, and copy-count ranking
fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(handlers::book::list))
        .route("/books", post(handlers::book::create))
        .route("/books/top", get(handlers::book::top))
        .route("/books/{id}", get(handlers::book::get))
        .route("/books/{id}", put(handlers::book::update))
        .route("/books/{id}", delete(handlers::book::delete))
        .route("/books/{id}/instances", get(handlers::book::list_instances))
        .route("/books/search/{term}", get(handlers::book::search))
}

/// Book copy CRUD and status transitions
fn instance_routes() -> Router<AppState> {
    Router::new()
        .route("/bookinstances", get(handlers::instance::list))
        .route("/bookinstances", post(handlers::instance::create))
        .route("/bookinstances/{id}", get(handlers::instance::get))
        .route("/bookinstances/{id}", put(handlers::instance::update))
        .route("/bookinstances/{id}", delete(handlers::instance::delete))
        .route(
            "/bookinstances/{id}/return",
            put(handlers::instance::return_copy),
        )
        .route(
            "/bookinstances/{id}/maintenance",
            put(handlers::instance::maintenance),
        )
        .route(
            "/bookinstances/{id}/activate",
            put(handlers::instance::activate),
        )
}

/// Reservation lifecycle
fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(handlers::reservation::list))
        .route("/reservations", post(handlers::reservation::create))
        .route("/reservations/{id}", get(handlers::reservation::get))
        .route("/reservations/{id}", delete(handlers::reservation::cancel))
        .route(
            "/reservations/{id}/issue",
            post(handlers::reservation::issue),
        )
        .route(
            "/reservations/date/{start}/{end}",
            get(handlers::reservation::list_by_date_range),
        )
}

/// Budget CRUD and range filters
fn budget_routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(handlers::budget::list))
        .route("/budgets", post(handlers::budget::create))
        .route("/budgets/{id}", get(handlers::budget::get))
        .route("/budgets/{id}", put(handlers::budget::update))
        .route("/budgets/{id}", delete(handlers::budget::delete))
        .route(
            "/budgets/money/{min}/{max}",
            get(handlers::budget::list_by_money_range),
        )
        .route(
            "/budgets/date/{start}/{end}",
            get(handlers::budget::list_by_date_range),
        )
}

/// Policy CRUD
fn policy_routes() -> Router<AppState> {
    Router::new()
        .route("/policies", get(handlers::policy::list))
        .route("/policies", post(handlers::policy::create))
        .route("/policies/{id}", get(handlers::policy::get))
        .route("/policies/{id}", put(handlers::policy::update))
        .route("/policies/{id}", delete(handlers::policy::delete))
}

/// Announcement CRUD and date filter
fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(handlers::announcement::list))
        .route("/announcements", post(handlers::announcement::create))
        .route("/announcements/{id}", get(handlers::announcement::get))
        .route("/announcements/{id}", put(handlers::announcement::update))
        .route(
            "/announcements/{id}",
            delete(handlers::announcement::delete),
        )
        .route(
            "/announcements/date/{start}/{end}",
            get(handlers::announcement::list_by_date_range),
        )
}

/// Admin user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list))
        .route("/users/{id}/role", put(handlers::user::update_role))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
