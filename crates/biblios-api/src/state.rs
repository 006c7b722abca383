//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use biblios_auth::token::TokenCodec;
use biblios_core::config::AppConfig;
use biblios_service::account::AccountService;
use biblios_service::admin::{
    AdminUserService, AnnouncementService, BudgetService, PolicyService,
};
use biblios_service::catalog::{AuthorService, BookService, GenreService};
use biblios_service::circulation::{InstanceService, ReservationService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Session token codec.
    pub token_codec: Arc<TokenCodec>,

    /// Account registration and login.
    pub account_service: Arc<AccountService>,
    /// Author catalog.
    pub author_service: Arc<AuthorService>,
    /// Genre catalog.
    pub genre_service: Arc<GenreService>,
    /// Book catalog.
    pub book_service: Arc<BookService>,
    /// Book copies and status transitions.
    pub instance_service: Arc<InstanceService>,
    /// Reservations and loans.
    pub reservation_service: Arc<ReservationService>,
    /// Budget administration.
    pub budget_service: Arc<BudgetService>,
    /// Policy administration.
    pub policy_service: Arc<PolicyService>,
    /// Announcement administration.
    pub announcement_service: Arc<AnnouncementService>,
    /// User administration.
    pub admin_user_service: Arc<AdminUserService>,
}
