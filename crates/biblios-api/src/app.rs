//! Application builder: wires repositories, services, router, and
//! middleware into an Axum app, and runs the server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use biblios_auth::password::PasswordHasher;
use biblios_auth::token::TokenCodec;
use biblios_core::config::AppConfig;
use biblios_core::error::AppError;
use biblios_database::repositories::{
    announcement::AnnouncementRepository, author::AuthorRepository, book::BookRepository,
    budget::BudgetRepository, circulation::CirculationRepository, genre::GenreRepository,
    instance::InstanceRepository, policy::PolicyRepository, reservation::ReservationRepository,
    user::UserRepository,
};
use biblios_service::account::AccountService;
use biblios_service::admin::{
    AdminUserService, AnnouncementService, BudgetService, PolicyService,
};
use biblios_service::catalog::{AuthorService, BookService, GenreService};
use biblios_service::circulation::{InstanceService, ReservationService};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Constructs the application state from configuration and a database pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let config = Arc::new(config);

    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let author_repo = Arc::new(AuthorRepository::new(db_pool.clone()));
    let genre_repo = Arc::new(GenreRepository::new(db_pool.clone()));
    let book_repo = Arc::new(BookRepository::new(db_pool.clone()));
    let instance_repo = Arc::new(InstanceRepository::new(db_pool.clone()));
    let reservation_repo = Arc::new(ReservationRepository::new(db_pool.clone()));
    let circulation_repo = Arc::new(CirculationRepository::new(db_pool.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(db_pool.clone()));
    let policy_repo = Arc::new(PolicyRepository::new(db_pool.clone()));
    let announcement_repo = Arc::new(AnnouncementRepository::new(db_pool.clone()));

    let hasher = Arc::new(PasswordHasher::new());
    let token_codec = Arc::new(TokenCodec::new(&config.auth));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        hasher,
        Arc::clone(&token_codec),
        &config.auth,
    ));
    let author_service = Arc::new(AuthorService::new(author_repo, Arc::clone(&book_repo)));
    let genre_service = Arc::new(GenreService::new(genre_repo, Arc::clone(&book_repo)));
    let book_service = Arc::new(BookService::new(
        Arc::clone(&book_repo),
        Arc::clone(&instance_repo),
    ));
    let instance_service = Arc::new(InstanceService::new(
        instance_repo,
        book_repo,
        Arc::clone(&circulation_repo),
    ));
    let reservation_service = Arc::new(ReservationService::new(
        reservation_repo,
        circulation_repo,
    ));
    let budget_service = Arc::new(BudgetService::new(budget_repo));
    let policy_service = Arc::new(PolicyService::new(policy_repo));
    let announcement_service = Arc::new(AnnouncementService::new(announcement_repo));
    let admin_user_service = Arc::new(AdminUserService::new(user_repo));

    AppState {
        config,
        db_pool,
        token_codec,
        account_service,
        author_service,
        genre_service,
        book_service,
        instance_service,
        reservation_service,
        budget_service,
        policy_service,
        announcement_service,
        admin_user_service,
    }
}

/// Runs the Biblios server with the given configuration and database pool.
///
/// Blocks until a shutdown signal (Ctrl-C or SIGTERM) is received.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Biblios server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Biblios server stopped");
    Ok(())
}

/// Completes when Ctrl-C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
