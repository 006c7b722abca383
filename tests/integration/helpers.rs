//! Shared test helpers for integration tests.
//!
//! These tests need a running PostgreSQL instance; point
//! `BIBLIOS__DATABASE__URL` at a scratch database before running them.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;
use uuid::Uuid;

use biblios_auth::password::PasswordHasher;
use biblios_core::config::AppConfig;

/// Response captured from a test request.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
    /// Set-Cookie header value, if any.
    pub set_cookie: Option<String>,
}

/// Tests share one scratch database, so they take turns.
static DB_LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Held for the lifetime of the test to keep database access exclusive.
    _db_guard: OwnedMutexGuard<()>,
}

impl TestApp {
    /// Create a new test application with a clean database.
    ///
    /// Blocks until no other test holds the database.
    pub async fn new() -> Self {
        let db_guard = DB_LOCK
            .get_or_init(|| Arc::new(Mutex::new(())))
            .clone()
            .lock_owned()
            .await;

        let config = AppConfig::load("test").expect("Failed to load test config");

        let db_pool = biblios_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");

        biblios_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = biblios_api::app::build_state(config.clone(), db_pool.clone());
        let router = biblios_api::router::build_router(state);

        Self {
            router,
            db_pool,
            config,
            _db_guard: db_guard,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "reservations",
            "book_instances",
            "books",
            "genres",
            "authors",
            "budgets",
            "policies",
            "announcements",
            "users",
        ];

        for table in &tables {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(pool)
                .await
                .unwrap_or_else(|e| panic!("Failed to clean table {table}: {e}"));
        }
    }

    /// Insert a user directly with a hashed password.
    pub async fn create_test_user(&self, username: &str, password: &str, role: &str) -> Uuid {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");

        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (username, password_hash, role) \
             VALUES ($1, $2, $3::user_role) RETURNING id",
        )
        .bind(username)
        .bind(hash)
        .bind(role)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert test user")
    }

    /// Log in and return the session cookie (name=value).
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed");
        let set_cookie = response.set_cookie.expect("No session cookie set");
        set_cookie
            .split(';')
            .next()
            .expect("Empty Set-Cookie header")
            .to_string()
    }

    /// Make a request against the router, optionally with a JSON body
    /// and a session cookie.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// Create an author via the API and return its ID.
    pub async fn create_author(&self, cookie: &str, first: &str, family: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/authors",
                Some(serde_json::json!({
                    "first_name": first,
                    "family_name": family,
                })),
                Some(cookie),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        Self::id_of(&response.body)
    }

    /// Create a genre via the API and return its ID.
    pub async fn create_genre(&self, cookie: &str, name: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/genres",
                Some(serde_json::json!({ "name": name })),
                Some(cookie),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        Self::id_of(&response.body)
    }

    /// Create a book via the API and return its ID.
    pub async fn create_book(&self, cookie: &str, title: &str) -> Uuid {
        let author_id = self.create_author(cookie, "Test", "Author").await;
        let genre_id = self.create_genre(cookie, &format!("genre-{title}")).await;

        let response = self
            .request(
                "POST",
                "/api/books",
                Some(serde_json::json!({
                    "title": title,
                    "author_id": author_id,
                    "genre_id": genre_id,
                    "summary": "A test book",
                    "isbn": "978-3-16-148410-0",
                })),
                Some(cookie),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        Self::id_of(&response.body)
    }

    /// Create a book copy via the API and return its ID.
    pub async fn create_instance(&self, cookie: &str, book_id: Uuid) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/bookinstances",
                Some(serde_json::json!({
                    "book_id": book_id,
                    "imprint": "First edition",
                })),
                Some(cookie),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        Self::id_of(&response.body)
    }

    /// Extract `data.id` from a wrapped API response.
    pub fn id_of(body: &Value) -> Uuid {
        body["data"]["id"]
            .as_str()
            .expect("Response has no data.id")
            .parse()
            .expect("data.id is not a UUID")
    }
}
