//! Integration tests for registration and the session cookie flow.

use crate::helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_and_login() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "newmember",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "member");

    let cookie = app.login("newmember", "password123").await;
    assert!(cookie.starts_with(&app.config.auth.cookie_name));
}

#[tokio::test]
async fn test_login_sets_httponly_cookie() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("cookieuser", "password123", "member")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "cookieuser",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let set_cookie = response.set_cookie.expect("No Set-Cookie header");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("wrongpw", "password123", "member")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "wrongpw",
                "password": "nope-nope-nope",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("meuser", "password123", "librarian")
        .await;
    let cookie = app.login("meuser", "password123").await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "meuser");
    assert_eq!(response.body["data"]["role"], "librarian");
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_route_without_session() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/books", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("byeuser", "password123", "member")
        .await;
    let cookie = app.login("byeuser", "password123").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let set_cookie = response.set_cookie.expect("No removal cookie");
    assert!(set_cookie.contains("Max-Age=0") || set_cookie.contains("Expires="));
}

#[tokio::test]
async fn test_duplicate_username_conflict() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("taken", "password123", "member").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "taken",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
