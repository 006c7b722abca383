//! Integration tests for budgets, policies, announcements, and user admin.

use crate::helpers;

use http::StatusCode;

#[tokio::test]
async fn test_librarian_cannot_write_budgets() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/budgets",
            Some(serde_json::json!({
                "title": "New shelving",
                "amount": 450.0,
                "spent_on": "2026-08-01",
            })),
            Some(&lib),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_budget_range_filters() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;

    for (title, amount, date) in [
        ("Paperbacks", 120.0, "2026-01-15"),
        ("Projector", 899.99, "2026-03-02"),
        ("Coffee", 30.5, "2026-03-20"),
    ] {
        let response = app
            .request(
                "POST",
                "/api/budgets",
                Some(serde_json::json!({
                    "title": title,
                    "amount": amount,
                    "spent_on": date,
                })),
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request("GET", "/api/budgets/money/100/1000", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);

    let response = app
        .request(
            "GET",
            "/api/budgets/date/2026-03-01/2026-03-31",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_core_policy_cannot_be_deleted() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/policies",
            Some(serde_json::json!({
                "property": "loan_period_days",
                "value": "21",
                "is_core": true,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let core_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "DELETE",
            &format!("/api/policies/{core_id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Core policies cannot be deleted.");
}

#[tokio::test]
async fn test_non_core_policy_can_be_deleted() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/policies",
            Some(serde_json::json!({
                "property": "summer_hours",
                "value": "10-16",
            })),
            Some(&admin),
        )
        .await;
    let policy_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "DELETE",
            &format!("/api/policies/{policy_id}"),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_announcement_date_filter() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;

    for (title, date) in [
        ("Closed for holidays", "2026-07-01"),
        ("Author reading", "2026-08-12"),
    ] {
        let response = app
            .request(
                "POST",
                "/api/announcements",
                Some(serde_json::json!({
                    "title": title,
                    "body": "Details inside.",
                    "published_on": date,
                })),
                Some(&admin),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request(
            "GET",
            "/api/announcements/date/2026-08-01/2026-08-31",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Author reading");
}

#[tokio::test]
async fn test_user_list_is_admin_only() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;

    let response = app.request("GET", "/api/users", None, Some(&lib)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_can_promote_member() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;
    let member_id = app
        .create_test_user("promoted", "password123", "member")
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{member_id}/role"),
            Some(serde_json::json!({ "role": "librarian" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "librarian");
}

#[tokio::test]
async fn test_admin_cannot_demote_self() {
    let app = helpers::TestApp::new().await;
    let admin_id = app.create_test_user("boss", "password123", "admin").await;
    let admin = app.login("boss", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{admin_id}/role"),
            Some(serde_json::json!({ "role": "member" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
