//! Integration tests for the reservation / loan / maintenance workflow.

use crate::helpers;

use http::StatusCode;

#[tokio::test]
async fn test_reserve_makes_copy_reserved() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("reader", "password123", "member").await;
    let reader = app.login("reader", "password123").await;

    let book_id = app.create_book(&lib, "Use of Weapons").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&reader),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/bookinstances/{instance_id}"),
            None,
            Some(&reader),
        )
        .await;
    assert_eq!(response.body["data"]["status"], "reserved");
}

#[tokio::test]
async fn test_reserved_copy_cannot_be_reserved_again() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("first", "password123", "member").await;
    let first = app.login("first", "password123").await;
    app.create_test_user("second", "password123", "member").await;
    let second = app.login("second", "password123").await;

    let book_id = app.create_book(&lib, "Excession").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&first),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&second),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_issue_consumes_reservation_and_loans_copy() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("borrower", "password123", "member")
        .await;
    let borrower = app.login("borrower", "password123").await;

    let book_id = app.create_book(&lib, "Matter").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&borrower),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "POST",
            &format!("/api/reservations/{reservation_id}/issue"),
            Some(serde_json::json!({ "due": "2026-09-30" })),
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "loaned");
    assert_eq!(response.body["data"]["available_by"], "2026-09-30");
    assert!(!response.body["data"]["borrower_id"].is_null());

    // The reservation row is gone.
    let response = app
        .request(
            "GET",
            &format!("/api/reservations/{reservation_id}"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_cannot_issue() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("sneaky", "password123", "member").await;
    let sneaky = app.login("sneaky", "password123").await;

    let book_id = app.create_book(&lib, "Inversions").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&sneaky),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "POST",
            &format!("/api/reservations/{reservation_id}/issue"),
            Some(serde_json::json!({ "due": "2026-09-30" })),
            Some(&sneaky),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_return_frees_copy() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("reader", "password123", "member").await;
    let reader = app.login("reader", "password123").await;

    let book_id = app.create_book(&lib, "Surface Detail").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&reader),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    app.request(
        "POST",
        &format!("/api/reservations/{reservation_id}/issue"),
        Some(serde_json::json!({ "due": "2026-09-30" })),
        Some(&lib),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}/return"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "available");
    assert!(response.body["data"]["borrower_id"].is_null());
    assert!(response.body["data"]["available_by"].is_null());
}

#[tokio::test]
async fn test_cancel_frees_copy() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("fickle", "password123", "member").await;
    let fickle = app.login("fickle", "password123").await;

    let book_id = app.create_book(&lib, "The Player of Games").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&fickle),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "DELETE",
            &format!("/api/reservations/{reservation_id}"),
            None,
            Some(&fickle),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/bookinstances/{instance_id}"),
            None,
            Some(&fickle),
        )
        .await;
    assert_eq!(response.body["data"]["status"], "available");
}

#[tokio::test]
async fn test_member_cannot_cancel_another_members_reservation() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("owner", "password123", "member").await;
    let owner = app.login("owner", "password123").await;
    app.create_test_user("thief", "password123", "member").await;
    let thief = app.login("thief", "password123").await;

    let book_id = app.create_book(&lib, "Consider Phlebas").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&owner),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    let response = app
        .request(
            "DELETE",
            &format!("/api/reservations/{reservation_id}"),
            None,
            Some(&thief),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reserved_copy_cannot_enter_maintenance() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("reader", "password123", "member").await;
    let reader = app.login("reader", "password123").await;

    let book_id = app.create_book(&lib, "Look to Windward").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    app.request(
        "POST",
        "/api/reservations",
        Some(serde_json::json!({ "instance_id": instance_id })),
        Some(&reader),
    )
    .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}/maintenance"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_maintenance_and_activate_roundtrip() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;

    let book_id = app.create_book(&lib, "Feersum Endjinn").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}/maintenance"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "maintenance");

    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}/activate"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "available");
}

#[tokio::test]
async fn test_due_date_can_only_be_set_on_loaned_copy() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("reader", "password123", "member").await;
    let reader = app.login("reader", "password123").await;

    let book_id = app.create_book(&lib, "The State of the Art").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    // Not loaned yet, so a due date makes no sense.
    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}"),
            Some(serde_json::json!({ "available_by": "2026-12-01" })),
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Imprint-only updates stay allowed in any status.
    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}"),
            Some(serde_json::json!({ "imprint": "Second printing" })),
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["imprint"], "Second printing");

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(serde_json::json!({ "instance_id": instance_id })),
            Some(&reader),
        )
        .await;
    let reservation_id = helpers::TestApp::id_of(&response.body);

    app.request(
        "POST",
        &format!("/api/reservations/{reservation_id}/issue"),
        Some(serde_json::json!({ "due": "2026-09-30" })),
        Some(&lib),
    )
    .await;

    // Once loaned, the due date may be moved.
    let response = app
        .request(
            "PUT",
            &format!("/api/bookinstances/{instance_id}"),
            Some(serde_json::json!({ "available_by": "2026-10-15" })),
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["available_by"], "2026-10-15");
}

#[tokio::test]
async fn test_delete_guard_message_for_reserved_copy() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;
    app.create_test_user("reader", "password123", "member").await;
    let reader = app.login("reader", "password123").await;

    let book_id = app.create_book(&lib, "Against a Dark Background").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    app.request(
        "POST",
        "/api/reservations",
        Some(serde_json::json!({ "instance_id": instance_id })),
        Some(&reader),
    )
    .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/bookinstances/{instance_id}"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body["message"],
        "Only available or books for maintenance are allowed to be deleted."
    );
}

#[tokio::test]
async fn test_maintenance_copy_can_be_deleted() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib", "password123", "librarian").await;
    let lib = app.login("lib", "password123").await;

    let book_id = app.create_book(&lib, "The Algebraist").await;
    let instance_id = app.create_instance(&lib, book_id).await;

    app.request(
        "PUT",
        &format!("/api/bookinstances/{instance_id}/maintenance"),
        None,
        Some(&lib),
    )
    .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/bookinstances/{instance_id}"),
            None,
            Some(&lib),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
