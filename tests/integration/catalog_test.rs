//! Integration tests for catalog CRUD and deletion guards.

use crate::helpers;

use http::StatusCode;

#[tokio::test]
async fn test_member_cannot_create_author() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("member1", "password123", "member")
        .await;
    let cookie = app.login("member1", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/authors",
            Some(serde_json::json!({
                "first_name": "Iain",
                "family_name": "Banks",
            })),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_author_crud() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib1", "password123", "librarian")
        .await;
    let cookie = app.login("lib1", "password123").await;

    let author_id = app.create_author(&cookie, "Ursula", "Le Guin").await;

    let response = app
        .request(
            "GET",
            &format!("/api/authors/{author_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["family_name"], "Le Guin");

    let response = app
        .request(
            "PUT",
            &format!("/api/authors/{author_id}"),
            Some(serde_json::json!({ "first_name": "Ursula K." })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["first_name"], "Ursula K.");

    let response = app
        .request(
            "DELETE",
            &format!("/api/authors/{author_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib2", "password123", "librarian")
        .await;
    let cookie = app.login("lib2", "password123").await;

    let author_id = app.create_author(&cookie, "Terry", "Pratchett").await;
    let genre_id = app.create_genre(&cookie, "Fantasy").await;

    let response = app
        .request(
            "POST",
            "/api/books",
            Some(serde_json::json!({
                "title": "Small Gods",
                "author_id": author_id,
                "genre_id": genre_id,
                "summary": "",
                "isbn": "",
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/authors/{author_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "DELETE",
            &format!("/api/genres/{genre_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_book_with_copies_cannot_be_deleted() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib3", "password123", "librarian")
        .await;
    let cookie = app.login("lib3", "password123").await;

    let book_id = app.create_book(&cookie, "The Dispossessed").await;
    let instance_id = app.create_instance(&cookie, book_id).await;

    let response = app
        .request("DELETE", &format!("/api/books/{book_id}"), None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // After deleting the copy, the book can go.
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookinstances/{instance_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("DELETE", &format!("/api/books/{book_id}"), None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_book_search_and_top() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib4", "password123", "librarian")
        .await;
    let cookie = app.login("lib4", "password123").await;

    let book_id = app.create_book(&cookie, "A Wizard of Earthsea").await;
    app.create_instance(&cookie, book_id).await;
    app.create_instance(&cookie, book_id).await;

    let response = app
        .request("GET", "/api/books/search/wizard", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 1);

    let response = app
        .request("GET", "/api/books/top", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["copy_count"], 2);
}

#[tokio::test]
async fn test_unknown_book_is_404() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("lib5", "password123", "librarian")
        .await;
    let cookie = app.login("lib5", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/books/{}", uuid::Uuid::new_v4()),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
