//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

async fn create_author(client: &Client, first: &str, last: &str) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "firstName": first, "lastName": last }))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse author")
}

async fn create_book(client: &Client, title: &str, isbn: &str, author_ids: &[i64]) -> Value {
    let authors: Vec<Value> = author_ids.iter().map(|id| json!({ "id": id })).collect();
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": title, "isbn": isbn, "authors": authors }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

async fn book_count(client: &Client) -> usize {
    let body: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to list books")
        .json()
        .await
        .expect("Failed to parse book list");
    body.as_array().expect("Book list is not an array").len()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_book_without_authors() {
    let client = Client::new();

    let book = create_book(&client, "Second Book", "978-83-01-00000-2", &[]).await;

    assert!(book["id"].as_i64().unwrap() > 0);
    assert_eq!(book["title"], "Second Book");
    assert_eq!(book["isbn"], "978-83-01-00000-2");
    assert_eq!(book["authors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_authors() {
    let client = Client::new();

    let author = create_author(&client, "John", "Doe").await;
    let author_id = author["id"].as_i64().unwrap();

    let book = create_book(&client, "First Book", "978-83-01-00000-1", &[author_id]).await;

    let authors = book["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["id"].as_i64().unwrap(), author_id);
    assert_eq!(authors[0]["firstName"], "John");
}

#[tokio::test]
#[ignore]
async fn test_create_book_unknown_author_is_rejected() {
    let client = Client::new();

    let count_before = book_count(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan Book",
            "isbn": "978-83-01-00000-9",
            "authors": [{ "id": 999999 }]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Some authors were not found");
    assert!(body["timestamp"].is_string());

    // All-or-nothing: the book must not have been persisted
    assert_eq!(book_count(&client).await, count_before);
}

#[tokio::test]
#[ignore]
async fn test_create_book_empty_title_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "", "isbn": "978-83-01-00000-2" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_book_too_long_isbn_is_rejected() {
    let client = Client::new();

    // 18 characters, one over the limit
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "Book Title", "isbn": "978-83-01-00000-22" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_book_malformed_json_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Content-Type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
#[ignore]
async fn test_get_book_round_trip() {
    let client = Client::new();

    let created = create_book(&client, "Round Trip", "978-83-01-00000-3", &[]).await;
    let id = created["id"].as_i64().unwrap();

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched["title"], "Round Trip");
    assert_eq!(fetched["isbn"], "978-83-01-00000-3");

    // Delete, then the fetch must fail as not-found
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_book_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_authors_of_unknown_book() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_get_books_of_author() {
    let client = Client::new();

    let author = create_author(&client, "Jane", "Smith").await;
    let author_id = author["id"].as_i64().unwrap();
    create_book(&client, "Jane's Book", "978-83-01-00001-1", &[author_id]).await;

    let response = client
        .get(format!("{}/authors/{}/books", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let books: Value = response.json().await.expect("Failed to parse response");
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Jane's Book");
}

#[tokio::test]
#[ignore]
async fn test_replace_book() {
    let client = Client::new();

    let created = create_book(&client, "Old Title", "978-83-01-00002-1", &[]).await;
    let id = created["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/books", BASE_URL))
        .json(&json!({ "id": id, "title": "New Title", "isbn": "978-83-01-00002-1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"].as_i64().unwrap(), id);
    assert_eq!(body["title"], "New Title");
}

#[tokio::test]
#[ignore]
async fn test_replace_unknown_book() {
    let client = Client::new();

    let response = client
        .put(format!("{}/books", BASE_URL))
        .json(&json!({ "id": 999999, "title": "Ghost", "isbn": "1" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_patch_book_absent_fields_are_untouched() {
    let client = Client::new();

    let created = create_book(&client, "Keep Isbn", "978-83-01-00003-1", &[]).await;
    let id = created["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "title": "Patched Title" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Patched Title");
    assert_eq!(body["isbn"], "978-83-01-00003-1");
}

#[tokio::test]
#[ignore]
async fn test_patch_book_replaces_author_set() {
    let client = Client::new();

    let a1 = create_author(&client, "John", "First").await;
    let a2 = create_author(&client, "John", "Second").await;
    let id1 = a1["id"].as_i64().unwrap();
    let id2 = a2["id"].as_i64().unwrap();

    let book = create_book(&client, "Patchable", "978-83-01-00004-1", &[id1]).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "authors": [{ "id": id1 }, { "id": id2 }] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Patchable");
    let authors = body["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0]["id"].as_i64().unwrap(), id1);
    assert_eq!(authors[1]["id"].as_i64().unwrap(), id2);
}

#[tokio::test]
#[ignore]
async fn test_patch_book_empty_author_list_clears_associations() {
    let client = Client::new();

    let author = create_author(&client, "Soon", "Detached").await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, "Clearable", "978-83-01-00005-1", &[author_id]).await;
    let book_id = book["id"].as_i64().unwrap();

    // Present-but-empty list clears the set; an omitted field would not
    let response = client
        .patch(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "authors": [] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["authors"].as_array().unwrap().len(), 0);

    // Omitted field leaves the (now empty) set untouched and the author alive
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_patch_book_unknown_author_is_rejected() {
    let client = Client::new();

    let book = create_book(&client, "Unpatchable", "978-83-01-00006-1", &[]).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "authors": [{ "id": 999999 }] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // Book is unchanged
    let body: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["authors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_keeps_authors() {
    let client = Client::new();

    let author = create_author(&client, "Survives", "Deletion").await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, "Doomed", "978-83-01-00007-1", &[author_id]).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_delete_author_detaches_from_all_books() {
    let client = Client::new();

    // The John Doe example: a linked author is deleted, the book survives
    // with zero authors and the author is gone afterwards
    let author = create_author(&client, "John", "Doe").await;
    let author_id = author["id"].as_i64().unwrap();

    let book1 = create_book(&client, "First Book", "978-83-01-00000-1", &[author_id]).await;
    let book2 = create_book(&client, "Another Book", "978-83-01-00008-1", &[author_id]).await;
    let book1_id = book1["id"].as_i64().unwrap();
    let book2_id = book2["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    for book_id in [book1_id, book2_id] {
        let body: Value = client
            .get(format!("{}/books/{}", BASE_URL, book_id))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse response");
        assert_eq!(body["authors"].as_array().unwrap().len(), 0);
    }

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_author_forces_generated_id() {
    let client = Client::new();

    // A client-supplied id must be ignored on create
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "id": 424242, "firstName": "Jane", "lastName": "Smith" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_ne!(body["id"].as_i64().unwrap(), 424242);
    assert_eq!(body["firstName"], "Jane");
    assert_eq!(body["lastName"], "Smith");
}

#[tokio::test]
#[ignore]
async fn test_patch_author() {
    let client = Client::new();

    let author = create_author(&client, "John", "Doe").await;
    let id = author["id"].as_i64().unwrap();

    let response = client
        .patch(format!("{}/authors/{}", BASE_URL, id))
        .json(&json!({ "lastName": "NewLastName" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "NewLastName");
}

#[tokio::test]
#[ignore]
async fn test_unsupported_method_returns_structured_405() {
    let client = Client::new();

    // The collection path supports GET/POST/PUT but not DELETE
    let response = client
        .delete(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 405);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 405);
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_non_numeric_id_returns_structured_400() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/abc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 400);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_unknown_path_returns_structured_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/nonsense", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], 404);
    assert!(body["timestamp"].is_string());
}
