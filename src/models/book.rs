//! Book model and request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::author::Author;

/// Full book model (DB + API). The author set is insertion-ordered for
/// serialization (junction rows carry a position).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    // Relation (loaded separately from the book_authors junction table)
    #[sqlx(skip)]
    #[serde(default)]
    pub authors: Vec<Author>,
}

/// Author reference in book write payloads: `{"authors": [{"id": 1}]}`
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AuthorRef {
    pub id: i32,
}

/// Create book request (POST). The id is never accepted from the client;
/// referenced author ids are reconciled against the authors table.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 17, message = "ISBN must be 1-17 characters"))]
    pub isbn: String,
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
}

/// Full replace request (PUT) - the target id travels in the body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReplaceBook {
    pub id: i32,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 17, message = "ISBN must be 1-17 characters"))]
    pub isbn: String,
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
}

/// Partial update request (PATCH). Absent fields keep their stored value;
/// a present author list (even empty) replaces the association set.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PatchBook {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 17, message = "ISBN must be 1-17 characters"))]
    pub isbn: Option<String>,
    pub authors: Option<Vec<AuthorRef>>,
}
