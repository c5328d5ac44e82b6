//! API handlers for the Book List REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    FromRequest, FromRequestParts,
};

use crate::error::AppError;

/// JSON extractor that turns body rejections into the structured error
/// response instead of axum's plain-text default
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Malformed JSON request: {}", rejection.body_text()))
    }
}

/// Path extractor that turns rejections (e.g. a non-numeric id) into the
/// structured error response
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// Fallback for unmatched paths, so 404s carry the structured body too
pub async fn fallback() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}

/// Fallback for known paths hit with an unsupported method, so 405s carry
/// the structured body too
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not supported for this resource".to_string())
}
