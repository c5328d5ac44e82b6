//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Book List API",
        version = "1.0.0",
        description = "API documentation for the Book List application"
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::get_book_authors,
        books::create_book,
        books::replace_book,
        books::patch_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::get_author_books,
        authors::create_author,
        authors::replace_author,
        authors::patch_author,
        authors::delete_author,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::AuthorRef,
            crate::models::book::CreateBook,
            crate::models::book::ReplaceBook,
            crate::models::book::PatchBook,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::ReplaceAuthor,
            crate::models::author::PatchAuthor,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
