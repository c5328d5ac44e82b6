//! Book List API Server
//!
//! A REST API for managing books and authors with a many-to-many relationship.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booklist_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("booklist_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Book List server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every method router carries a fallback so unsupported methods return
    // the structured 405 body instead of axum's empty default
    let api = Router::new()
        // Health check
        .route(
            "/health",
            get(api::health::health_check).fallback(api::method_not_allowed),
        )
        .route(
            "/ready",
            get(api::health::readiness_check).fallback(api::method_not_allowed),
        )
        // Books
        .route(
            "/books",
            get(api::books::list_books)
                .post(api::books::create_book)
                .put(api::books::replace_book)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/books/:id",
            get(api::books::get_book)
                .patch(api::books::patch_book)
                .delete(api::books::delete_book)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/books/:id/authors",
            get(api::books::get_book_authors).fallback(api::method_not_allowed),
        )
        // Authors
        .route(
            "/authors",
            get(api::authors::list_authors)
                .post(api::authors::create_author)
                .put(api::authors::replace_author)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/authors/:id",
            get(api::authors::get_author)
                .patch(api::authors::patch_author)
                .delete(api::authors::delete_author)
                .fallback(api::method_not_allowed),
        )
        .route(
            "/authors/:id/books",
            get(api::authors::get_author_books).fallback(api::method_not_allowed),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .fallback(api::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
