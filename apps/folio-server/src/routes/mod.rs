//! Route modules for the Folio server

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod documents;
pub mod health;
pub mod pdfs;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/documents", documents::router())
        .nest("/pdfs", pdfs::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
