//! Safety API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → HTTP trace → handler.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::safety::InteractionTable;

/// Build the safety API router around a loaded interaction table.
///
/// CORS is permissive: the prescription UI runs in the browser on another origin.
pub fn safety_api_router(table: Arc<InteractionTable>) -> Router {
    let ctx = ApiContext::new(table);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/safety/rules", get(endpoints::safety::rules))
        .route("/safety/check", post(endpoints::safety::check))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .fallback(endpoints::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
