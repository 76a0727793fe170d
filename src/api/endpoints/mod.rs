//! API endpoint handlers.
//!
//! Handlers are thin: they unpack the request and call into `crate::safety`.

pub mod health;
pub mod safety;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unmatched routes, rendered in the API error format.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
