//! Safety API.
//!
//! Exposes the medication safety checker over HTTP for the prescription
//! entry UI. Routes are nested under `/api/`.
//!
//! The router is composable: `safety_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::safety_api_router;
pub use server::{start_server_on, SafetyServer, ServerError};
pub use types::ApiContext;
