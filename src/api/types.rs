//! Shared state for the safety API.

use std::sync::Arc;

use crate::safety::InteractionTable;

/// Shared context for all API routes.
/// The table is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct ApiContext {
    pub table: Arc<InteractionTable>,
}

impl ApiContext {
    pub fn new(table: Arc<InteractionTable>) -> Self {
        Self { table }
    }
}
