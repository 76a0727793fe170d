pub mod api;
pub mod config;
pub mod safety;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::SafetyConfig;

/// Initialize tracing. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration and the interaction table, then serve until Ctrl-C.
pub async fn run() -> Result<(), ServerError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = SafetyConfig::from_env()?;

    let source = config.table_source();
    let table = source.load()?;
    tracing::info!(
        source = %source.describe(),
        pairwise = table.pairwise().count(),
        allergy_markers = table.allergy_markers().count(),
        "Interaction table ready"
    );

    let mut server = api::start_server_on(config.bind, Arc::new(table)).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.wait().await
}
