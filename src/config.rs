use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::safety::{InteractionTable, SafetyError};

/// Application-level constants
pub const APP_NAME: &str = "ClinicSafety";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the listen address.
pub const ENV_BIND: &str = "CLINIC_SAFETY_BIND";
/// Environment variable naming an interaction table JSON file.
pub const ENV_INTERACTIONS: &str = "CLINIC_SAFETY_INTERACTIONS";

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const INTERACTIONS_FILE_NAME: &str = "interactions.json";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "clinic_safety=info,tower_http=info"
}

/// Get the application data directory
/// ~/ClinicSafety/ on all platforms. `None` when no home directory exists.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Interaction table placed in the application data directory, if any.
pub fn default_interactions_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(INTERACTIONS_FILE_NAME))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address {0:?}: {1}")]
    InvalidBindAddress(String, String),
}

/// Where the service takes its interaction table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Path given explicitly through the environment.
    Explicit(PathBuf),
    /// File found in the application data directory.
    AppData(PathBuf),
    /// Table compiled into the binary.
    Builtin,
}

impl TableSource {
    /// Load the table. File sources fail hard; there is no silent fallback.
    pub fn load(&self) -> Result<InteractionTable, SafetyError> {
        match self {
            Self::Explicit(path) | Self::AppData(path) => InteractionTable::load(path),
            Self::Builtin => Ok(InteractionTable::builtin().clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(path) => format!("{} ({})", path.display(), ENV_INTERACTIONS),
            Self::AppData(path) => path.display().to_string(),
            Self::Builtin => "bundled".to_string(),
        }
    }
}

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct SafetyConfig {
    pub bind: SocketAddr,
    pub interactions_path: Option<PathBuf>,
}

impl SafetyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = var(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_str = bind_raw.trim();
        let bind = bind_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddress(bind_str.to_string(), e.to_string()))?;

        let interactions_path = var(ENV_INTERACTIONS).map(PathBuf::from);

        Ok(Self {
            bind,
            interactions_path,
        })
    }

    /// Resolve the table source: explicit path, then app-data file, then bundled.
    pub fn table_source(&self) -> TableSource {
        self.table_source_with(default_interactions_path())
    }

    fn table_source_with(&self, app_data_file: Option<PathBuf>) -> TableSource {
        if let Some(path) = &self.interactions_path {
            return TableSource::Explicit(path.clone());
        }
        match app_data_file {
            Some(path) if path.is_file() => TableSource::AppData(path),
            _ => TableSource::Builtin,
        }
    }
}
