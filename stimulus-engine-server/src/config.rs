//! Server configuration, loaded from an optional RON file.
//!
//! ```ron
//! (
//!     bind_addr: "0.0.0.0:8000",
//!     materials_dir: "/srv/materials",
//!     log_filter: "info,tower_http=debug",
//!     seed: Some(42),
//! )
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Default: `127.0.0.1:3001`.
    pub bind_addr: SocketAddr,
    /// Directory holding `<id>.json` materials files.
    pub materials_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Render reproducibly from this seed instead of fresh entropy.
    pub seed: Option<u64>,
    /// RON name corpus replacing the built-in names.
    pub names_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            materials_dir: PathBuf::from("materials"),
            log_filter: "info,tower_http=debug".to_string(),
            seed: None,
            names_file: None,
        }
    }
}

impl ServerConfig {
    pub fn load_from_ron(path: &Path) -> Result<ServerConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<ServerConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
