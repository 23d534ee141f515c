//! # Server Configuration
//!
//! Listen address, CORS origins and the optional seed file. Values come
//! from CLI flags with environment variables as fallback.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable for the listen port
pub const PORT_ENV: &str = "MEALCART_PORT";

/// Environment variable for the seed file path
pub const SEED_ENV: &str = "MEALCART_SEED";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (empty = allow any)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// JSON seed file for the in-memory store
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Build a config from the environment, falling back to defaults.
    /// An unparseable port is warned about and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var(PORT_ENV) {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(e) => warn!(%raw, "ignoring invalid {}: {}", PORT_ENV, e),
            }
        }
        if let Ok(path) = env::var(SEED_ENV) {
            config.seed = Some(PathBuf::from(path));
        }

        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
