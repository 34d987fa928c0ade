//! Application settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration values controlling the HTTP listener and the box store.
///
/// Values come from `MOVEBOX_`-prefixed environment variables, a config
/// file, or command-line flags, in OrthoConfig's usual precedence order.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOVEBOX")]
pub struct AppSettings {
    /// TCP port the HTTP server listens on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Directory holding `boxes.json` and `profiles.json`.
    pub data_dir: Option<PathBuf>,
    /// Base URL embedded in QR payloads, e.g. `https://boxes.example.com`.
    pub qr_base_url: Option<String>,
}

impl AppSettings {
    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the configured data directory, falling back to the default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Return the configured QR base URL, falling back to the local listener.
    pub fn qr_base_url(&self) -> String {
        self.qr_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port()))
    }
}
