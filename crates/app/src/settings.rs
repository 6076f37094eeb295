//! Settings of the `tripsplit` service, read from `config/tripsplit.toml`
//! and `TRIPSPLIT_*` environment variables (`TRIPSPLIT_SERVER__PORT=3001`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_SETTINGS_PATH: &str = "config/tripsplit";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Directory holding the sheets, one CSV file each.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path = std::env::var("TRIPSPLIT_CONFIG")
            .unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("TRIPSPLIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
