use clap::Parser;
use engine::TripConfig;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_SHEET: &str = "trip";

/// Where the shared ledger lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A sheet served by the `tripsplit` sheet service.
    Sheet { base_url: String, sheet: String },
    /// A local CSV file, for offline use.
    Csv { path: String },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sheet {
            base_url: DEFAULT_BASE_URL.to_string(),
            sheet: DEFAULT_SHEET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub trip: TripConfig,
    pub store: StoreConfig,
    /// IANA name, used for the default date of new entries and for times
    /// shown in the header.
    pub timezone: String,
    pub log_file: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trip: TripConfig::default(),
            store: StoreConfig::default(),
            timezone: "Asia/Tokyo".to_string(),
            log_file: "logs/tripsplit_tui.log".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "tripsplit_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Use the sheet service at this URL (e.g. http://127.0.0.1:3000).
    #[arg(long, conflicts_with = "csv")]
    base_url: Option<String>,
    /// Sheet name on the sheet service.
    #[arg(long, conflicts_with = "csv")]
    sheet: Option<String>,
    /// Use a local CSV file instead of the sheet service.
    #[arg(long)]
    csv: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override the JPY→TWD exchange rate.
    #[arg(long)]
    rate: Option<f64>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(
        config::Environment::with_prefix("TRIPSPLIT_TUI")
            .prefix_separator("_")
            .separator("__"),
    );
    let settings: AppConfig = builder.build()?.try_deserialize()?;

    Ok(apply_args(settings, args))
}

fn apply_args(mut settings: AppConfig, args: Args) -> AppConfig {
    if let Some(path) = args.csv {
        settings.store = StoreConfig::Csv { path };
    } else if args.base_url.is_some() || args.sheet.is_some() {
        let (default_url, default_sheet) = match settings.store {
            StoreConfig::Sheet { base_url, sheet } => (base_url, sheet),
            StoreConfig::Csv { .. } => (DEFAULT_BASE_URL.to_string(), DEFAULT_SHEET.to_string()),
        };
        settings.store = StoreConfig::Sheet {
            base_url: args.base_url.unwrap_or(default_url),
            sheet: args.sheet.unwrap_or(default_sheet),
        };
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(rate) = args.rate {
        settings.trip.exchange_rate = rate;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("");
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.timezone, "Asia/Tokyo");
        assert_eq!(config.trip, TripConfig::default());
    }

    #[test]
    fn reads_trip_and_csv_store() {
        let config = parse(
            r#"
            timezone = "Asia/Taipei"

            [trip]
            participants = ["Ann", "Ben"]
            exchange_rate = 0.21

            [store]
            kind = "csv"
            path = "trip.csv"
            "#,
        );
        assert_eq!(config.trip.participants.names(), ["Ann", "Ben"]);
        assert_eq!(config.trip.exchange_rate, 0.21);
        assert_eq!(config.trip.cache_ttl_secs, 30);
        assert_eq!(
            config.store,
            StoreConfig::Csv {
                path: "trip.csv".to_string()
            }
        );
    }

    #[test]
    fn args_override_file_values() {
        let args = Args {
            sheet: Some("kyoto".to_string()),
            rate: Some(0.2),
            ..Args::default()
        };
        let config = apply_args(AppConfig::default(), args);
        assert_eq!(
            config.store,
            StoreConfig::Sheet {
                base_url: DEFAULT_BASE_URL.to_string(),
                sheet: "kyoto".to_string()
            }
        );
        assert_eq!(config.trip.exchange_rate, 0.2);

        let args = Args {
            csv: Some("local.csv".to_string()),
            ..Args::default()
        };
        let config = apply_args(config, args);
        assert!(matches!(config.store, StoreConfig::Csv { .. }));
    }
}
