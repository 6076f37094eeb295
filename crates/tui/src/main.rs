mod app;
mod client;
mod config;
mod error;
mod store;
mod ui;

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use crate::error::Result;

fn init_logging(config: &config::AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tripsplit_tui={level},engine={level}",
            level = config.level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;
    tracing::info!("starting with ledger store {:?}", config.store);

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}
