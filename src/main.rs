//! Digital Rolodex - Main entry point
//!
//! Runs the interactive contact manager over stdin/stdout, persisting to the
//! JSON file named by `ROLODEX_FILE`.

use anyhow::Result;
use rolodex::cli::Menu;
use rolodex::repositories::{ContactRepository, JsonFileRepository};
use rolodex::{Config, Rolodex};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Configuration first so LOG_LEVEL can pick the default filter
    let config = Config::from_env();
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "warn".to_string());

    // Initialize logging (stderr only to keep the menu on stdout readable)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let repository = Arc::new(
        JsonFileRepository::new(config.contacts_file.clone()).with_policy(config.load_policy),
    ) as Arc<dyn ContactRepository>;

    let rolodex = Rolodex::open(repository);
    info!(
        "Opened {} with {} contact(s)",
        rolodex.location(),
        rolodex.len()
    );
    for warning in rolodex.load_warnings() {
        warn!("Load warning: {}", warning);
    }

    let stdin = io::stdin();
    let today = chrono::Local::now().date_naive();
    let mut menu = Menu::new(rolodex, stdin.lock(), io::stdout(), today)
        .with_search_mode(config.search_mode)
        .with_birthday_window(config.birthday_window_days);

    menu.run()?;

    info!("Digital Rolodex shutdown complete");
    Ok(())
}
