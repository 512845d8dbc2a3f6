//! Otherside console client.
//!
//! Reads configuration from the environment (and `.env`), logs to a session
//! file, then runs the text menus on stdin/stdout until the player quits.
mod app;
mod config;
mod console;
mod logging;

use std::io;

use anyhow::Result;
use app::App;
use config::ClientConfig;
use console::{Console, ConsoleError};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    logging::setup_logging(config.session_id.as_deref())?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting otherside");

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), config.type_delay);
    let mut app = App::new(console, config, seed);

    match app.run() {
        Ok(()) => tracing::info!("client shutdown complete"),
        Err(ConsoleError::Closed) => tracing::info!("input closed, shutting down"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
