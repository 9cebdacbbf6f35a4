mod app;
mod classifier;
mod config;
mod domain;
mod host;
mod infrastructure;
mod presenter;
mod session;
mod store;
mod web_content;

use std::process;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::FilterHostApp::initialize(config, paths, shutdown).await?;
    let result = app.run().await;
    if let Err(err) = &result {
        tracing::error!(error = %err, "filter host failed");
    }

    // A signal can leave stdin parked in a blocking read; don't wait on it.
    process::exit(if result.is_ok() { 0 } else { 1 });
}
