use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

static INIT: OnceCell<()> = OnceCell::new();
static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

const LOG_FILE_PREFIX: &str = "filter.log";

/// Dependencies that are chatty at `info` and below.
const QUIET_CRATES: [&str; 3] = ["reqwest", "hyper_util", "html5ever"];

/// Stdout carries host events, so the console layer writes to stderr and
/// can be switched off entirely with `LOG_CONSOLE=false`.
pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let directives = default_directives(&config.logging.level);
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&directives))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let (file_writer, guard) = tracing_appender::non_blocking(
            tracing_appender::rolling::daily(&paths.logs_dir, LOG_FILE_PREFIX),
        );
        let _ = FILE_GUARD.set(guard);

        let console_layer = config.logging.console.then(|| {
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_ansi(true)
        });

        let file_layer = fmt::layer()
            .compact()
            .with_writer(file_writer)
            .with_target(true)
            .with_ansi(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        tracing::info!(
            logs = %paths.logs_dir.display(),
            console = config.logging.console,
            mode = ?config.presentation.mode,
            "tracing initialized"
        );
        Ok(())
    })?;
    Ok(())
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    let mut directives = level.to_string();
    for krate in QUIET_CRATES {
        directives.push_str(&format!(",{krate}=warn"));
    }
    directives
}
