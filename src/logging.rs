// src/logging.rs
use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Build the logger for a run: console on stderr plus an append-only log file.
///
/// The returned dispatch is not installed globally; hand it to the
/// components that should log through it.
pub fn build_dispatch(config: &LoggingConfig) -> Result<Dispatch> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level: {}", config.level))?,
    };

    let console = config
        .console
        .then(|| fmt::layer().with_writer(std::io::stderr).with_target(false));

    let file = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let subscriber = Registry::default().with(filter).with(console).with(file);
    Ok(Dispatch::new(subscriber))
}
