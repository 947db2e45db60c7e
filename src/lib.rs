//! pagoda-transformer library
//!
//! This crate converts Prometheus-shape metric set documents into the
//! PAGODA shape: timestamps become ISO-8601 UTC strings, values are
//! normalized to 2 fractional digits, and every metric is keyed by a
//! derived, content-addressed label set identifier.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod server;
pub mod transformer;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging subsystem
///
/// # Arguments
/// * `level` - Log level string (trace, debug, info, warn, error)
///
/// # Errors
/// Returns an error if the logging system fails to initialize
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so one-shot mode can pipe the document from stdout.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
