//! pagoda-transformer - Prometheus to PAGODA metrics document transformer
//!
//! This binary re-shapes Prometheus-shape metric set documents into the
//! PAGODA shape, either as an HTTP service or as a one-shot filter over a
//! single document.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use pagoda_transformer::cli::Cli;
use pagoda_transformer::codec::Codec;
use pagoda_transformer::config::Config;
use pagoda_transformer::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize logging
    pagoda_transformer::init_logging(&args.log_level.to_string())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting pagoda-transformer"
    );

    // Load configuration and apply CLI overrides
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref bind_address) = args.bind_address {
        config.server.bind_address = bind_address.clone();
    }
    if let Some(ref path) = args.transform_path {
        config.server.path = path.clone();
    }
    if args.pretty {
        config.transform.pretty_output = true;
    }
    config.validate()?;

    if args.validate {
        println!("Configuration is valid");
        return Ok(());
    }

    // One-shot mode: transform a single document and exit
    if let Some(ref input) = args.input {
        return transform_document(&config, input, args.output.as_deref());
    }

    // Start server
    let port = config.server.port;
    server::run(config, port).await?;

    Ok(())
}

/// Transform one document from a file (or stdin) and write the result.
fn transform_document(config: &Config, input: &Path, output: Option<&Path>) -> Result<()> {
    let raw = if input == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read document from stdin")?;
        buffer
    } else {
        std::fs::read(input)
            .with_context(|| format!("Failed to read document from {}", input.display()))?
    };

    let codec = Codec::new().with_pretty(config.transform.pretty_output);
    let engine = server::engine_from_config(config);

    let decoded = codec.decode(&raw)?;
    let report = engine.transform(&decoded)?;
    for skipped in &report.skipped {
        warn!(
            key = %skipped.key,
            error = %skipped.error,
            "Skipping metric with schema contract violation"
        );
    }
    let encoded = codec.encode(&report.document)?;

    match output {
        Some(path) => std::fs::write(path, &encoded)
            .with_context(|| format!("Failed to write document to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.write_all(b"\n")?;
        }
    }

    info!(
        metrics = report.document.metrics.metric.len(),
        skipped = report.skipped.len(),
        "Document transformed"
    );

    Ok(())
}
