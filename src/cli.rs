//! CLI argument parsing for pagoda-transformer
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Options
//!
//! - `--config` / `-c`: Configuration file path (default: config.yaml, env: PAGODA_CONFIG)
//! - `--port` / `-p`: Server port (overrides config file, env: PAGODA_PORT)
//! - `--bind-address`: Server bind address (env: PAGODA_BIND_ADDRESS)
//! - `--transform-path`: Transform endpoint path (env: PAGODA_TRANSFORM_PATH)
//! - `--input` / `-i`: Transform one document from a file ('-' for stdin) and exit
//! - `--output` / `-o`: Write the transformed document to a file instead of stdout
//! - `--pretty`: Pretty-print the transformed document
//! - `--validate`: Validate configuration without starting the server
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: PAGODA_LOG_LEVEL)
//!
//! # Precedence
//!
//! Configuration values are resolved in the following order (highest to lowest priority):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// pagoda-transformer - Prometheus to PAGODA metrics document transformer
///
/// Re-shapes Prometheus-shape metric set documents into the PAGODA shape,
/// either as an HTTP service or as a one-shot filter over a single document.
///
/// Environment variables can be used for all configuration options.
/// CLI arguments take precedence over environment variables,
/// which take precedence over config file values.
#[derive(Parser, Debug)]
#[command(name = "pagoda-transformer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config.yaml",
        env = "PAGODA_CONFIG"
    )]
    pub config: PathBuf,

    /// Server port (overrides config file)
    #[arg(short, long, value_name = "PORT", env = "PAGODA_PORT")]
    pub port: Option<u16>,

    /// Server bind address (overrides config file)
    /// Supported values: IP addresses (0.0.0.0, 127.0.0.1, ::1) or "localhost"
    #[arg(long, value_name = "ADDRESS", env = "PAGODA_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Transform endpoint path (overrides config file)
    /// Must start with '/' and not conflict with '/' or '/health'
    #[arg(long, value_name = "PATH", env = "PAGODA_TRANSFORM_PATH")]
    pub transform_path: Option<String>,

    /// Transform a single document from FILE ('-' for stdin) and exit
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the transformed document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", requires = "input")]
    pub output: Option<PathBuf>,

    /// Pretty-print the transformed document (overrides config file)
    #[arg(long)]
    pub pretty: bool,

    /// Validate configuration without starting the server
    #[arg(long)]
    pub validate: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "PAGODA_LOG_LEVEL"
    )]
    pub log_level: LogLevel,
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
