//! Broker Logging
//!
//! `tracing-subscriber` setup shared by every process embedding Broker.
//! `RUST_LOG` always wins over the configured level.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::{fmt as fmt_layer, prelude::*, EnvFilter};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, LoggingError>;

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Default filter directive: `level` globally, one notch noisier for
    /// Broker crates when running at `info`.
    pub fn directive(&self) -> String {
        match self {
            Self::Info => "info,broker=debug".to_string(),
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the filter: `RUST_LOG` if set, otherwise `level`'s directive.
pub fn filter_for(level: LogLevel) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level.directive())
            .map_err(|e| LoggingError::InvalidFilter(e.to_string())),
    }
}

/// Install the global subscriber.
pub fn try_init(level: LogLevel) -> Result<()> {
    let filter = filter_for(level)?;
    tracing_subscriber::registry()
        .with(fmt_layer::layer())
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Install the global subscriber, ignoring a previously installed one.
pub fn init(level: LogLevel) {
    let _ = try_init(level);
}

/// Subscriber for tests: captured output, ignores repeat calls.
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt_layer::layer().with_test_writer())
        .with(filter)
        .try_init();
}
