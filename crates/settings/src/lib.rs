//! Broker Settings
//!
//! Configuration for processes embedding the Broker payment tree.
//!
//! ## Features
//!
//! - Channel scope (contract address, chain id, hashlock binding)
//! - Tree layout selection
//! - Log level
//! - JSON serialization
//!
//! ## Usage
//!
//! ```no_run
//! use broker_settings::{Settings, ScopeKind};
//!
//! // Load or create default settings
//! let mut settings = Settings::load_or_default()?;
//!
//! // Bind hashlocks to the chain id instead of the contract
//! settings.channel.scope = ScopeKind::Chain;
//!
//! // Save settings
//! settings.save()?;
//! # Ok::<(), broker_settings::SettingsError>(())
//! ```

mod config;

pub use config::{ChannelSettings, LoggingSettings, ScopeKind, Settings, TreeSettings};

use std::path::PathBuf;

use thiserror::Error;

/// Overrides the configuration directory when set
pub const CONFIG_DIR_ENV: &str = "BROKER_CONFIG_DIR";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(serde_json::Error),

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),

    #[error("Invalid setting: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// `$BROKER_CONFIG_DIR`, else `~/.broker`, else `./.broker`
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".broker")
}

/// Get the default settings file path
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}
