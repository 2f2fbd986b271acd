//! Configuration types

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use broker_core::Address;
use broker_crypto::HashlockScope;
use broker_logging::LogLevel;
use broker_merkle::TreeLayout;

use crate::{default_settings_path, Result, SettingsError};

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Channel contract settings
    #[serde(default)]
    pub channel: ChannelSettings,

    /// Payment tree settings
    #[serde(default)]
    pub tree: TreeSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// File these settings were loaded from (not serialized)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Settings {
    /// Settings at [`default_settings_path`], or defaults if none are saved.
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Settings at `path`, or defaults bound to `path` if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = match std::fs::read(path) {
            Ok(raw) => {
                let parsed: Settings =
                    serde_json::from_slice(&raw).map_err(SettingsError::ParseError)?;
                debug!("Read settings from {}", path.display());
                parsed
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(SettingsError::ReadError(e)),
        };
        settings.config_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Write back to the path these settings were loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.config_path {
            Some(path) => self.save_to(path),
            None => self.save_to(&default_settings_path()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(SettingsError::CreateDirError)?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(SettingsError::ParseError)?;
        std::fs::write(path, json).map_err(SettingsError::WriteError)?;
        info!("Settings written to {}", path.display());
        Ok(())
    }
}

/// Channel contract settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Broker contract address
    #[serde(default)]
    pub contract_address: Address,

    /// Chain id the contract was deployed with
    #[serde(default = "default_chain_id")]
    pub chain_id: u32,

    /// What hashlocks are bound to besides the channel
    #[serde(default)]
    pub scope: ScopeKind,
}

fn default_chain_id() -> u32 {
    1
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            contract_address: Address::ZERO,
            chain_id: default_chain_id(),
            scope: ScopeKind::default(),
        }
    }
}

impl ChannelSettings {
    /// Resolve the configured hashlock binding.
    ///
    /// A contract-bound scope needs a real contract address.
    pub fn hashlock_scope(&self) -> Result<HashlockScope> {
        match self.scope {
            ScopeKind::Contract if self.contract_address == Address::ZERO => Err(
                SettingsError::InvalidValue("channel.contract_address is not set".to_string()),
            ),
            ScopeKind::Contract => Ok(HashlockScope::Contract(self.contract_address)),
            ScopeKind::Chain => Ok(HashlockScope::Chain(self.chain_id)),
        }
    }
}

/// Hashlock binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// Bound to the contract address (unidirectional broker)
    #[default]
    Contract,
    /// Bound to the chain id (bidirectional broker)
    Chain,
}

/// Payment tree settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeSettings {
    /// Pairing convention; payment ledgers only accept `sorted`
    #[serde(default)]
    pub layout: TreeLayout,
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is unset
    #[serde(default)]
    pub level: LogLevel,
}
