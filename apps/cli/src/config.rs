//! Application configuration.
//!
//! Everything the run needs is declared in one JSON file: the networks
//! to query, the addresses to query them with, exchange credentials and
//! literal fixed balances. An unreadable or unparsable config is the one
//! fatal error in the program.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use chainfolio_sources::{
    CosmosNetwork, DenomOverride, EvmNetwork, ExchangeCredentials, FixedBalance, SolanaNetwork,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cosmos_networks: Vec<CosmosNetwork>,
    #[serde(default)]
    pub evm_networks: Vec<EvmNetwork>,
    #[serde(default)]
    pub solana_networks: Vec<SolanaNetwork>,
    #[serde(default)]
    pub cosmos_addresses: Vec<String>,
    #[serde(default)]
    pub evm_addresses: Vec<String>,
    #[serde(default)]
    pub solana_addresses: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<ExchangeCredentials>,
    #[serde(default)]
    pub fixed_balances: Vec<FixedBalance>,
    /// Optional local denom-override file, JSON array of IBC asset
    /// entries. Overrides win over the chain-registry asset list.
    #[serde(default)]
    pub ibc_assets_file: Option<PathBuf>,
    #[serde(default)]
    pub moralis_api_key: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Loads the optional IBC override file into a denom-keyed map.
    ///
    /// Only `"type": "ibc"` entries apply; each is reachable by denom
    /// and, when unclaimed, by symbol as well.
    pub fn load_denom_overrides(&self) -> Result<HashMap<String, DenomOverride>, ConfigError> {
        let Some(path) = &self.ibc_assets_file else {
            return Ok(HashMap::new());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let assets: Vec<DenomOverride> =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut overrides = HashMap::new();
        for asset in assets.into_iter().filter(|a| a.asset_type == "ibc") {
            overrides
                .entry(asset.symbol.clone())
                .or_insert_with(|| asset.clone());
            overrides.insert(asset.denom.clone(), asset);
        }
        Ok(overrides)
    }
}
