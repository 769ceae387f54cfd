//! Cosmos chain-registry client.
//!
//! Chain metadata (REST endpoints, bech32 prefix) and asset lists come
//! from the public chain registry. Both are fetched lazily and cached for
//! the lifetime of the run. The cache is read and written by concurrent
//! producer tasks, so it is a `DashMap` of `OnceCell`s: concurrent
//! lookups for the same chain collapse into a single in-flight fetch,
//! and at most one fetch per key ever completes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use futures::future::select_ok;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::errors::SourceError;
use crate::models::DenomOverride;

const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/cosmos/chain-registry/master";

/// Seconds allowed for a single endpoint health probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

// ============================================================================
// Registry Payload Structures
// ============================================================================

/// `chain.json` subset.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainInfo {
    #[serde(default)]
    pub chain_name: String,
    #[serde(default)]
    pub bech32_prefix: String,
    #[serde(default)]
    pub apis: Apis,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Apis {
    #[serde(default)]
    pub rest: Vec<RestEndpoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestEndpoint {
    pub address: String,
}

/// `assetlist.json` subset.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub base: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
}

// ============================================================================
// ChainRegistry
// ============================================================================

type CacheCell<T> = Arc<OnceCell<Arc<T>>>;

/// Shared, lazily populated chain-registry cache.
///
/// One instance is shared by every Cosmos source in a run.
pub struct ChainRegistry {
    client: Client,
    base_url: String,
    chains: DashMap<String, CacheCell<ChainInfo>>,
    assets: DashMap<String, CacheCell<AssetList>>,
}

impl ChainRegistry {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Registry rooted at a different base URL. Used by tests.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            chains: DashMap::new(),
            assets: DashMap::new(),
        }
    }

    /// Chain metadata for `network`, fetched at most once per run.
    pub async fn chain_info(&self, network: &str) -> Result<Arc<ChainInfo>, SourceError> {
        let cell = self
            .chains
            .entry(network.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();
        cell.get_or_try_init(|| self.fetch_json::<ChainInfo>(network, "chain.json"))
            .await
            .map(Arc::clone)
    }

    /// Asset list for `network`, fetched at most once per run.
    pub async fn asset_list(&self, network: &str) -> Result<Arc<AssetList>, SourceError> {
        let cell = self
            .assets
            .entry(network.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();
        cell.get_or_try_init(|| self.fetch_json::<AssetList>(network, "assetlist.json"))
            .await
            .map(Arc::clone)
    }

    async fn fetch_json<T>(&self, network: &str, file: &str) -> Result<Arc<T>, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base_url, network, file);
        debug!("fetching {url}");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Registry {
                network: network.to_string(),
                message: format!("{file} returned status {}", response.status().as_u16()),
            });
        }
        let payload = response.json::<T>().await.map_err(|e| SourceError::Registry {
            network: network.to_string(),
            message: format!("decoding {file}: {e}"),
        })?;
        Ok(Arc::new(payload))
    }

    /// Probes all REST endpoints concurrently and returns the first one
    /// that answers the node-info health check with a success status.
    pub async fn active_endpoint(
        &self,
        network: &str,
        endpoints: &[RestEndpoint],
    ) -> Result<String, SourceError> {
        if endpoints.is_empty() {
            return Err(SourceError::NoEndpoint {
                network: network.to_string(),
            });
        }

        let probes: Vec<_> = endpoints
            .iter()
            .map(|endpoint| {
                let client = self.client.clone();
                let address = endpoint.address.clone();
                Box::pin(async move {
                    let url = format!("{address}/cosmos/base/tendermint/v1beta1/node_info");
                    let response = tokio::time::timeout(PROBE_TIMEOUT, client.get(&url).send())
                        .await
                        .map_err(|_| ())?
                        .map_err(|_| ())?;
                    if response.status().is_success() {
                        Ok(address)
                    } else {
                        Err(())
                    }
                })
            })
            .collect();

        match select_ok(probes).await {
            Ok((address, _)) => Ok(address),
            Err(()) => Err(SourceError::NoEndpoint {
                network: network.to_string(),
            }),
        }
    }
}

// ============================================================================
// Denom Resolution
// ============================================================================

/// Resolves an on-chain denom to `(display symbol, decimal exponent)`.
///
/// Lookup order: local overrides (the optional IBC assets file), then the
/// chain-registry asset list, then naming-convention fallbacks. The
/// fallbacks mirror Cosmos conventions: `u...` base denoms carry 6
/// decimals, `a...` denoms carry 18, unknown IBC hashes keep their denom
/// with a marker suffix.
pub fn resolve_denom(
    asset_list: Option<&AssetList>,
    overrides: &HashMap<String, DenomOverride>,
    denom: &str,
) -> (String, u32) {
    if let Some(asset) = overrides.get(denom) {
        return (asset.symbol.clone(), asset.decimals);
    }

    if let Some(list) = asset_list {
        if let Some(asset) = list.assets.iter().find(|a| a.base == denom) {
            let exponent = asset
                .denom_units
                .iter()
                .find(|unit| unit.denom == asset.display)
                .map(|unit| unit.exponent)
                .unwrap_or(6);
            return (asset.symbol.clone(), exponent);
        }
    }

    if denom.starts_with("ibc/") {
        return (format!("{denom} (Unknown IBC Asset)"), 6);
    }
    if let Some(rest) = denom.strip_prefix('u') {
        return (rest.to_uppercase(), 6);
    }
    if let Some(rest) = denom.strip_prefix('a') {
        return (rest.to_uppercase(), 18);
    }
    (denom.to_string(), 6)
}
