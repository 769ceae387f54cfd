//! Builds the collection plan out of the loaded configuration.
//!
//! One source is constructed per configured network or exchange; the
//! plan is the cross product of each source with its targets. Cosmos
//! addresses are re-encoded under every chain's bech32 prefix before
//! they become targets.

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use reqwest::Client;

use chainfolio_core::CollectionPlan;
use chainfolio_sources::utils::convert_bech32_prefix;
use chainfolio_sources::{
    connector_for, BalanceSource, ChainRegistry, CosmosSource, EvmSource, ExchangeSource,
    FixedSource, PriceTable, QueryTarget, SolanaSource,
};

use crate::config::Config;

/// Per-call timeout every adapter client carries; the engine adds no
/// timeout of its own.
const SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build(config: &Config, prices: Arc<PriceTable>) -> anyhow::Result<CollectionPlan> {
    let client = Client::builder().timeout(SOURCE_TIMEOUT).build()?;
    let registry = Arc::new(ChainRegistry::new(client.clone()));
    let overrides = Arc::new(config.load_denom_overrides()?);

    let mut plan = CollectionPlan::new();

    for network in &config.cosmos_networks {
        let source = Arc::new(CosmosSource::new(
            network.clone(),
            client.clone(),
            registry.clone(),
            overrides.clone(),
            prices.clone(),
        ));
        for address in &config.cosmos_addresses {
            match convert_bech32_prefix(address, &network.prefix) {
                Ok(converted) => plan.push(source.clone(), QueryTarget::new(converted)),
                Err(err) => warn!("skipping {address} on {}: {err}", network.name),
            }
        }
    }

    for network in &config.evm_networks {
        let source = Arc::new(EvmSource::new(
            network.clone(),
            client.clone(),
            config.moralis_api_key.clone(),
            prices.clone(),
        ));
        for address in &config.evm_addresses {
            plan.push(source.clone(), QueryTarget::new(address.clone()));
        }
    }

    for network in &config.solana_networks {
        let source = Arc::new(SolanaSource::new(
            network.clone(),
            client.clone(),
            prices.clone(),
        ));
        for address in &config.solana_addresses {
            plan.push(source.clone(), QueryTarget::new(address.clone()));
        }
    }

    for credentials in &config.exchanges {
        let connector = connector_for(credentials, client.clone());
        let source = Arc::new(ExchangeSource::new(credentials, connector, prices.clone()));
        let label = source.label().to_string();
        plan.push(source, QueryTarget::new(label));
    }

    if !config.fixed_balances.is_empty() {
        let source = Arc::new(FixedSource::new(
            config.fixed_balances.clone(),
            prices.clone(),
        ));
        plan.push(source, QueryTarget::new("fixed"));
    }

    Ok(plan)
}
