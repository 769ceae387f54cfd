//! Cosmos SDK balance source.
//!
//! Queries a chain's REST surface for bank balances, staking delegations
//! and accumulated rewards. Staking and rewards are only queried when the
//! bank query returned at least one balance; an account with no liquid
//! funds on a chain is assumed to hold nothing else there. This gate is a
//! deliberate cost-saving policy carried over from the reference
//! behavior.

mod models;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, CosmosNetwork, DenomOverride, QueryTarget};
use crate::prices::PriceTable;
use crate::provider::BalanceSource;
use crate::registry::{resolve_denom, AssetList, ChainRegistry};
use crate::utils::{identity_key, parse_scaled_amount};

use models::{BankBalancesResponse, Coin, DelegationsResponse, RewardsResponse};

pub struct CosmosSource {
    network: CosmosNetwork,
    client: Client,
    registry: Arc<ChainRegistry>,
    overrides: Arc<HashMap<String, DenomOverride>>,
    prices: Arc<PriceTable>,
}

impl CosmosSource {
    pub fn new(
        network: CosmosNetwork,
        client: Client,
        registry: Arc<ChainRegistry>,
        overrides: Arc<HashMap<String, DenomOverride>>,
        prices: Arc<PriceTable>,
    ) -> Self {
        Self {
            network,
            client,
            registry,
            overrides,
            prices,
        }
    }

    /// Picks the REST endpoint: explicit config wins, otherwise the
    /// registry's candidates are probed and the first healthy one is
    /// used.
    async fn rest_endpoint(&self) -> Result<String, SourceError> {
        if let Some(api) = &self.network.api {
            return Ok(api.trim_end_matches('/').to_string());
        }
        let info = self.registry.chain_info(&self.network.name).await?;
        self.registry
            .active_endpoint(&self.network.name, &info.apis.rest)
            .await
    }

    async fn get_json<T>(&self, url: &str, context: &str) -> Result<T, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::decode(context, e))
    }

    /// Turns `{denom, amount}` pairs into records labeled
    /// `"<network>-<section>"`.
    fn records_from_coins(
        &self,
        coins: &[Coin],
        section: &str,
        address: &str,
        assets: Option<&AssetList>,
    ) -> Vec<BalanceRecord> {
        let mut records = Vec::with_capacity(coins.len());
        for coin in coins {
            let (symbol, decimals) = resolve_denom(assets, &self.overrides, &coin.denom);
            let amount = match parse_scaled_amount(&coin.amount, decimals) {
                Ok(amount) => amount,
                Err(err) => {
                    debug!("{}: skipping {}: {err}", self.network.name, coin.denom);
                    continue;
                }
            };
            records.push(BalanceRecord {
                source_label: format!("{}-{}", self.network.name, section),
                account: address.to_string(),
                identity_key: identity_key(address),
                usd_value: self.prices.usd_value(&symbol, amount),
                token: symbol,
                amount,
                decimals,
            });
        }
        records
    }

    async fn bank_balances(&self, api: &str, address: &str) -> Result<Vec<Coin>, SourceError> {
        let url = format!("{api}/cosmos/bank/v1beta1/balances/{address}");
        let response: BankBalancesResponse = self.get_json(&url, "bank balances").await?;
        Ok(response.balances)
    }

    async fn staking_balances(&self, api: &str, address: &str) -> Result<Vec<Coin>, SourceError> {
        let url = format!("{api}/cosmos/staking/v1beta1/delegations/{address}");
        let response: DelegationsResponse = self.get_json(&url, "staking delegations").await?;
        Ok(response
            .delegation_responses
            .into_iter()
            .map(|d| d.balance)
            .collect())
    }

    async fn reward_balances(&self, api: &str, address: &str) -> Result<Vec<Coin>, SourceError> {
        let url = format!("{api}/cosmos/distribution/v1beta1/delegators/{address}/rewards");
        let response: RewardsResponse = self.get_json(&url, "rewards").await?;
        sum_rewards(&response)
    }
}

/// Rewards arrive per validator; they are summed per denom before
/// scaling so one record per token comes out.
fn sum_rewards(response: &RewardsResponse) -> Result<Vec<Coin>, SourceError> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for validator in &response.rewards {
        for coin in &validator.reward {
            let amount = parse_scaled_amount(&coin.amount, 0)?;
            let entry = totals.entry(coin.denom.clone()).or_insert_with(|| {
                order.push(coin.denom.clone());
                Decimal::ZERO
            });
            *entry += amount;
        }
    }
    Ok(order
        .into_iter()
        .map(|denom| {
            let amount = totals[&denom];
            Coin {
                denom,
                amount: amount.to_string(),
            }
        })
        .collect())
}

#[async_trait]
impl BalanceSource for CosmosSource {
    fn label(&self) -> &str {
        &self.network.name
    }

    async fn query(&self, target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        let api = self.rest_endpoint().await?;
        let address = &target.address;
        let assets = self.registry.asset_list(&self.network.name).await.ok();
        let assets = assets.as_deref();

        let bank = self.bank_balances(&api, address).await?;
        let mut records = self.records_from_coins(&bank, "bank", address, assets);

        // Staking and rewards only exist where liquid funds do; see the
        // module docs for the gate policy.
        if !bank.is_empty() {
            match self.staking_balances(&api, address).await {
                Ok(staking) => {
                    records.extend(self.records_from_coins(&staking, "staking", address, assets))
                }
                Err(err) => debug!("{}: staking query failed: {err}", self.network.name),
            }
            match self.reward_balances(&api, address).await {
                Ok(rewards) => {
                    records.extend(self.records_from_coins(&rewards, "rewards", address, assets))
                }
                Err(err) => debug!("{}: rewards query failed: {err}", self.network.name),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn source() -> CosmosSource {
        CosmosSource::new(
            CosmosNetwork {
                name: "osmosis".to_string(),
                prefix: "osmo".to_string(),
                api: Some("https://lcd.osmosis.zone".to_string()),
            },
            Client::new(),
            Arc::new(ChainRegistry::new(Client::new())),
            Arc::new(HashMap::new()),
            Arc::new(PriceTable::from_prices([("OSMO", dec!(0.5))])),
        )
    }

    #[test]
    fn test_records_from_coins_labels_and_values() {
        let source = source();
        let coins = vec![Coin {
            denom: "uosmo".to_string(),
            amount: "4000000".to_string(),
        }];
        let records = source.records_from_coins(&coins, "bank", "osmo1testaddr", None);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.source_label, "osmosis-bank");
        assert_eq!(record.account, "osmo1testaddr");
        assert_eq!(record.token, "OSMO");
        assert_eq!(record.amount, dec!(4));
        assert_eq!(record.usd_value, dec!(2.0));
        assert_eq!(record.decimals, 6);
    }

    #[test]
    fn test_records_from_coins_unpriced_token_is_zero_valued() {
        let source = source();
        let coins = vec![Coin {
            denom: "ujuno".to_string(),
            amount: "1000000".to_string(),
        }];
        let records = source.records_from_coins(&coins, "bank", "osmo1testaddr", None);
        assert_eq!(records[0].usd_value, Decimal::ZERO);
    }

    #[test]
    fn test_records_from_coins_skips_unparsable_amounts() {
        let source = source();
        let coins = vec![
            Coin {
                denom: "uosmo".to_string(),
                amount: "garbage".to_string(),
            },
            Coin {
                denom: "uosmo".to_string(),
                amount: "1000000".to_string(),
            },
        ];
        let records = source.records_from_coins(&coins, "bank", "osmo1testaddr", None);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Decimal::ONE);
    }

    #[test]
    fn test_sum_rewards_aggregates_per_denom() {
        let response: RewardsResponse = serde_json::from_str(
            r#"{
                "rewards": [
                    {"reward": [
                        {"denom": "uosmo", "amount": "100000.5"},
                        {"denom": "uion", "amount": "7"}
                    ]},
                    {"reward": [{"denom": "uosmo", "amount": "200000.25"}]}
                ]
            }"#,
        )
        .unwrap();
        let coins = sum_rewards(&response).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].denom, "uosmo");
        assert_eq!(coins[0].amount, "300000.75");
        assert_eq!(coins[1].denom, "uion");
        assert_eq!(coins[1].amount, "7");
    }

    #[test]
    fn test_sum_rewards_rejects_bad_amounts() {
        let response: RewardsResponse = serde_json::from_str(
            r#"{"rewards": [{"reward": [{"denom": "uosmo", "amount": "??"}]}]}"#,
        )
        .unwrap();
        assert!(sum_rewards(&response).is_err());
    }
}
