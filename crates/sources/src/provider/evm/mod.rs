//! EVM balance source.
//!
//! Native balances come straight from the chain's JSON-RPC endpoint
//! (`eth_getBalance`); ERC-20 holdings come from the Moralis token index,
//! filtered against its spam signals before anything is emitted.

mod models;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, EvmNetwork, QueryTarget};
use crate::prices::PriceTable;
use crate::provider::BalanceSource;
use crate::utils::{parse_scaled_amount, wei_to_ether};

use models::{MoralisTokenBalance, RpcBalanceResponse, RpcRequest};

const MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2";

/// Symbol/name substrings that mark a token as spam regardless of other
/// signals.
const SUSPICIOUS_TERMS: &[&str] = &[
    "visit", "claim", "bonus", "reward", "gift", ".com", ".org", ".net", ".tech", "http",
];

pub struct EvmSource {
    network: EvmNetwork,
    client: Client,
    moralis_api_key: String,
    prices: Arc<PriceTable>,
}

impl EvmSource {
    pub fn new(
        network: EvmNetwork,
        client: Client,
        moralis_api_key: String,
        prices: Arc<PriceTable>,
    ) -> Self {
        Self {
            network,
            client,
            moralis_api_key,
            prices,
        }
    }

    async fn native_balance(&self, address: &str) -> Result<BalanceRecord, SourceError> {
        let request = RpcRequest::new("eth_getBalance", json!([address, "latest"]));
        let response: RpcBalanceResponse = self
            .client
            .post(&self.network.rpc)
            .json(&request)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| SourceError::decode("eth_getBalance", e))?;

        if let Some(err) = response.error {
            return Err(SourceError::Api {
                provider: self.network.name.clone(),
                message: format!("rpc error {}: {}", err.code, err.message),
            });
        }
        let hex_wei = response.result.ok_or_else(|| {
            SourceError::decode("eth_getBalance", "response carried neither result nor error")
        })?;

        let amount = wei_to_ether(&hex_wei)?;
        let symbol = canonical_symbol(&self.network.native_token.symbol);
        Ok(BalanceRecord {
            source_label: self.network.name.clone(),
            account: address.to_string(),
            identity_key: String::new(),
            usd_value: self.prices.usd_value(&symbol, amount),
            token: symbol,
            amount,
            decimals: self.network.native_token.decimals,
        })
    }

    async fn erc20_balances(&self, address: &str) -> Result<Vec<BalanceRecord>, SourceError> {
        let url = format!(
            "{MORALIS_BASE_URL}/{address}/erc20?chain={}",
            moralis_chain_slug(self.network.chain_id)
        );
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .header("X-API-Key", &self.moralis_api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                url,
                status: response.status().as_u16(),
            });
        }
        let tokens: Vec<MoralisTokenBalance> = response
            .json()
            .await
            .map_err(|e| SourceError::decode("moralis erc20", e))?;

        let mut records = Vec::new();
        for token in tokens {
            if should_skip_token(&token) {
                debug!("{}: skipping spam token {}", self.network.name, token.symbol);
                continue;
            }
            let amount = match parse_scaled_amount(&token.balance, token.decimals) {
                Ok(amount) => amount,
                Err(err) => {
                    debug!("{}: skipping {}: {err}", self.network.name, token.symbol);
                    continue;
                }
            };
            if amount == Decimal::ZERO {
                continue;
            }
            let symbol = sanitize_symbol(&canonical_symbol(&token.symbol));
            records.push(BalanceRecord {
                source_label: self.network.name.clone(),
                account: address.to_string(),
                identity_key: String::new(),
                usd_value: self.prices.usd_value(&symbol, amount),
                token: symbol,
                amount,
                decimals: token.decimals,
            });
        }
        Ok(records)
    }
}

#[async_trait]
impl BalanceSource for EvmSource {
    fn label(&self) -> &str {
        &self.network.name
    }

    async fn query(&self, target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        let mut records = vec![self.native_balance(&target.address).await?];
        match self.erc20_balances(&target.address).await {
            Ok(tokens) => records.extend(tokens),
            // Token-index failure should not cost the native balance.
            Err(err) => warn!("{}: erc20 query failed: {err}", self.network.name),
        }
        Ok(records)
    }
}

/// Polygon renamed its token; prices are still keyed by MATIC.
fn canonical_symbol(symbol: &str) -> String {
    if symbol == "POL" {
        "MATIC".to_string()
    } else {
        symbol.to_string()
    }
}

/// Moralis chain slug for a chain id; unknown ids use the hex form the
/// API also accepts.
fn moralis_chain_slug(chain_id: u64) -> String {
    match chain_id {
        1 => "eth".to_string(),
        10 => "optimism".to_string(),
        56 => "bsc".to_string(),
        137 => "polygon".to_string(),
        42161 => "arbitrum".to_string(),
        other => format!("0x{other:x}"),
    }
}

/// Spam heuristics over the Moralis signals: the explicit spam flag,
/// scammy symbol/name fragments, and unverified contracts Moralis has
/// not scored.
fn should_skip_token(token: &MoralisTokenBalance) -> bool {
    if token.possible_spam {
        return true;
    }

    let symbol = token.symbol.to_lowercase();
    let name = token.name.to_lowercase();
    if SUSPICIOUS_TERMS
        .iter()
        .any(|term| symbol.contains(term) || name.contains(term))
    {
        return true;
    }

    !token.verified_contract && token.security_score.is_none()
}

/// Strips junk prefixes and trailing spam decorations from a symbol.
fn sanitize_symbol(symbol: &str) -> String {
    let mut clean = symbol;
    for prefix in ["$", "#", "!", "Visit", "Rewards", "Token"] {
        clean = clean.trim_start_matches(prefix).trim_start();
    }
    if let Some(idx) = clean.find(" <-") {
        clean = &clean[..idx];
    }
    if let Some(idx) = clean.find(" -") {
        clean = &clean[..idx];
    }
    clean.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, name: &str) -> MoralisTokenBalance {
        serde_json::from_value(json!({
            "symbol": symbol,
            "name": name,
            "decimals": 18,
            "balance": "1000000000000000000",
            "possible_spam": false,
            "verified_contract": true,
            "security_score": 50
        }))
        .unwrap()
    }

    #[test]
    fn test_skip_flagged_spam() {
        let mut t = token("ABC", "Abc Coin");
        t.possible_spam = true;
        assert!(should_skip_token(&t));
    }

    #[test]
    fn test_skip_suspicious_terms() {
        assert!(should_skip_token(&token("FREE", "visit example.com")));
        assert!(should_skip_token(&token("claim-me", "Totally Fine")));
        assert!(!should_skip_token(&token("USDT", "Tether USD")));
    }

    #[test]
    fn test_skip_unverified_unscored() {
        let mut t = token("ABC", "Abc Coin");
        t.verified_contract = false;
        t.security_score = None;
        assert!(should_skip_token(&t));

        // Unverified but scored contracts pass.
        let mut t = token("ABC", "Abc Coin");
        t.verified_contract = false;
        t.security_score = Some(10);
        assert!(!should_skip_token(&t));
    }

    #[test]
    fn test_sanitize_symbol() {
        assert_eq!(sanitize_symbol("$WEN"), "WEN");
        assert_eq!(sanitize_symbol("ABC <- free money"), "ABC");
        assert_eq!(sanitize_symbol("XYZ - airdrop"), "XYZ");
        assert_eq!(sanitize_symbol("USDC"), "USDC");
    }

    #[test]
    fn test_canonical_symbol_renames_pol() {
        assert_eq!(canonical_symbol("POL"), "MATIC");
        assert_eq!(canonical_symbol("ETH"), "ETH");
    }

    #[test]
    fn test_moralis_chain_slug() {
        assert_eq!(moralis_chain_slug(1), "eth");
        assert_eq!(moralis_chain_slug(137), "polygon");
        assert_eq!(moralis_chain_slug(8453), "0x2105");
    }
}
