//! Solana balance source.
//!
//! Queries the JSON-RPC endpoint for the native SOL balance and every
//! SPL token account the address owns. Token mints resolve through a
//! small known-mint table; unknown mints keep a truncated mint id as
//! their symbol so they stay visible in the detail view.

mod models;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, QueryTarget, SolanaNetwork};
use crate::prices::PriceTable;
use crate::provider::BalanceSource;
use crate::utils::parse_scaled_amount;

use models::{GetBalanceResponse, TokenAccountsResponse};

const SPL_TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const LAMPORTS_DECIMALS: u32 = 9;

pub struct SolanaSource {
    network: SolanaNetwork,
    client: Client,
    prices: Arc<PriceTable>,
}

impl SolanaSource {
    pub fn new(network: SolanaNetwork, client: Client, prices: Arc<PriceTable>) -> Self {
        Self {
            network,
            client,
            prices,
        }
    }

    async fn rpc_call<T>(&self, method: &str, params: serde_json::Value) -> Result<T, SourceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let body = json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params});
        self.client
            .post(&self.network.rpc)
            .json(&body)
            .send()
            .await?
            .json::<T>()
            .await
            .map_err(|e| SourceError::decode(method, e))
    }

    async fn sol_balance(&self, address: &str) -> Result<BalanceRecord, SourceError> {
        let response: GetBalanceResponse =
            self.rpc_call("getBalance", json!([address])).await?;
        let lamports = response
            .result
            .ok_or_else(|| SourceError::decode("getBalance", "missing result"))?
            .value;
        let amount = parse_scaled_amount(&lamports.to_string(), LAMPORTS_DECIMALS)?;
        Ok(BalanceRecord {
            source_label: self.network.name.clone(),
            account: address.to_string(),
            identity_key: String::new(),
            token: "SOL".to_string(),
            usd_value: self.prices.usd_value("SOL", amount),
            amount,
            decimals: LAMPORTS_DECIMALS,
        })
    }

    async fn spl_balances(&self, address: &str) -> Result<Vec<BalanceRecord>, SourceError> {
        let params = json!([
            address,
            {"programId": SPL_TOKEN_PROGRAM},
            {"encoding": "jsonParsed"}
        ]);
        let response: TokenAccountsResponse =
            self.rpc_call("getTokenAccountsByOwner", params).await?;
        let entries = response.result.map(|r| r.value).unwrap_or_default();

        let mut records = Vec::new();
        for entry in entries {
            let info = entry.account.data.parsed.info;
            let amount = match parse_scaled_amount(&info.token_amount.amount, info.token_amount.decimals)
            {
                Ok(amount) => amount,
                Err(err) => {
                    debug!("{}: skipping mint {}: {err}", self.network.name, info.mint);
                    continue;
                }
            };
            if amount == Decimal::ZERO {
                continue;
            }
            let symbol = mint_symbol(&info.mint);
            records.push(BalanceRecord {
                source_label: self.network.name.clone(),
                account: address.to_string(),
                identity_key: String::new(),
                usd_value: self.prices.usd_value(&symbol, amount),
                token: symbol,
                amount,
                decimals: info.token_amount.decimals,
            });
        }
        Ok(records)
    }
}

#[async_trait]
impl BalanceSource for SolanaSource {
    fn label(&self) -> &str {
        &self.network.name
    }

    async fn query(&self, target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        let mut records = vec![self.sol_balance(&target.address).await?];
        match self.spl_balances(&target.address).await {
            Ok(tokens) => records.extend(tokens),
            Err(err) => debug!("{}: token query failed: {err}", self.network.name),
        }
        Ok(records)
    }
}

/// Known mint addresses. Anything else keeps a truncated mint id.
fn mint_symbol(mint: &str) -> String {
    match mint {
        "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v" => "USDC".to_string(),
        "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB" => "USDT".to_string(),
        "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So" => "MSOL".to_string(),
        "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn" => "JITOSOL".to_string(),
        other => {
            let prefix: String = other.chars().take(8).collect();
            format!("Unknown ({prefix})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_symbol_known() {
        assert_eq!(
            mint_symbol("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            "USDC"
        );
        assert_eq!(
            mint_symbol("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB"),
            "USDT"
        );
    }

    #[test]
    fn test_mint_symbol_unknown_truncates() {
        assert_eq!(
            mint_symbol("So11111111111111111111111111111111111111112"),
            "Unknown (So111111)"
        );
    }
}
