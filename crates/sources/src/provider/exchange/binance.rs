//! Binance connector: signed spot-account REST call.
//!
//! Binance signs the query string with HMAC-SHA256 and expects the API
//! key in the `X-MBX-APIKEY` header.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::SourceError;
use crate::models::ExchangeCredentials;

use super::{lenient_decimal, sign_sha256_hex, ExchangeBalance, ExchangeConnector};

const BASE_URL: &str = "https://api.binance.com";

/// Response from `/api/v3/account`.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(default)]
    balances: Vec<AssetBalance>,
}

#[derive(Debug, Deserialize)]
struct AssetBalance {
    asset: String,
    free: String,
    locked: String,
}

pub struct BinanceConnector {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl BinanceConnector {
    pub fn new(credentials: &ExchangeCredentials, client: Client) -> Self {
        Self {
            client,
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl ExchangeConnector for BinanceConnector {
    async fn fetch_balances(&self) -> Result<Vec<ExchangeBalance>, SourceError> {
        let query = format!("timestamp={}", Utc::now().timestamp_millis());
        let signature = sign_sha256_hex(&self.api_secret, &query)?;
        let url = format!("{}/api/v3/account?{query}&signature={signature}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Api {
                provider: "binance".to_string(),
                message: format!("account endpoint returned {}", response.status().as_u16()),
            });
        }
        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| SourceError::decode("binance account", e))?;

        Ok(account
            .balances
            .into_iter()
            .filter_map(|balance| {
                let amount = lenient_decimal(&balance.free) + lenient_decimal(&balance.locked);
                (amount > Decimal::ZERO).then(|| ExchangeBalance {
                    asset: balance.asset,
                    amount,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_response_free_plus_locked() {
        let body = r#"{
            "makerCommission": 10,
            "balances": [
                {"asset": "BTC", "free": "0.5", "locked": "0.25"},
                {"asset": "DUST", "free": "0", "locked": "0"}
            ]
        }"#;
        let account: AccountResponse = serde_json::from_str(body).unwrap();
        let balances: Vec<ExchangeBalance> = account
            .balances
            .into_iter()
            .filter_map(|b| {
                let amount = lenient_decimal(&b.free) + lenient_decimal(&b.locked);
                (amount > Decimal::ZERO).then(|| ExchangeBalance {
                    asset: b.asset,
                    amount,
                })
            })
            .collect();
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].asset, "BTC");
        assert_eq!(balances[0].amount, dec!(0.75));
    }
}
