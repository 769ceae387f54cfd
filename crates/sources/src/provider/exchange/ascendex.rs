//! AscendEx connector: signed cash-balance REST call.
//!
//! AscendEx signs `"<timestamp>GET<path>"` with HMAC-SHA256 and expects
//! the key, timestamp and signature in `x-auth-*` headers.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::SourceError;
use crate::models::ExchangeCredentials;

use super::{lenient_decimal, sign_sha256_hex, ExchangeBalance, ExchangeConnector};

const BASE_URL: &str = "https://ascendex.com";
const TESTNET_BASE_URL: &str = "https://api-test.ascendex.com";
const BALANCE_PATH: &str = "/0/api/pro/v1/cash/balance";

/// Response from the cash balance endpoint. A non-zero `code` is an
/// application-level error.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    code: i64,
    #[serde(default)]
    data: Vec<CashBalance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashBalance {
    asset: String,
    total_balance: String,
}

pub struct AscendexConnector {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl AscendexConnector {
    pub fn new(credentials: &ExchangeCredentials, client: Client) -> Self {
        let base_url = if credentials.extra.get("testnet").map(String::as_str) == Some("true") {
            TESTNET_BASE_URL
        } else {
            BASE_URL
        };
        Self {
            client,
            api_key: credentials.api_key.clone(),
            api_secret: credentials.api_secret.clone(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl ExchangeConnector for AscendexConnector {
    async fn fetch_balances(&self) -> Result<Vec<ExchangeBalance>, SourceError> {
        let timestamp = Utc::now().timestamp_millis().to_string();
        let prehash = format!("{timestamp}GET{BALANCE_PATH}");
        let signature = sign_sha256_hex(&self.api_secret, &prehash)?;

        let response = self
            .client
            .get(format!("{}{BALANCE_PATH}", self.base_url))
            .header("x-auth-key", &self.api_key)
            .header("x-auth-timestamp", &timestamp)
            .header("x-auth-signature", signature)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SourceError::Api {
                provider: "ascendex".to_string(),
                message: format!("balance endpoint returned {}", response.status().as_u16()),
            });
        }
        let payload: BalanceResponse = response
            .json()
            .await
            .map_err(|e| SourceError::decode("ascendex balance", e))?;
        if payload.code != 0 {
            return Err(SourceError::Api {
                provider: "ascendex".to_string(),
                message: format!("code {}", payload.code),
            });
        }

        let mut balances = Vec::new();
        for row in payload.data {
            let amount = lenient_decimal(&row.total_balance);
            if amount > Decimal::ZERO {
                balances.push(ExchangeBalance {
                    asset: row.asset,
                    amount,
                });
            } else {
                debug!("ascendex: dropping zero balance row for {}", row.asset);
            }
        }
        Ok(balances)
    }
}
