//! Exchange account balance source.
//!
//! Each supported exchange implements [`ExchangeConnector`];
//! [`ExchangeSource`] adapts a connector to the [`BalanceSource`] seam
//! and stamps every record with the `"<name> (Exchange)"` label.

mod ascendex;
mod binance;

pub use ascendex::AscendexConnector;
pub use binance::BinanceConnector;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use rust_decimal::Decimal;
use sha2::Sha256;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, ExchangeCredentials, ExchangeKind, QueryTarget};
use crate::prices::PriceTable;
use crate::provider::BalanceSource;

type HmacSha256 = Hmac<Sha256>;

/// Display decimals for exchange-held crypto balances.
const EXCHANGE_DECIMALS: u32 = 8;

/// One asset balance as an exchange reports it, before labeling.
#[derive(Debug, Clone)]
pub struct ExchangeBalance {
    pub asset: String,
    pub amount: Decimal,
}

/// A client for one exchange account.
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// All non-zero balances in the account.
    async fn fetch_balances(&self) -> Result<Vec<ExchangeBalance>, SourceError>;
}

/// Builds the connector for the configured exchange kind.
pub fn connector_for(
    credentials: &ExchangeCredentials,
    client: Client,
) -> Box<dyn ExchangeConnector> {
    match credentials.kind {
        ExchangeKind::Binance => Box::new(BinanceConnector::new(credentials, client)),
        ExchangeKind::Ascendex => Box::new(AscendexConnector::new(credentials, client)),
    }
}

pub struct ExchangeSource {
    label: String,
    connector: Box<dyn ExchangeConnector>,
    prices: Arc<PriceTable>,
}

impl ExchangeSource {
    pub fn new(
        credentials: &ExchangeCredentials,
        connector: Box<dyn ExchangeConnector>,
        prices: Arc<PriceTable>,
    ) -> Self {
        Self {
            label: format!("{} (Exchange)", credentials.name),
            connector,
            prices,
        }
    }
}

#[async_trait]
impl BalanceSource for ExchangeSource {
    fn label(&self) -> &str {
        &self.label
    }

    /// Exchange accounts are not address-queried; the target is the
    /// fixed exchange label and is ignored here.
    async fn query(&self, _target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        let balances = self.connector.fetch_balances().await?;
        Ok(balances
            .into_iter()
            .map(|balance| BalanceRecord {
                source_label: self.label.clone(),
                account: self.label.clone(),
                identity_key: String::new(),
                usd_value: self.prices.usd_value(&balance.asset, balance.amount),
                token: balance.asset,
                amount: balance.amount,
                decimals: EXCHANGE_DECIMALS,
            })
            .collect())
    }
}

/// Hex HMAC-SHA256 signature over `payload`.
fn sign_sha256_hex(secret: &str, payload: &str) -> Result<String, SourceError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| SourceError::Api {
            provider: "exchange".to_string(),
            message: format!("invalid HMAC secret: {e}"),
        })?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Parses an exchange-reported amount, treating anything unparsable as
/// zero. Exchanges occasionally report placeholder strings for dust
/// rows; a zero row is dropped later anyway.
fn lenient_decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or(Decimal::ZERO)
}
