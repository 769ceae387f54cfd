//! USD price lookup.
//!
//! The price table is populated exactly once, before the collection
//! fan-out starts, and is immutable from then on: adapters share it as
//! `Arc<PriceTable>` and only read. A symbol missing from the table means
//! "unpriced", not an error.

use std::collections::HashMap;
use std::time::Duration;

use log::warn;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::SourceError;

const COINGECKO_MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// CoinGecko coin ids the portfolio cares about, resolved in one call.
const COIN_IDS: &[&str] = &[
    "tether",
    "altlayer",
    "usd-coin",
    "ethereum",
    "bitcoin",
    "pol-ex-matic",
    "cosmos",
    "celestia",
    "ion",
    "akash-network",
    "regen",
    "juno-network",
    "matic-network",
    "oasis-network",
    "stride",
    "osmosis",
    "stargaze",
    "injective",
    "dydx-chain",
    "passage",
    "evmos",
    "solana",
    "polkadot",
    "sommelier",
    "kujira",
    "persistence",
    "omniflix-network",
    "agoric",
    "quasar-2",
    "umee",
    "mars-protocol-a7fcbcfb-fd61-4017-92f0-7ee9f9cc6da3",
    "quicksilver",
    "neutron-3",
];

/// One row of the CoinGecko markets response.
#[derive(Debug, Deserialize)]
struct MarketRow {
    symbol: String,
    current_price: Option<Decimal>,
}

/// Frozen mapping from uppercase token symbol to unit USD price.
#[derive(Debug, Default)]
pub struct PriceTable {
    prices: HashMap<String, Decimal>,
}

impl PriceTable {
    /// An empty table: every lookup is "unpriced". Used when the price
    /// feed is unavailable and the run proceeds with zero USD values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from `(symbol, price)` pairs, normalizing symbols
    /// to uppercase. This is the only way prices get in; there is no
    /// mutation after construction.
    pub fn from_prices<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let prices = pairs
            .into_iter()
            .map(|(symbol, price)| (symbol.as_ref().to_uppercase(), price))
            .collect();
        Self { prices }
    }

    /// Unit USD price for a symbol, if known.
    pub fn price_of(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(&symbol.to_uppercase()).copied()
    }

    /// `amount * price(symbol)`, or zero when the symbol is unpriced.
    pub fn usd_value(&self, symbol: &str, amount: Decimal) -> Decimal {
        match self.price_of(symbol) {
            Some(price) => amount * price,
            None => Decimal::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Fetches current USD prices from CoinGecko.
///
/// Called once at startup; the caller decides whether a failure is fatal
/// (it is not — the run proceeds with an empty table and zero USD values).
pub async fn fetch_prices() -> Result<PriceTable, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let response = client
        .get(COINGECKO_MARKETS_URL)
        .query(&[("vs_currency", "usd"), ("ids", &COIN_IDS.join(","))])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: COINGECKO_MARKETS_URL.to_string(),
            status: response.status().as_u16(),
        });
    }

    let rows: Vec<MarketRow> = response
        .json()
        .await
        .map_err(|e| SourceError::decode("coingecko markets", e))?;

    let priced = rows.iter().filter(|r| r.current_price.is_some()).count();
    if priced < rows.len() {
        warn!("{} of {} market rows carry no price", rows.len() - priced, rows.len());
    }

    Ok(PriceTable::from_prices(rows.into_iter().filter_map(|row| {
        row.current_price.map(|price| (row.symbol, price))
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_value_priced_symbol() {
        let table = PriceTable::from_prices([("ATOM", dec!(10.0))]);
        assert_eq!(table.usd_value("ATOM", dec!(2.5)), dec!(25.0));
    }

    #[test]
    fn test_usd_value_is_case_insensitive() {
        let table = PriceTable::from_prices([("atom", dec!(10.0))]);
        assert_eq!(table.price_of("ATOM"), Some(dec!(10.0)));
        assert_eq!(table.usd_value("atom", Decimal::ONE), dec!(10.0));
    }

    #[test]
    fn test_usd_value_unpriced_symbol_is_zero() {
        let table = PriceTable::from_prices([("ATOM", dec!(10.0))]);
        assert_eq!(table.usd_value("XYZ", dec!(5)), Decimal::ZERO);
        assert_eq!(table.price_of("XYZ"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.usd_value("BTC", Decimal::ONE), Decimal::ZERO);
    }

    #[test]
    fn test_markets_response_decodes() {
        let body = r#"[
            {"id": "cosmos", "symbol": "atom", "current_price": 10.25},
            {"id": "dead-coin", "symbol": "ded", "current_price": null}
        ]"#;
        let rows: Vec<MarketRow> = serde_json::from_str(body).unwrap();
        assert_eq!(rows.len(), 2);
        let table = PriceTable::from_prices(
            rows.into_iter()
                .filter_map(|r| r.current_price.map(|p| (r.symbol, p))),
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.price_of("ATOM"), Some(dec!(10.25)));
    }
}
