//! The balance observation model.

use rust_decimal::Decimal;
use serde::Serialize;

/// One balance observation emitted by a source.
///
/// A record is immutable once constructed: the collection engine and the
/// summary views only read fields and derive separate totals. `usd_value`
/// is computed at creation time against the frozen price table; an
/// unpriced token yields zero and is dropped by the collector's
/// materiality filter downstream.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRecord {
    /// Provenance label, e.g. `"osmosis-staking"`, `"ethereum"`,
    /// `"Binance (Exchange)"`. The summary views derive the network
    /// family and the asset category from this label.
    pub source_label: String,
    /// The identity as presented to the source: an address string, or a
    /// fixed label for non-address sources.
    pub account: String,
    /// Normalized cross-source identity (hex of the bech32 payload for
    /// Cosmos addresses). Empty when unknown; empty is a legal value and
    /// groups under the empty key.
    pub identity_key: String,
    /// Canonical uppercase token symbol.
    pub token: String,
    /// Quantity in human units, already scaled by the source's decimal
    /// exponent.
    pub amount: Decimal,
    /// `amount * price(token)`; zero when the token is unpriced.
    pub usd_value: Decimal,
    /// Display-decimals hint from the source (not the scaling already
    /// applied to `amount`).
    pub decimals: u32,
}

/// The identity a source is queried with.
#[derive(Debug, Clone)]
pub struct QueryTarget {
    /// Address string, or a fixed label for sources that are not queried
    /// by address (exchanges, fixed balances).
    pub address: String,
}

impl QueryTarget {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl std::fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}
