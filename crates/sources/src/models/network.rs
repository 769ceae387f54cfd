//! Typed configuration for each source kind.
//!
//! These structs are deserialized straight out of the application config
//! file and passed to the adapter constructors.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// A Cosmos SDK network.
#[derive(Debug, Clone, Deserialize)]
pub struct CosmosNetwork {
    /// Chain-registry name, e.g. `"osmosis"`.
    pub name: String,
    /// Bech32 account prefix, e.g. `"osmo"`.
    pub prefix: String,
    /// Explicit REST endpoint. When absent the chain registry supplies
    /// candidates and the first responsive one is used.
    #[serde(default)]
    pub api: Option<String>,
}

/// Native token metadata for an EVM network.
#[derive(Debug, Clone, Deserialize)]
pub struct NativeToken {
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
}

/// An EVM network with a JSON-RPC endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EvmNetwork {
    pub name: String,
    pub rpc: String,
    pub chain_id: u64,
    pub native_token: NativeToken,
}

/// A Solana network with a JSON-RPC endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaNetwork {
    pub name: String,
    pub rpc: String,
}

/// The exchange connectors chainfolio knows how to speak to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    Binance,
    Ascendex,
}

/// Credentials and connection details for one exchange account.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeCredentials {
    /// Display name, used in the `"<name> (Exchange)"` source label.
    pub name: String,
    pub kind: ExchangeKind,
    pub api_key: String,
    pub api_secret: String,
    /// Connector-specific extras (e.g. `"testnet": "true"` for AscendEx).
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// A literal balance held outside any queryable source.
#[derive(Debug, Clone, Deserialize)]
pub struct FixedBalance {
    pub token: String,
    pub amount: Decimal,
    /// Used as both source label and account, e.g. `"FixedBTC"`.
    pub label: String,
}

/// Local override for resolving a Cosmos denom to a display symbol.
///
/// Loaded from the optional IBC assets file and consulted before the
/// chain-registry asset list.
#[derive(Debug, Clone, Deserialize)]
pub struct DenomOverride {
    #[serde(rename = "type", default)]
    pub asset_type: String,
    pub denom: String,
    pub symbol: String,
    pub decimals: u32,
}
