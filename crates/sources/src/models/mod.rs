//! Data model shared by all balance sources.

mod balance;
mod network;

pub use balance::{BalanceRecord, QueryTarget};
pub use network::{
    CosmosNetwork, DenomOverride, EvmNetwork, ExchangeCredentials, ExchangeKind, FixedBalance,
    NativeToken, SolanaNetwork,
};
