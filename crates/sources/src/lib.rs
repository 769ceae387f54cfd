//! Chainfolio Sources Crate
//!
//! This crate provides the balance-source layer for chainfolio: every
//! adapter that can turn a (network, account) pair into raw balance
//! observations, plus the shared services those adapters rely on.
//!
//! # Overview
//!
//! The sources crate supports:
//! - Cosmos SDK chains via their REST surface (bank, staking, rewards)
//! - EVM chains via JSON-RPC plus the Moralis token index
//! - Solana via JSON-RPC
//! - Exchange accounts via signed REST APIs (Binance, AscendEx)
//! - Literal fixed balances from configuration
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   QueryTarget    | --> |  BalanceSource   |  (one impl per source kind)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  ChainRegistry   |  (shared metadata cache)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   PriceTable     |  (frozen symbol -> USD)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  BalanceRecord   |  (immutable observation)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`BalanceRecord`] - One immutable balance observation
//! - [`BalanceSource`] - The adapter seam the collection engine consumes
//! - [`PriceTable`] - Write-once symbol -> unit-USD-price lookup
//! - [`ChainRegistry`] - Single-flight cache over the cosmos chain registry

pub mod errors;
pub mod models;
pub mod prices;
pub mod provider;
pub mod registry;
pub mod utils;

pub use errors::SourceError;
pub use models::{
    BalanceRecord, CosmosNetwork, DenomOverride, EvmNetwork, ExchangeCredentials, ExchangeKind,
    FixedBalance, NativeToken, QueryTarget, SolanaNetwork,
};
pub use prices::{fetch_prices, PriceTable};
pub use provider::cosmos::CosmosSource;
pub use provider::evm::EvmSource;
pub use provider::exchange::{connector_for, ExchangeBalance, ExchangeConnector, ExchangeSource};
pub use provider::fixed::FixedSource;
pub use provider::solana::SolanaSource;
pub use provider::BalanceSource;
pub use registry::ChainRegistry;
