//! Chainfolio Core Crate
//!
//! The concurrent collection-and-aggregation engine. This crate owns the
//! fan-out of per-(source, account) query tasks, the fan-in of their
//! results through a bounded sink, the completion protocol that closes
//! the sink exactly once, and the multi-dimensional summary views over
//! the collected records.
//!
//! # Data flow
//!
//! ```text
//! CollectionPlan ──spawn──> producer tasks ──send──> bounded sink
//!                                │                        │
//!                      coordinator joins all         collector drains,
//!                      then closes the sink          applies the USD floor
//!                                                         │
//!                                                         v
//!                                                 Vec<BalanceRecord>
//!                                                         │
//!                                                         v
//!                                                 PortfolioSummary
//! ```
//!
//! The engine performs exactly one collection pass: no retries, no
//! cancellation, no state across runs. Everything it needs (sources,
//! targets, the frozen price table inside each source) is handed in as
//! explicit values, which keeps the engine re-entrant and testable.

pub mod collect;
pub mod summary;

pub use collect::{collect, CollectionJob, CollectionPlan, MATERIALITY_FLOOR, SINK_CAPACITY};
pub use summary::{
    summarize, AssetCategory, CategorySummary, IdentityGroup, NetworkSummary, PortfolioSummary,
    TokenSummary,
};
