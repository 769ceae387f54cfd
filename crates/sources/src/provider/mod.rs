//! The balance-source seam.
//!
//! One [`BalanceSource`] implementation exists per source kind; the
//! collection engine treats them uniformly and never learns what protocol
//! sits behind the trait.

pub mod cosmos;
pub mod evm;
pub mod exchange;
pub mod fixed;
pub mod solana;

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, QueryTarget};

/// A source of balance observations.
///
/// Implementations own their per-call network timeouts; the engine wraps
/// queries in no additional timeout or cancellation. A query must never
/// panic: on failure it returns `Err`, the task logs it and contributes
/// zero records, and the batch proceeds.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Short label for logging, e.g. the network name.
    fn label(&self) -> &str;

    /// Queries the source for every balance the target holds there.
    async fn query(&self, target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError>;
}
