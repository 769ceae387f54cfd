//! Aggregate views over the collected records.

mod model;
mod service;

pub use model::{
    network_family, AssetCategory, CategorySummary, IdentityGroup, NetworkSummary,
    PortfolioSummary, TokenSummary,
};
pub use service::summarize;

#[cfg(test)]
mod service_tests;
