//! End-to-end test of one collection pass: fan-out, fan-in, filter,
//! summary.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use chainfolio_core::{collect, summarize, AssetCategory, CollectionPlan};
use chainfolio_sources::{BalanceRecord, BalanceSource, QueryTarget, SourceError};

/// A chain-shaped source: emits bank + staking records for its network,
/// valued against a fixed price.
struct ChainSource {
    network: String,
    price: Decimal,
}

#[async_trait]
impl BalanceSource for ChainSource {
    fn label(&self) -> &str {
        &self.network
    }

    async fn query(&self, target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        let token = self.network.to_uppercase();
        let make = |section: &str, amount: Decimal| BalanceRecord {
            source_label: format!("{}-{section}", self.network),
            account: target.address.clone(),
            identity_key: format!("key-{}", target.address),
            token: token.clone(),
            amount,
            usd_value: amount * self.price,
            decimals: 6,
        };
        Ok(vec![make("bank", dec!(10)), make("staking", dec!(40))])
    }
}

struct DownSource;

#[async_trait]
impl BalanceSource for DownSource {
    fn label(&self) -> &str {
        "down"
    }

    async fn query(&self, _target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        Err(SourceError::NoEndpoint {
            network: "down".to_string(),
        })
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_pass_collects_filters_and_summarizes() {
    let osmosis = Arc::new(ChainSource {
        network: "osmosis".to_string(),
        price: dec!(0.5),
    });
    let cosmoshub = Arc::new(ChainSource {
        network: "cosmoshub".to_string(),
        price: dec!(10),
    });
    let down = Arc::new(DownSource);

    let mut plan = CollectionPlan::new();
    for address in ["addr-a", "addr-b"] {
        plan.push(osmosis.clone(), QueryTarget::new(address));
        plan.push(cosmoshub.clone(), QueryTarget::new(address));
        plan.push(down.clone(), QueryTarget::new(address));
    }
    // Cross product: 3 sources x 2 targets.
    assert_eq!(plan.len(), 6);

    let records = collect(plan).await;
    // The failing source contributes nothing; 2 chains x 2 targets x 2
    // sections survive the filter.
    assert_eq!(records.len(), 8);
    assert!(records.iter().all(|r| r.usd_value > dec!(0.01)));

    let summary = summarize(&records);

    // Conservation: buckets of every view sum to the grand total.
    let expected_total = dec!(2) * (dec!(50) * dec!(0.5) + dec!(50) * dec!(10));
    assert_eq!(summary.total_usd_value, expected_total);
    let by_network: Decimal = summary.by_network.iter().map(|b| b.usd_value).sum();
    assert_eq!(by_network, expected_total);

    // Chain sections merged per network family.
    assert_eq!(summary.by_network.len(), 2);
    assert_eq!(summary.by_network[0].network, "cosmoshub");

    // Bank and staking categories split 20/80 by construction.
    assert_eq!(summary.by_category.len(), 2);
    assert_eq!(summary.by_category[0].category, AssetCategory::Staking);
    assert_eq!(summary.by_category[0].share_pct, dec!(80));

    // One identity bucket per target, spanning both chains.
    assert_eq!(summary.by_identity.len(), 2);
    assert!(summary
        .by_identity
        .iter()
        .all(|group| group.records.len() == 4));
}
