//! Pure aggregation over the collector's output.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use chainfolio_sources::BalanceRecord;

use super::model::{
    network_family, AssetCategory, CategorySummary, IdentityGroup, NetworkSummary,
    PortfolioSummary, TokenSummary,
};

/// Builds every aggregate view in one pass over the filtered records.
///
/// No I/O happens here; the input list is the complete truth. An empty
/// input produces empty views and a zero grand total without touching
/// any division.
pub fn summarize(records: &[BalanceRecord]) -> PortfolioSummary {
    let total: Decimal = records.iter().map(|r| r.usd_value).sum();

    let mut summary = PortfolioSummary {
        by_token: by_token(records, total),
        by_network: by_network(records, total),
        by_category: by_category(records, total),
        by_identity: by_identity(records),
        total_usd_value: total,
    };

    summary
        .by_token
        .sort_by(|a, b| b.usd_value.cmp(&a.usd_value));
    summary
        .by_network
        .sort_by(|a, b| b.usd_value.cmp(&a.usd_value));
    summary
        .by_category
        .sort_by(|a, b| b.usd_value.cmp(&a.usd_value));
    summary
        .by_identity
        .sort_by(|a, b| b.usd_value.cmp(&a.usd_value));

    summary
}

/// Bucket share of the grand total, as a percentage. Zero when the grand
/// total is zero.
fn share_of(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        value / total * dec!(100)
    }
}

fn by_token(records: &[BalanceRecord], total: Decimal) -> Vec<TokenSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<TokenSummary> = Vec::new();
    for record in records {
        match index.get(record.token.as_str()) {
            Some(&at) => {
                buckets[at].amount += record.amount;
                buckets[at].usd_value += record.usd_value;
            }
            None => {
                index.insert(&record.token, buckets.len());
                buckets.push(TokenSummary {
                    token: record.token.clone(),
                    amount: record.amount,
                    usd_value: record.usd_value,
                    share_pct: Decimal::ZERO,
                });
            }
        }
    }
    for bucket in &mut buckets {
        bucket.share_pct = share_of(bucket.usd_value, total);
    }
    buckets
}

fn by_network(records: &[BalanceRecord], total: Decimal) -> Vec<NetworkSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<NetworkSummary> = Vec::new();
    for record in records {
        let family = network_family(&record.source_label);
        match index.get(family) {
            Some(&at) => buckets[at].usd_value += record.usd_value,
            None => {
                index.insert(family, buckets.len());
                buckets.push(NetworkSummary {
                    network: family.to_string(),
                    usd_value: record.usd_value,
                    share_pct: Decimal::ZERO,
                });
            }
        }
    }
    for bucket in &mut buckets {
        bucket.share_pct = share_of(bucket.usd_value, total);
    }
    buckets
}

fn by_category(records: &[BalanceRecord], total: Decimal) -> Vec<CategorySummary> {
    let mut index: HashMap<AssetCategory, usize> = HashMap::new();
    let mut buckets: Vec<CategorySummary> = Vec::new();
    for record in records {
        let category = AssetCategory::classify(&record.source_label);
        match index.get(&category) {
            Some(&at) => buckets[at].usd_value += record.usd_value,
            None => {
                index.insert(category, buckets.len());
                buckets.push(CategorySummary {
                    category,
                    usd_value: record.usd_value,
                    share_pct: Decimal::ZERO,
                });
            }
        }
    }
    for bucket in &mut buckets {
        bucket.share_pct = share_of(bucket.usd_value, total);
    }
    buckets
}

fn by_identity(records: &[BalanceRecord]) -> Vec<IdentityGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<IdentityGroup> = Vec::new();
    for record in records {
        match index.get(record.identity_key.as_str()) {
            Some(&at) => {
                buckets[at].usd_value += record.usd_value;
                buckets[at].records.push(record.clone());
            }
            None => {
                index.insert(&record.identity_key, buckets.len());
                buckets.push(IdentityGroup {
                    identity_key: record.identity_key.clone(),
                    usd_value: record.usd_value,
                    records: vec![record.clone()],
                });
            }
        }
    }
    buckets
}
