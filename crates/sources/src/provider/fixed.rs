//! Fixed balance source.
//!
//! Holdings that live outside any queryable source (cold storage,
//! locked staking on another custodian) are declared literally in
//! configuration and emitted as-is. Each entry's label doubles as its
//! source label and account, which is what routes these records into the
//! `Fixed` asset category downstream.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::SourceError;
use crate::models::{BalanceRecord, FixedBalance, QueryTarget};
use crate::prices::PriceTable;
use crate::provider::BalanceSource;

pub struct FixedSource {
    entries: Vec<FixedBalance>,
    prices: Arc<PriceTable>,
}

impl FixedSource {
    pub fn new(entries: Vec<FixedBalance>, prices: Arc<PriceTable>) -> Self {
        Self { entries, prices }
    }
}

#[async_trait]
impl BalanceSource for FixedSource {
    fn label(&self) -> &str {
        "fixed"
    }

    async fn query(&self, _target: &QueryTarget) -> Result<Vec<BalanceRecord>, SourceError> {
        Ok(self
            .entries
            .iter()
            .map(|entry| BalanceRecord {
                source_label: entry.label.clone(),
                account: entry.label.clone(),
                identity_key: String::new(),
                token: entry.token.to_uppercase(),
                amount: entry.amount,
                usd_value: self.prices.usd_value(&entry.token, entry.amount),
                decimals: 1,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_fixed_entries_become_records() {
        let prices = Arc::new(PriceTable::from_prices([("BTC", dec!(100000))]));
        let source = FixedSource::new(
            vec![
                FixedBalance {
                    token: "BTC".to_string(),
                    amount: dec!(1),
                    label: "FixedBTC".to_string(),
                },
                FixedBalance {
                    token: "DOT".to_string(),
                    amount: dec!(25),
                    label: "FixedDOT".to_string(),
                },
            ],
            prices,
        );

        let records = source.query(&QueryTarget::new("fixed")).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_label, "FixedBTC");
        assert_eq!(records[0].account, "FixedBTC");
        assert_eq!(records[0].usd_value, dec!(100000));
        // Unpriced fixed entries still come out, valued at zero.
        assert_eq!(records[1].usd_value, Decimal::ZERO);
    }
}
