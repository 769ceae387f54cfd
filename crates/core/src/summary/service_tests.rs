//! Unit tests for the summary service.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use chainfolio_sources::BalanceRecord;

use super::model::{network_family, AssetCategory};
use super::service::summarize;

fn record(source_label: &str, identity_key: &str, token: &str, usd_value: Decimal) -> BalanceRecord {
    BalanceRecord {
        source_label: source_label.to_string(),
        account: "addr".to_string(),
        identity_key: identity_key.to_string(),
        token: token.to_string(),
        amount: Decimal::ONE,
        usd_value,
        decimals: 6,
    }
}

#[test]
fn test_category_classification_branches() {
    assert_eq!(
        AssetCategory::classify("osmosis-staking"),
        AssetCategory::Staking
    );
    assert_eq!(
        AssetCategory::classify("osmosis-rewards"),
        AssetCategory::Rewards
    );
    assert_eq!(AssetCategory::classify("FixedBTC"), AssetCategory::Fixed);
    assert_eq!(AssetCategory::classify("osmosis-bank"), AssetCategory::Bank);
    assert_eq!(
        AssetCategory::classify("Binance (Exchange)"),
        AssetCategory::Bank
    );
}

#[test]
fn test_network_family_strips_section_suffixes() {
    assert_eq!(network_family("osmosis-bank"), "osmosis");
    assert_eq!(network_family("osmosis-staking"), "osmosis");
    assert_eq!(network_family("osmosis-rewards"), "osmosis");
    assert_eq!(network_family("ethereum"), "ethereum");
    assert_eq!(network_family("Binance (Exchange)"), "Binance (Exchange)");
    // Only section suffixes are stripped; hyphens inside a chain name stay.
    assert_eq!(network_family("dydx-chain-bank"), "dydx-chain");
}

#[test]
fn test_token_view_sums_amount_and_value() {
    let records = vec![
        record("osmosis-bank", "k1", "ATOM", dec!(100)),
        record("cosmoshub-bank", "k1", "ATOM", dec!(50)),
        record("osmosis-bank", "k1", "OSMO", dec!(200)),
    ];
    let summary = summarize(&records);

    assert_eq!(summary.total_usd_value, dec!(350));
    assert_eq!(summary.by_token.len(), 2);
    // Sorted by descending USD value.
    assert_eq!(summary.by_token[0].token, "OSMO");
    assert_eq!(summary.by_token[1].token, "ATOM");
    assert_eq!(summary.by_token[1].amount, dec!(2));
    assert_eq!(summary.by_token[1].usd_value, dec!(150));
}

#[test]
fn test_conservation_and_share_sum_per_view() {
    let records = vec![
        record("osmosis-bank", "k1", "OSMO", dec!(123.45)),
        record("osmosis-staking", "k1", "OSMO", dec!(676.55)),
        record("ethereum", "", "ETH", dec!(133.37)),
        record("FixedBTC", "", "BTC", dec!(66.63)),
    ];
    let summary = summarize(&records);
    let total = summary.total_usd_value;
    assert_eq!(total, dec!(1000.00));

    let tolerance = dec!(0.0000001);

    let token_total: Decimal = summary.by_token.iter().map(|b| b.usd_value).sum();
    assert_eq!(token_total, total);
    let token_shares: Decimal = summary.by_token.iter().map(|b| b.share_pct).sum();
    assert!((token_shares - dec!(100)).abs() < tolerance);

    let network_total: Decimal = summary.by_network.iter().map(|b| b.usd_value).sum();
    assert_eq!(network_total, total);
    let network_shares: Decimal = summary.by_network.iter().map(|b| b.share_pct).sum();
    assert!((network_shares - dec!(100)).abs() < tolerance);

    let category_total: Decimal = summary.by_category.iter().map(|b| b.usd_value).sum();
    assert_eq!(category_total, total);
    let category_shares: Decimal = summary.by_category.iter().map(|b| b.share_pct).sum();
    assert!((category_shares - dec!(100)).abs() < tolerance);
}

#[test]
fn test_network_view_merges_sections() {
    let records = vec![
        record("osmosis-bank", "k1", "OSMO", dec!(10)),
        record("osmosis-staking", "k1", "OSMO", dec!(30)),
        record("osmosis-rewards", "k1", "OSMO", dec!(5)),
        record("ethereum", "", "ETH", dec!(20)),
    ];
    let summary = summarize(&records);

    assert_eq!(summary.by_network.len(), 2);
    assert_eq!(summary.by_network[0].network, "osmosis");
    assert_eq!(summary.by_network[0].usd_value, dec!(45));
    assert_eq!(summary.by_network[1].network, "ethereum");
}

#[test]
fn test_identity_view_groups_across_chains() {
    let key = "deadbeef00";
    let records = vec![
        record("osmosis-bank", key, "OSMO", dec!(10)),
        record("cosmoshub-bank", key, "ATOM", dec!(20)),
        record("ethereum", "", "ETH", dec!(5)),
        record("FixedBTC", "", "BTC", dec!(1)),
    ];
    let summary = summarize(&records);

    assert_eq!(summary.by_identity.len(), 2);
    let wallet = &summary.by_identity[0];
    assert_eq!(wallet.identity_key, key);
    assert_eq!(wallet.records.len(), 2);
    assert_eq!(wallet.usd_value, dec!(30));
    // Empty identity keys group under the empty key, not dropped.
    let anonymous = &summary.by_identity[1];
    assert_eq!(anonymous.identity_key, "");
    assert_eq!(anonymous.records.len(), 2);
}

#[test]
fn test_empty_input_short_circuits() {
    let summary = summarize(&[]);
    assert!(summary.by_token.is_empty());
    assert!(summary.by_network.is_empty());
    assert!(summary.by_category.is_empty());
    assert!(summary.by_identity.is_empty());
    assert_eq!(summary.total_usd_value, Decimal::ZERO);
}

#[test]
fn test_zero_total_yields_zero_shares() {
    // All-zero values can reach the summarizer when a caller skips the
    // collector's filter; shares must not divide by zero.
    let records = vec![
        record("osmosis-bank", "k1", "OSMO", Decimal::ZERO),
        record("ethereum", "", "ETH", Decimal::ZERO),
    ];
    let summary = summarize(&records);
    assert_eq!(summary.total_usd_value, Decimal::ZERO);
    for bucket in &summary.by_token {
        assert_eq!(bucket.share_pct, Decimal::ZERO);
    }
}

#[test]
fn test_ties_keep_first_encounter_order() {
    let records = vec![
        record("osmosis-bank", "k1", "AAA", dec!(10)),
        record("osmosis-bank", "k1", "BBB", dec!(10)),
        record("osmosis-bank", "k1", "CCC", dec!(10)),
    ];
    let summary = summarize(&records);
    let tokens: Vec<&str> = summary.by_token.iter().map(|b| b.token.as_str()).collect();
    assert_eq!(tokens, vec!["AAA", "BBB", "CCC"]);
}

#[test]
fn test_exact_valuation_example() {
    // PriceTable { ATOM: 10.0 } semantics: 2.5 ATOM values to exactly 25.
    let mut r = record("cosmoshub-bank", "k1", "ATOM", dec!(25.0));
    r.amount = dec!(2.5);
    let summary = summarize(&[r]);
    assert_eq!(summary.by_token[0].usd_value, dec!(25.0));
    assert_eq!(summary.by_token[0].share_pct, dec!(100));
}
