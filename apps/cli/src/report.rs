//! Plain-text report rendering.
//!
//! Everything printed here comes from the engine's output records and
//! the summary views; no valuation or grouping logic lives in this
//! module.

use chrono::Local;
use rust_decimal::Decimal;

use chainfolio_core::PortfolioSummary;
use chainfolio_sources::utils::{format_amount, shorten_address};

const RULE: &str =
    "==============================================================================";

pub fn print_header() {
    println!();
    println!("{RULE}");
    println!(
        "  BALANCES REPORT   {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("{RULE}");
}

pub fn print_report(summary: &PortfolioSummary) {
    print_detailed_view(summary);
    print_token_summary(summary);
    print_network_distribution(summary);
    print_asset_types(summary);
    print_footer(summary.total_usd_value);
}

/// Detail rows, grouped per wallet identity so the same key's holdings
/// across chains sit together. Each group is already sorted by the
/// summary service.
fn print_detailed_view(summary: &PortfolioSummary) {
    println!("\nDetailed Balance View:");
    println!(
        "{:<24} {:<22} {:<26} {:>16} {:>14}",
        "Account", "Source", "Token", "Amount", "USD Value"
    );
    for group in &summary.by_identity {
        for record in &group.records {
            println!(
                "{:<24} {:<22} {:<26} {:>16} {:>14}",
                shorten_address(&record.account),
                record.source_label,
                record.token,
                format_amount(record.amount, record.decimals),
                format!("${:.2}", record.usd_value),
            );
        }
    }
}

fn print_token_summary(summary: &PortfolioSummary) {
    println!("\nPortfolio Summary:");
    println!(
        "{:<26} {:>16} {:>14} {:>9}",
        "Token", "Amount", "USD Value", "Share %"
    );
    for bucket in &summary.by_token {
        println!(
            "{:<26} {:>16} {:>14} {:>9}",
            bucket.token,
            format_amount(bucket.amount, 6),
            format!("${:.2}", bucket.usd_value),
            format!("{:.2}%", bucket.share_pct),
        );
    }
}

fn print_network_distribution(summary: &PortfolioSummary) {
    println!("\nNetwork Distribution:");
    println!("{:<26} {:>14} {:>9}", "Network", "USD Value", "Share %");
    for bucket in &summary.by_network {
        println!(
            "{:<26} {:>14} {:>9}",
            bucket.network,
            format!("${:.2}", bucket.usd_value),
            format!("{:.2}%", bucket.share_pct),
        );
    }
}

fn print_asset_types(summary: &PortfolioSummary) {
    println!("\nAsset Types:");
    println!("{:<26} {:>14} {:>9}", "Type", "USD Value", "Share %");
    for bucket in &summary.by_category {
        println!(
            "{:<26} {:>14} {:>9}",
            bucket.category.as_str(),
            format!("${:.2}", bucket.usd_value),
            format!("{:.2}%", bucket.share_pct),
        );
    }
}

fn print_footer(total: Decimal) {
    println!();
    println!("{RULE}");
    println!("  Total USD value   ${total:.2}");
    println!("{RULE}");
}
