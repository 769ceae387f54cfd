//! Summary view models.

use rust_decimal::Decimal;

use chainfolio_sources::BalanceRecord;

/// What kind of holding a record represents, derived from its source
/// label's naming convention. The substring test is deliberate and must
/// stay as-is: downstream consumers rely on labels like
/// `"osmosis-staking"` and `"FixedBTC"` classifying this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Bank,
    Staking,
    Rewards,
    Fixed,
}

impl AssetCategory {
    pub fn classify(source_label: &str) -> Self {
        if source_label.contains("staking") {
            Self::Staking
        } else if source_label.contains("rewards") {
            Self::Rewards
        } else if source_label.contains("Fixed") {
            Self::Fixed
        } else {
            Self::Bank
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Staking => "Staking",
            Self::Rewards => "Rewards",
            Self::Fixed => "Fixed",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root network name behind a source label: any `-bank`, `-staking`
/// or `-rewards` section suffix is stripped.
pub fn network_family(source_label: &str) -> &str {
    for suffix in ["-bank", "-staking", "-rewards"] {
        if let Some(stripped) = source_label.strip_suffix(suffix) {
            return stripped;
        }
    }
    source_label
}

/// Per-token totals across all sources.
#[derive(Debug, Clone)]
pub struct TokenSummary {
    pub token: String,
    pub amount: Decimal,
    pub usd_value: Decimal,
    pub share_pct: Decimal,
}

/// Per-network-family USD totals.
#[derive(Debug, Clone)]
pub struct NetworkSummary {
    pub network: String,
    pub usd_value: Decimal,
    pub share_pct: Decimal,
}

/// Per-category USD totals.
#[derive(Debug, Clone)]
pub struct CategorySummary {
    pub category: AssetCategory,
    pub usd_value: Decimal,
    pub share_pct: Decimal,
}

/// All records belonging to one normalized wallet identity, across every
/// chain and source that produced them. Records with an empty identity
/// key group under the empty key.
#[derive(Debug, Clone)]
pub struct IdentityGroup {
    pub identity_key: String,
    pub usd_value: Decimal,
    pub records: Vec<BalanceRecord>,
}

/// The four aggregate views plus the grand total they all share.
///
/// Every view is sorted by descending USD value; ties keep the order in
/// which a group key was first encountered in the record list.
#[derive(Debug, Clone, Default)]
pub struct PortfolioSummary {
    pub by_token: Vec<TokenSummary>,
    pub by_network: Vec<NetworkSummary>,
    pub by_category: Vec<CategorySummary>,
    pub by_identity: Vec<IdentityGroup>,
    pub total_usd_value: Decimal,
}
