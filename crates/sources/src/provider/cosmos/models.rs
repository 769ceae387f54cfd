//! Cosmos REST response structures.

use serde::Deserialize;

/// A `{denom, amount}` pair as every Cosmos balance endpoint reports it.
/// Amounts are strings in base units; reward amounts carry a fractional
/// part.
#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

/// Response from `/cosmos/bank/v1beta1/balances/{address}`.
#[derive(Debug, Deserialize)]
pub struct BankBalancesResponse {
    #[serde(default)]
    pub balances: Vec<Coin>,
}

/// Response from `/cosmos/staking/v1beta1/delegations/{address}`.
#[derive(Debug, Deserialize)]
pub struct DelegationsResponse {
    #[serde(default)]
    pub delegation_responses: Vec<DelegationResponse>,
}

#[derive(Debug, Deserialize)]
pub struct DelegationResponse {
    pub balance: Coin,
}

/// Response from `/cosmos/distribution/v1beta1/delegators/{address}/rewards`.
#[derive(Debug, Deserialize)]
pub struct RewardsResponse {
    #[serde(default)]
    pub rewards: Vec<ValidatorReward>,
}

#[derive(Debug, Deserialize)]
pub struct ValidatorReward {
    #[serde(default)]
    pub reward: Vec<Coin>,
}
