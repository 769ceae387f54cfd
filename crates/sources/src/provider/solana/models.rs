//! Solana JSON-RPC response structures.

use serde::Deserialize;

/// Response for `getBalance`: lamports under `result.value`.
#[derive(Debug, Deserialize)]
pub struct GetBalanceResponse {
    pub result: Option<BalanceResult>,
}

#[derive(Debug, Deserialize)]
pub struct BalanceResult {
    pub value: u64,
}

/// Response for `getTokenAccountsByOwner` with `jsonParsed` encoding.
#[derive(Debug, Deserialize)]
pub struct TokenAccountsResponse {
    pub result: Option<TokenAccountsResult>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountsResult {
    #[serde(default)]
    pub value: Vec<TokenAccountEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountEntry {
    pub account: TokenAccount,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccount {
    pub data: TokenAccountData,
}

#[derive(Debug, Deserialize)]
pub struct TokenAccountData {
    pub parsed: ParsedAccount,
}

#[derive(Debug, Deserialize)]
pub struct ParsedAccount {
    pub info: TokenInfo,
}

#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub mint: String,
    #[serde(rename = "tokenAmount")]
    pub token_amount: TokenAmount,
}

#[derive(Debug, Deserialize)]
pub struct TokenAmount {
    pub amount: String,
    pub decimals: u32,
}
