//! EVM JSON-RPC and Moralis response structures.

use serde::{Deserialize, Serialize};

/// JSON-RPC request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'a str,
    pub id: u32,
    pub method: &'a str,
    pub params: serde_json::Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// JSON-RPC response envelope for `eth_getBalance` (hex wei string).
#[derive(Debug, Deserialize)]
pub struct RpcBalanceResponse {
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// One token row from the Moralis ERC-20 balance index.
#[derive(Debug, Deserialize)]
pub struct MoralisTokenBalance {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u32,
    /// Raw balance in base units.
    pub balance: String,
    #[serde(default)]
    pub possible_spam: bool,
    #[serde(default)]
    pub verified_contract: bool,
    /// Absent for contracts Moralis has not scored.
    #[serde(default)]
    pub security_score: Option<i64>,
}
