//! Bech32 address helpers.
//!
//! Cosmos chains share one key under different bech32 prefixes; the
//! canonical byte payload is what identifies a wallet across chains.

use bech32::{Bech32, Hrp};

use crate::errors::SourceError;

/// Re-encodes a bech32 address under a different prefix.
///
/// The byte payload is untouched; only the human-readable part changes.
pub fn convert_bech32_prefix(address: &str, to_prefix: &str) -> Result<String, SourceError> {
    let (_, data) = bech32::decode(address).map_err(|e| SourceError::InvalidAddress {
        address: address.to_string(),
        message: e.to_string(),
    })?;
    let hrp = Hrp::parse(to_prefix).map_err(|e| SourceError::InvalidAddress {
        address: address.to_string(),
        message: format!("bad prefix {to_prefix}: {e}"),
    })?;
    bech32::encode::<Bech32>(hrp, &data).map_err(|e| SourceError::InvalidAddress {
        address: address.to_string(),
        message: e.to_string(),
    })
}

/// Hex form of the bech32 payload, used as the cross-chain identity key.
///
/// Returns an empty string for anything that is not a bech32 address;
/// empty is a legal identity key.
pub fn identity_key(address: &str) -> String {
    match bech32::decode(address) {
        Ok((_, data)) => hex::encode(data),
        Err(_) => String::new(),
    }
}

/// Shortens a long address for display: `cosmos1...x7k9p2`.
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 6..])
}
