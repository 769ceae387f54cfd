//! On-wire amount parsing and display formatting.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::SourceError;

/// Parses an on-wire amount string and scales it down by `10^decimals`.
///
/// Sources report amounts in base units (`uatom`, lamports, token base
/// units); the record model carries human units. Scaling is exact: the
/// decimal exponent is added to the parsed value's scale rather than
/// dividing, so no rounding occurs.
pub fn parse_scaled_amount(raw: &str, decimals: u32) -> Result<Decimal, SourceError> {
    let parsed = Decimal::from_str(raw).map_err(|_| SourceError::InvalidAmount {
        value: raw.to_string(),
    })?;
    scale_down(parsed, decimals).ok_or_else(|| SourceError::InvalidAmount {
        value: raw.to_string(),
    })
}

/// Converts a hex-encoded wei quantity (`"0x..."`) to ether.
pub fn wei_to_ether(hex_wei: &str) -> Result<Decimal, SourceError> {
    let trimmed = hex_wei.trim_start_matches("0x");
    let wei = u128::from_str_radix(trimmed, 16).map_err(|_| SourceError::InvalidAmount {
        value: hex_wei.to_string(),
    })?;
    let value =
        Decimal::try_from_i128_with_scale(wei as i128, 0).map_err(|_| SourceError::InvalidAmount {
            value: hex_wei.to_string(),
        })?;
    scale_down(value, 18).ok_or_else(|| SourceError::InvalidAmount {
        value: hex_wei.to_string(),
    })
}

fn scale_down(value: Decimal, decimals: u32) -> Option<Decimal> {
    let mut scaled = value;
    scaled.set_scale(value.scale() + decimals).ok()?;
    Some(scaled.normalize())
}

/// Formats an amount for display with precision adapted to its size,
/// capped at the token's display decimals.
pub fn format_amount(amount: Decimal, decimals: u32) -> String {
    let precision = if amount >= Decimal::from(1000) {
        2
    } else if amount >= Decimal::ONE {
        4
    } else if amount > Decimal::ZERO {
        6
    } else {
        2
    };
    let precision = precision.min(decimals);
    format!("{:.*}", precision as usize, amount)
}
