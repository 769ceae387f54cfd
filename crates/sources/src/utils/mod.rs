//! Amount and address helpers shared by the adapters.

mod address;
mod amount;

pub use address::{convert_bech32_prefix, identity_key, shorten_address};
pub use amount::{format_amount, parse_scaled_amount, wei_to_ether};
