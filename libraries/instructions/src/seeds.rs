//! Seed prefixes for clearing house PDAs.
//!
//! These must match the deployed program byte for byte; the tags are the
//! collision domain for every derived address.

pub const STATE: &[u8] = b"clearing_house_state";
pub const CLEARING_HOUSE_SIGNER: &[u8] = b"clearing_house_signer";
pub const INSURANCE_VAULT: &[u8] = b"insurance_vault";
pub const PERP_MARKET: &[u8] = b"perp_market";
pub const SPOT_MARKET: &[u8] = b"spot_market";
pub const SPOT_MARKET_VAULT: &[u8] = b"spot_market_vault";
pub const INSURANCE_FUND_VAULT: &[u8] = b"insurance_fund_vault";
