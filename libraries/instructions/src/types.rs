//! Argument types shared with the on-chain program's interface.
//!
//! Numeric parameters carry protocol-fixed precision scales. Callers
//! pre-scale values with the constants below; nothing in this crate rescales.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

/// Precision of the AMM peg multiplier
pub const PEG_PRECISION: u128 = 1_000_000;

/// Precision of spot market interest rate parameters
pub const SPOT_RATE_PRECISION: u32 = 1_000_000;

/// Precision of spot market asset/liability weights
pub const SPOT_WEIGHT_PRECISION: u32 = 10_000;

/// The spot market index reserved for the quote asset
pub const QUOTE_SPOT_MARKET_INDEX: u16 = 0;

/// Where a market's price feed comes from
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleSource {
    Pyth,
    Switchboard,
    QuoteAsset,
}

/// Sanity limits applied to oracle data before the program trusts it
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OracleGuardRails {
    pub price_divergence: PriceDivergenceGuardRails,
    pub validity: ValidityGuardRails,
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceDivergenceGuardRails {
    pub mark_oracle_percent_divergence: u64,
    pub oracle_twap_5min_percent_divergence: u64,
}

impl Default for PriceDivergenceGuardRails {
    fn default() -> Self {
        Self {
            mark_oracle_percent_divergence: 1_000_000,
            oracle_twap_5min_percent_divergence: 500_000,
        }
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityGuardRails {
    pub slots_before_stale_for_amm: i64,
    pub slots_before_stale_for_margin: i64,
    pub confidence_interval_max_size: u64,
    pub too_volatile_ratio: i64,
}

impl Default for ValidityGuardRails {
    fn default() -> Self {
        Self {
            slots_before_stale_for_amm: 10,
            slots_before_stale_for_margin: 120,
            confidence_interval_max_size: 20_000,
            too_volatile_ratio: 5,
        }
    }
}

/// Tunable parameters for a new perp market.
///
/// Every field has the interface's default so call sites only spell out what
/// they change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerpMarketConfig {
    /// AMM peg multiplier, scaled by [`PEG_PRECISION`]
    pub peg_multiplier: u128,
    pub oracle_source: OracleSource,
    pub margin_ratio_initial: u32,
    pub margin_ratio_maintenance: u32,
    pub liquidation_fee: u32,
    pub active_status: bool,
}

impl Default for PerpMarketConfig {
    fn default() -> Self {
        Self {
            peg_multiplier: PEG_PRECISION,
            oracle_source: OracleSource::Pyth,
            margin_ratio_initial: 2_000,
            margin_ratio_maintenance: 500,
            liquidation_fee: 0,
            active_status: true,
        }
    }
}

/// Tunable parameters for a new spot market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotMarketConfig {
    /// Utilization the rate curve targets, scaled by [`SPOT_RATE_PRECISION`]
    pub optimal_utilization: u32,
    /// Borrow rate at optimal utilization, scaled by [`SPOT_RATE_PRECISION`]
    pub optimal_rate: u32,
    /// Borrow rate at full utilization, scaled by [`SPOT_RATE_PRECISION`]
    pub max_rate: u32,
    pub oracle: Pubkey,
    pub oracle_source: OracleSource,
    pub initial_asset_weight: u32,
    pub maintenance_asset_weight: u32,
    pub initial_liability_weight: u32,
    pub maintenance_liability_weight: u32,
    pub imf_factor: u32,
    pub liquidation_fee: u32,
    pub active_status: bool,
}

impl Default for SpotMarketConfig {
    fn default() -> Self {
        Self {
            optimal_utilization: SPOT_RATE_PRECISION / 2,
            optimal_rate: SPOT_RATE_PRECISION,
            max_rate: SPOT_RATE_PRECISION,
            oracle: Pubkey::default(),
            oracle_source: OracleSource::QuoteAsset,
            initial_asset_weight: SPOT_WEIGHT_PRECISION,
            maintenance_asset_weight: SPOT_WEIGHT_PRECISION,
            initial_liability_weight: SPOT_WEIGHT_PRECISION,
            maintenance_liability_weight: SPOT_WEIGHT_PRECISION,
            imf_factor: 0,
            liquidation_fee: 0,
            active_status: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_defaults_match_interface() {
        let config = PerpMarketConfig::default();
        assert_eq!(config.peg_multiplier, PEG_PRECISION);
        assert_eq!(config.margin_ratio_initial, 2_000);
        assert_eq!(config.margin_ratio_maintenance, 500);
        assert!(config.active_status);
    }

    #[test]
    fn spot_defaults_use_quote_asset_oracle() {
        let config = SpotMarketConfig::default();
        assert_eq!(config.oracle_source, OracleSource::QuoteAsset);
        assert_eq!(config.oracle, Pubkey::default());
        assert_eq!(config.optimal_utilization, SPOT_RATE_PRECISION / 2);
    }
}
