//! Builders for clearing house admin instructions

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::{
    derive::{self, DeriveError},
    instruction_discriminator,
    types::{
        OracleGuardRails, OracleSource, PerpMarketConfig, SpotMarketConfig,
        QUOTE_SPOT_MARKET_INDEX,
    },
};

/// A builder for clearing house admin instructions.
///
/// Account lists are assembled in the exact order the program's interface
/// declares for each operation. The order and the signer/writable flags are
/// part of the interface contract; a reordered list produces a transaction
/// the program rejects or misinterprets.
pub struct ClearingHouseIxBuilder {
    /// The deployed clearing house program
    program_id: Pubkey,

    /// The address with authority over admin operations
    admin: Pubkey,

    /// The derived state singleton, cached since every operation uses it
    state: Pubkey,
}

impl ClearingHouseIxBuilder {
    pub fn new(program_id: Pubkey, admin: Pubkey) -> Result<Self, DeriveError> {
        let state = derive::derive_state(&program_id)?;

        Ok(Self {
            program_id,
            admin,
            state,
        })
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn admin(&self) -> Pubkey {
        self.admin
    }

    /// The state account address every operation references
    pub fn state(&self) -> Pubkey {
        self.state
    }

    /// Create the clearing house state, insurance vault and program signer
    pub fn initialize(&self, quote_asset_mint: Pubkey) -> Result<Instruction, DeriveError> {
        let insurance_vault = derive::derive_insurance_vault(&self.program_id)?;
        let clearing_house_signer = derive::derive_clearing_house_signer(&self.program_id)?;

        let accounts = vec![
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.state, false),
            AccountMeta::new_readonly(quote_asset_mint, false),
            AccountMeta::new(insurance_vault, false),
            AccountMeta::new_readonly(clearing_house_signer, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ];

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: encode("initialize", &()),
        })
    }

    /// Create the perp market at `market_index`.
    ///
    /// The index must be the state account's current market count; the
    /// program rejects anything else.
    pub fn initialize_perp_market(
        &self,
        market_index: u16,
        price_oracle: Pubkey,
        base_asset_reserve: u128,
        quote_asset_reserve: u128,
        periodicity: i64,
        config: &PerpMarketConfig,
    ) -> Result<Instruction, DeriveError> {
        let perp_market = derive::derive_perp_market(&self.program_id, market_index)?;

        let accounts = vec![
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.state, false),
            AccountMeta::new_readonly(price_oracle, false),
            AccountMeta::new(perp_market, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ];

        let args = InitializePerpMarket {
            base_asset_reserve,
            quote_asset_reserve,
            periodicity,
            peg_multiplier: config.peg_multiplier,
            oracle_source: config.oracle_source,
            margin_ratio_initial: config.margin_ratio_initial,
            margin_ratio_maintenance: config.margin_ratio_maintenance,
            liquidation_fee: config.liquidation_fee,
            active_status: config.active_status,
        };

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: encode("initialize_perp_market", &args),
        })
    }

    /// Create the spot market at `spot_index` along with its vaults
    pub fn initialize_spot_market(
        &self,
        spot_index: u16,
        mint: Pubkey,
        config: &SpotMarketConfig,
    ) -> Result<Instruction, DeriveError> {
        let spot_market = derive::derive_spot_market(&self.program_id, spot_index)?;
        let spot_market_vault = derive::derive_spot_market_vault(&self.program_id, spot_index)?;
        let insurance_fund_vault =
            derive::derive_insurance_fund_vault(&self.program_id, spot_index)?;
        let clearing_house_signer = derive::derive_clearing_house_signer(&self.program_id)?;

        let accounts = vec![
            AccountMeta::new(self.admin, true),
            AccountMeta::new(self.state, false),
            AccountMeta::new(spot_market, false),
            AccountMeta::new(spot_market_vault, false),
            AccountMeta::new(insurance_fund_vault, false),
            AccountMeta::new_readonly(clearing_house_signer, false),
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(config.oracle, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ];

        let args = InitializeSpotMarket {
            optimal_utilization: config.optimal_utilization,
            optimal_rate: config.optimal_rate,
            max_rate: config.max_rate,
            oracle_source: config.oracle_source,
            initial_asset_weight: config.initial_asset_weight,
            maintenance_asset_weight: config.maintenance_asset_weight,
            initial_liability_weight: config.initial_liability_weight,
            maintenance_liability_weight: config.maintenance_liability_weight,
            imf_factor: config.imf_factor,
            liquidation_fee: config.liquidation_fee,
            active_status: config.active_status,
        };

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: encode("initialize_spot_market", &args),
        })
    }

    /// Set the minimum duration of the auction phase for new perp orders
    pub fn update_perp_auction_duration(
        &self,
        min_duration: u8,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.state_accounts(),
            data: encode("update_perp_auction_duration", &min_duration),
        })
    }

    /// Replace the oracle guard rails applied across all markets
    pub fn update_oracle_guard_rails(
        &self,
        guard_rails: &OracleGuardRails,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.state_accounts(),
            data: encode("update_oracle_guard_rails", guard_rails),
        })
    }

    pub fn update_perp_market_max_fill_reserve_fraction(
        &self,
        market_index: u16,
        max_fill_reserve_fraction: u16,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode(
                "update_perp_market_max_fill_reserve_fraction",
                &max_fill_reserve_fraction,
            ),
        })
    }

    pub fn update_perp_market_lp_cooldown_time(
        &self,
        market_index: u16,
        duration: u64,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode("update_perp_market_lp_cooldown_time", &duration),
        })
    }

    pub fn update_perp_market_concentration_scale(
        &self,
        market_index: u16,
        concentration_scale: u128,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode(
                "update_perp_market_concentration_scale",
                &concentration_scale,
            ),
        })
    }

    pub fn update_perp_market_base_spread(
        &self,
        market_index: u16,
        base_spread: u32,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode("update_perp_market_base_spread", &base_spread),
        })
    }

    pub fn update_perp_market_max_spread(
        &self,
        market_index: u16,
        max_spread: u32,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode("update_perp_market_max_spread", &max_spread),
        })
    }

    pub fn update_perp_market_step_size_and_tick_size(
        &self,
        market_index: u16,
        step_size: u64,
        tick_size: u64,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode(
                "update_perp_market_step_size_and_tick_size",
                &(step_size, tick_size),
            ),
        })
    }

    /// Set the timestamp at which the market stops trading and settles.
    /// The interface names the market role `market` here, unlike the other
    /// perp market updates, but the account list is the same.
    pub fn update_perp_market_expiry(
        &self,
        market_index: u16,
        expiry_ts: i64,
    ) -> Result<Instruction, DeriveError> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts: self.perp_market_accounts(market_index)?,
            data: encode("update_perp_market_expiry", &expiry_ts),
        })
    }

    /// Sweep an expired perp market's fee and pnl pools into the quote spot
    /// market's revenue pool
    pub fn settle_expired_market_pools_to_revenue_pool(
        &self,
        market_index: u16,
    ) -> Result<Instruction, DeriveError> {
        let spot_market =
            derive::derive_spot_market(&self.program_id, QUOTE_SPOT_MARKET_INDEX)?;
        let perp_market = derive::derive_perp_market(&self.program_id, market_index)?;

        let accounts = vec![
            AccountMeta::new_readonly(self.state, false),
            AccountMeta::new_readonly(self.admin, true),
            AccountMeta::new(spot_market, false),
            AccountMeta::new(perp_market, false),
        ];

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: encode("settle_expired_market_pools_to_revenue_pool", &()),
        })
    }

    /// The admin/state pair prefixing every update operation
    fn state_accounts(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.admin, true),
            AccountMeta::new(self.state, false),
        ]
    }

    fn perp_market_accounts(&self, market_index: u16) -> Result<Vec<AccountMeta>, DeriveError> {
        let perp_market = derive::derive_perp_market(&self.program_id, market_index)?;

        let mut accounts = self.state_accounts();
        accounts.push(AccountMeta::new(perp_market, false));

        Ok(accounts)
    }
}

fn encode<T: BorshSerialize>(name: &str, args: &T) -> Vec<u8> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)
        .expect("instruction arguments always serialize into a Vec");
    data
}

#[derive(BorshSerialize)]
struct InitializePerpMarket {
    base_asset_reserve: u128,
    quote_asset_reserve: u128,
    periodicity: i64,
    peg_multiplier: u128,
    oracle_source: OracleSource,
    margin_ratio_initial: u32,
    margin_ratio_maintenance: u32,
    liquidation_fee: u32,
    active_status: bool,
}

#[derive(BorshSerialize)]
struct InitializeSpotMarket {
    optimal_utilization: u32,
    optimal_rate: u32,
    max_rate: u32,
    oracle_source: OracleSource,
    initial_asset_weight: u32,
    maintenance_asset_weight: u32,
    initial_liability_weight: u32,
    maintenance_liability_weight: u32,
    imf_factor: u32,
    liquidation_fee: u32,
    active_status: bool,
}
