//! The stateful administrative client

use std::sync::Arc;

use log::{debug, info};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use clearing_house_instructions::{
    markets::{MarketCatalog, MarketEntry},
    state::State,
    types::{OracleGuardRails, PerpMarketConfig, SpotMarketConfig},
    ClearingHouseIxBuilder,
};

use crate::{
    config::ClientConfig,
    error::AdminError,
    network::NetworkKind,
    rpc::{RpcConnection, SolanaRpc},
};

/// A client for the clearing house program's admin interface.
///
/// Each operation is a single request/response exchange: derive the
/// accounts, build one instruction, sign, submit. The client caches
/// nothing across calls besides the derived state address, so operations
/// on distinct markets may be issued concurrently from clones.
#[derive(Clone)]
pub struct ClearingHouseAdmin {
    rpc: Arc<dyn SolanaRpc>,
    network: NetworkKind,
    authority: Arc<Keypair>,
    catalog: MarketCatalog,
    ix: Arc<ClearingHouseIxBuilder>,
}

impl ClearingHouseAdmin {
    pub fn new(
        rpc: Arc<dyn SolanaRpc>,
        network: NetworkKind,
        program_id: Pubkey,
        authority: Arc<Keypair>,
        catalog: MarketCatalog,
    ) -> Result<Self, AdminError> {
        let ix = ClearingHouseIxBuilder::new(program_id, authority.pubkey())?;

        Ok(Self {
            rpc,
            network,
            authority,
            catalog,
            ix: Arc::new(ix),
        })
    }

    /// Connect through an RPC endpoint, detecting the network from its
    /// genesis hash when the config does not pin one.
    pub async fn from_config(
        config: &ClientConfig,
        authority: Arc<Keypair>,
    ) -> Result<Self, AdminError> {
        let rpc = Arc::new(RpcConnection::new(&config.rpc_url));

        let network = match config.network {
            Some(network) => network,
            None => NetworkKind::from_interface(rpc.as_ref()).await?,
        };
        info!("connected to {network:?}");

        Self::new(
            rpc,
            network,
            config.program_id(network),
            authority,
            MarketCatalog::builtin(),
        )
    }

    pub fn authority(&self) -> Pubkey {
        self.authority.pubkey()
    }

    pub fn program_id(&self) -> Pubkey {
        self.ix.program_id()
    }

    /// The derived state account address
    pub fn state_address(&self) -> Pubkey {
        self.ix.state()
    }

    /// Resolve a market symbol through the injected catalog
    pub fn market(&self, symbol: &str) -> Result<&MarketEntry, AdminError> {
        Ok(self.catalog.get(symbol)?)
    }

    /// The authoritative index for a market symbol
    pub fn market_index_for(&self, symbol: &str) -> Result<u16, AdminError> {
        Ok(self.market(symbol)?.market_index)
    }

    /// The oracle feed for a market symbol on the connected network
    pub fn market_oracle(&self, symbol: &str) -> Result<Pubkey, AdminError> {
        let entry = self.market(symbol)?;
        Ok(self.network.oracle(entry))
    }

    /// Initialize the clearing house.
    ///
    /// Fails fast with [`AdminError::AlreadyInitialized`] if a state
    /// account already exists at the derived address, before anything is
    /// submitted. The check is best effort; a racing initializer loses at
    /// the ledger, not here.
    pub async fn initialize(&self, quote_asset_mint: Pubkey) -> Result<Signature, AdminError> {
        let state_address = self.ix.state();
        if self.rpc.get_account(&state_address).await?.is_some() {
            return Err(AdminError::AlreadyInitialized);
        }

        info!("initializing clearing house state at {state_address}");
        self.submit(self.ix.initialize(quote_asset_mint)?).await
    }

    /// Create the next perp market. The market index is whatever the state
    /// account's market count currently is.
    pub async fn initialize_perp_market(
        &self,
        price_oracle: Pubkey,
        base_asset_reserve: u128,
        quote_asset_reserve: u128,
        periodicity: i64,
        config: &PerpMarketConfig,
    ) -> Result<Signature, AdminError> {
        let state = self.read_state().await?;
        let market_index = state.number_of_markets;

        info!("initializing perp market {market_index}");
        self.submit(self.ix.initialize_perp_market(
            market_index,
            price_oracle,
            base_asset_reserve,
            quote_asset_reserve,
            periodicity,
            config,
        )?)
        .await
    }

    /// Create the next spot market. The index comes from the state
    /// account's spot market count.
    pub async fn initialize_spot_market(
        &self,
        mint: Pubkey,
        config: &SpotMarketConfig,
    ) -> Result<Signature, AdminError> {
        let state = self.read_state().await?;
        let spot_index = state.number_of_spot_markets;

        info!("initializing spot market {spot_index}");
        self.submit(self.ix.initialize_spot_market(spot_index, mint, config)?)
            .await
    }

    pub async fn update_perp_auction_duration(
        &self,
        min_duration: u8,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_auction_duration: {min_duration}");
        self.submit(self.ix.update_perp_auction_duration(min_duration)?)
            .await
    }

    pub async fn update_oracle_guard_rails(
        &self,
        guard_rails: &OracleGuardRails,
    ) -> Result<Signature, AdminError> {
        debug!("update_oracle_guard_rails: {guard_rails:?}");
        self.submit(self.ix.update_oracle_guard_rails(guard_rails)?)
            .await
    }

    pub async fn update_perp_market_max_fill_reserve_fraction(
        &self,
        market_index: u16,
        max_fill_reserve_fraction: u16,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_max_fill_reserve_fraction({market_index}): {max_fill_reserve_fraction}");
        self.submit(
            self.ix
                .update_perp_market_max_fill_reserve_fraction(market_index, max_fill_reserve_fraction)?,
        )
        .await
    }

    pub async fn update_perp_market_lp_cooldown_time(
        &self,
        market_index: u16,
        duration: u64,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_lp_cooldown_time({market_index}): {duration}");
        self.submit(
            self.ix
                .update_perp_market_lp_cooldown_time(market_index, duration)?,
        )
        .await
    }

    pub async fn update_perp_market_concentration_scale(
        &self,
        market_index: u16,
        concentration_scale: u128,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_concentration_scale({market_index}): {concentration_scale}");
        self.submit(
            self.ix
                .update_perp_market_concentration_scale(market_index, concentration_scale)?,
        )
        .await
    }

    pub async fn update_perp_market_base_spread(
        &self,
        market_index: u16,
        base_spread: u32,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_base_spread({market_index}): {base_spread}");
        self.submit(
            self.ix
                .update_perp_market_base_spread(market_index, base_spread)?,
        )
        .await
    }

    pub async fn update_perp_market_max_spread(
        &self,
        market_index: u16,
        max_spread: u32,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_max_spread({market_index}): {max_spread}");
        self.submit(
            self.ix
                .update_perp_market_max_spread(market_index, max_spread)?,
        )
        .await
    }

    pub async fn update_perp_market_step_size_and_tick_size(
        &self,
        market_index: u16,
        step_size: u64,
        tick_size: u64,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_step_size_and_tick_size({market_index}): {step_size}/{tick_size}");
        self.submit(self.ix.update_perp_market_step_size_and_tick_size(
            market_index,
            step_size,
            tick_size,
        )?)
        .await
    }

    pub async fn update_perp_market_expiry(
        &self,
        market_index: u16,
        expiry_ts: i64,
    ) -> Result<Signature, AdminError> {
        debug!("update_perp_market_expiry({market_index}): {expiry_ts}");
        self.submit(self.ix.update_perp_market_expiry(market_index, expiry_ts)?)
            .await
    }

    pub async fn settle_expired_market_pools_to_revenue_pool(
        &self,
        market_index: u16,
    ) -> Result<Signature, AdminError> {
        debug!("settle_expired_market_pools_to_revenue_pool({market_index})");
        self.submit(
            self.ix
                .settle_expired_market_pools_to_revenue_pool(market_index)?,
        )
        .await
    }

    /// Fetch and decode the state account
    pub async fn read_state(&self) -> Result<State, AdminError> {
        let address = self.ix.state();
        let account = self
            .rpc
            .get_account(&address)
            .await?
            .ok_or(AdminError::StateNotFound)?;

        State::try_deserialize(&account.data)
            .map_err(|_| AdminError::MalformedAccount { address })
    }

    /// Sign and submit a single-instruction transaction
    async fn submit(&self, instruction: Instruction) -> Result<Signature, AdminError> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.authority.pubkey()),
            &[self.authority.as_ref()],
            blockhash,
        );

        Ok(self.rpc.send_transaction(&transaction).await?)
    }
}
