//! Admin client behavior against a recording stub transport

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};

use clearing_house_client::{
    AdminError, ClearingHouseAdmin, ClientError, NetworkKind, SolanaRpc,
};
use clearing_house_instructions::{
    derive,
    markets::MarketCatalog,
    state::State,
    types::PerpMarketConfig,
};

/// Transport stub recording every submission
#[derive(Default)]
struct StubRpc {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    sent: Mutex<Vec<Transaction>>,
    reject_with: Option<String>,
}

impl StubRpc {
    fn with_state(program_id: &Pubkey, state: &State) -> Self {
        let stub = Self::default();
        let address = derive::derive_state(program_id).unwrap();
        stub.accounts.lock().unwrap().insert(
            address,
            Account {
                lamports: 1_000_000,
                data: state.to_account_data(),
                owner: *program_id,
                executable: false,
                rent_epoch: 0,
            },
        );
        stub
    }

    fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SolanaRpc for StubRpc {
    async fn get_genesis_hash(&self) -> Result<Hash, ClientError> {
        Ok(Hash::default())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError> {
        Ok(Hash::new_unique())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ClientError> {
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        if let Some(reason) = &self.reject_with {
            return Err(ClientError::RemoteRejected(reason.clone()));
        }

        self.sent.lock().unwrap().push(transaction.clone());
        Ok(Signature::new_unique())
    }
}

fn admin_with(stub: Arc<StubRpc>, program_id: Pubkey) -> ClearingHouseAdmin {
    ClearingHouseAdmin::new(
        stub,
        NetworkKind::Devnet,
        program_id,
        Arc::new(Keypair::new()),
        MarketCatalog::builtin(),
    )
    .unwrap()
}

fn default_state() -> State {
    State {
        admin: Pubkey::new_unique(),
        signer: Pubkey::new_unique(),
        number_of_markets: 0,
        number_of_spot_markets: 0,
        min_perp_auction_duration: 10,
    }
}

#[tokio::test]
async fn initialize_fails_fast_when_already_initialized() {
    let program_id = Pubkey::new_unique();
    let stub = Arc::new(StubRpc::with_state(&program_id, &default_state()));
    let admin = admin_with(stub.clone(), program_id);

    let result = admin.initialize(Pubkey::new_unique()).await;

    assert!(matches!(result, Err(AdminError::AlreadyInitialized)));
    assert!(stub.sent().is_empty(), "nothing may be submitted");
}

#[tokio::test]
async fn initialize_submits_one_signed_transaction() {
    let _ = env_logger::builder().is_test(true).try_init();

    let program_id = Pubkey::new_unique();
    let stub = Arc::new(StubRpc::default());
    let admin = admin_with(stub.clone(), program_id);

    admin.initialize(Pubkey::new_unique()).await.unwrap();

    let sent = stub.sent();
    assert_eq!(sent.len(), 1);
    // the authority is the fee payer and only local signer
    assert_eq!(sent[0].message.account_keys[0], admin.authority());
    assert_eq!(sent[0].message.header.num_required_signatures, 1);
}

#[tokio::test]
async fn new_perp_market_uses_the_state_market_count() -> anyhow::Result<()> {
    let program_id = Pubkey::new_unique();
    let mut state = default_state();
    state.number_of_markets = 3;

    let stub = Arc::new(StubRpc::with_state(&program_id, &state));
    let admin = admin_with(stub.clone(), program_id);

    admin
        .initialize_perp_market(
            Pubkey::new_unique(),
            1_000_000_000,
            1_000_000_000,
            3600,
            &PerpMarketConfig::default(),
        )
        .await?;

    let expected = derive::derive_perp_market(&program_id, 3)?;
    let sent = stub.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.account_keys.contains(&expected));
    Ok(())
}

#[tokio::test]
async fn market_updates_need_no_state_query() {
    let program_id = Pubkey::new_unique();
    // no state account in the stub; the derivation is purely local
    let stub = Arc::new(StubRpc::default());
    let admin = admin_with(stub.clone(), program_id);

    admin.update_perp_market_base_spread(7, 250).await.unwrap();

    let expected = derive::derive_perp_market(&program_id, 7).unwrap();
    let sent = stub.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].message.account_keys.contains(&expected));
}

#[tokio::test]
async fn remote_rejection_surfaces_verbatim() {
    let program_id = Pubkey::new_unique();
    let stub = Arc::new(StubRpc {
        reject_with: Some("custom program error: 0x1775".to_owned()),
        ..StubRpc::default()
    });
    let admin = admin_with(stub.clone(), program_id);

    let result = admin.update_perp_auction_duration(20).await;

    match result {
        Err(AdminError::Rpc(ClientError::RemoteRejected(reason))) => {
            assert_eq!(reason, "custom program error: 0x1775");
        }
        other => panic!("expected RemoteRejected, got {other:?}"),
    }
    assert!(stub.sent().is_empty());
}

#[tokio::test]
async fn uninitialized_state_is_its_own_error() {
    let program_id = Pubkey::new_unique();
    let stub = Arc::new(StubRpc::default());
    let admin = admin_with(stub.clone(), program_id);

    let result = admin
        .initialize_spot_market(Pubkey::new_unique(), &Default::default())
        .await;

    assert!(matches!(result, Err(AdminError::StateNotFound)));
    assert!(stub.sent().is_empty());
}

#[test]
fn catalog_routing_resolves_symbols() {
    let program_id = Pubkey::new_unique();
    let admin = admin_with(Arc::new(StubRpc::default()), program_id);

    assert_eq!(admin.market_index_for("SOL-PERP").unwrap(), 0);
    assert_eq!(admin.market_index_for("BTC-PERP").unwrap(), 1);
    assert_eq!(
        admin.market_oracle("SOL-PERP").unwrap(),
        admin.market("SOL-PERP").unwrap().devnet_pyth_oracle
    );

    assert!(matches!(
        admin.market_index_for("NO-SUCH-PERP"),
        Err(AdminError::MarketNotFound(_))
    ));
}
