//! The transport boundary between the admin client and the ledger

use std::sync::Arc;

use async_trait::async_trait;
use solana_client::{
    client_error::ClientErrorKind,
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The transport could not complete the exchange
    #[error("rpc connection error: {0}")]
    ConnectionFailed(String),

    /// The remote program/cluster rejected the submission. The reason is
    /// opaque to this client and surfaced verbatim.
    #[error("transaction rejected: {0}")]
    RemoteRejected(String),
}

/// The calls the admin client consumes from the Solana network.
///
/// Kept object safe so tests can substitute a recording stub.
#[async_trait]
pub trait SolanaRpc: Send + Sync {
    /// The genesis hash identifying the network
    async fn get_genesis_hash(&self) -> ClientResult<Hash>;

    /// A recent blockhash to sign against
    async fn get_latest_blockhash(&self) -> ClientResult<Hash>;

    /// Fetch an account, `None` if it does not exist
    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>>;

    /// Submit a signed transaction, returning its signature
    async fn send_transaction(&self, transaction: &Transaction) -> ClientResult<Signature>;
}

/// A wrapper for an RPC client to implement the [SolanaRpc] trait
#[derive(Clone)]
pub struct RpcConnection {
    rpc: Arc<RpcClient>,
}

impl RpcConnection {
    pub fn new(url: &str) -> Self {
        Self {
            rpc: Arc::new(RpcClient::new(url.to_owned())),
        }
    }
}

impl From<RpcClient> for RpcConnection {
    fn from(rpc: RpcClient) -> Self {
        Self { rpc: Arc::new(rpc) }
    }
}

#[async_trait]
impl SolanaRpc for RpcConnection {
    async fn get_genesis_hash(&self) -> ClientResult<Hash> {
        self.rpc.get_genesis_hash().await.map_err(convert_err)
    }

    async fn get_latest_blockhash(&self) -> ClientResult<Hash> {
        self.rpc.get_latest_blockhash().await.map_err(convert_err)
    }

    async fn get_account(&self, address: &Pubkey) -> ClientResult<Option<Account>> {
        self.rpc
            .get_account_with_commitment(address, CommitmentConfig::processed())
            .await
            .map(|response| response.value)
            .map_err(convert_err)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> ClientResult<Signature> {
        self.rpc
            .send_transaction_with_config(
                transaction,
                RpcSendTransactionConfig {
                    preflight_commitment: Some(CommitmentConfig::processed().commitment),
                    ..Default::default()
                },
            )
            .await
            .map_err(convert_err)
    }
}

fn convert_err(err: solana_client::client_error::ClientError) -> ClientError {
    match err.kind {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data, message, ..
        }) => {
            if let RpcResponseErrorData::SendTransactionPreflightFailure(result) = data {
                ClientError::RemoteRejected(format!(
                    "preflight simulation failed: {:#?}",
                    result.logs.unwrap_or_default()
                ))
            } else {
                ClientError::RemoteRejected(message)
            }
        }
        other => ClientError::ConnectionFailed(other.to_string()),
    }
}
