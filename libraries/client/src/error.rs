//! Error taxonomy for admin operations

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use clearing_house_instructions::{derive::DeriveError, markets::MarketNotFound};

use crate::rpc::ClientError;

#[derive(Error, Debug)]
pub enum AdminError {
    /// A state account already exists at the derived address. Detected
    /// locally before submission; the remote check still applies if two
    /// initializers race.
    #[error("clearing house already initialized")]
    AlreadyInitialized,

    /// An operation needed the state account before the protocol was
    /// initialized
    #[error("clearing house state account not found")]
    StateNotFound,

    /// An account existed but did not decode as the expected type
    #[error("account {address} has an unexpected layout")]
    MalformedAccount { address: Pubkey },

    #[error(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    MarketNotFound(#[from] MarketNotFound),

    #[error(transparent)]
    Rpc(#[from] ClientError),
}
