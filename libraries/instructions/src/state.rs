//! Read-side view of program accounts the admin client consumes

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::account_discriminator;

/// The prefix of the program's `State` account, covering the fields the
/// admin client reads. Market counts are the program's authoritative,
/// monotonically increasing indices; the next market to be created takes
/// the current count as its index.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub admin: Pubkey,
    pub signer: Pubkey,
    pub number_of_markets: u16,
    pub number_of_spot_markets: u16,
    pub min_perp_auction_duration: u8,
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("account data does not carry the clearing house state discriminator")]
    WrongDiscriminator,

    #[error("state account data truncated: {0}")]
    Truncated(#[from] std::io::Error),
}

impl State {
    /// Decode from raw account data, checking the discriminator prefix.
    pub fn try_deserialize(data: &[u8]) -> Result<Self, StateError> {
        if data.len() < 8 || data[..8] != Self::discriminator() {
            return Err(StateError::WrongDiscriminator);
        }

        Ok(Self::deserialize(&mut &data[8..])?)
    }

    /// Encode as account data. The client never writes state accounts; this
    /// exists for test fixtures standing in for the remote program.
    pub fn to_account_data(&self) -> Vec<u8> {
        let mut data = Self::discriminator().to_vec();
        self.serialize(&mut data)
            .expect("state always serializes into a Vec");
        data
    }

    pub fn discriminator() -> [u8; 8] {
        account_discriminator("State")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_prefix_of_larger_account() {
        let state = State {
            admin: Pubkey::new_unique(),
            signer: Pubkey::new_unique(),
            number_of_markets: 4,
            number_of_spot_markets: 2,
            min_perp_auction_duration: 10,
        };

        // on-chain accounts carry fields past the ones we read
        let mut data = state.to_account_data();
        data.extend_from_slice(&[0u8; 64]);

        let decoded = State::try_deserialize(&data).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn rejects_foreign_discriminator() {
        let mut data = vec![0u8; 128];
        data[..8].copy_from_slice(&account_discriminator("PerpMarket"));

        assert!(matches!(
            State::try_deserialize(&data),
            Err(StateError::WrongDiscriminator)
        ));
    }
}
