//! Target network selection

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::{hash::Hash, pubkey, pubkey::Pubkey};

use clearing_house_instructions::markets::MarketEntry;

use crate::rpc::{ClientResult, SolanaRpc};

const MAINNET_HASH: &str = "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d";
const DEVNET_HASH: &str = "EtWTRABZaYq6iMfeYKouRu166VU2xqa1wcaWoxPkrZBG";

/// The clearing house deployment shared by mainnet and devnet
pub const CLEARING_HOUSE_ID: Pubkey = pubkey!("dRiftyHA39MWEi3m9aunc5MzRF1JYuBsbn6VPcn33UH");

/// Description for the Solana network a client may connect to
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// The public mainnet-beta network
    Mainnet,

    /// The public network for development testing
    Devnet,

    /// A non-public network for testing
    Localnet,
}

impl NetworkKind {
    /// Determine the network type based on its genesis hash
    pub fn from_genesis_hash(network_genesis_hash: &Hash) -> Self {
        if *network_genesis_hash == Hash::from_str(MAINNET_HASH).unwrap() {
            NetworkKind::Mainnet
        } else if *network_genesis_hash == Hash::from_str(DEVNET_HASH).unwrap() {
            NetworkKind::Devnet
        } else {
            NetworkKind::Localnet
        }
    }

    /// Determine the network type for a given interface
    pub async fn from_interface(network: &dyn SolanaRpc) -> ClientResult<Self> {
        let network_hash = network.get_genesis_hash().await?;
        Ok(Self::from_genesis_hash(&network_hash))
    }

    /// The clearing house program deployed on this network. Localnet has no
    /// canonical deployment; override it through [`crate::ClientConfig`].
    pub fn default_program_id(&self) -> Pubkey {
        CLEARING_HOUSE_ID
    }

    /// Select the oracle column of a market entry for this network. There
    /// are no public feeds on localnet, so it maps to the devnet column.
    pub fn oracle(&self, market: &MarketEntry) -> Pubkey {
        match self {
            NetworkKind::Mainnet => market.mainnet_pyth_oracle,
            NetworkKind::Devnet | NetworkKind::Localnet => market.devnet_pyth_oracle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearing_house_instructions::markets::MarketCatalog;

    #[test]
    fn genesis_hash_maps_to_network() {
        let mainnet = Hash::from_str(MAINNET_HASH).unwrap();
        let devnet = Hash::from_str(DEVNET_HASH).unwrap();

        assert_eq!(NetworkKind::from_genesis_hash(&mainnet), NetworkKind::Mainnet);
        assert_eq!(NetworkKind::from_genesis_hash(&devnet), NetworkKind::Devnet);
        assert_eq!(
            NetworkKind::from_genesis_hash(&Hash::default()),
            NetworkKind::Localnet
        );
    }

    #[test]
    fn oracle_column_follows_network() {
        let catalog = MarketCatalog::builtin();
        let sol = catalog.lookup("SOL-PERP").unwrap();

        assert_eq!(NetworkKind::Mainnet.oracle(sol), sol.mainnet_pyth_oracle);
        assert_eq!(NetworkKind::Devnet.oracle(sol), sol.devnet_pyth_oracle);
        assert_eq!(NetworkKind::Localnet.oracle(sol), sol.devnet_pyth_oracle);
    }
}
