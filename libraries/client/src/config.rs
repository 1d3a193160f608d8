//! Client configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::network::NetworkKind;

/// Configuration for connecting an admin client to a deployment
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientConfig {
    /// The RPC endpoint to connect through
    pub rpc_url: String,

    /// The target network. Detected from the genesis hash when absent.
    #[serde(default)]
    pub network: Option<NetworkKind>,

    /// Override for the deployed clearing house program id
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub program_id: Option<Pubkey>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientConfig {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network: None,
            program_id: None,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// The program id to use on `network`, honoring any override
    pub fn program_id(&self, network: NetworkKind) -> Pubkey {
        self.program_id
            .unwrap_or_else(|| network.default_program_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::CLEARING_HOUSE_ID;

    #[test]
    fn parses_program_id_as_base58() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "rpc_url": "http://localhost:8899",
                "network": "localnet",
                "program_id": "J83w4HKfqxwcq3BEMMkPFSppX3gqekLyLJBexebFVkix"
            }"#,
        )
        .unwrap();

        assert_eq!(config.network, Some(NetworkKind::Localnet));
        assert_eq!(
            config.program_id(NetworkKind::Localnet).to_string(),
            "J83w4HKfqxwcq3BEMMkPFSppX3gqekLyLJBexebFVkix"
        );
    }

    #[test]
    fn defaults_to_the_deployed_program() {
        let config = ClientConfig::new("https://api.devnet.solana.com");
        assert_eq!(config.program_id(NetworkKind::Devnet), CLEARING_HOUSE_ID);
    }
}
