//! Instruction construction for the clearing house admin interface.
//!
//! This crate is pure: it derives the program accounts each operation
//! references and assembles [`solana_sdk::instruction::Instruction`] values
//! matching the deployed program's interface. Submitting them is the job of
//! the client crate.

pub mod builder;
pub mod derive;
pub mod markets;
pub mod seeds;
pub mod state;
pub mod types;

pub use builder::ClearingHouseIxBuilder;
pub use derive::DeriveError;

use sha2::{Digest, Sha256};

/// The 8-byte discriminator prefixing a global instruction's data, per the
/// program's anchor interface.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

/// The 8-byte discriminator prefixing a program account's data.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator("account", name)
}

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_namespaced() {
        assert_ne!(
            instruction_discriminator("initialize"),
            account_discriminator("initialize")
        );
        assert_ne!(
            instruction_discriminator("update_perp_market_base_spread"),
            instruction_discriminator("update_perp_market_max_spread")
        );
    }
}
