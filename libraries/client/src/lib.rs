//! Administrative client for the clearing house program.
//!
//! Wraps the pure builders from `clearing-house-instructions` with a
//! network transport: each operation derives its accounts, assembles one
//! instruction, signs it with the admin authority and submits it. The
//! client holds no mutable state and never retries; retry and timeout
//! policy belong to the transport configuration.

pub mod admin;
pub mod config;
pub mod error;
pub mod network;
pub mod rpc;

pub use admin::ClearingHouseAdmin;
pub use config::ClientConfig;
pub use error::AdminError;
pub use network::NetworkKind;
pub use rpc::{ClientError, RpcConnection, SolanaRpc};
