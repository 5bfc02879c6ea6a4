//! Coin bridges for atomic swaps on Bitcoin-derived chains.
//!
//! A bridge gives the swap engine one uniform contract per chain:
//! - coin identity and address version resolution (no I/O)
//! - node RPC calls shaped for the node's protocol generation (016 / 017)
//! - connection either through a settings provider (full node) or through
//!   direct wallet-daemon credentials
//!
//! Coin-specific data comes from [`coin_params::CoinRegistry`]; the bridge
//! types themselves are coin-agnostic.

pub mod bridge;
pub mod error;
pub mod factory;
pub mod policy;
pub mod rpc;
pub mod settings;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use bridge::{
    Bridge, BridgeCore, CoinBridge, ConnectionSource, DaemonBridge, DaemonOptions,
    DetailedBalance, FundedTransaction, ProviderSource, SignedTransaction, TxOutInfo,
};
pub use error::BridgeError;
pub use factory::BridgeFactory;
pub use policy::VersionPolicy;
pub use settings::{ConnectionType, CoreConnection, Settings, SettingsProvider};
pub use transport::{HttpReply, HttpTransport, RpcTransport};
