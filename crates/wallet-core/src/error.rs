use coin_bridge::BridgeError;
use coin_params::{NetworkProfile, ParamsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Config error: {0}")]
    Config(String),

    /// The swap must abort before any funds are committed.
    #[error("Unsupported network: {coin} has no address version for {network}")]
    UnsupportedNetwork {
        coin: String,
        network: NetworkProfile,
    },

    #[error("Missing core binding: {0}")]
    MissingCoreBinding(String),

    #[error("Bridge error: {0}")]
    Bridge(BridgeError),

    #[error("Invalid session reply: {0}")]
    InvalidSession(String),
}

impl From<BridgeError> for WalletError {
    fn from(e: BridgeError) -> Self {
        match e {
            BridgeError::UnsupportedNetwork { coin, network } => {
                WalletError::UnsupportedNetwork { coin, network }
            }
            BridgeError::MissingCoreBinding(coin) => WalletError::MissingCoreBinding(coin),
            other => WalletError::Bridge(other),
        }
    }
}

impl From<ParamsError> for WalletError {
    fn from(e: ParamsError) -> Self {
        BridgeError::from(e).into()
    }
}
