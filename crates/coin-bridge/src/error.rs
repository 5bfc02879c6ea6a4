use coin_params::{NetworkProfile, ParamsError};
use thiserror::Error;

/// Errors surfaced by coin bridges.
///
/// Node and transport failures are passed through as they arrive; the bridge
/// layer never retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("unsupported network: {coin} has no address version for {network}")]
    UnsupportedNetwork {
        coin: String,
        network: NetworkProfile,
    },

    #[error("missing core binding: {0}")]
    MissingCoreBinding(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("i/o error: {0}")]
    Io(String),

    #[error("node error: {0}")]
    Node(String),

    #[error("empty result")]
    EmptyResult,

    #[error("invalid result format: {0}")]
    InvalidResultFormat(String),

    #[error("invalid genesis block hash")]
    InvalidGenesisBlock,

    #[error(transparent)]
    Params(ParamsError),
}

impl From<ParamsError> for BridgeError {
    fn from(e: ParamsError) -> Self {
        match e {
            ParamsError::UnsupportedNetwork { coin, network } => {
                BridgeError::UnsupportedNetwork { coin, network }
            }
            ParamsError::UnknownCoin(coin) | ParamsError::MissingBinding(coin) => {
                BridgeError::MissingCoreBinding(coin)
            }
            other => BridgeError::Params(other),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::InvalidResultFormat(e.to_string())
    }
}
