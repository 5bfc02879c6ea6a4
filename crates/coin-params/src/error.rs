use thiserror::Error;

use crate::network::NetworkProfile;

/// Coin parameter resolution and encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("unsupported network: {coin} has no address version for {network}")]
    UnsupportedNetwork {
        coin: String,
        network: NetworkProfile,
    },

    #[error("unknown coin: {0}")]
    UnknownCoin(String),

    #[error("invalid coin identity: {0}")]
    InvalidIdentity(String),

    #[error("duplicate coin: {0}")]
    DuplicateCoin(String),

    /// Registered coin with no bridge to reach its node.
    #[error("missing core binding: {0}")]
    MissingBinding(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("wrong network: expected version {expected:#04x}, got {actual:#04x}")]
    WrongNetwork { expected: u8, actual: u8 },
}
