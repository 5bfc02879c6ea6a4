use bitcoin::constants::{PUBKEY_ADDRESS_PREFIX_MAIN, PUBKEY_ADDRESS_PREFIX_TEST};

use crate::error::ParamsError;
use crate::network::NetworkProfile;
use crate::profile::CoinProfile;

/// Mainnet WIF prefix of the base network (0x80, keys start with `5`/`K`/`L`).
pub const BASE_MAINNET_WIF: u8 = 0x80;

/// Testnet WIF prefix of the base network (0xEF, keys start with `9`/`c`).
pub const BASE_TESTNET_WIF: u8 = 0xEF;

/// Version bytes used when encoding addresses and exporting private keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionBytes {
    /// Pay-to-key-hash address prefix.
    pub p2kh: u8,
    /// Wallet-import-format private key prefix.
    pub wif: u8,
}

/// Base network values for mainnet, inherited by coins without an override.
pub const BASE_MAINNET: VersionBytes = VersionBytes {
    p2kh: PUBKEY_ADDRESS_PREFIX_MAIN,
    wif: BASE_MAINNET_WIF,
};

/// Base network values for testnet, inherited by coins without an override.
pub const BASE_TESTNET: VersionBytes = VersionBytes {
    p2kh: PUBKEY_ADDRESS_PREFIX_TEST,
    wif: BASE_TESTNET_WIF,
};

impl VersionBytes {
    pub const fn new(p2kh: u8, wif: u8) -> Self {
        Self { p2kh, wif }
    }

    /// Base values for the given network.
    pub const fn base(network: NetworkProfile) -> Self {
        if network.is_mainnet() {
            BASE_MAINNET
        } else {
            BASE_TESTNET
        }
    }

    /// Both prefixes packed into one integer, WIF in the high byte.
    pub const fn packed(self) -> u16 {
        ((self.wif as u16) << 8) | self.p2kh as u16
    }
}

/// One cell of a coin's address version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionEntry {
    /// Use the base network values.
    Base,
    /// Coin-specific values.
    Override(VersionBytes),
    /// The coin is not supported on this network.
    Unsupported,
}

/// Resolve the version bytes of `profile` on `network`.
///
/// Never falls back across networks or coins: a missing entry is an error.
pub fn resolve_version(
    profile: &CoinProfile,
    network: NetworkProfile,
) -> Result<VersionBytes, ParamsError> {
    match profile.entry(network) {
        VersionEntry::Base => Ok(VersionBytes::base(network)),
        VersionEntry::Override(bytes) => Ok(bytes),
        VersionEntry::Unsupported => Err(ParamsError::UnsupportedNetwork {
            coin: profile.name().to_string(),
            network,
        }),
    }
}
