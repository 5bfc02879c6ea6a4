use std::borrow::Cow;
use std::fmt;

use crate::error::ParamsError;
use crate::network::NetworkProfile;
use crate::version::{VersionBytes, VersionEntry};

/// Node RPC / wallet protocol dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    V016,
    V017,
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::V016 => write!(f, "016"),
            Generation::V017 => write!(f, "017"),
        }
    }
}

/// Whether a coin is reached through a full RPC node or its wallet daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Rpc,
    Daemon,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Rpc => write!(f, "rpc"),
            Transport::Daemon => write!(f, "daemon"),
        }
    }
}

/// Which bridge base a coin binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoreBinding {
    pub generation: Generation,
    pub transport: Transport,
}

impl CoreBinding {
    pub const fn rpc(generation: Generation) -> Self {
        Self {
            generation,
            transport: Transport::Rpc,
        }
    }

    pub const fn daemon(generation: Generation) -> Self {
        Self {
            generation,
            transport: Transport::Daemon,
        }
    }
}

/// Canonical chain name plus optional address-type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinIdentity {
    /// Lowercase chain selector, e.g. `"litecoin"` or `"bitcoin cash"`.
    pub name: Cow<'static, str>,
    /// Address type passed to the node, e.g. `"legacy"`. Empty when unused.
    pub address_type: Cow<'static, str>,
}

impl CoinIdentity {
    pub const fn new(name: &'static str, address_type: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            address_type: Cow::Borrowed(address_type),
        }
    }

    /// Build an identity at runtime, checking the naming rules.
    pub fn parse(
        name: impl Into<String>,
        address_type: impl Into<String>,
    ) -> Result<Self, ParamsError> {
        let identity = Self {
            name: Cow::Owned(name.into()),
            address_type: Cow::Owned(address_type.into()),
        };
        identity.check()?;
        Ok(identity)
    }

    /// Names must be non-empty, lowercase and free of surrounding whitespace.
    pub fn check(&self) -> Result<(), ParamsError> {
        let name = self.name.as_ref();
        if name.is_empty() {
            return Err(ParamsError::InvalidIdentity("empty coin name".into()));
        }
        if name.trim() != name {
            return Err(ParamsError::InvalidIdentity(format!(
                "coin name '{name}' has surrounding whitespace"
            )));
        }
        if name.chars().any(|c| c.is_uppercase()) {
            return Err(ParamsError::InvalidIdentity(format!(
                "coin name '{name}' must be lowercase"
            )));
        }
        Ok(())
    }
}

/// Declarative description of one coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinProfile {
    pub identity: CoinIdentity,
    pub mainnet: VersionEntry,
    pub testnet: VersionEntry,
    pub binding: Option<CoreBinding>,
    /// Accepted `getblockhash 0` replies on mainnet. Empty disables the check.
    pub mainnet_genesis: &'static [&'static str],
    /// Accepted `getblockhash 0` replies on testnet. Empty disables the check.
    pub testnet_genesis: &'static [&'static str],
}

impl CoinProfile {
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn address_type(&self) -> &str {
        &self.identity.address_type
    }

    pub fn entry(&self, network: NetworkProfile) -> VersionEntry {
        if network.is_mainnet() {
            self.mainnet
        } else {
            self.testnet
        }
    }

    pub fn supports(&self, network: NetworkProfile) -> bool {
        self.entry(network) != VersionEntry::Unsupported
    }

    pub fn genesis_hashes(&self, network: NetworkProfile) -> &'static [&'static str] {
        if network.is_mainnet() {
            self.mainnet_genesis
        } else {
            self.testnet_genesis
        }
    }
}

const BTC_MAINNET_GENESIS: &str =
    "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
const BTC_TESTNET_GENESIS: &str =
    "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943";

/// Bitcoin.
pub static BITCOIN: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("bitcoin", "legacy"),
    mainnet: VersionEntry::Base,
    testnet: VersionEntry::Base,
    binding: Some(CoreBinding::rpc(Generation::V017)),
    mainnet_genesis: &[BTC_MAINNET_GENESIS],
    testnet_genesis: &[BTC_TESTNET_GENESIS],
};

/// Litecoin. The only coin with its own mainnet bytes in the built-in table.
pub static LITECOIN: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("litecoin", "legacy"),
    mainnet: VersionEntry::Override(VersionBytes::new(48, 0xB0)),
    testnet: VersionEntry::Base,
    binding: Some(CoreBinding::rpc(Generation::V017)),
    mainnet_genesis: &["12a765e31ffd4059bada1e25190f6e98c99d9714d334efa41a195a7e7e04bfe2"],
    testnet_genesis: &["4966625a4b2851d9fdee139e56211a0d88575f59ed816ff5e6a63deb4e3e29a0"],
};

/// Qtum.
pub static QTUM: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("qtum", "legacy"),
    mainnet: VersionEntry::Base,
    testnet: VersionEntry::Base,
    binding: Some(CoreBinding::rpc(Generation::V017)),
    mainnet_genesis: &["000075aef83cf2853580f8ae8ce6f8c3096cfa21d98334d6e3f95e5582ed986c"],
    testnet_genesis: &["0000e803ee215c0684ca0d2f9220594d3f828617972aad66feb2ba51f5e14222"],
};

/// Bitcoin Cash. Shares the Bitcoin genesis block.
pub static BITCOIN_CASH: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("bitcoin cash", ""),
    mainnet: VersionEntry::Base,
    testnet: VersionEntry::Base,
    binding: Some(CoreBinding::rpc(Generation::V016)),
    mainnet_genesis: &[BTC_MAINNET_GENESIS],
    testnet_genesis: &[BTC_TESTNET_GENESIS],
};

/// Dash.
pub static DASH: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("dash", ""),
    mainnet: VersionEntry::Base,
    testnet: VersionEntry::Base,
    binding: Some(CoreBinding::rpc(Generation::V016)),
    mainnet_genesis: &["00000ffd590b1485b3caadc19b22e6379c733355108f107a430458cdf3407ab6"],
    testnet_genesis: &["00000bafbc94add76cb75e2ec92894837288a481e5c005f6563d91623bf8bc2c"],
};

/// Denarius, reached through its wallet daemon. Mainnet only.
pub static DENARIUS: CoinProfile = CoinProfile {
    identity: CoinIdentity::new("denarius", ""),
    mainnet: VersionEntry::Base,
    testnet: VersionEntry::Unsupported,
    binding: Some(CoreBinding::daemon(Generation::V016)),
    mainnet_genesis: &[],
    testnet_genesis: &[],
};

/// All built-in coin profiles.
pub static BUILTIN_PROFILES: &[&CoinProfile] =
    &[&BITCOIN, &LITECOIN, &QTUM, &BITCOIN_CASH, &DASH, &DENARIUS];
