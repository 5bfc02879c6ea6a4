use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParamsError;

/// Mainnet / testnet selector.
///
/// Chosen once when the wallet starts (from configuration) and never toggled
/// afterwards. Every bridge and every version lookup reads it, none writes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkProfile {
    is_mainnet: bool,
}

impl NetworkProfile {
    pub const fn mainnet() -> Self {
        Self { is_mainnet: true }
    }

    pub const fn testnet() -> Self {
        Self { is_mainnet: false }
    }

    pub const fn from_is_mainnet(is_mainnet: bool) -> Self {
        Self { is_mainnet }
    }

    pub const fn is_mainnet(self) -> bool {
        self.is_mainnet
    }

    /// Lowercase name, as used in configuration files and diagnostics.
    pub const fn as_str(self) -> &'static str {
        if self.is_mainnet {
            "mainnet"
        } else {
            "testnet"
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkProfile {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Self::mainnet()),
            "testnet" | "test" | "testnet3" => Ok(Self::testnet()),
            other => Err(ParamsError::InvalidIdentity(format!(
                "unknown network '{other}'"
            ))),
        }
    }
}

impl Serialize for NetworkProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_agree_with_flag() {
        assert!(NetworkProfile::mainnet().is_mainnet());
        assert!(!NetworkProfile::testnet().is_mainnet());
        assert_eq!(NetworkProfile::from_is_mainnet(true), NetworkProfile::mainnet());
        assert_eq!(NetworkProfile::from_is_mainnet(false), NetworkProfile::testnet());
    }

    #[test]
    fn display_names() {
        assert_eq!(NetworkProfile::mainnet().to_string(), "mainnet");
        assert_eq!(NetworkProfile::testnet().to_string(), "testnet");
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("Mainnet".parse::<NetworkProfile>().unwrap(), NetworkProfile::mainnet());
        assert_eq!("bitcoin".parse::<NetworkProfile>().unwrap(), NetworkProfile::mainnet());
        assert_eq!(" testnet3 ".parse::<NetworkProfile>().unwrap(), NetworkProfile::testnet());
        assert!("regtest".parse::<NetworkProfile>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_name() {
        let json = serde_json::to_string(&NetworkProfile::testnet()).unwrap();
        assert_eq!(json, "\"testnet\"");
        let back: NetworkProfile = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(back, NetworkProfile::mainnet());
        assert!(serde_json::from_str::<NetworkProfile>("\"signet\"").is_err());
    }
}
