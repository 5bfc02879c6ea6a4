//! IPFS transport configuration.
//!
//! With the `ipfs` feature the full configuration is available. Without it a
//! stub of the same name still constructs, so dependents build either way.

use std::fmt;
use std::str::FromStr;

/// Whether the node runs embedded in a desktop wallet or as a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpfsMode {
    #[default]
    Desktop,
    Server,
}

impl fmt::Display for IpfsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpfsMode::Desktop => write!(f, "desktop"),
            IpfsMode::Server => write!(f, "server"),
        }
    }
}

impl FromStr for IpfsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(IpfsMode::Desktop),
            "server" => Ok(IpfsMode::Server),
            other => Err(format!("unknown ipfs mode '{other}'")),
        }
    }
}

#[cfg(feature = "ipfs")]
mod config {
    use std::path::PathBuf;

    use super::IpfsMode;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct IpfsConfig {
        pub mode: IpfsMode,
        pub storage: PathBuf,
        pub swarm_port: u16,
        pub bootstrap: Vec<String>,
        pub low_water: u32,
        pub high_water: u32,
    }

    impl IpfsConfig {
        pub fn new(mode: IpfsMode) -> Self {
            let (low_water, high_water) = match mode {
                IpfsMode::Desktop => (100, 300),
                IpfsMode::Server => (600, 900),
            };
            Self {
                mode,
                storage: PathBuf::from("ipfs"),
                swarm_port: 10_000,
                bootstrap: Vec::new(),
                low_water,
                high_water,
            }
        }

        pub fn is_enabled(&self) -> bool {
            true
        }
    }
}

#[cfg(not(feature = "ipfs"))]
mod config {
    use super::IpfsMode;

    /// Placeholder used when the transport is compiled out.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct IpfsConfig {
        pub mode: IpfsMode,
    }

    impl IpfsConfig {
        pub fn new(mode: IpfsMode) -> Self {
            Self { mode }
        }

        pub fn is_enabled(&self) -> bool {
            false
        }
    }
}

pub use config::IpfsConfig;
