use coin_params::NetworkProfile;

const MAINNET_PEERS: &[&str] = &[
    "eu-nodes.mainnet.beam.mw:8100",
    "us-nodes.mainnet.beam.mw:8100",
    "ap-nodes.mainnet.beam.mw:8100",
];

const TESTNET_PEERS: &[&str] = &[
    "eu-nodes.testnet.beam.mw:8100",
    "us-nodes.testnet.beam.mw:8100",
    "ap-nodes.testnet.beam.mw:8100",
];

/// Built-in `host:port` peers for `network`, in preference order.
pub fn default_peers(network: NetworkProfile) -> &'static [&'static str] {
    if network.is_mainnet() {
        MAINNET_PEERS
    } else {
        TESTNET_PEERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_differ_per_network() {
        let main = default_peers(NetworkProfile::mainnet());
        let test = default_peers(NetworkProfile::testnet());
        assert!(!main.is_empty());
        assert!(main.iter().all(|p| !test.contains(p)));
    }

    #[test]
    fn every_peer_has_a_port() {
        for network in [NetworkProfile::mainnet(), NetworkProfile::testnet()] {
            for peer in default_peers(network) {
                let (host, port) = peer.rsplit_once(':').unwrap();
                assert!(!host.is_empty());
                assert!(port.parse::<u16>().is_ok(), "{peer}");
            }
        }
    }
}
