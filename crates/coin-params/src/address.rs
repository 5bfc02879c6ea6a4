use bitcoin::secp256k1::SecretKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::ParamsError;
use crate::version::VersionBytes;

/// Compressed-key marker appended to WIF payloads.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Compute Hash160 (RIPEMD-160(SHA-256(data))).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Encode a P2KH address for a serialized secp256k1 public key.
///
/// Accepts compressed (33 bytes) and uncompressed (65 bytes) keys. The
/// address prefix comes from `version.p2kh`.
pub fn p2kh_address(pubkey_bytes: &[u8], version: VersionBytes) -> Result<String, ParamsError> {
    bitcoin::PublicKey::from_slice(pubkey_bytes)
        .map_err(|e| ParamsError::InvalidPublicKey(format!("failed to parse public key: {e}")))?;

    let pubkey_hash = hash160(pubkey_bytes);
    Ok(bs58::encode(pubkey_hash)
        .with_check_version(version.p2kh)
        .into_string())
}

/// Decode a P2KH address and return its 20-byte key hash.
///
/// The version byte must equal `version.p2kh`. An address from another chain
/// or network is rejected with [`ParamsError::WrongNetwork`].
pub fn decode_p2kh(address: &str, version: VersionBytes) -> Result<[u8; 20], ParamsError> {
    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| ParamsError::InvalidAddress(format!("invalid base58check: {e}")))?;

    // version (1) + hash (20)
    if payload.len() != 21 {
        return Err(ParamsError::InvalidAddress(format!(
            "expected 21 payload bytes, got {}",
            payload.len()
        )));
    }
    if payload[0] != version.p2kh {
        return Err(ParamsError::WrongNetwork {
            expected: version.p2kh,
            actual: payload[0],
        });
    }

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok(hash)
}

/// Export a 32-byte secret in wallet import format using `version.wif`.
pub fn encode_wif(
    secret: &[u8; 32],
    compressed: bool,
    version: VersionBytes,
) -> Result<String, ParamsError> {
    SecretKey::from_slice(secret)
        .map_err(|e| ParamsError::InvalidPrivateKey(format!("secret out of range: {e}")))?;

    let mut payload = Zeroizing::new(Vec::with_capacity(33));
    payload.extend_from_slice(secret);
    if compressed {
        payload.push(WIF_COMPRESSED_FLAG);
    }

    Ok(bs58::encode(payload.as_slice())
        .with_check_version(version.wif)
        .into_string())
}

/// Decode a WIF string. Returns the secret and whether it is marked compressed.
pub fn decode_wif(
    wif: &str,
    version: VersionBytes,
) -> Result<(Zeroizing<[u8; 32]>, bool), ParamsError> {
    let payload = Zeroizing::new(
        bs58::decode(wif)
            .with_check(None)
            .into_vec()
            .map_err(|e| ParamsError::InvalidPrivateKey(format!("invalid base58check: {e}")))?,
    );

    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == WIF_COMPRESSED_FLAG => true,
        len => {
            return Err(ParamsError::InvalidPrivateKey(format!(
                "unexpected WIF payload length {len}"
            )))
        }
    };
    if payload[0] != version.wif {
        return Err(ParamsError::WrongNetwork {
            expected: version.wif,
            actual: payload[0],
        });
    }

    let mut secret = Zeroizing::new([0u8; 32]);
    secret.copy_from_slice(&payload[1..33]);
    SecretKey::from_slice(secret.as_ref())
        .map_err(|e| ParamsError::InvalidPrivateKey(format!("secret out of range: {e}")))?;

    Ok((secret, compressed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{BASE_MAINNET, BASE_TESTNET};

    // privkey = 1 -> compressed generator point
    const G_COMPRESSED: &str =
        "0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";

    fn g_pubkey() -> Vec<u8> {
        hex::decode(G_COMPRESSED).unwrap()
    }

    fn one() -> [u8; 32] {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        secret
    }

    #[test]
    fn hash160_of_generator() {
        assert_eq!(
            hex::encode(hash160(&g_pubkey())),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn bitcoin_mainnet_p2kh_vector() {
        let address = p2kh_address(&g_pubkey(), BASE_MAINNET).unwrap();
        assert_eq!(address, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn bitcoin_testnet_p2kh_vector() {
        let address = p2kh_address(&g_pubkey(), BASE_TESTNET).unwrap();
        assert_eq!(address, "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
    }

    #[test]
    fn litecoin_mainnet_addresses_start_with_l() {
        let address = p2kh_address(&g_pubkey(), VersionBytes::new(48, 0xB0)).unwrap();
        assert!(address.starts_with('L'), "expected L prefix, got {address}");
    }

    #[test]
    fn decode_returns_key_hash() {
        let address = p2kh_address(&g_pubkey(), BASE_MAINNET).unwrap();
        let hash = decode_p2kh(&address, BASE_MAINNET).unwrap();
        assert_eq!(hash, hash160(&g_pubkey()));
    }

    #[test]
    fn decode_rejects_other_chain() {
        let litecoin = VersionBytes::new(48, 0xB0);
        let address = p2kh_address(&g_pubkey(), BASE_MAINNET).unwrap();
        let err = decode_p2kh(&address, litecoin).unwrap_err();
        assert_eq!(
            err,
            ParamsError::WrongNetwork {
                expected: 48,
                actual: 0
            }
        );
    }

    #[test]
    fn decode_rejects_bad_checksum() {
        let result = decode_p2kh("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ", BASE_MAINNET);
        assert!(matches!(result, Err(ParamsError::InvalidAddress(_))));
    }

    #[test]
    fn invalid_pubkey_returns_error() {
        let result = p2kh_address(&[0u8; 33], BASE_MAINNET);
        assert!(matches!(result, Err(ParamsError::InvalidPublicKey(_))));
    }

    #[test]
    fn wif_mainnet_compressed_vector() {
        let wif = encode_wif(&one(), true, BASE_MAINNET).unwrap();
        assert_eq!(wif, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
    }

    #[test]
    fn wif_mainnet_uncompressed_vector() {
        let wif = encode_wif(&one(), false, BASE_MAINNET).unwrap();
        assert_eq!(wif, "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf");
    }

    #[test]
    fn wif_decode_recovers_secret_and_flag() {
        let wif = encode_wif(&one(), true, BASE_TESTNET).unwrap();
        let (secret, compressed) = decode_wif(&wif, BASE_TESTNET).unwrap();
        assert_eq!(*secret, one());
        assert!(compressed);
    }

    #[test]
    fn wif_decode_rejects_other_network() {
        let wif = encode_wif(&one(), true, BASE_TESTNET).unwrap();
        let err = decode_wif(&wif, BASE_MAINNET).unwrap_err();
        assert_eq!(
            err,
            ParamsError::WrongNetwork {
                expected: 0x80,
                actual: 0xEF
            }
        );
    }

    #[test]
    fn zero_secret_is_rejected() {
        let result = encode_wif(&[0u8; 32], true, BASE_MAINNET);
        assert!(matches!(result, Err(ParamsError::InvalidPrivateKey(_))));
    }
}
