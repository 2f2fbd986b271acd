use sha3::{Digest, Keccak256};

use broker_core::Fingerprint;

/// Keccak-256 as computed by the EVM (`keccak256`, `sha3` in Solidity 0.4).
///
/// This is the original Keccak padding, not NIST SHA3-256.
pub fn keccak256(data: &[u8]) -> Fingerprint {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_single_bytes() {
        assert_eq!(
            hex::encode(keccak256(&[1])),
            "5fe7f977e71dba2ea1a68e21057beebb9be2ac30c6410aa38d4f3fbe41dcffd2"
        );
        assert_eq!(
            hex::encode(keccak256(&[2])),
            "f2ee15ea639b73fa3db9b34a245bdfa015c260c598b211bf05a1ecc4b3e3b4f2"
        );
        assert_eq!(
            hex::encode(keccak256(&[3])),
            "69c322e3248a5dfc29d73c5b0553b0185a35cd5bb6386747517ef7e53b15e287"
        );
    }

    #[test]
    fn test_keccak256_deterministic() {
        assert_eq!(keccak256(b"broker"), keccak256(b"broker"));
        assert_ne!(keccak256(b"broker"), keccak256(b"Broker"));
    }
}
