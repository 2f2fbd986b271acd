//! Deterministic stand-in for a real signing backend.
//!
//! Produces well-formed signatures bound to (origin, digest) so flows can be
//! exercised without a node. The output is not a valid ECDSA signature.

use broker_core::{Address, Fingerprint, Packed, Result, Signature};

use crate::digest::eth_signed_digest;
use crate::hash::keccak256;
use crate::sign::Signer;

#[derive(Debug, Clone, Copy, Default)]
pub struct StubSigner;

impl StubSigner {
    fn signature_for(origin: &Address, digest: &Fingerprint) -> Signature {
        let message = eth_signed_digest(digest);
        let r = keccak256(Packed::new().address(origin).bytes32(&message).as_bytes());
        let s = keccak256(&r);
        Signature::new(27, r, s)
    }

    /// Check a signature this stub produced.
    pub fn verify(&self, origin: &Address, digest: &Fingerprint, signature: &Signature) -> bool {
        Self::signature_for(origin, digest) == *signature
    }
}

impl Signer for StubSigner {
    fn sign(&self, origin: &Address, digest: &Fingerprint) -> Result<Signature> {
        Ok(Self::signature_for(origin, digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_is_deterministic() {
        let origin = Address::repeat_byte(1);
        let a = StubSigner.sign(&origin, &[5u8; 32]).unwrap();
        let b = StubSigner.sign(&origin, &[5u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.v, 27);
    }

    #[test]
    fn test_stub_binds_origin_and_digest() {
        let origin = Address::repeat_byte(1);
        let sig = StubSigner.sign(&origin, &[5u8; 32]).unwrap();
        assert!(StubSigner.verify(&origin, &[5u8; 32], &sig));
        assert!(!StubSigner.verify(&Address::repeat_byte(2), &[5u8; 32], &sig));
        assert!(!StubSigner.verify(&origin, &[6u8; 32], &sig));
    }
}
