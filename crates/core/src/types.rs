use std::str::FromStr;

use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

use crate::{BrokerError, Result};

/// 32-byte Keccak-256 output. Used for leaves, internal nodes and roots.
pub type Fingerprint = [u8; 32];

/// 32-byte on-chain channel identifier
pub type ChannelId = [u8; 32];

/// 32-byte payment secret (or its hash, at the caller's choice)
pub type Preimage = [u8; 32];

/// Width of every fixed-size field except addresses and `uint32`s
pub const WORD_LEN: usize = 32;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Format bytes as a `0x`-prefixed lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Left-align `raw` into a `bytes32`, zero-padding on the right.
///
/// Inputs longer than 32 bytes do not fit and are rejected.
pub fn bytes32_from_slice(raw: &[u8]) -> Result<[u8; 32]> {
    if raw.len() > WORD_LEN {
        return Err(BrokerError::Encoding(format!(
            "{} bytes do not fit in bytes32",
            raw.len()
        )));
    }
    let mut out = [0u8; 32];
    out[..raw.len()].copy_from_slice(raw);
    Ok(out)
}

/// Parse a hex string (optional `0x`) as a `bytes32` value.
pub fn parse_bytes32(s: &str) -> Result<[u8; 32]> {
    let raw = hex::decode(strip_hex_prefix(s.trim()))
        .map_err(|e| BrokerError::Encoding(format!("invalid hex {:?}: {}", s, e)))?;
    bytes32_from_slice(&raw)
}

/// Interpret a byte slice as a fingerprint. The length must be exactly 32.
pub fn fingerprint_from_slice(raw: &[u8]) -> Result<Fingerprint> {
    <[u8; 32]>::try_from(raw).map_err(|_| {
        BrokerError::MalformedInput(format!("fingerprint must be 32 bytes, got {}", raw.len()))
    })
}

/// Parse a hex-encoded fingerprint.
pub fn parse_fingerprint(s: &str) -> Result<Fingerprint> {
    let raw = hex::decode(strip_hex_prefix(s.trim()))
        .map_err(|e| BrokerError::MalformedInput(format!("invalid hex {:?}: {}", s, e)))?;
    fingerprint_from_slice(&raw)
}

/// Parse a 20-byte contract address.
pub fn parse_address(s: &str) -> Result<Address> {
    Address::from_str(s.trim())
        .map_err(|e| BrokerError::Encoding(format!("invalid address {:?}: {}", s, e)))
}

/// Parse a signed 256-bit amount, decimal or `0x` hex, with optional sign.
pub fn parse_amount(s: &str) -> Result<I256> {
    let s = s.trim();
    let parsed = if s.contains("0x") || s.contains("0X") {
        I256::from_hex_str(s)
    } else {
        I256::from_dec_str(s)
    };
    parsed.map_err(|e| BrokerError::Encoding(format!("invalid int256 {:?}: {}", s, e)))
}

/// Parse an unsigned 256-bit value, decimal or `0x` hex.
pub fn parse_value(s: &str) -> Result<U256> {
    U256::from_str(s.trim())
        .map_err(|e| BrokerError::Encoding(format!("invalid uint256 {:?}: {}", s, e)))
}

/// Recoverable ECDSA signature in the layout returned by `eth_sign`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    /// Byte length of an RPC signature: `r || s || v`
    pub const RPC_LEN: usize = 65;

    pub fn new(v: u8, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }

    /// Parse the hex string a node returns from `eth_sign`.
    ///
    /// Some nodes report `v` as 0/1 rather than 27/28; both are accepted.
    pub fn from_rpc(s: &str) -> Result<Self> {
        let raw = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|_| BrokerError::InvalidSignature)?;
        if raw.len() != Self::RPC_LEN {
            return Err(BrokerError::InvalidSignature);
        }
        let mut r = [0u8; 32];
        let mut sig_s = [0u8; 32];
        r.copy_from_slice(&raw[..32]);
        sig_s.copy_from_slice(&raw[32..64]);
        let mut v = raw[64];
        if v < 27 {
            v += 27;
        }
        if v != 27 && v != 28 {
            return Err(BrokerError::InvalidSignature);
        }
        Ok(Self { v, r, s: sig_s })
    }

    /// Serialize back to the `0x`-prefixed RPC form.
    pub fn to_rpc(&self) -> String {
        let mut raw = Vec::with_capacity(Self::RPC_LEN);
        raw.extend_from_slice(&self.r);
        raw.extend_from_slice(&self.s);
        raw.push(self.v);
        to_hex(&raw)
    }
}
