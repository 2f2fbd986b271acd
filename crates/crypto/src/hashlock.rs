//! Payment hashlocks: the leaves of a channel's payment tree.

use rand::rngs::OsRng;
use rand::RngCore;

use broker_core::{
    parse_address, parse_amount, parse_bytes32, Address, ChannelId, Fingerprint, Packed,
    Preimage, Result, I256,
};

use crate::hash::keccak256;

/// What a hashlock is bound to besides its channel.
///
/// The unidirectional broker binds hashlocks to its own contract address;
/// the bidirectional broker binds them to the chain id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashlockScope {
    Contract(Address),
    Chain(u32),
}

impl HashlockScope {
    /// Derive the hashlock for one payment under this scope.
    pub fn derive(&self, channel_id: &ChannelId, preimage: &Preimage, amount: &I256) -> Fingerprint {
        match self {
            Self::Contract(address) => derive_hashlock(address, channel_id, preimage, amount),
            Self::Chain(chain_id) => derive_chain_hashlock(*chain_id, channel_id, preimage, amount),
        }
    }
}

/// `keccak256(abi.encodePacked(address, bytes32 channelId, bytes32 preimage, int256 amount))`
pub fn derive_hashlock(
    contract: &Address,
    channel_id: &ChannelId,
    preimage: &Preimage,
    amount: &I256,
) -> Fingerprint {
    let packed = Packed::new()
        .address(contract)
        .bytes32(channel_id)
        .bytes32(preimage)
        .int256(amount);
    keccak256(packed.as_bytes())
}

/// `keccak256(abi.encodePacked(uint32 chainId, bytes32 channelId, bytes32 preimage, int256 amount))`
pub fn derive_chain_hashlock(
    chain_id: u32,
    channel_id: &ChannelId,
    preimage: &Preimage,
    amount: &I256,
) -> Fingerprint {
    let packed = Packed::new()
        .uint32(chain_id)
        .bytes32(channel_id)
        .bytes32(preimage)
        .int256(amount);
    keccak256(packed.as_bytes())
}

/// Derive a contract-scoped hashlock from textual inputs.
///
/// Hex fields take an optional `0x`; `amount` is decimal or `0x` hex and may
/// be negative. Fails with an encoding error when a field does not fit its
/// fixed width.
pub fn derive_hashlock_hex(
    contract: &str,
    channel_id: &str,
    preimage: &str,
    amount: &str,
) -> Result<Fingerprint> {
    let contract = parse_address(contract)?;
    let channel_id = parse_bytes32(channel_id)?;
    let preimage = parse_bytes32(preimage)?;
    let amount = parse_amount(amount)?;
    Ok(derive_hashlock(&contract, &channel_id, &preimage, &amount))
}

/// Fresh random preimage from the OS RNG
pub fn random_preimage() -> Preimage {
    let mut preimage = [0u8; 32];
    OsRng.fill_bytes(&mut preimage);
    preimage
}
