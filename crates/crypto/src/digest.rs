//! Digests the parties sign off-chain and the contract recomputes on-chain.

use broker_core::{Address, ChannelId, Fingerprint, Packed, PaymentUpdate, U256};

use crate::hash::keccak256;

/// Prefix `eth_sign` prepends to a 32-byte message before hashing
pub const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Unidirectional payment digest:
/// `bytes32 channelId || uint256 value || address contract || uint32 chainId`
pub fn payment_digest(
    channel_id: &ChannelId,
    value: &U256,
    contract: &Address,
    chain_id: u32,
) -> Fingerprint {
    let packed = Packed::new()
        .bytes32(channel_id)
        .uint256(value)
        .address(contract)
        .uint32(chain_id);
    keccak256(packed.as_bytes())
}

/// Bidirectional balance digest:
/// `bytes32 channelId || uint32 nonce || uint256 payment || address contract || uint32 chainId`
pub fn bidi_payment_digest(
    channel_id: &ChannelId,
    nonce: u32,
    payment: &U256,
    contract: &Address,
    chain_id: u32,
) -> Fingerprint {
    let packed = Packed::new()
        .bytes32(channel_id)
        .uint32(nonce)
        .uint256(payment)
        .address(contract)
        .uint32(chain_id);
    keccak256(packed.as_bytes())
}

/// Root commitment digest:
/// `address contract || uint32 chainId || bytes32 channelId || bytes32 root`
pub fn root_digest(
    contract: &Address,
    chain_id: u32,
    channel_id: &ChannelId,
    merkle_root: &Fingerprint,
) -> Fingerprint {
    let packed = Packed::new()
        .address(contract)
        .uint32(chain_id)
        .bytes32(channel_id)
        .bytes32(merkle_root);
    keccak256(packed.as_bytes())
}

/// Fingerprint both parties sign for an `update` call:
/// `address contract || uint32 chainId || bytes32 channelId || uint32 nonce || bytes32 root`
pub fn update_fingerprint(contract: &Address, chain_id: u32, update: &PaymentUpdate) -> Fingerprint {
    let packed = Packed::new()
        .address(contract)
        .uint32(chain_id)
        .bytes32(&update.channel_id)
        .uint32(update.nonce)
        .bytes32(&update.merkle_root);
    keccak256(packed.as_bytes())
}

/// The digest `ecrecover` sees for a message signed through `eth_sign`.
pub fn eth_signed_digest(digest: &Fingerprint) -> Fingerprint {
    let packed = Packed::new()
        .bytes(ETH_SIGNED_MESSAGE_PREFIX)
        .bytes32(digest);
    keccak256(packed.as_bytes())
}
