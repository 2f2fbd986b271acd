//! Shapes of the on-chain channel state and the calls made against it.
//!
//! The contract itself executes elsewhere; these mirror what is read from
//! `channels(channelId)` and what is passed to `update(...)`.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, Fingerprint, Signature};

/// Channel state as stored by the broker contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentChannel {
    pub sender: Address,
    pub receiver: Address,
    /// Deposited value in wei
    pub value: U256,
    /// Merkle root of the latest accepted update
    pub root: Fingerprint,
    /// Settling period length in blocks
    pub settling_period: u64,
    /// Block number the settling window closes at (0 while open)
    pub settling_until: u64,
    /// Nonce of the latest accepted update
    pub nonce: u32,
}

impl PaymentChannel {
    /// Nonce a fresh update must carry to supersede the stored one.
    ///
    /// `None` once the nonce space is exhausted; the channel can only be
    /// settled from then on.
    pub fn next_nonce(&self) -> Option<u32> {
        self.nonce.checked_add(1)
    }

    /// Whether `address` is one of the two parties
    pub fn is_party(&self, address: &Address) -> bool {
        self.sender == *address || self.receiver == *address
    }
}

/// Arguments of the contract's `update(channelId, nonce, root, senderSig, receiverSig)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub channel_id: ChannelId,
    pub nonce: u32,
    pub merkle_root: Fingerprint,
    pub sender_sig: Option<Signature>,
    pub receiver_sig: Option<Signature>,
}

impl PaymentUpdate {
    pub fn new(channel_id: ChannelId, nonce: u32, merkle_root: Fingerprint) -> Self {
        Self {
            channel_id,
            nonce,
            merkle_root,
            sender_sig: None,
            receiver_sig: None,
        }
    }

    /// Both parties have signed; ready for submission
    pub fn is_fully_signed(&self) -> bool {
        self.sender_sig.is_some() && self.receiver_sig.is_some()
    }

    /// Whether the contract would accept this over `channel`'s stored state
    pub fn supersedes(&self, channel: &PaymentChannel) -> bool {
        self.nonce > channel.nonce
    }
}
