use serde::{Deserialize, Serialize};

use broker_core::{ChannelId, Fingerprint, Preimage, I256};
use broker_crypto::HashlockScope;
use broker_merkle::{verify, MerkleProof};

/// Arguments of the contract's `withdraw(channelId, proof, preimage, amount)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub channel_id: ChannelId,
    pub proof: MerkleProof,
    pub preimage: Preimage,
    pub amount: I256,
}

impl Withdrawal {
    /// Hashlock the contract will recompute from the revealed preimage
    pub fn hashlock(&self, scope: &HashlockScope) -> Fingerprint {
        scope.derive(&self.channel_id, &self.preimage, &self.amount)
    }

    /// Replay the contract's check against `root`.
    ///
    /// The contract folds the siblings smaller-first and never looks at the
    /// proof's layout or leaf index, so neither is consulted here.
    pub fn verify(&self, scope: &HashlockScope, root: &Fingerprint) -> bool {
        verify(&self.proof.siblings, root, &self.hashlock(scope))
    }

    /// The `bytes proof` argument in hex
    pub fn proof_hex(&self) -> String {
        self.proof.to_hex()
    }
}
