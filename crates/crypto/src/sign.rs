use broker_core::{Address, Fingerprint, PaymentUpdate, Result, Signature};

use crate::digest::update_fingerprint;

/// Opaque signing capability.
///
/// Implementations typically forward to a node's `eth_sign` or a wallet;
/// key management is outside this crate.
pub trait Signer: Send + Sync {
    /// Sign `digest` on behalf of `origin`.
    fn sign(&self, origin: &Address, digest: &Fingerprint) -> Result<Signature>;
}

/// Which side of the channel a signature belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Sender,
    Receiver,
}

/// Sign `update` as `party` and store the signature in the matching slot.
pub fn sign_update(
    signer: &dyn Signer,
    origin: &Address,
    party: Party,
    contract: &Address,
    chain_id: u32,
    update: &mut PaymentUpdate,
) -> Result<()> {
    let fingerprint = update_fingerprint(contract, chain_id, update);
    let signature = signer.sign(origin, &fingerprint)?;
    match party {
        Party::Sender => update.sender_sig = Some(signature),
        Party::Receiver => update.receiver_sig = Some(signature),
    }
    Ok(())
}
