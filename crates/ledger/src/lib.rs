//! Broker Ledger
//!
//! Per-channel record of committed payments.
//!
//! ## Payment Flow
//!
//! 1. **Pay**: the sender appends a payment (amount + fresh preimage); the
//!    ledger derives its hashlock and rebuilds the tree.
//! 2. **Update**: both parties sign the new root and nonce; the update is
//!    submitted on-chain.
//! 3. **Reveal**: the sender hands the preimage to the receiver off-chain.
//! 4. **Withdraw**: the receiver submits proof + preimage + amount; the
//!    contract recomputes the hashlock and checks it against the stored root.

mod leaf;
mod payments;
mod withdrawal;

pub use leaf::{CounterpartyPayment, KnownPayment, PaymentLeaf};
pub use payments::PaymentsTree;
pub use withdrawal::Withdrawal;

use broker_core::BrokerError;
use broker_merkle::{MerkleError, TreeLayout};
use broker_settings::SettingsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Duplicate hashlock: {0}")]
    DuplicateHashlock(String),

    #[error("Stored hashlock {0} does not match its payment under this scope")]
    HashlockMismatch(String),

    #[error("Tree layout {0:?} is not verifiable on-chain")]
    UnsupportedLayout(TreeLayout),

    #[error("No known payment for preimage {0}")]
    UnknownPreimage(String),

    #[error("Withdrawal is for channel {0}")]
    ChannelMismatch(String),

    #[error("Proof rejected against root {0}")]
    ProofRejected(String),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error(transparent)]
    Broker(#[from] BrokerError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
