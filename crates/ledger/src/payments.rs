use std::collections::HashSet;

use tracing::{debug, info, warn};

use broker_core::{to_hex, ChannelId, Fingerprint, PaymentUpdate, Preimage, I256};
use broker_crypto::HashlockScope;
use broker_merkle::{MerkleError, MerkleProof, MerkleTree, TreeLayout};
use broker_settings::Settings;

use crate::leaf::{CounterpartyPayment, KnownPayment, PaymentLeaf};
use crate::withdrawal::Withdrawal;
use crate::{LedgerError, Result};

/// Payments committed to one channel and the tree over their hashlocks.
///
/// The tree always uses the contract's [`TreeLayout::Sorted`] convention and
/// is rebuilt from the full leaf list on every append, so the root reflects
/// exactly the payments recorded here.
#[derive(Debug, Clone)]
pub struct PaymentsTree {
    scope: HashlockScope,
    channel_id: ChannelId,
    elements: Vec<PaymentLeaf>,
    hashlocks: HashSet<Fingerprint>,
    /// `None` until the first payment
    tree: Option<MerkleTree>,
}

impl PaymentsTree {
    pub fn new(scope: HashlockScope, channel_id: ChannelId) -> Self {
        Self {
            scope,
            channel_id,
            elements: Vec::new(),
            hashlocks: HashSet::new(),
            tree: None,
        }
    }

    /// Empty ledger for `channel_id` using the configured scope.
    ///
    /// Fails when the configured tree layout is one the contract cannot
    /// verify.
    pub fn from_settings(settings: &Settings, channel_id: ChannelId) -> Result<Self> {
        if settings.tree.layout != TreeLayout::Sorted {
            return Err(LedgerError::UnsupportedLayout(settings.tree.layout));
        }
        let scope = settings.channel.hashlock_scope()?;
        Ok(Self::new(scope, channel_id))
    }

    /// Restore a ledger from previously recorded leaves.
    ///
    /// Known payments must re-derive to their stored hashlock under `scope`.
    /// The tree is built once, after every leaf is accepted.
    pub fn with_leaves(
        scope: HashlockScope,
        channel_id: ChannelId,
        leaves: Vec<PaymentLeaf>,
    ) -> Result<Self> {
        let mut ledger = Self::new(scope, channel_id);
        for leaf in leaves {
            if let PaymentLeaf::Known(payment) = &leaf {
                if ledger.hashlock(&payment.amount, &payment.preimage) != payment.hashlock {
                    return Err(LedgerError::HashlockMismatch(to_hex(&payment.hashlock)));
                }
            }
            ledger.record(leaf)?;
        }
        ledger.regenerate()?;
        Ok(ledger)
    }

    pub fn scope(&self) -> &HashlockScope {
        &self.scope
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Leaves in insertion order
    pub fn elements(&self) -> &[PaymentLeaf] {
        &self.elements
    }

    pub fn known_payments(&self) -> impl Iterator<Item = &KnownPayment> {
        self.elements.iter().filter_map(PaymentLeaf::as_known)
    }

    /// Hashlock of a payment in this channel
    pub fn hashlock(&self, amount: &I256, preimage: &Preimage) -> Fingerprint {
        self.scope.derive(&self.channel_id, preimage, amount)
    }

    /// Record a payment whose preimage we hold and return its hashlock.
    pub fn add_payment(&mut self, amount: I256, preimage: Preimage) -> Result<Fingerprint> {
        let hashlock = self.hashlock(&amount, &preimage);
        self.record(PaymentLeaf::Known(KnownPayment {
            amount,
            preimage,
            hashlock,
        }))?;
        self.regenerate()?;
        Ok(hashlock)
    }

    /// Record a hashlock the counterparty committed to without its preimage.
    pub fn add_counterparty_payment(&mut self, amount: I256, hashlock: Fingerprint) -> Result<()> {
        self.record(PaymentLeaf::Counterparty(CounterpartyPayment { amount, hashlock }))?;
        self.regenerate()
    }

    fn record(&mut self, leaf: PaymentLeaf) -> Result<()> {
        if !self.hashlocks.insert(*leaf.hashlock()) {
            return Err(LedgerError::DuplicateHashlock(to_hex(leaf.hashlock())));
        }
        debug!(
            "Channel {}: adding payment {} ({})",
            to_hex(&self.channel_id),
            to_hex(leaf.hashlock()),
            leaf.amount()
        );
        self.elements.push(leaf);
        Ok(())
    }

    fn regenerate(&mut self) -> Result<()> {
        let hashlocks: Vec<Fingerprint> = self.elements.iter().map(|e| *e.hashlock()).collect();
        self.tree = if hashlocks.is_empty() {
            None
        } else {
            Some(MerkleTree::new(&hashlocks)?)
        };
        Ok(())
    }

    pub fn tree(&self) -> Result<&MerkleTree> {
        self.tree.as_ref().ok_or(LedgerError::Merkle(MerkleError::EmptyTree))
    }

    /// Root to commit in the next channel update
    pub fn root(&self) -> Result<Fingerprint> {
        Ok(self.tree()?.root())
    }

    /// Inclusion proof for a recorded hashlock.
    pub fn proof(&self, hashlock: &Fingerprint) -> Result<MerkleProof> {
        Ok(self.tree()?.proof(hashlock)?)
    }

    /// Assemble the withdrawal for a known payment.
    pub fn withdrawal(&self, preimage: &Preimage) -> Result<Withdrawal> {
        let payment = self
            .known_payments()
            .find(|p| &p.preimage == preimage)
            .ok_or_else(|| LedgerError::UnknownPreimage(to_hex(preimage)))?;
        let proof = self.proof(&payment.hashlock)?;
        Ok(Withdrawal {
            channel_id: self.channel_id,
            proof,
            preimage: payment.preimage,
            amount: payment.amount,
        })
    }

    /// Check a withdrawal the way the contract will before it is submitted.
    ///
    /// `root` is the root currently stored on-chain, which may lag behind
    /// this ledger's own root.
    pub fn prevalidate(&self, withdrawal: &Withdrawal, root: &Fingerprint) -> Result<()> {
        if withdrawal.channel_id != self.channel_id {
            return Err(LedgerError::ChannelMismatch(to_hex(&withdrawal.channel_id)));
        }
        if !withdrawal.verify(&self.scope, root) {
            warn!(
                "Withdrawal of {} from channel {} does not verify against root {}",
                withdrawal.amount,
                to_hex(&self.channel_id),
                to_hex(root)
            );
            return Err(LedgerError::ProofRejected(to_hex(root)));
        }
        Ok(())
    }

    /// Unsigned update committing the current root under `nonce`.
    pub fn update(&self, nonce: u32) -> Result<PaymentUpdate> {
        let root = self.root()?;
        info!(
            "Channel {}: update nonce {} root {} ({} payments)",
            to_hex(&self.channel_id),
            nonce,
            to_hex(&root),
            self.len()
        );
        Ok(PaymentUpdate::new(self.channel_id, nonce, root))
    }
}
