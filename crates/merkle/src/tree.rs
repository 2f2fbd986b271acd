use tracing::{debug, warn};

use broker_core::{to_hex, Fingerprint};

use crate::layout::TreeLayout;
use crate::proof::MerkleProof;
use crate::{MerkleError, Result};

/// Binary Merkle tree over payment hashlocks.
///
/// Built eagerly and never mutated. Adding a payment means building a new
/// tree from the full leaf list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    layout: TreeLayout,
    /// `layers[0]` are the leaves, the last layer holds only the root
    layers: Vec<Vec<Fingerprint>>,
}

impl MerkleTree {
    /// Build a tree with the contract's [`TreeLayout::Sorted`] convention.
    pub fn new(leaves: &[Fingerprint]) -> Result<Self> {
        Self::with_layout(TreeLayout::Sorted, leaves)
    }

    /// Build a tree under an explicit layout.
    pub fn with_layout(layout: TreeLayout, leaves: &[Fingerprint]) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut layers = vec![layout.leaf_layer(leaves)];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next: Vec<Fingerprint> = current
                .chunks(2)
                .map(|pair| layout.parent(pair))
                .collect();
            layers.push(next);
        }

        let tree = Self { layout, layers };
        debug!(
            "Built {:?} merkle tree: {} leaves, depth {}, root {}",
            layout,
            tree.leaf_count(),
            tree.depth(),
            to_hex(&tree.root())
        );
        Ok(tree)
    }

    pub fn layout(&self) -> TreeLayout {
        self.layout
    }

    pub fn root(&self) -> Fingerprint {
        self.layers[self.layers.len() - 1][0]
    }

    /// Leaves as arranged in layer 0 (sorted for the contract layout)
    pub fn leaves(&self) -> &[Fingerprint] {
        &self.layers[0]
    }

    pub fn layers(&self) -> &[Vec<Fingerprint>] {
        &self.layers
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of combination rounds between the leaves and the root
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Position of `leaf` in layer 0. The leftmost match wins.
    pub fn index_of(&self, leaf: &Fingerprint) -> Option<usize> {
        match self.layout {
            TreeLayout::Sorted => self.layers[0].binary_search(leaf).ok(),
            TreeLayout::Positional => self.layers[0].iter().position(|l| l == leaf),
        }
    }

    pub fn contains(&self, leaf: &Fingerprint) -> bool {
        self.index_of(leaf).is_some()
    }

    /// Inclusion proof for `leaf`.
    pub fn proof(&self, leaf: &Fingerprint) -> Result<MerkleProof> {
        let index = self.index_of(leaf).ok_or_else(|| {
            warn!("Proof requested for leaf {} not in tree", to_hex(leaf));
            MerkleError::LeafNotFound(to_hex(leaf))
        })?;
        Ok(self.build_proof(index))
    }

    /// Inclusion proof for the leaf at `index` in layer 0.
    pub fn proof_at(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }
        Some(self.build_proof(index))
    }

    fn build_proof(&self, leaf_index: usize) -> MerkleProof {
        let mut siblings = Vec::with_capacity(self.depth());
        let mut index = leaf_index;

        for layer in &self.layers[..self.depth()] {
            let sibling = index ^ 1;
            if sibling < layer.len() {
                siblings.push(layer[sibling]);
            } else if self.layout == TreeLayout::Positional {
                // unpaired node was hashed with itself
                siblings.push(layer[index]);
            }
            index /= 2;
        }

        MerkleProof {
            siblings,
            leaf_index,
            layout: self.layout,
        }
    }

    /// Check `proof` for `leaf` against `root`.
    pub fn verify(root: &Fingerprint, leaf: &Fingerprint, proof: &MerkleProof) -> bool {
        proof.verify(root, leaf)
    }
}
