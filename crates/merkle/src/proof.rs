use serde::{Deserialize, Serialize};

use broker_core::{to_hex, Fingerprint};

use crate::layout::{hash_pair, hash_sorted_pair, TreeLayout};
use crate::{MerkleError, Result};

/// Sibling path from a leaf up to (not including) the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Siblings ordered from the leaf's layer upward
    pub siblings: Vec<Fingerprint>,
    /// Leaf position in layer 0; only the positional layout consults it
    pub leaf_index: usize,
    pub layout: TreeLayout,
}

impl MerkleProof {
    /// Fold the siblings into the root they imply for `leaf`.
    pub fn compute_root(&self, leaf: &Fingerprint) -> Fingerprint {
        match self.layout {
            TreeLayout::Sorted => fold_sorted(&self.siblings, leaf),
            TreeLayout::Positional => {
                let mut current = *leaf;
                let mut index = self.leaf_index;
                for sibling in &self.siblings {
                    current = if index % 2 == 0 {
                        hash_pair(&current, sibling)
                    } else {
                        hash_pair(sibling, &current)
                    };
                    index /= 2;
                }
                current
            }
        }
    }

    pub fn verify(&self, root: &Fingerprint, leaf: &Fingerprint) -> bool {
        self.compute_root(leaf) == *root
    }

    /// Encode the siblings as the contract's `bytes proof` argument.
    pub fn to_hex(&self) -> String {
        hex_proof(&self.siblings)
    }
}

fn fold_sorted(siblings: &[Fingerprint], leaf: &Fingerprint) -> Fingerprint {
    siblings
        .iter()
        .fold(*leaf, |current, sibling| hash_sorted_pair(&current, sibling))
}

/// Verify a proof exactly as the broker contract does.
///
/// The accumulator starts at `leaf` and absorbs each sibling in turn; pairs
/// are hashed smaller-first, so no direction bits are needed.
pub fn verify(siblings: &[Fingerprint], root: &Fingerprint, leaf: &Fingerprint) -> bool {
    fold_sorted(siblings, leaf) == *root
}

/// [`verify`] over raw bytes: a concatenated proof, a root and a leaf.
///
/// Fails only when an input has the wrong length.
pub fn verify_bytes(proof: &[u8], root: &[u8], leaf: &[u8]) -> Result<bool> {
    let siblings = split_proof(proof)?;
    let root = exact_fingerprint(root, "root")?;
    let leaf = exact_fingerprint(leaf, "leaf")?;
    Ok(verify(&siblings, &root, &leaf))
}

fn exact_fingerprint(raw: &[u8], what: &str) -> Result<Fingerprint> {
    <[u8; 32]>::try_from(raw).map_err(|_| {
        MerkleError::MalformedInput(format!("{} must be 32 bytes, got {}", what, raw.len()))
    })
}

/// Split a concatenated proof into its 32-byte elements.
pub fn split_proof(raw: &[u8]) -> Result<Vec<Fingerprint>> {
    if raw.len() % 32 != 0 {
        return Err(MerkleError::MalformedInput(format!(
            "proof length {} is not a multiple of 32",
            raw.len()
        )));
    }
    Ok(raw
        .chunks_exact(32)
        .map(|chunk| {
            let mut element = [0u8; 32];
            element.copy_from_slice(chunk);
            element
        })
        .collect())
}

/// `0x` followed by every sibling's hex, concatenated.
pub fn hex_proof(siblings: &[Fingerprint]) -> String {
    to_hex(&siblings.concat())
}

/// Parse the output of [`hex_proof`].
pub fn parse_hex_proof(s: &str) -> Result<Vec<Fingerprint>> {
    let s = s.trim();
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let raw = hex::decode(stripped)
        .map_err(|e| MerkleError::MalformedInput(format!("invalid proof hex: {}", e)))?;
    split_proof(&raw)
}
