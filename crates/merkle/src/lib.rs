//! Broker Merkle
//!
//! Binary Merkle tree over payment hashlocks. The root is committed on-chain
//! in a channel update; a leaf's proof is what the withdraw call checks
//! against that root.
//!
//! The contract's convention ([`TreeLayout::Sorted`]) is the default. The
//! order-preserving [`TreeLayout::Positional`] convention keeps arrival order
//! for off-chain bookkeeping; the contract cannot verify its proofs.

mod layout;
mod proof;
mod tree;

pub use layout::{hash_pair, hash_sorted_pair, TreeLayout};
pub use proof::{hex_proof, parse_hex_proof, split_proof, verify, verify_bytes, MerkleProof};
pub use tree::MerkleTree;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Cannot build a Merkle tree without leaves")]
    EmptyTree,

    #[error("Leaf not found: {0}")]
    LeafNotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

pub type Result<T> = std::result::Result<T, MerkleError>;
