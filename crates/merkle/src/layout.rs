use serde::{Deserialize, Serialize};

use broker_core::{Fingerprint, Packed};
use broker_crypto::keccak256;

/// Pairing convention a tree is built and verified under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeLayout {
    /// What the broker contract checks. Leaves are sorted and de-duplicated,
    /// each pair is hashed smaller-first, and an unpaired node is promoted
    /// to the next layer as-is.
    #[default]
    Sorted,
    /// Leaves keep the caller's order, pairs hash as `left || right`, and an
    /// unpaired node is hashed with itself.
    Positional,
}

impl TreeLayout {
    /// Combine two sibling nodes into their parent.
    pub fn combine(&self, left: &Fingerprint, right: &Fingerprint) -> Fingerprint {
        match self {
            Self::Sorted => hash_sorted_pair(left, right),
            Self::Positional => hash_pair(left, right),
        }
    }

    /// Parent of a trailing node that has no right-hand sibling.
    pub fn odd_parent(&self, node: &Fingerprint) -> Fingerprint {
        match self {
            Self::Sorted => *node,
            Self::Positional => hash_pair(node, node),
        }
    }

    pub(crate) fn parent(&self, pair: &[Fingerprint]) -> Fingerprint {
        match pair {
            [left, right] => self.combine(left, right),
            _ => self.odd_parent(&pair[0]),
        }
    }

    /// Turn caller-supplied leaves into layer 0.
    pub(crate) fn leaf_layer(&self, leaves: &[Fingerprint]) -> Vec<Fingerprint> {
        let mut layer = leaves.to_vec();
        if *self == Self::Sorted {
            layer.sort_unstable();
            layer.dedup();
        }
        layer
    }
}

/// `keccak256(left || right)`
pub fn hash_pair(left: &Fingerprint, right: &Fingerprint) -> Fingerprint {
    keccak256(Packed::new().bytes32(left).bytes32(right).as_bytes())
}

/// `keccak256(min(a, b) || max(a, b))`, comparing as big-endian integers
pub fn hash_sorted_pair(a: &Fingerprint, b: &Fingerprint) -> Fingerprint {
    if a <= b {
        hash_pair(a, b)
    } else {
        hash_pair(b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pair_is_order_sensitive() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_ne!(hash_pair(&a, &b), hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_sorted_pair_is_commutative() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_eq!(hash_sorted_pair(&a, &b), hash_sorted_pair(&b, &a));
        assert_eq!(hash_sorted_pair(&a, &b), hash_pair(&a, &b));
    }

    #[test]
    fn test_odd_parent() {
        let node = [5u8; 32];
        assert_eq!(TreeLayout::Sorted.odd_parent(&node), node);
        assert_eq!(TreeLayout::Positional.odd_parent(&node), hash_pair(&node, &node));
    }

    #[test]
    fn test_leaf_layer_sorted_dedups() {
        let leaves = [[3u8; 32], [1u8; 32], [3u8; 32], [2u8; 32]];
        assert_eq!(
            TreeLayout::Sorted.leaf_layer(&leaves),
            vec![[1u8; 32], [2u8; 32], [3u8; 32]]
        );
        assert_eq!(TreeLayout::Positional.leaf_layer(&leaves), leaves.to_vec());
    }

    #[test]
    fn test_layout_serialization() {
        assert_eq!(serde_json::to_string(&TreeLayout::Sorted).unwrap(), "\"sorted\"");
        let parsed: TreeLayout = serde_json::from_str("\"positional\"").unwrap();
        assert_eq!(parsed, TreeLayout::Positional);
        assert_eq!(TreeLayout::default(), TreeLayout::Sorted);
    }
}
