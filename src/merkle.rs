//! Constant-memory Merkle tree traversal shared by the hypertree and FORS.
//!
//! [`tree_hash`] walks every leaf of a tree once, keeping only one node per level, and emits
//! both the root and the authentication path of a chosen leaf. [`compute_root`] is its
//! verification-side dual. The traversal owns the tree-height and tree-index address fields;
//! each [`LeafGen`] variant owns the fields it needs to produce its leaves.

use crate::fors::ForsLeaf;
use crate::hash::SpxHasher;
use crate::params::SPX_MAX_TREE_HEIGHT;
use crate::sphincs_plus::SPX_N;
use crate::wots_plus::adrs::Adrs;
use crate::wots_plus::WotsLeaf;

/// The ways a Merkle leaf can be produced.
pub(crate) enum LeafGen<'a> {
    /// Compressed W-OTS+ public keys, optionally signing with one of them on the way.
    Wots(WotsLeaf<'a>),
    /// Hashed FORS secret values.
    Fors(ForsLeaf),
}

impl LeafGen<'_> {
    fn gen_leaf(&mut self, hasher: &SpxHasher, addr_idx: u32) -> [u8; SPX_N] {
        match self {
            LeafGen::Wots(wots) => wots.gen_leaf(hasher, addr_idx),
            LeafGen::Fors(fors) => fors.gen_leaf(hasher, addr_idx),
        }
    }
}

/// Generates the root of a tree of height `tree_height` whose leaves sit at
/// `idx_offset..idx_offset + 2^tree_height`, and writes the authentication path of
/// `leaf_idx` into `auth_path` (`tree_height * SPX_N` bytes).
///
/// `tree_adrs` must carry the layer, tree and type used for the internal nodes. A `leaf_idx`
/// outside the tree writes no authentication path.
pub(crate) fn tree_hash(
    hasher: &SpxHasher,
    auth_path: &mut [u8],
    leaf_idx: u32,
    idx_offset: u32,
    tree_height: u32,
    leaf_gen: &mut LeafGen,
    tree_adrs: &mut Adrs,
) -> [u8; SPX_N] {
    debug_assert!(tree_height as usize <= SPX_MAX_TREE_HEIGHT);

    // Pending left siblings, one per level.
    let mut stack = [[0u8; SPX_N]; SPX_MAX_TREE_HEIGHT];
    let max_idx = (1_u32 << tree_height) - 1;

    let mut idx: u32 = 0;
    loop {
        let mut current = leaf_gen.gen_leaf(hasher, idx + idx_offset);

        // Now combine the freshly generated right node with previously generated left ones
        let mut internal_idx_offset = idx_offset;
        let mut internal_idx = idx;
        let mut internal_leaf = leaf_idx;
        let mut h: u32 = 0;
        loop {
            if h == tree_height {
                return current;
            }

            // Check if we hit the auth path node at this level
            if (internal_idx ^ internal_leaf) == 0x01 {
                let level = h as usize;
                auth_path[level * SPX_N..(level + 1) * SPX_N].copy_from_slice(&current);
            }

            // Left child: stop combining and wait for its right sibling.
            if (internal_idx & 1) == 0 && idx < max_idx {
                break;
            }

            internal_idx_offset >>= 1;
            tree_adrs.set_tree_height(h + 1);
            tree_adrs.set_tree_index(internal_idx / 2 + internal_idx_offset);

            let mut buffer = [0u8; 2 * SPX_N];
            buffer[..SPX_N].copy_from_slice(&stack[h as usize]);
            buffer[SPX_N..].copy_from_slice(&current);
            current = hasher.thash(&buffer, tree_adrs);

            h += 1;
            internal_idx >>= 1;
            internal_leaf >>= 1;
        }

        stack[h as usize] = current;
        idx += 1;
    }
}

/// Computes a root node given a leaf and an authentication path.
/// Expects `adrs` to be complete other than the tree_height and tree_index.
pub(crate) fn compute_root(
    hasher: &SpxHasher,
    leaf: &[u8],
    mut leaf_idx: u32,
    mut idx_offset: u32,
    auth_path: &[u8],
    tree_height: u32,
    adrs: &mut Adrs,
) -> [u8; SPX_N] {
    let mut node = [0u8; SPX_N];
    node.copy_from_slice(&leaf[..SPX_N]);

    let mut buffer = [0u8; 2 * SPX_N];
    for (h, sibling) in auth_path
        .chunks_exact(SPX_N)
        .take(tree_height as usize)
        .enumerate()
    {
        // If the index is odd the current node is a right child.
        if leaf_idx & 1 == 1 {
            buffer[..SPX_N].copy_from_slice(sibling);
            buffer[SPX_N..].copy_from_slice(&node);
        } else {
            buffer[..SPX_N].copy_from_slice(&node);
            buffer[SPX_N..].copy_from_slice(sibling);
        }

        leaf_idx >>= 1;
        idx_offset >>= 1;
        adrs.set_tree_height(h as u32 + 1);
        adrs.set_tree_index(leaf_idx + idx_offset);
        node = hasher.thash(&buffer, adrs);
    }

    node
}
