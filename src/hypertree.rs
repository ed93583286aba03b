//! Hypertree layers: each layer is a Merkle tree of `2^SPX_TREE_HEIGHT` W-OTS+ keys whose
//! root is signed by a W-OTS+ key of the layer above.

use crate::hash::SpxHasher;
use crate::merkle::{tree_hash, LeafGen};
use crate::params::KEYGEN_SENTINEL_LEAF;
use crate::sphincs_plus::{SPX_D, SPX_N, SPX_TREE_HEIGHT, SPX_WOTS_BYTES};
use crate::wots_plus::adrs::Adrs;
use crate::wots_plus::adrs::AdrsType::{Tree, WotsPk};
use crate::wots_plus::{chain_lengths, WotsLeaf};

/// Bytes one hypertree layer contributes to a signature: a W-OTS+ signature followed by the
/// authentication path of the signing leaf.
pub(crate) const LAYER_SIG_BYTES: usize = SPX_WOTS_BYTES + SPX_TREE_HEIGHT * SPX_N;

/// Signs `root` with the W-OTS+ key `idx_leaf` of the subtree addressed by `wots_adrs` and
/// `tree_adrs`, writing the W-OTS+ signature and the authentication path into `sig`.
///
/// Returns the root of the subtree, which is the message for the next layer up.
pub(crate) fn merkle_sign(
    hasher: &SpxHasher,
    sig: &mut [u8],
    root: &[u8],
    wots_adrs: &Adrs,
    tree_adrs: &mut Adrs,
    idx_leaf: u32,
) -> [u8; SPX_N] {
    debug_assert_eq!(sig.len(), LAYER_SIG_BYTES);
    let (wots_sig, auth_path) = sig.split_at_mut(SPX_WOTS_BYTES);

    let steps = chain_lengths(root);

    tree_adrs.set_type(Tree);
    let mut pk_adrs = Adrs::from(WotsPk);
    pk_adrs.copy_subtree_addr(wots_adrs);
    let mut leaf_adrs = Adrs::default();
    leaf_adrs.copy_subtree_addr(wots_adrs);

    let mut leaf_gen = LeafGen::Wots(WotsLeaf::new(wots_sig, idx_leaf, steps, leaf_adrs, pk_adrs));
    tree_hash(
        hasher,
        auth_path,
        idx_leaf,
        0,
        SPX_TREE_HEIGHT as u32,
        &mut leaf_gen,
        tree_adrs,
    )
}

/// Computes the root of the single tree on the top layer.
pub(crate) fn merkle_gen_root(hasher: &SpxHasher) -> [u8; SPX_N] {
    // The signature goes nowhere: no leaf carries the sentinel index.
    let mut sig = [0u8; LAYER_SIG_BYTES];
    let mut top_tree_adrs = Adrs::default();
    let mut wots_adrs = Adrs::default();

    top_tree_adrs.set_layer_addr((SPX_D - 1) as u32);
    wots_adrs.set_layer_addr((SPX_D - 1) as u32);

    merkle_sign(
        hasher,
        &mut sig,
        &[0u8; SPX_N],
        &wots_adrs,
        &mut top_tree_adrs,
        KEYGEN_SENTINEL_LEAF,
    )
}
