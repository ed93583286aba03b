//! # Forest Of Random Subsets (FORS)
//!
//! The few-time signature at the bottom of the hypertree. The message digest selects one
//! secret leaf in each of the `SPX_FORS_TREES` trees; the signature reveals those leaves with
//! their authentication paths, and the compressed tree roots form the FORS public key that
//! the hypertree then signs.

use crate::hash::SpxHasher;
use crate::merkle::{compute_root, tree_hash, LeafGen};
use crate::sphincs_plus::{SPX_FORS_BYTES, SPX_FORS_HEIGHT, SPX_FORS_TREES, SPX_N};
use crate::wots_plus::adrs::Adrs;
use crate::wots_plus::adrs::AdrsType::{ForsPrf, ForsRoots, ForsTree};

/// Bytes per tree in a FORS signature: the revealed secret leaf and its authentication path.
const FORS_TREE_SIG_BYTES: usize = (SPX_FORS_HEIGHT + 1) * SPX_N;

/// Leaf strategy for FORS trees: each leaf is the hash of a PRF-derived secret value.
pub(crate) struct ForsLeaf {
    leaf_adrs: Adrs,
}

impl ForsLeaf {
    pub(crate) fn new(leaf_adrs: Adrs) -> Self {
        Self { leaf_adrs }
    }

    pub(crate) fn gen_leaf(&mut self, hasher: &SpxHasher, addr_idx: u32) -> [u8; SPX_N] {
        // Only set the parts the caller doesn't set
        self.leaf_adrs.set_tree_index(addr_idx);
        self.leaf_adrs.set_type(ForsPrf);
        let sk = fors_gen_sk(hasher, &self.leaf_adrs);

        self.leaf_adrs.set_type(ForsTree);
        fors_sk_to_leaf(hasher, &sk, &self.leaf_adrs)
    }
}

fn fors_gen_sk(hasher: &SpxHasher, fors_leaf_adrs: &Adrs) -> [u8; SPX_N] {
    hasher.prf_addr(fors_leaf_adrs)
}

fn fors_sk_to_leaf(hasher: &SpxHasher, sk: &[u8], fors_leaf_adrs: &Adrs) -> [u8; SPX_N] {
    hasher.thash(&sk[..SPX_N], fors_leaf_adrs)
}

/// Interprets `m` as `SPX_FORS_HEIGHT`-bit unsigned integers, most significant bit first.
/// Assumes `m` contains at least `SPX_FORS_HEIGHT * SPX_FORS_TREES` bits.
pub(crate) fn message_to_indices(m: &[u8]) -> [u32; SPX_FORS_TREES] {
    let mut indices = [0u32; SPX_FORS_TREES];
    let mut offset = 0;

    for index in indices.iter_mut() {
        for _ in 0..SPX_FORS_HEIGHT {
            let bit = (m[offset >> 3] >> (7 - (offset & 0x7))) & 1;
            *index = (*index << 1) | u32::from(bit);
            offset += 1;
        }
    }

    indices
}

/// Signs a message `m`, writing the FORS signature into `sig` (`SPX_FORS_BYTES` bytes).
/// Returns the FORS public key, i.e. the compressed tree roots.
///
/// `fors_adrs` must carry the layer, tree and keypair of the hypertree leaf that signs it.
pub(crate) fn fors_sign(
    hasher: &SpxHasher,
    sig: &mut [u8],
    m: &[u8],
    fors_adrs: &Adrs,
) -> [u8; SPX_N] {
    debug_assert_eq!(sig.len(), SPX_FORS_BYTES);
    let indices = message_to_indices(m);
    let mut roots = [0u8; SPX_FORS_TREES * SPX_N];

    let mut fors_tree_adrs = Adrs::default();
    fors_tree_adrs.copy_keypair_addr(fors_adrs);
    let mut fors_leaf_adrs = Adrs::default();
    fors_leaf_adrs.copy_keypair_addr(fors_adrs);
    let mut fors_pk_adrs = Adrs::from(ForsRoots);
    fors_pk_adrs.copy_keypair_addr(fors_adrs);

    for (i, ((tree_sig, root), &idx)) in sig
        .chunks_exact_mut(FORS_TREE_SIG_BYTES)
        .zip(roots.chunks_exact_mut(SPX_N))
        .zip(indices.iter())
        .enumerate()
    {
        let idx_offset = (i << SPX_FORS_HEIGHT) as u32;
        let (sk, auth_path) = tree_sig.split_at_mut(SPX_N);

        fors_tree_adrs.set_tree_height(0);
        fors_tree_adrs.set_tree_index(idx + idx_offset);
        fors_tree_adrs.set_type(ForsPrf);

        // Include the secret key part that produces the selected leaf.
        sk.copy_from_slice(&fors_gen_sk(hasher, &fors_tree_adrs));

        fors_tree_adrs.set_type(ForsTree);

        // Compute the authentication path for the used FORS leaf.
        let mut leaf_gen = LeafGen::Fors(ForsLeaf::new(fors_leaf_adrs));
        root.copy_from_slice(&tree_hash(
            hasher,
            auth_path,
            idx,
            idx_offset,
            SPX_FORS_HEIGHT as u32,
            &mut leaf_gen,
            &mut fors_tree_adrs,
        ));
    }

    // Hash horizontally across all tree roots to derive the public key.
    hasher.thash(&roots, &fors_pk_adrs)
}

/// Derives the FORS public key from a signature.
/// This can be used for verification by comparing to a known public key, or to
/// subsequently verify a signature on the derived public key. The latter is the
/// typical use-case when used as an FTS below an OTS in a hypertree.
pub(crate) fn fors_pk_from_sig(
    hasher: &SpxHasher,
    sig: &[u8],
    m: &[u8],
    fors_adrs: &Adrs,
) -> [u8; SPX_N] {
    debug_assert_eq!(sig.len(), SPX_FORS_BYTES);
    let indices = message_to_indices(m);
    let mut roots = [0u8; SPX_FORS_TREES * SPX_N];

    let mut fors_tree_adrs = Adrs::from(ForsTree);
    fors_tree_adrs.copy_keypair_addr(fors_adrs);
    let mut fors_pk_adrs = Adrs::from(ForsRoots);
    fors_pk_adrs.copy_keypair_addr(fors_adrs);

    for (i, ((tree_sig, root), &idx)) in sig
        .chunks_exact(FORS_TREE_SIG_BYTES)
        .zip(roots.chunks_exact_mut(SPX_N))
        .zip(indices.iter())
        .enumerate()
    {
        let idx_offset = (i << SPX_FORS_HEIGHT) as u32;
        let (sk, auth_path) = tree_sig.split_at(SPX_N);

        fors_tree_adrs.set_tree_height(0);
        fors_tree_adrs.set_tree_index(idx + idx_offset);

        // Derive the leaf from the included secret key part.
        let leaf = fors_sk_to_leaf(hasher, sk, &fors_tree_adrs);

        // Derive the corresponding root node of this tree.
        root.copy_from_slice(&compute_root(
            hasher,
            &leaf,
            idx,
            idx_offset,
            auth_path,
            SPX_FORS_HEIGHT as u32,
            &mut fors_tree_adrs,
        ));
    }

    hasher.thash(&roots, &fors_pk_adrs)
}
