//! # Winternitz One-Time Signature Scheme Plus (W-OTS+)
//!
//! This module implements the W-OTS+ layer of SPHINCS+-SHAKE-256s: the base-`w` digit
//! decomposition of a message, its checksum, the hash chains, and the recovery of a W-OTS+
//! public key from a signature.
//!
//! To incorporate `WOTS-T` safety principles against multi-target attacks, every chain step
//! is hashed under its own [`Adrs`] (keypair, chain and hash index), so no two hash calls in
//! the whole hypertree ever share an input.
//!
//! ## Signing inside the hypertree
//!
//! W-OTS+ keys are never materialized here. Each hypertree leaf is generated on demand by
//! [`WotsLeaf`] while the Merkle traversal walks the subtree; the leaf that matches the
//! signing keypair also writes out its chain values at the message-selected positions, so a
//! single pass yields both the subtree root and the one-time signature.

use crate::hash::SpxHasher;
use crate::sphincs_plus::{
    SPX_N, SPX_WOTS_BYTES, SPX_WOTS_LEN, SPX_WOTS_LEN1, SPX_WOTS_LEN2, SPX_WOTS_LOGW, SPX_WOTS_W,
};
use crate::utils::ull_to_bytes;
use crate::wots_plus::adrs::Adrs;
use crate::wots_plus::adrs::AdrsType::{WotsHash, WotsPrf};

pub mod adrs;

const SPX_WOTS_CSUM_BYTES: usize = (SPX_WOTS_LEN2 * SPX_WOTS_LOGW + 7) / 8;

/// Computes the chaining function.
/// `output` and `input` have to be `SPX_N`-byte arrays.
///
/// Interprets `input` as the `start`-th value of the chain.
/// `adrs` has to contain the address of the chain.
pub(crate) fn gen_chain(
    hasher: &SpxHasher,
    output: &mut [u8],
    input: &[u8],
    start: u32,
    steps: u32,
    adrs: &mut Adrs,
) {
    // Initialize out with the value at position 'start'.
    output[..SPX_N].copy_from_slice(&input[..SPX_N]);

    // Iterate 'steps' calls to the hash function.
    let end = (start + steps).min(SPX_WOTS_W as u32);
    for i in start..end {
        adrs.set_hash_addr(i);
        let next = hasher.thash(&output[..SPX_N], adrs);
        output[..SPX_N].copy_from_slice(&next);
    }
}

/// Converts an array of bytes into integers in base `w`, filling the whole of `output`.
/// Digits are taken most significant first.
pub(crate) fn base_w(output: &mut [u32], input: &[u8]) {
    let mut bits = 0;
    let mut total: u8 = 0;
    let mut input_index = 0;

    for out in output.iter_mut() {
        if bits == 0 {
            total = input[input_index];
            input_index += 1;
            bits += 8;
        }

        bits -= SPX_WOTS_LOGW;
        *out = u32::from((total >> bits) & ((SPX_WOTS_W - 1) as u8));
    }
}

/// Computes the W-OTS+ checksum over a message (in base_w).
pub(crate) fn wots_checksum(msg_base_w: &[u32]) -> [u32; SPX_WOTS_LEN2] {
    let mut csum: u32 = msg_base_w
        .iter()
        .take(SPX_WOTS_LEN1)
        .map(|&digit| SPX_WOTS_W as u32 - 1 - digit)
        .sum();

    // Make sure expected empty zero bits are the least significant bits.
    csum <<= (8 - ((SPX_WOTS_LEN2 * SPX_WOTS_LOGW) % 8)) % 8;

    let mut csum_bytes = [0u8; SPX_WOTS_CSUM_BYTES];
    ull_to_bytes(&mut csum_bytes, u64::from(csum));

    let mut csum_base_w = [0u32; SPX_WOTS_LEN2];
    base_w(&mut csum_base_w, &csum_bytes);
    csum_base_w
}

/// Takes a message and derives the matching chain lengths.
pub(crate) fn chain_lengths(msg: &[u8]) -> [u32; SPX_WOTS_LEN] {
    let mut lengths = [0u32; SPX_WOTS_LEN];
    base_w(&mut lengths[..SPX_WOTS_LEN1], msg);
    let csum = wots_checksum(&lengths[..SPX_WOTS_LEN1]);
    lengths[SPX_WOTS_LEN1..].copy_from_slice(&csum);
    lengths
}

/// Takes a W-OTS+ signature and an `SPX_N`-byte message, and computes the uncompressed W-OTS+
/// public key, i.e. the end of every chain.
///
/// `adrs` must already carry the layer, tree and keypair of the signing leaf.
pub(crate) fn wots_pk_from_sig(
    hasher: &SpxHasher,
    sig: &[u8],
    msg: &[u8],
    adrs: &mut Adrs,
) -> [u8; SPX_WOTS_BYTES] {
    let lengths = chain_lengths(msg);
    let mut pk = [0u8; SPX_WOTS_BYTES];

    for (i, (pk_chunk, sig_chunk)) in pk
        .chunks_exact_mut(SPX_N)
        .zip(sig.chunks_exact(SPX_N))
        .enumerate()
    {
        adrs.set_chain_addr(i as u32);
        gen_chain(
            hasher,
            pk_chunk,
            sig_chunk,
            lengths[i],
            SPX_WOTS_W as u32 - 1 - lengths[i],
            adrs,
        );
    }

    pk
}

/// Leaf strategy for a hypertree subtree: each leaf is a compressed W-OTS+ public key.
///
/// When the traversal reaches `wots_sign_leaf`, the chain values selected by `wots_steps`
/// are copied into `wots_sig` on the way up each chain.
pub(crate) struct WotsLeaf<'a> {
    wots_sig: &'a mut [u8],
    wots_sign_leaf: u32,
    wots_steps: [u32; SPX_WOTS_LEN],
    leaf_adrs: Adrs,
    pk_adrs: Adrs,
}

impl<'a> WotsLeaf<'a> {
    pub(crate) fn new(
        wots_sig: &'a mut [u8],
        wots_sign_leaf: u32,
        wots_steps: [u32; SPX_WOTS_LEN],
        leaf_adrs: Adrs,
        pk_adrs: Adrs,
    ) -> Self {
        debug_assert_eq!(wots_sig.len(), SPX_WOTS_BYTES);
        Self {
            wots_sig,
            wots_sign_leaf,
            wots_steps,
            leaf_adrs,
            pk_adrs,
        }
    }

    pub(crate) fn gen_leaf(&mut self, hasher: &SpxHasher, leaf_idx: u32) -> [u8; SPX_N] {
        // Only the signing leaf ever hits a step; every other leaf gets an unreachable one.
        let wots_k_mask = if leaf_idx == self.wots_sign_leaf {
            0
        } else {
            u32::MAX
        };

        self.leaf_adrs.set_keypair_addr(leaf_idx);
        self.pk_adrs.set_keypair_addr(leaf_idx);

        let mut pk_buffer = [0u8; SPX_WOTS_BYTES];
        for (i, buffer) in pk_buffer.chunks_exact_mut(SPX_N).enumerate() {
            let wots_k = self.wots_steps[i] | wots_k_mask;

            // Start with the secret seed
            self.leaf_adrs.set_chain_addr(i as u32);
            self.leaf_adrs.set_hash_addr(0);
            self.leaf_adrs.set_type(WotsPrf);
            buffer.copy_from_slice(&hasher.prf_addr(&self.leaf_adrs));

            self.leaf_adrs.set_type(WotsHash);

            // Iterate down the chain, revealing the value at position wots_k.
            for k in 0.. {
                if k == wots_k {
                    self.wots_sig[i * SPX_N..(i + 1) * SPX_N].copy_from_slice(buffer);
                }

                if k == SPX_WOTS_W as u32 - 1 {
                    break;
                }

                self.leaf_adrs.set_hash_addr(k);
                let next = hasher.thash(buffer, &self.leaf_adrs);
                buffer.copy_from_slice(&next);
            }
        }

        // Do the final thash to generate the public key
        hasher.thash(&pk_buffer, &self.pk_adrs)
    }
}
