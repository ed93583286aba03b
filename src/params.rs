use crate::sphincs_plus::{
    SPX_BYTES, SPX_D, SPX_FORS_HEIGHT, SPX_FULL_HEIGHT, SPX_N, SPX_PK_BYTES, SPX_SK_BYTES,
    SPX_TREE_BITS, SPX_TREE_HEIGHT, SPX_WOTS_LEN1, SPX_WOTS_LEN2, SPX_WOTS_LOGW, SPX_WOTS_W,
};

/// Seed byte size, i.e. `sk_seed || sk_prf || pub_seed`.
pub const SPX_SEED_BYTES: usize = 3 * SPX_N;

/// Public-key byte size.
pub const PK_BYTES: usize = SPX_PK_BYTES;

/// Secret-key byte size.
pub const SK_BYTES: usize = SPX_SK_BYTES;

/// Detached signature byte size.
pub const SIG_BYTES: usize = SPX_BYTES;

/// Keypair index used when the top tree is traversed only to obtain its root.
/// No real leaf ever carries this index, so no WOTS+ signature is emitted.
pub(crate) const KEYGEN_SENTINEL_LEAF: u32 = !0_u32;

/// Tallest tree the tree-hash stack has to hold.
pub(crate) const SPX_MAX_TREE_HEIGHT: usize = if SPX_FORS_HEIGHT > SPX_TREE_HEIGHT {
    SPX_FORS_HEIGHT
} else {
    SPX_TREE_HEIGHT
};

const _: () = assert!(SPX_N == 32, "SPX_N must be 32");
const _: () = assert!(SPX_WOTS_W == 16, "SPX_WOTS_W must be 16");
const _: () = assert!(SPX_WOTS_W == 1 << SPX_WOTS_LOGW);
const _: () = assert!(SPX_TREE_HEIGHT * SPX_D == SPX_FULL_HEIGHT);
const _: () = assert!(
    SPX_TREE_BITS <= 64,
    "Subtree addressing is limited to at most 2^64 trees"
);
const _: () = assert!(SPX_TREE_HEIGHT <= 32 && SPX_FORS_HEIGHT < 32);
// len2 base-w digits must be able to hold the largest possible checksum.
const _: () = assert!(SPX_WOTS_LEN1 * (SPX_WOTS_W - 1) < 1 << (SPX_WOTS_LEN2 * SPX_WOTS_LOGW));
const _: () = assert!(SIG_BYTES == 29_792);
const _: () = assert!(PK_BYTES == 64 && SK_BYTES == 128 && SPX_SEED_BYTES == 96);
