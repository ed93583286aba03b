//! # SPHINCS+-SHAKE-256s (robust)
//!
//! This module is the public face of the crate: key generation, signing, verification and the
//! sealed-message (signature || message) helpers of the stateless hash-based SPHINCS+ scheme,
//! instantiated with SHAKE256, `n = 32`, the "small" (`s`) parameter set and robust tweakable
//! hashes.
//!
//! The `SphincsPlus` struct owns one keypair together with the 96-byte seed it was derived from,
//! and the source of the optional signing randomness. Verification never needs a `SphincsPlus`:
//! the free functions [`verify`], [`verify_detached`] and [`open`] only take a [`PublicKey`].
//!
//! ## Usage Example
//!
//! ```rust
//! use sphincs_shake256s::sphincs_plus::{verify, SphincsPlus};
//!
//! let sphincs = SphincsPlus::new().expect("Key generation failed");
//!
//! let message = b"SPHINCS+ post-quantum signature message";
//! let signature = sphincs.sign(message).expect("Signing failed");
//!
//! assert!(verify(message, signature.as_ref(), sphincs.public_key()));
//! ```
//!
//! ## Deterministic signatures
//!
//! By default every signature mixes 32 fresh bytes from the operating system into the message
//! randomizer `R`. With [`OptRand::Fixed`] the randomizer depends only on the secret key and the
//! message, which makes signatures reproducible:
//!
//! ```rust
//! use sphincs_shake256s::sphincs_plus::{OptRand, SphincsPlus};
//!
//! let sphincs = SphincsPlus::from_seed_bytes(&[7u8; 96])
//!     .expect("valid seed")
//!     .with_opt_rand(OptRand::Fixed([0u8; 32]));
//! assert_eq!(sphincs.sign(b"abc").unwrap(), sphincs.sign(b"abc").unwrap());
//! ```
//!
//! ## Security Considerations
//!
//! - **Explicit wiping**: [`SecretKey`] and [`Seed`] implement `Zeroize` but are not wiped on
//!   drop. Call [`SphincsPlus::zeroize`] once the keypair is no longer needed.
//! - **Constant-time comparison**: the final root check of verification, as well as `==` on every
//!   key, seed and signature type, uses `subtle`.
//! - **No oracle**: verification reports only valid or invalid, never which part of a signature
//!   failed.

use crate::cursor::{SigReader, SigWriter};
use crate::error::{Error, Result};
use crate::fors::{fors_pk_from_sig, fors_sign};
use crate::hash::SpxHasher;
use crate::hypertree::{merkle_gen_root, merkle_sign, LAYER_SIG_BYTES};
use crate::merkle::compute_root;
use crate::params::{PK_BYTES, SIG_BYTES, SK_BYTES, SPX_SEED_BYTES};
use crate::utils::array_struct;
use crate::wots_plus::adrs::Adrs;
use crate::wots_plus::adrs::AdrsType::{Tree, WotsHash, WotsPk};
use crate::wots_plus::wots_pk_from_sig;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::{debug, trace};
use zeroize::Zeroize;

pub mod params_sphincs_shake_256s;
pub mod shake_offsets;

pub use params_sphincs_shake_256s::*;
pub use shake_offsets::*;

array_struct!(PublicKey, PK_BYTES, InvalidKeyBufferSize);
array_struct!(secret SecretKey, SK_BYTES, InvalidKeyBufferSize);
array_struct!(secret Seed, SPX_SEED_BYTES, InvalidSeedLength);
array_struct!(Signature, SIG_BYTES, InvalidSignatureLength);

impl PublicKey {
    /// The public seed shared by every hash in the hypertree.
    pub fn pub_seed(&self) -> &[u8] {
        &self.0[..SPX_N]
    }

    /// The root of the top hypertree layer.
    pub fn root(&self) -> &[u8] {
        &self.0[SPX_N..]
    }
}

impl SecretKey {
    /// The public key embedded in the last `PK_BYTES` bytes of the secret key.
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [0u8; PK_BYTES];
        pk.copy_from_slice(&self.0[2 * SPX_N..]);
        PublicKey(pk)
    }
}

/// Where the `SPX_N` bytes of optional randomness mixed into the message randomizer come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OptRand {
    /// Fresh bytes from the operating system for every signature.
    #[default]
    Random,
    /// The same bytes for every signature, making signing deterministic.
    Fixed([u8; SPX_N]),
}

/// A SPHINCS+-SHAKE-256s keypair together with the seed it was derived from.
#[derive(Clone, Debug)]
pub struct SphincsPlus {
    pk: PublicKey,
    sk: SecretKey,
    seed: Seed,
    opt_rand: OptRand,
}

impl SphincsPlus {
    /// Generates a keypair from a fresh seed read from the operating system.
    pub fn new() -> Result<Self> {
        Self::new_with_rng(&mut OsRng)
    }

    /// Generates a keypair from a seed drawn from the given cryptographically secure `rng`.
    pub fn new_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut seed = Seed([0u8; SPX_SEED_BYTES]);
        rng.try_fill_bytes(&mut seed.0)?;
        let sphincs = Self::from_seed(&seed);
        seed.zeroize();
        Ok(sphincs)
    }

    /// Deterministically derives the keypair of `seed`.
    pub fn from_seed(seed: &Seed) -> Self {
        let (pk, sk) = crypto_sign_seed_keypair(seed);
        Self {
            pk,
            sk,
            seed: seed.clone(),
            opt_rand: OptRand::default(),
        }
    }

    /// Derives the keypair of a `SPX_SEED_BYTES`-byte seed.
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self> {
        let mut seed = Seed::try_from(seed)?;
        let sphincs = Self::from_seed(&seed);
        seed.zeroize();
        Ok(sphincs)
    }

    /// Derives the keypair of a hex-encoded seed, with or without a `0x` prefix.
    ///
    /// A seed shorter than `SPX_SEED_BYTES` bytes is padded with zero bytes at the end.
    pub fn from_hex_seed(hex_seed: &str) -> Result<Self> {
        let digits = hex_seed.strip_prefix("0x").unwrap_or(hex_seed);
        let mut decoded = hex::decode(digits)?;
        if decoded.len() > SPX_SEED_BYTES {
            let found = decoded.len();
            decoded.zeroize();
            return Err(Error::InvalidSeedLength(SPX_SEED_BYTES, found));
        }

        let mut seed = Seed([0u8; SPX_SEED_BYTES]);
        seed.0[..decoded.len()].copy_from_slice(&decoded);
        decoded.zeroize();

        let sphincs = Self::from_seed(&seed);
        seed.zeroize();
        Ok(sphincs)
    }

    /// Replaces the source of the optional signing randomness.
    pub fn with_opt_rand(mut self, opt_rand: OptRand) -> Self {
        self.opt_rand = opt_rand;
        self
    }

    /// In-place variant of [`SphincsPlus::with_opt_rand`].
    pub fn set_opt_rand(&mut self, opt_rand: OptRand) {
        self.opt_rand = opt_rand;
    }

    /// The configured source of the optional signing randomness.
    pub fn opt_rand(&self) -> &OptRand {
        &self.opt_rand
    }

    /// The public key `pub_seed || root`.
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// The secret key `sk_seed || sk_prf || pub_seed || root`.
    pub fn secret_key(&self) -> &SecretKey {
        &self.sk
    }

    /// The 96-byte seed `sk_seed || sk_prf || pub_seed` the keypair was derived from.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The seed as `0x`-prefixed lowercase hex.
    pub fn hex_seed(&self) -> String {
        format!("0x{}", hex::encode(self.seed.0))
    }

    /// Signs `message` and returns the detached signature.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        match &self.opt_rand {
            OptRand::Random => self.sign_with_rng(message, &mut OsRng),
            OptRand::Fixed(opt_rand) => crypto_sign_signature(message, &self.sk, opt_rand),
        }
    }

    /// Signs `message`, drawing the optional randomness from `rng` regardless of the configured
    /// [`OptRand`].
    pub fn sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        message: &[u8],
        rng: &mut R,
    ) -> Result<Signature> {
        let mut opt_rand = [0u8; SPX_N];
        rng.try_fill_bytes(&mut opt_rand)?;
        let signature = crypto_sign_signature(message, &self.sk, &opt_rand);
        opt_rand.zeroize();
        signature
    }

    /// Signs `message` and returns `signature || message`.
    pub fn seal(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = self.sign(message)?;
        let mut sealed = Vec::with_capacity(SIG_BYTES + message.len());
        sealed.extend_from_slice(signature.as_ref());
        sealed.extend_from_slice(message);
        Ok(sealed)
    }

    /// Wipes the secret key and the seed. The public key stays usable.
    pub fn zeroize(&mut self) {
        self.sk.zeroize();
        self.seed.zeroize();
        if let OptRand::Fixed(opt_rand) = &mut self.opt_rand {
            opt_rand.zeroize();
        }
    }
}

/// Derives a keypair from a seed `sk_seed || sk_prf || pub_seed`.
///
/// The secret key is `sk_seed || sk_prf || pub_seed || root` and the public key is
/// `pub_seed || root`, where `root` is the root of the top hypertree layer.
pub fn crypto_sign_seed_keypair(seed: &Seed) -> (PublicKey, SecretKey) {
    let mut sk = SecretKey([0u8; SK_BYTES]);
    sk.0[..SPX_SEED_BYTES].copy_from_slice(&seed.0);

    let hasher = SpxHasher::new(&seed.0[2 * SPX_N..], &seed.0[..SPX_N]);
    let root = merkle_gen_root(&hasher);
    sk.0[SPX_SEED_BYTES..].copy_from_slice(&root);

    let pk = sk.public_key();
    debug!("Generated SPHINCS+ keypair ({PK_BYTES}-byte public key)");
    (pk, sk)
}

/// Computes the detached signature of `message` under `sk`, mixing `opt_rand` into the message
/// randomizer.
pub fn crypto_sign_signature(
    message: &[u8],
    sk: &SecretKey,
    opt_rand: &[u8; SPX_N],
) -> Result<Signature> {
    let mut signature = Signature([0u8; SIG_BYTES]);
    sign_into(&mut signature.0, message, &sk.0, opt_rand)?;
    debug!(
        "Signed {} message bytes ({SIG_BYTES}-byte signature)",
        message.len()
    );
    Ok(signature)
}

fn sign_into(sig: &mut [u8], m: &[u8], sk: &[u8], opt_rand: &[u8]) -> Result<()> {
    let (sk_seed, rest) = sk.split_at(SPX_N);
    let (sk_prf, pk) = rest.split_at(SPX_N);
    let hasher = SpxHasher::new(&pk[..SPX_N], sk_seed);

    let mut writer = SigWriter::new(sig);

    // Compute the digest randomization value.
    let r = writer.next(SPX_N)?;
    r.copy_from_slice(&SpxHasher::gen_message_random(sk_prf, opt_rand, m));

    // Derive the message digest and leaf index from R, PK and M.
    let digest = SpxHasher::hash_message(r, pk, m);
    let mut tree = digest.tree;
    let mut idx_leaf = digest.leaf_idx;

    let mut wots_adrs = Adrs::from(WotsHash);
    let mut tree_adrs = Adrs::from(Tree);
    wots_adrs.set_tree_addr(tree);
    wots_adrs.set_keypair_addr(idx_leaf);

    // Sign the message hash using FORS.
    let mut root = fors_sign(
        &hasher,
        writer.next(SPX_FORS_BYTES)?,
        &digest.digest,
        &wots_adrs,
    );

    for layer in 0..SPX_D as u32 {
        tree_adrs.set_layer_addr(layer);
        tree_adrs.set_tree_addr(tree);

        wots_adrs.copy_subtree_addr(&tree_adrs);
        wots_adrs.set_keypair_addr(idx_leaf);

        root = merkle_sign(
            &hasher,
            writer.next(LAYER_SIG_BYTES)?,
            &root,
            &wots_adrs,
            &mut tree_adrs,
            idx_leaf,
        );
        trace!("Signed hypertree layer {layer}");

        // Update the indices for the next layer.
        idx_leaf = (tree & ((1 << SPX_TREE_HEIGHT) - 1)) as u32;
        tree >>= SPX_TREE_HEIGHT;
    }

    writer.finish()
}

/// Recomputes the hypertree root a signature commits to. Equal to the root in `pk` only for a
/// valid signature.
fn recover_root(m: &[u8], sig: &[u8], pk: &[u8]) -> Result<[u8; SPX_N]> {
    let hasher = SpxHasher::for_verify(&pk[..SPX_N]);
    let mut reader = SigReader::new(sig);

    let r = reader.next(SPX_N)?;
    let digest = SpxHasher::hash_message(r, pk, m);
    let mut tree = digest.tree;
    let mut idx_leaf = digest.leaf_idx;

    let mut wots_adrs = Adrs::from(WotsHash);
    let mut tree_adrs = Adrs::from(Tree);
    let mut wots_pk_adrs = Adrs::from(WotsPk);
    wots_adrs.set_tree_addr(tree);
    wots_adrs.set_keypair_addr(idx_leaf);

    let mut root = fors_pk_from_sig(
        &hasher,
        reader.next(SPX_FORS_BYTES)?,
        &digest.digest,
        &wots_adrs,
    );

    // For each subtree..
    for layer in 0..SPX_D as u32 {
        tree_adrs.set_layer_addr(layer);
        tree_adrs.set_tree_addr(tree);

        wots_adrs.copy_subtree_addr(&tree_adrs);
        wots_adrs.set_keypair_addr(idx_leaf);

        wots_pk_adrs.copy_keypair_addr(&wots_adrs);

        // The WOTS public key is only correct if the signature was correct.
        let wots_pk = wots_pk_from_sig(
            &hasher,
            reader.next(SPX_WOTS_BYTES)?,
            &root,
            &mut wots_adrs,
        );

        // Compute the leaf node using the WOTS public key.
        let leaf = hasher.thash(&wots_pk, &wots_pk_adrs);

        // Compute the root node of this subtree.
        root = compute_root(
            &hasher,
            &leaf,
            idx_leaf,
            0,
            reader.next(SPX_TREE_HEIGHT * SPX_N)?,
            SPX_TREE_HEIGHT as u32,
            &mut tree_adrs,
        );

        idx_leaf = (tree & ((1 << SPX_TREE_HEIGHT) - 1)) as u32;
        tree >>= SPX_TREE_HEIGHT;
    }

    reader.finish()?;
    Ok(root)
}

/// Verifies a detached signature on `message` under `pk`.
///
/// Any `signature` that is not exactly `SIG_BYTES` long is rejected before hashing.
pub fn verify(message: &[u8], signature: &[u8], pk: &PublicKey) -> bool {
    if signature.len() != SIG_BYTES {
        debug!("Rejected SPHINCS+ signature: length");
        return false;
    }

    let valid = match recover_root(message, signature, pk.as_ref()) {
        Ok(root) => bool::from(root[..].ct_eq(pk.root())),
        Err(_) => false,
    };
    if valid {
        debug!("Verified SPHINCS+ signature");
    } else {
        debug!("Rejected SPHINCS+ signature: root mismatch");
    }
    valid
}

/// Like [`verify`], for a typed signature. Returns `Err(Error::VerificationFailed)` if the
/// signature is invalid.
pub fn verify_detached(message: &[u8], signature: &Signature, pk: &PublicKey) -> Result<()> {
    if verify(message, signature.as_ref(), pk) {
        Ok(())
    } else {
        Err(Error::VerificationFailed)
    }
}

/// Verifies a sealed `signature || message` and returns the message if the signature is valid.
pub fn open(sealed: &[u8], pk: &PublicKey) -> Option<Vec<u8>> {
    let signature = extract_signature(sealed)?;
    let message = extract_message(sealed)?;
    if verify(message, signature, pk) {
        Some(message.to_vec())
    } else {
        None
    }
}

/// The message part of a sealed `signature || message`, or `None` if `sealed` is too short to
/// hold a signature.
pub fn extract_message(sealed: &[u8]) -> Option<&[u8]> {
    sealed.get(SIG_BYTES..)
}

/// The signature part of a sealed `signature || message`, or `None` if `sealed` is too short to
/// hold a signature.
pub fn extract_signature(sealed: &[u8]) -> Option<&[u8]> {
    sealed.get(..SIG_BYTES)
}
