use crate::sphincs_plus::{
    SPX_DGST_BYTES, SPX_FORS_MSG_BYTES, SPX_LEAF_BITS, SPX_LEAF_BYTES, SPX_N, SPX_PK_BYTES,
    SPX_TREE_BITS, SPX_TREE_BYTES,
};
use crate::utils::bytes_to_ull;
use crate::wots_plus::adrs::Adrs;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Output of [`SpxHasher::hash_message`]: the FORS message digest and the
/// hypertree position of the signing leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MessageDigest {
    pub digest: [u8; SPX_FORS_MSG_BYTES],
    pub tree: u64,
    pub leaf_idx: u32,
}

/// The hashing context: the public seed shared by every tweakable hash, and the
/// secret seed consumed only by [`SpxHasher::prf_addr`].
///
/// Verification only ever needs the public seed and leaves `sk_seed` zeroed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct SpxHasher {
    pub_seed: [u8; SPX_N],
    sk_seed: [u8; SPX_N],
}

impl SpxHasher {
    pub(crate) fn new(pub_seed: &[u8], sk_seed: &[u8]) -> Self {
        let mut hasher = Self::for_verify(pub_seed);
        hasher.sk_seed.copy_from_slice(&sk_seed[..SPX_N]);
        hasher
    }

    pub(crate) fn for_verify(pub_seed: &[u8]) -> Self {
        let mut hasher = Self {
            pub_seed: [0u8; SPX_N],
            sk_seed: [0u8; SPX_N],
        };
        hasher.pub_seed.copy_from_slice(&pub_seed[..SPX_N]);
        hasher
    }

    #[cfg(test)]
    pub(crate) fn shake256(output: &mut [u8], input: &[u8]) {
        let mut hasher = Shake256::default();
        hasher.update(input);
        let mut reader = hasher.finalize_xof();
        reader.read(output);
    }

    fn seeded(&self, adrs: &Adrs) -> Shake256 {
        let mut hasher = Shake256::default();
        hasher.update(self.pub_seed.as_ref());
        hasher.update(adrs.as_ref());
        hasher
    }

    /// Robust tweakable hash over `input`, a concatenation of `SPX_N`-byte blocks.
    ///
    /// bitmask = SHAKE256(PK.seed||ADRS, |M|)
    /// T_l(PK.seed, ADRS, M) = SHAKE256(PK.seed||ADRS||(M xor bitmask), 8n)
    pub(crate) fn thash(&self, input: &[u8], adrs: &Adrs) -> [u8; SPX_N] {
        debug_assert_eq!(input.len() % SPX_N, 0);
        let mut mask = self.seeded(adrs).finalize_xof();
        let mut hasher = self.seeded(adrs);

        let mut block = [0u8; SPX_N];
        for chunk in input.chunks(SPX_N) {
            let masked = &mut block[..chunk.len()];
            mask.read(masked);
            masked.iter_mut().zip(chunk).for_each(|(m, x)| *m ^= *x);
            hasher.update(masked);
        }

        let mut output = [0u8; SPX_N];
        hasher.finalize_xof().read(&mut output);
        output
    }

    /// PRF(PK.seed, SK.seed, ADRS) = SHAKE256(PK.seed||ADRS||SK.seed, 8n)
    ///
    /// (prf_addr)
    pub(crate) fn prf_addr(&self, adrs: &Adrs) -> [u8; SPX_N] {
        let mut hasher = self.seeded(adrs);
        hasher.update(self.sk_seed.as_ref());
        let mut output = [0u8; SPX_N];
        hasher.finalize_xof().read(&mut output);
        output
    }

    /// Computes the message-dependent randomness R.
    ///
    /// PRF_msg(SK.prf, OptRand, M) = SHAKE256(SK.prf||OptRand||M, 8n)
    pub(crate) fn gen_message_random(sk_prf: &[u8], opt_rand: &[u8], m: &[u8]) -> [u8; SPX_N] {
        let mut hasher = Shake256::default();
        hasher.update(sk_prf[..SPX_N].as_ref());
        hasher.update(opt_rand[..SPX_N].as_ref());
        hasher.update(m);
        let mut r = [0u8; SPX_N];
        hasher.finalize_xof().read(&mut r);
        r
    }

    /// Computes the message hash using R, the public key, and the message.
    /// Outputs the message digest and the index of the leaf. The index is split in
    /// the tree index and the leaf index, for convenient copying to an address.
    ///
    /// H_msg(R, PK.seed, PK.root, M) = SHAKE256(R||PK.seed||PK.root||M, 8m)
    pub(crate) fn hash_message(r: &[u8], pk: &[u8], m: &[u8]) -> MessageDigest {
        let mut hasher = Shake256::default();
        hasher.update(r[..SPX_N].as_ref());
        hasher.update(pk[..SPX_PK_BYTES].as_ref());
        hasher.update(m);

        let mut buf = [0u8; SPX_DGST_BYTES];
        hasher.finalize_xof().read(&mut buf);

        let (digest_bytes, rest) = buf.split_at(SPX_FORS_MSG_BYTES);
        let (tree_bytes, leaf_bytes) = rest.split_at(SPX_TREE_BYTES);

        let mut digest = [0u8; SPX_FORS_MSG_BYTES];
        digest.copy_from_slice(digest_bytes);

        let tree = bytes_to_ull(tree_bytes) & ((!0_u64) >> (64 - SPX_TREE_BITS));
        let leaf_idx =
            bytes_to_ull(&leaf_bytes[..SPX_LEAF_BYTES]) as u32 & ((!0_u32) >> (32 - SPX_LEAF_BITS));

        MessageDigest {
            digest,
            tree,
            leaf_idx,
        }
    }
}
