use crate::sphincs_plus::{
    SPX_ADDR_BYTES, SPX_OFFSET_CHAIN_ADDR, SPX_OFFSET_HASH_ADDR, SPX_OFFSET_KP_ADDR,
    SPX_OFFSET_LAYER, SPX_OFFSET_TREE, SPX_OFFSET_TREE_HGT, SPX_OFFSET_TREE_INDEX, SPX_OFFSET_TYPE,
};
use crate::utils::{get_u32_at, get_u64_at, set_byte_at, set_u32_at, set_u64_at};

/// All 7 types of ADRS defined for SPHINCS+.
/// The 1-byte corresponding value is set as the `type` in an ADRS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdrsType {
    /// SPX_ADDR_TYPE_WOTS: 0, used for hashing through a chain.
    WotsHash = 0,
    /// SPX_ADDR_TYPE_WOTSPK: 1, used for compression of the WOTS+ public key.
    WotsPk = 1,
    /// SPX_ADDR_TYPE_HASHTREE: 2, used for the inner nodes of hypertree subtrees.
    Tree = 2,
    /// SPX_ADDR_TYPE_FORSTREE: 3, used for FORS leaves and inner nodes.
    ForsTree = 3,
    /// SPX_ADDR_TYPE_FORSPK: 4, used for compression of the FORS roots.
    ForsRoots = 4,
    /// SPX_ADDR_TYPE_WOTSPRF: 5, used for secret key generation (start of each chain).
    WotsPrf = 5,
    /// SPX_ADDR_TYPE_FORSPRF: 6, used for FORS secret leaf generation.
    ForsPrf = 6,
}

impl TryFrom<u8> for AdrsType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0 => AdrsType::WotsHash,
            1 => AdrsType::WotsPk,
            2 => AdrsType::Tree,
            3 => AdrsType::ForsTree,
            4 => AdrsType::ForsRoots,
            5 => AdrsType::WotsPrf,
            6 => AdrsType::ForsPrf,
            other => return Err(other),
        })
    }
}

/// The address `Adrs` is a 32-byte value and follows the SHAKE layout of the
/// [SPHINCS+ v.3.1 submission](https://sphincs.org/data/sphincs+-r3.1-specification.pdf).
///
/// The canonical form is the 32-byte big-endian encoding itself; every setter
/// writes straight into its byte range, so there is no second representation
/// that could go stale. Its parts are:
/// * `layer address`:    A single byte at offset 3.
/// * `tree address`:     An 8-byte big-endian value at offsets 8..16.
/// * `type`:             A single byte at offset 19, set by [`AdrsType`].
/// * `key pair address`: A 4-byte big-endian value at offsets 20..24.
/// * `chain address` / `tree height`: A single byte at offset 27.
/// * `hash address`:     A single byte at offset 31.
/// * `tree index`:       A 4-byte big-endian value at offsets 28..32.
///
/// Chain/hash and tree height/index overlap; which pair is meaningful depends on
/// the type.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Adrs([u8; SPX_ADDR_BYTES]);

impl AsRef<[u8]> for Adrs {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SPX_ADDR_BYTES]> for Adrs {
    fn from(bytes: [u8; SPX_ADDR_BYTES]) -> Self {
        Self(bytes)
    }
}

impl From<Adrs> for [u8; SPX_ADDR_BYTES] {
    fn from(adrs: Adrs) -> Self {
        adrs.0
    }
}

impl From<AdrsType> for Adrs {
    /// Returns an all-zero `adrs` with only the type set.
    fn from(adrs_type: AdrsType) -> Self {
        let mut adrs = Self::default();
        adrs.set_type(adrs_type);
        adrs
    }
}

impl Adrs {
    /// Returns the 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; SPX_ADDR_BYTES] {
        self.0
    }

    /// Specify which level of Merkle tree (the "layer") we're working on.
    pub fn set_layer_addr(&mut self, layer: u32) {
        set_byte_at(self.0.as_mut(), layer as u8, SPX_OFFSET_LAYER);
    }

    /// Returns the layer address.
    pub fn layer_addr(&self) -> u32 {
        u32::from(self.0[SPX_OFFSET_LAYER])
    }

    /// Specify which Merkle tree within the level (the "tree address") we're working on.
    pub fn set_tree_addr(&mut self, tree: u64) {
        set_u64_at(self.0.as_mut(), tree, SPX_OFFSET_TREE);
    }

    /// Returns the 64-bit tree address.
    pub fn tree_addr(&self) -> u64 {
        get_u64_at(&self.0, SPX_OFFSET_TREE)
    }

    /// Specify the reason we'll use this address structure for, that is, what
    /// hash will we compute with it.  This is used so that unrelated types of
    /// hashes don't accidentally get the same address structure.
    pub fn set_type(&mut self, adrs_type: AdrsType) {
        set_byte_at(self.0.as_mut(), adrs_type as u8, SPX_OFFSET_TYPE);
    }

    /// Returns the raw type byte; see [`AdrsType::try_from`].
    pub fn type_byte(&self) -> u8 {
        self.0[SPX_OFFSET_TYPE]
    }

    /// Copy the layer and tree fields of `src` into this address.  This is used
    /// when we're doing multiple types of hashes within the same Merkle tree.
    pub fn copy_subtree_addr(&mut self, src: &Adrs) {
        self.0[..SPX_OFFSET_TREE + 8].copy_from_slice(&src.0[..SPX_OFFSET_TREE + 8]);
    }

    /// Specify which Merkle leaf we're working on; that is, which OTS keypair
    /// we're talking about.
    pub fn set_keypair_addr(&mut self, keypair: u32) {
        set_u32_at(self.0.as_mut(), keypair, SPX_OFFSET_KP_ADDR);
    }

    /// Returns the keypair address.
    pub fn keypair_addr(&self) -> u32 {
        get_u32_at(&self.0, SPX_OFFSET_KP_ADDR)
    }

    /// Copy the layer, tree and keypair fields of `src` into this address.  This
    /// is used when we're doing multiple things within the same OTS keypair.
    pub fn copy_keypair_addr(&mut self, src: &Adrs) {
        self.copy_subtree_addr(src);
        self.0[SPX_OFFSET_KP_ADDR..SPX_OFFSET_KP_ADDR + 4]
            .copy_from_slice(&src.0[SPX_OFFSET_KP_ADDR..SPX_OFFSET_KP_ADDR + 4]);
    }

    /// Specify which Merkle chain within the OTS we're working with
    /// (the chain address).
    pub fn set_chain_addr(&mut self, chain: u32) {
        set_byte_at(self.0.as_mut(), chain as u8, SPX_OFFSET_CHAIN_ADDR);
    }

    /// Returns the chain address. Shares its byte with the tree height.
    pub fn chain_addr(&self) -> u32 {
        u32::from(self.0[SPX_OFFSET_CHAIN_ADDR])
    }

    /// Specify where in the Merkle chain we are
    /// (the hash address).
    pub fn set_hash_addr(&mut self, hash: u32) {
        set_byte_at(self.0.as_mut(), hash as u8, SPX_OFFSET_HASH_ADDR);
    }

    /// Returns the hash address.
    pub fn hash_addr(&self) -> u32 {
        u32::from(self.0[SPX_OFFSET_HASH_ADDR])
    }

    /// Specify the height of the node in the Merkle/FORS tree we are in
    /// (the tree height).
    pub fn set_tree_height(&mut self, tree_height: u32) {
        set_byte_at(self.0.as_mut(), tree_height as u8, SPX_OFFSET_TREE_HGT);
    }

    /// Returns the tree height. Shares its byte with the chain address.
    pub fn tree_height(&self) -> u32 {
        u32::from(self.0[SPX_OFFSET_TREE_HGT])
    }

    /// Specify the distance from the left edge of the node in the Merkle/FORS tree
    /// (the tree index).
    pub fn set_tree_index(&mut self, tree_index: u32) {
        set_u32_at(self.0.as_mut(), tree_index, SPX_OFFSET_TREE_INDEX);
    }

    /// Returns the tree index. Overlaps the hash address.
    pub fn tree_index(&self) -> u32 {
        get_u32_at(&self.0, SPX_OFFSET_TREE_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed_bytes(before: &Adrs, after: &Adrs) -> Vec<usize> {
        before
            .as_ref()
            .iter()
            .zip(after.as_ref())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_setters_touch_only_their_range() {
        let base = Adrs::default();

        let mut adrs = base;
        adrs.set_layer_addr(0xab);
        assert_eq!(changed_bytes(&base, &adrs), vec![3]);

        let mut adrs = base;
        adrs.set_tree_addr(u64::MAX);
        assert_eq!(changed_bytes(&base, &adrs), (8..16).collect::<Vec<_>>());

        let mut adrs = base;
        adrs.set_type(AdrsType::ForsPrf);
        assert_eq!(changed_bytes(&base, &adrs), vec![19]);

        let mut adrs = base;
        adrs.set_keypair_addr(u32::MAX);
        assert_eq!(changed_bytes(&base, &adrs), (20..24).collect::<Vec<_>>());

        let mut adrs = base;
        adrs.set_chain_addr(0xff);
        assert_eq!(changed_bytes(&base, &adrs), vec![27]);

        let mut adrs = base;
        adrs.set_hash_addr(0xff);
        assert_eq!(changed_bytes(&base, &adrs), vec![31]);

        let mut adrs = base;
        adrs.set_tree_height(0xff);
        assert_eq!(changed_bytes(&base, &adrs), vec![27]);

        let mut adrs = base;
        adrs.set_tree_index(u32::MAX);
        assert_eq!(changed_bytes(&base, &adrs), (28..32).collect::<Vec<_>>());
    }

    #[test]
    fn test_fields_are_big_endian() {
        let mut adrs = Adrs::default();
        adrs.set_layer_addr(7);
        adrs.set_tree_addr(0x0102_0304_0506_0708);
        adrs.set_type(AdrsType::Tree);
        adrs.set_keypair_addr(0x0a0b_0c0d);
        adrs.set_tree_height(5);
        adrs.set_tree_index(0x1122_3344);

        let mut expected = [0u8; 32];
        expected[3] = 7;
        expected[8..16].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        expected[19] = 2;
        expected[20..24].copy_from_slice(&[0x0a, 0x0b, 0x0c, 0x0d]);
        expected[27] = 5;
        expected[28..32].copy_from_slice(&[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(adrs.to_bytes(), expected);

        assert_eq!(adrs.layer_addr(), 7);
        assert_eq!(adrs.tree_addr(), 0x0102_0304_0506_0708);
        assert_eq!(AdrsType::try_from(adrs.type_byte()), Ok(AdrsType::Tree));
        assert_eq!(adrs.keypair_addr(), 0x0a0b_0c0d);
        assert_eq!(adrs.tree_height(), 5);
        assert_eq!(adrs.tree_index(), 0x1122_3344);
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        let adrs = Adrs::from(bytes);
        assert_eq!(<[u8; 32]>::from(adrs), bytes);
        assert_eq!(Adrs::from(adrs.to_bytes()), adrs);
    }

    #[test]
    fn test_copy_subtree_and_keypair() {
        let mut src = Adrs::from(AdrsType::WotsHash);
        src.set_layer_addr(3);
        src.set_tree_addr(0xdead_beef);
        src.set_keypair_addr(42);
        src.set_chain_addr(9);
        src.set_hash_addr(4);

        let mut dst = Adrs::from(AdrsType::Tree);
        dst.set_tree_index(77);
        dst.copy_subtree_addr(&src);
        assert_eq!(dst.layer_addr(), 3);
        assert_eq!(dst.tree_addr(), 0xdead_beef);
        assert_eq!(dst.keypair_addr(), 0);
        assert_eq!(dst.type_byte(), AdrsType::Tree as u8);
        assert_eq!(dst.tree_index(), 77);

        let mut dst = Adrs::from(AdrsType::WotsPk);
        dst.copy_keypair_addr(&src);
        assert_eq!(dst.layer_addr(), 3);
        assert_eq!(dst.tree_addr(), 0xdead_beef);
        assert_eq!(dst.keypair_addr(), 42);
        assert_eq!(dst.type_byte(), AdrsType::WotsPk as u8);
        assert_eq!(dst.chain_addr(), 0);
        assert_eq!(dst.hash_addr(), 0);
    }

    #[test]
    fn test_adrs_type_values() {
        for value in 0u8..7 {
            assert_eq!(AdrsType::try_from(value).map(|t| t as u8), Ok(value));
        }
        assert_eq!(AdrsType::try_from(7), Err(7));
    }
}
