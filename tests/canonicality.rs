use rand::prelude::*;
use rand::rngs::OsRng;
use sphincs_shake256s::params::{PK_BYTES, SIG_BYTES, SPX_SEED_BYTES};
use sphincs_shake256s::sphincs_plus::{
    SPX_D, SPX_FORS_BYTES, SPX_FORS_HEIGHT, SPX_FORS_TREES, SPX_N, SPX_TREE_HEIGHT, SPX_WOTS_BYTES,
};
use sphincs_shake256s::{verify, OptRand, PublicKey, Signature, SphincsPlus};

const FORS_START: usize = SPX_N;
const LAYERS_START: usize = FORS_START + SPX_FORS_BYTES;
const LAYER_BYTES: usize = SPX_WOTS_BYTES + SPX_TREE_HEIGHT * SPX_N;

const MESSAGE: &[u8] = b"canonicality test message";

fn setup() -> (SphincsPlus, Signature) {
    let mut seed = [0u8; SPX_SEED_BYTES];
    OsRng.fill_bytes(&mut seed);
    let sphincs = SphincsPlus::from_seed_bytes(&seed)
        .unwrap()
        .with_opt_rand(OptRand::Fixed([0x17; SPX_N]));
    let signature = sphincs.sign(MESSAGE).unwrap();
    assert!(verify(MESSAGE, signature.as_ref(), sphincs.public_key()));
    (sphincs, signature)
}

fn assert_rejects_flip(sig: &Signature, pk: &PublicKey, offset: usize) {
    let mut corrupted = sig.to_bytes();
    corrupted[offset] ^= 0x01;
    assert!(
        !verify(MESSAGE, &corrupted, pk),
        "bit flip at offset {} was accepted",
        offset
    );
}

#[test]
fn test_layout_adds_up() {
    assert_eq!(LAYERS_START + SPX_D * LAYER_BYTES, SIG_BYTES);
}

#[test]
fn test_truncated_and_extended_signatures() {
    let (sphincs, signature) = setup();
    let bytes = signature.as_ref();
    let pk = sphincs.public_key();

    let mut lengths = vec![0, 1, SPX_N, LAYERS_START, SIG_BYTES - 1];
    for layer in 0..SPX_D {
        lengths.push(LAYERS_START + layer * LAYER_BYTES + SPX_WOTS_BYTES);
    }
    for len in lengths {
        assert!(!verify(MESSAGE, &bytes[..len], pk), "length {} accepted", len);
    }

    let mut extended = bytes.to_vec();
    extended.push(0);
    assert!(!verify(MESSAGE, &extended, pk));
    assert!(!verify(MESSAGE, &[], pk));
}

#[test]
fn test_corrupted_signature_components() {
    let (sphincs, signature) = setup();
    let pk = sphincs.public_key();

    // R, the first and last FORS trees, first and last hypertree layers, and the last byte.
    let offsets = [
        0,
        SPX_N - 1,
        FORS_START,
        FORS_START + SPX_FORS_BYTES - 1,
        LAYERS_START,
        LAYERS_START + LAYER_BYTES - 1,
        LAYERS_START + (SPX_D - 1) * LAYER_BYTES,
        SIG_BYTES - 1,
    ];
    for offset in offsets {
        assert_rejects_flip(&signature, pk, offset);
    }
}

#[test]
fn test_fors_corruption() {
    let (sphincs, signature) = setup();
    let pk = sphincs.public_key();
    let tree_bytes = (SPX_FORS_HEIGHT + 1) * SPX_N;

    for tree in [0, SPX_FORS_TREES / 2, SPX_FORS_TREES - 1] {
        let tree_start = FORS_START + tree * tree_bytes;
        // The revealed secret leaf.
        assert_rejects_flip(&signature, pk, tree_start);
        // The first and last authentication path nodes.
        assert_rejects_flip(&signature, pk, tree_start + SPX_N);
        assert_rejects_flip(&signature, pk, tree_start + tree_bytes - 1);
    }
}

#[test]
fn test_wots_corruption() {
    let (sphincs, signature) = setup();
    let pk = sphincs.public_key();

    for layer in 0..SPX_D {
        let wots_start = LAYERS_START + layer * LAYER_BYTES;
        assert_rejects_flip(&signature, pk, wots_start);
        // The last checksum chain.
        assert_rejects_flip(&signature, pk, wots_start + SPX_WOTS_BYTES - 1);
    }
}

#[test]
fn test_auth_path_corruption() {
    let (sphincs, signature) = setup();
    let pk = sphincs.public_key();

    for layer in [0, SPX_D / 2, SPX_D - 1] {
        let auth_start = LAYERS_START + layer * LAYER_BYTES + SPX_WOTS_BYTES;
        for height in 0..SPX_TREE_HEIGHT {
            assert_rejects_flip(&signature, pk, auth_start + height * SPX_N);
        }
    }
}

#[test]
fn test_all_zero_and_all_ones_signatures() {
    let (sphincs, _) = setup();
    let pk = sphincs.public_key();
    assert!(!verify(MESSAGE, &vec![0u8; SIG_BYTES], pk));
    assert!(!verify(MESSAGE, &vec![0xffu8; SIG_BYTES], pk));
}

#[test]
fn test_random_signatures() {
    let (sphincs, _) = setup();
    let pk = sphincs.public_key();
    let mut rng = thread_rng();
    let mut random_sig = vec![0u8; SIG_BYTES];
    for _ in 0..5 {
        rng.fill_bytes(&mut random_sig);
        assert!(!verify(MESSAGE, &random_sig, pk));
    }
}

#[test]
fn test_wrong_message_and_public_key() {
    let (sphincs, signature) = setup();
    let bytes = signature.as_ref();

    assert!(!verify(b"canonicality test messagE", bytes, sphincs.public_key()));
    assert!(!verify(b"", bytes, sphincs.public_key()));

    let zero_pk = PublicKey::from([0u8; PK_BYTES]);
    assert!(!verify(MESSAGE, bytes, &zero_pk));

    let mut random_pk = [0u8; PK_BYTES];
    OsRng.fill_bytes(&mut random_pk);
    assert!(!verify(MESSAGE, bytes, &PublicKey::from(random_pk)));

    // Same root, different public seed.
    let mut other_seed_pk = sphincs.public_key().to_bytes();
    other_seed_pk[0] ^= 1;
    assert!(!verify(MESSAGE, bytes, &PublicKey::from(other_seed_pk)));
}
