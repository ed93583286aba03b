use rand::{CryptoRng, RngCore};
use sphincs_shake256s::params::{PK_BYTES, SIG_BYTES, SK_BYTES, SPX_SEED_BYTES};
use sphincs_shake256s::{verify, Error, PublicKey, SecretKey, Seed, Signature, SphincsPlus};

/// A random source that always fails.
struct ExhaustedRng;

impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("only try_fill_bytes is used")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("only try_fill_bytes is used")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unreachable!("only try_fill_bytes is used")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("exhausted"))
    }
}

impl CryptoRng for ExhaustedRng {}

#[test]
fn test_keygen_propagates_entropy_failure() {
    assert_eq!(
        SphincsPlus::new_with_rng(&mut ExhaustedRng).unwrap_err(),
        Error::EntropySourceFailure("exhausted".to_string())
    );
}

#[test]
fn test_signing_propagates_entropy_failure() {
    let sphincs = SphincsPlus::from_seed_bytes(&[0x33; SPX_SEED_BYTES]).unwrap();
    assert_eq!(
        sphincs
            .sign_with_rng(b"no randomness", &mut ExhaustedRng)
            .unwrap_err(),
        Error::EntropySourceFailure("exhausted".to_string())
    );
}

#[test]
fn test_key_buffer_sizes() {
    assert_eq!(
        PublicKey::try_from(&[0u8; PK_BYTES - 1][..]).unwrap_err(),
        Error::InvalidKeyBufferSize(PK_BYTES, PK_BYTES - 1)
    );
    assert_eq!(
        PublicKey::try_from(&[0u8; PK_BYTES + 1][..]).unwrap_err(),
        Error::InvalidKeyBufferSize(PK_BYTES, PK_BYTES + 1)
    );
    assert_eq!(
        SecretKey::try_from(&[0u8; SK_BYTES + 1][..]).unwrap_err(),
        Error::InvalidKeyBufferSize(SK_BYTES, SK_BYTES + 1)
    );
    assert_eq!(
        SecretKey::try_from(&[0u8; 0][..]).unwrap_err(),
        Error::InvalidKeyBufferSize(SK_BYTES, 0)
    );
    assert_eq!(
        Seed::try_from(&[0u8; SPX_SEED_BYTES - 1][..]).unwrap_err(),
        Error::InvalidSeedLength(SPX_SEED_BYTES, SPX_SEED_BYTES - 1)
    );

    let sphincs = SphincsPlus::from_seed_bytes(&[0x44; SPX_SEED_BYTES]).unwrap();
    let pk = PublicKey::try_from(sphincs.public_key().as_ref()).unwrap();
    assert_eq!(&pk, sphincs.public_key());
    let sk = SecretKey::try_from(sphincs.secret_key().as_ref()).unwrap();
    assert_eq!(&sk, sphincs.secret_key());
}

#[test]
fn test_signature_length() {
    assert_eq!(
        Signature::try_from(&[0u8; 1][..]).unwrap_err(),
        Error::InvalidSignatureLength(SIG_BYTES, 1)
    );
    assert_eq!(
        Signature::try_from(&vec![0u8; SIG_BYTES + 1][..]).unwrap_err(),
        Error::InvalidSignatureLength(SIG_BYTES, SIG_BYTES + 1)
    );
    assert!(Signature::try_from(&vec![0u8; SIG_BYTES][..]).is_ok());
}

#[test]
fn test_default_randomness_gives_distinct_valid_signatures() {
    let sphincs = SphincsPlus::from_seed_bytes(&[0x55; SPX_SEED_BYTES]).unwrap();
    let message = b"signed twice";

    let first = sphincs.sign(message).unwrap();
    let second = sphincs.sign(message).unwrap();

    assert_ne!(first, second);
    assert!(verify(message, first.as_ref(), sphincs.public_key()));
    assert!(verify(message, second.as_ref(), sphincs.public_key()));
}
