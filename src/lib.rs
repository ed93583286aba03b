mod cursor;
mod error;
mod fors;
mod hash;
mod hypertree;
mod merkle;
mod utils;

pub mod params;
pub mod sphincs_plus;
pub mod wots_plus;

pub use crate::error::{Error, Result};
pub use crate::sphincs_plus::{
    crypto_sign_seed_keypair, crypto_sign_signature, extract_message, extract_signature, open,
    verify, verify_detached, OptRand, PublicKey, SecretKey, Seed, Signature, SphincsPlus,
};
