use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid seed length: expected {0} bytes, found {1} bytes")]
    InvalidSeedLength(usize, usize),
    #[error("Invalid key buffer size: expected {0} bytes, found {1} bytes")]
    InvalidKeyBufferSize(usize, usize),
    #[error("Invalid signature length: expected {0} bytes, found {1} bytes")]
    InvalidSignatureLength(usize, usize),
    #[error("Failed to decode hex seed: {0}")]
    InvalidHexSeed(String),
    #[error("Entropy source failure: {0}")]
    EntropySourceFailure(String),
    #[error("Signature verification failed")]
    VerificationFailed,
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::InvalidHexSeed(e.to_string())
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::EntropySourceFailure(e.to_string())
    }
}
