use sphincs_shake256s::{
    extract_message, open, verify, verify_detached, Error, OptRand, SphincsPlus,
};

fn simple_sphincs() -> Result<(), Error> {
    // Create a keypair from a fresh operating-system seed.
    let sphincs = SphincsPlus::new()?;
    println!("public key: {:?}", sphincs.public_key());

    // The seed can be stored as hex and later turned back into the same keypair.
    let hex_seed = sphincs.hex_seed();
    let restored = SphincsPlus::from_hex_seed(&hex_seed)?;
    assert_eq!(restored.public_key(), sphincs.public_key());

    // Detached signature.
    let msg1 = "Hi! This is my first SPHINCS+ message!".as_bytes();
    let sig1 = sphincs.sign(msg1)?;
    assert!(verify(msg1, sig1.as_ref(), sphincs.public_key()));
    verify_detached(msg1, &sig1, sphincs.public_key())?;

    // A signature does not carry over to another message.
    let msg2 = "This is not the message that was signed.".as_bytes();
    assert_eq!(
        verify_detached(msg2, &sig1, sphincs.public_key()),
        Err(Error::VerificationFailed)
    );

    // Sealed message: signature || message.
    let sealed = sphincs.seal(msg2)?;
    assert_eq!(extract_message(&sealed), Some(msg2));
    assert_eq!(open(&sealed, sphincs.public_key()), Some(msg2.to_vec()));

    // With a fixed randomizer, signing the same message twice gives the same signature.
    let deterministic = restored.with_opt_rand(OptRand::Fixed([0u8; 32]));
    assert_eq!(deterministic.sign(msg1)?, deterministic.sign(msg1)?);

    // Wipe the secret key and seed once done; verification only needs the public key.
    let mut sphincs = sphincs;
    sphincs.zeroize();
    assert!(verify(msg1, sig1.as_ref(), sphincs.public_key()));

    Ok(())
}

fn main() {
    if let Err(e) = simple_sphincs() {
        eprintln!("SPHINCS+ demo failed: {e}");
        std::process::exit(1);
    }
    println!("SPHINCS+ demo finished successfully.");
}
