use crate::*;
use ed25519_dalek::Signer;
use ed25519_dalek::SigningKey;
use ed25519_dalek::VerifyingKey;

pub fn generate_keypair() -> (SigningKey, VerifyingKey) {
    let mut csprng = rand::rngs::OsRng {};
    let secret = SigningKey::generate(&mut csprng);
    let public = secret.verifying_key();
    (secret, public)
}

/// Sign the deterministic hash of some vote details with an Ed25519 key.
///
/// This is what a voter's client does before building a `Vote`.
pub fn sign_details<D: ToDeterministicHash + ?Sized>(
    secret: &SigningKey,
    details: &D,
    hash_algorithm: HashAlgorithm,
) -> Result<Vec<u8>, Error> {
    let hash = details.to_deterministic_hash(hash_algorithm)?;
    Ok(secret.sign(&hash).to_bytes().to_vec())
}
