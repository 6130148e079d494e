use crate::*;
use ed25519_dalek::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use std::convert::TryInto;

/// Verifies a voter's signature over the deterministic hash of their vote details.
///
/// Implementations must not panic: every failure is reported as `false`.
pub trait SignatureVerifier {
    fn verify(
        &self,
        voter: &VoterInfo,
        hash_algorithm: HashAlgorithm,
        hash: &[u8],
        signature: &[u8],
    ) -> bool;
}

/// Verifies signatures with ed25519-dalek and rsa, picked by the voter's key algorithm
#[derive(Debug, Default, Clone, Copy)]
pub struct CryptoVerifier;

impl SignatureVerifier for CryptoVerifier {
    fn verify(
        &self,
        voter: &VoterInfo,
        hash_algorithm: HashAlgorithm,
        hash: &[u8],
        signature: &[u8],
    ) -> bool {
        match voter.algorithm() {
            PublicKeyAlgorithm::EllipticCurve => {
                verify_ed25519(voter.public_key(), hash, signature)
            }
            PublicKeyAlgorithm::Rsa => {
                verify_rsa(voter.public_key(), hash_algorithm, hash, signature)
            }
            PublicKeyAlgorithm::DiffieHellman => false,
        }
    }
}

fn verify_ed25519(public_key: &[u8], hash: &[u8], signature: &[u8]) -> bool {
    // Anything other than exactly 32 bytes is a malformed key
    let key_bytes: [u8; 32] = match public_key.try_into() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let public_key = match VerifyingKey::from_bytes(&key_bytes) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let signature = match Signature::from_slice(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    public_key.verify_strict(hash, &signature).is_ok()
}

fn verify_rsa(
    public_key: &[u8],
    hash_algorithm: HashAlgorithm,
    hash: &[u8],
    signature: &[u8],
) -> bool {
    // DER decoding rejects trailing bytes
    let public_key = match RsaPublicKey::from_public_key_der(public_key) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let scheme = match hash_algorithm {
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    };

    public_key.verify(scheme, hash, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Signer;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;

    const HASH: [u8; 32] = [7; 32];

    #[test]
    fn ed25519_signature() {
        let (secret, public) = generate_keypair();
        let voter = VoterInfo::ed25519("alice", &public);
        let signature = secret.sign(&HASH).to_bytes();

        assert!(CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));

        let mut tampered = HASH;
        tampered[0] = 8;
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &tampered, &signature));

        // Truncated signature
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature[..63]));
    }

    #[test]
    fn ed25519_malformed_key() {
        let (secret, public) = generate_keypair();
        let signature = secret.sign(&HASH).to_bytes();

        let mut long_key = public.to_bytes().to_vec();
        long_key.push(0);
        let voter = VoterInfo::new("alice", long_key, PublicKeyAlgorithm::EllipticCurve);
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));

        let voter = VoterInfo::new("alice", vec![], PublicKeyAlgorithm::EllipticCurve);
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));
    }

    #[test]
    fn spki_ecdsa_key_never_verifies() {
        // SubjectPublicKeyInfo header of a P-256 key, then the 65 byte point
        let mut spki = vec![
            0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06,
            0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00, 0x04,
        ];
        spki.extend_from_slice(&[7; 64]);
        assert_eq!(spki.len(), 91);

        let voter = VoterInfo::new("alice", spki, PublicKeyAlgorithm::EllipticCurve);
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &[0; 64]));
    }

    #[test]
    fn rsa_signature() {
        let mut rng = rand::thread_rng();
        let secret = RsaPrivateKey::new(&mut rng, 1024).unwrap();
        let public_der = RsaPublicKey::from(&secret)
            .to_public_key_der()
            .unwrap()
            .as_bytes()
            .to_vec();
        let signature = secret
            .sign(Pkcs1v15Sign::new::<Sha256>(), &HASH)
            .unwrap();

        let voter = VoterInfo::new("bob", public_der.clone(), PublicKeyAlgorithm::Rsa);
        assert!(CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));

        // Signed as SHA-256, claimed as SHA-512
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha512, &HASH, &signature));

        let mut trailing = public_der;
        trailing.push(0);
        let voter = VoterInfo::new("bob", trailing, PublicKeyAlgorithm::Rsa);
        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));
    }

    #[test]
    fn diffie_hellman_never_verifies() {
        let (secret, public) = generate_keypair();
        let signature = secret.sign(&HASH).to_bytes();
        let voter = VoterInfo::new(
            "carol",
            public.to_bytes().to_vec(),
            PublicKeyAlgorithm::DiffieHellman,
        );

        assert!(!CryptoVerifier.verify(&voter, HashAlgorithm::Sha256, &HASH, &signature));
    }
}
