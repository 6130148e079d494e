use crate::*;
use ed25519_dalek::VerifyingKey;
use std::hash::{Hash, Hasher};

/// Public key cryptography algorithm a voter's key belongs to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PublicKeyAlgorithm {
    /// RSA, key as DER-encoded SubjectPublicKeyInfo
    Rsa,

    /// Ed25519, key as 32 raw bytes.
    ///
    /// ECDSA keys exported as SubjectPublicKeyInfo (e.g. P-256) are not accepted and
    /// their votes never verify.
    EllipticCurve,

    /// Key agreement only. Votes from these keys never verify.
    DiffieHellman,
}

/// A registered voter.
///
/// Two voters are the same voter when both their id and their public key bytes match.
/// Duplicate-vote detection goes further and only looks at the public key.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoterInfo {
    voter_id: String,

    #[serde(with = "hex_serde")]
    public_key: Vec<u8>,

    algorithm: PublicKeyAlgorithm,
}

impl VoterInfo {
    pub fn new(
        voter_id: impl Into<String>,
        public_key: Vec<u8>,
        algorithm: PublicKeyAlgorithm,
    ) -> Self {
        VoterInfo {
            voter_id: voter_id.into(),
            public_key,
            algorithm,
        }
    }

    /// Register an Ed25519 voter
    pub fn ed25519(voter_id: impl Into<String>, public_key: &VerifyingKey) -> Self {
        VoterInfo::new(
            voter_id,
            public_key.to_bytes().to_vec(),
            PublicKeyAlgorithm::EllipticCurve,
        )
    }

    pub fn voter_id(&self) -> &str {
        &self.voter_id
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn algorithm(&self) -> PublicKeyAlgorithm {
        self.algorithm
    }
}

impl PartialEq for VoterInfo {
    fn eq(&self, other: &Self) -> bool {
        self.voter_id == other.voter_id && self.public_key == other.public_key
    }
}

impl Eq for VoterInfo {}

impl Hash for VoterInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.voter_id.hash(state);
        self.public_key.hash(state);
    }
}
