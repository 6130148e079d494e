use crate::*;
use rust_decimal::Decimal;

/// A cast vote: one voter's signed choice of `details`.
///
/// A vote is never mutated once built. Equality and hashing are structural, so the
/// same vote submitted twice is the same set member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vote<D> {
    voter: VoterInfo,
    details: D,

    #[serde(with = "hex_serde")]
    signature: Vec<u8>,

    hash_algorithm: HashAlgorithm,
    weight: Decimal,
}

impl<D> Vote<D> {
    /// Create a new vote with a weight of one
    pub fn new(
        voter: VoterInfo,
        details: D,
        signature: Vec<u8>,
        hash_algorithm: HashAlgorithm,
    ) -> Self {
        Vote {
            voter,
            details,
            signature,
            hash_algorithm,
            weight: Decimal::ONE,
        }
    }

    /// Give the vote a different weight for weighted tallies and raffles
    pub fn with_weight(mut self, weight: Decimal) -> Result<Self, Error> {
        if weight.is_sign_negative() && !weight.is_zero() {
            return Err(Error::NegativeWeight(weight));
        }
        self.weight = weight;
        Ok(self)
    }

    pub fn voter(&self) -> &VoterInfo {
        &self.voter
    }

    pub fn details(&self) -> &D {
        &self.details
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }
}

impl<D: ToDeterministicHash> Vote<D> {
    /// Verify the voter's signature over the vote details
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(&CryptoVerifier)
    }

    /// Verify the voter's signature using the given verifier.
    ///
    /// Never fails: a details hash that cannot be computed makes the vote invalid.
    pub fn is_valid_with<V: SignatureVerifier + ?Sized>(&self, verifier: &V) -> bool {
        let hash = match self.details.to_deterministic_hash(self.hash_algorithm) {
            Ok(hash) => hash,
            Err(_) => return false,
        };

        verifier.verify(&self.voter, self.hash_algorithm, &hash, &self.signature)
    }
}
