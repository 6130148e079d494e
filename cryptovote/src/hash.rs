use crate::*;
use digest::Digest;
use serde::Serialize;
use sha2::{Sha256, Sha384, Sha512};

/// The digest that a voter signed over their vote details
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::Sha256
    }
}

impl HashAlgorithm {
    /// Digest arbitrary bytes
    pub fn digest(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(bytes).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(bytes).to_vec(),
        }
    }
}

/// A value that hashes to the same bytes whenever it holds the same content.
///
/// Every `Serialize` type gets this through its CBOR encoding. Structs encode their
/// fields in declaration order, so derived implementations are stable. Types holding a
/// `HashMap` or `HashSet` are not: use `BTreeMap` or `IndexMap` for vote details.
pub trait ToDeterministicHash {
    fn to_deterministic_hash(&self, algorithm: HashAlgorithm) -> Result<Vec<u8>, Error>;
}

impl<T: Serialize + ?Sized> ToDeterministicHash for T {
    fn to_deterministic_hash(&self, algorithm: HashAlgorithm) -> Result<Vec<u8>, Error> {
        let serialized = serde_cbor::to_vec(&self)?;
        Ok(algorithm.digest(&serialized))
    }
}
