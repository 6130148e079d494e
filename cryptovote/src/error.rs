use rust_decimal::Decimal;
use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("cryptovote: majority threshold {0} is outside the range [0, 1]")]
    OutOfRangeThreshold(f64),

    #[error("cryptovote: vote weight {0} is negative")]
    NegativeWeight(Decimal),

    #[error("cryptovote: raffle weight {0} must be finite and non-negative")]
    InvalidWeight(f64),

    #[error("cryptovote: raffle has no outcome with a positive weight")]
    EmptyRaffle,

    #[error("cryptovote: CBOR error serializing vote details: {0}")]
    CBORSerialization(#[from] serde_cbor::Error),

    #[error("cryptovote: JSON error deserializing config: {0}")]
    JSONDeserialization(#[from] serde_json::Error),
}

/// Why a submitted vote was kept out of the valid set
#[derive(Serialize, Deserialize, Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Malformed key, key-length mismatch, or failed signature verification
    #[error("cryptovote rejection: invalid signature")]
    InvalidSignature,

    /// The voter already has a vote in the valid set
    #[error("cryptovote rejection: voter has already voted")]
    DuplicateVoter,
}
