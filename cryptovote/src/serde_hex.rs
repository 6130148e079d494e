//! Hex encoding for use in `#[serde(with)]`

use serde::{de, Deserialize, Deserializer, Serializer};
use std::convert::TryInto;

/// An optional 32 byte seed as a hex string
pub mod hex_seed {
    use super::*;

    pub fn serialize<S: Serializer>(
        seed: &Option<[u8; 32]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match seed {
            Some(seed) => serializer.serialize_some(&hex::encode(seed)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<[u8; 32]>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => {
                let bytes = hex::decode(&s).map_err(de::Error::custom)?;
                let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                    de::Error::custom(format!("expected 32 bytes of seed, found {}", bytes.len()))
                })?;
                Ok(Some(seed))
            }
            None => Ok(None),
        }
    }
}
