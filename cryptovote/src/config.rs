use crate::*;
use std::hash::Hash;

/// Decision settings for an election
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElectionConfig {
    /// Fraction of the weighted votes the leader must strictly exceed to hold a majority
    pub majority_threshold: f64,

    /// Seed for reproducible raffles. Raffles draw from OS entropy when absent.
    #[serde(with = "hex_seed", skip_serializing_if = "Option::is_none")]
    pub raffle_seed: Option<[u8; 32]>,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        ElectionConfig {
            majority_threshold: DEFAULT_MAJORITY_THRESHOLD,
            raffle_seed: None,
        }
    }
}

impl ElectionConfig {
    /// Parse and validate a JSON config
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let config: ElectionConfig = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.majority_threshold) {
            return Err(Error::OutOfRangeThreshold(self.majority_threshold));
        }
        Ok(())
    }

    /// Apply the configured majority threshold to a tally
    pub fn majority_vote<'a, D: Eq + Hash>(
        &self,
        tally: &'a Tally<D>,
    ) -> Result<Option<&'a D>, Error> {
        tally.majority_vote(self.majority_threshold)
    }

    /// An empty raffle, seeded if the config carries a seed
    pub fn raffle<D: Eq + Hash>(&self) -> WeightedRaffle<D> {
        match self.raffle_seed {
            Some(seed) => WeightedRaffle::seeded(seed),
            None => WeightedRaffle::new(),
        }
    }
}
