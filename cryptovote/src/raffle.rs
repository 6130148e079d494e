use crate::*;
use indexmap::IndexMap;
use rand::distributions::{Distribution, WeightedIndex};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rust_decimal::prelude::ToPrimitive;
use std::hash::Hash;

/// Draws outcomes at random, in proportion to the weight accumulated by each outcome.
///
/// Draws are with replacement: drawing never changes the weights. An outcome with zero
/// weight stays in the raffle but is never drawn.
pub struct WeightedRaffle<D> {
    weights: IndexMap<D, f64>,
    rng: ChaCha20Rng,
}

impl<D: Eq + Hash> WeightedRaffle<D> {
    /// Create an empty raffle drawing from OS entropy
    pub fn new() -> Self {
        WeightedRaffle {
            weights: IndexMap::new(),
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create an empty raffle whose draws are reproducible from `seed`
    pub fn seeded(seed: [u8; 32]) -> Self {
        WeightedRaffle {
            weights: IndexMap::new(),
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Add weight to an outcome. Weights must be finite and non-negative.
    pub fn add(&mut self, outcome: D, weight: f64) -> Result<(), Error> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }
        *self.weights.entry(outcome).or_insert(0.0) += weight;
        Ok(())
    }

    /// Add a vote's outcome, weighted by the vote's weight
    pub fn add_vote(&mut self, vote: &Vote<D>) -> Result<(), Error>
    where
        D: Clone,
    {
        let weight = vote.weight().to_f64().unwrap_or(f64::NAN);
        self.add(vote.details().clone(), weight)
    }

    /// Number of distinct outcomes, including those with zero weight
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The accumulated weight of an outcome
    pub fn weight(&self, outcome: &D) -> Option<f64> {
        self.weights.get(outcome).copied()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    fn distribution(&self) -> Result<WeightedIndex<f64>, Error> {
        WeightedIndex::new(self.weights.values().copied()).map_err(|_| Error::EmptyRaffle)
    }

    /// Draw one outcome
    pub fn draw_one(&mut self) -> Result<&D, Error> {
        let distribution = self.distribution()?;
        let index = distribution.sample(&mut self.rng);
        self.weights
            .get_index(index)
            .map(|(outcome, _)| outcome)
            .ok_or(Error::EmptyRaffle)
    }

    /// Lazily draw `count` outcomes, each independent of the others
    pub fn draw_many(&mut self, count: usize) -> Result<Draws<'_, D>, Error> {
        let distribution = self.distribution()?;
        Ok(Draws {
            weights: &self.weights,
            distribution,
            rng: &mut self.rng,
            remaining: count,
        })
    }
}

impl<D: Eq + Hash> Default for WeightedRaffle<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a series of raffle draws
pub struct Draws<'a, D> {
    weights: &'a IndexMap<D, f64>,
    distribution: WeightedIndex<f64>,
    rng: &'a mut ChaCha20Rng,
    remaining: usize,
}

impl<'a, D> Iterator for Draws<'a, D> {
    type Item = &'a D;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = self.distribution.sample(&mut *self.rng);
        let weights = self.weights;
        weights.get_index(index).map(|(outcome, _)| outcome)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, D> ExactSizeIterator for Draws<'a, D> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_in_proportion_to_weight() {
        let mut raffle = WeightedRaffle::new();
        raffle.add("rare", 1.0).unwrap();
        raffle.add("common", 99.0).unwrap();

        let common = raffle
            .draw_many(10_000)
            .unwrap()
            .filter(|outcome| **outcome == "common")
            .count();

        // Expected 9900, standard deviation about 10
        assert!(common > 9_700, "drew common {} times", common);
        assert!(common < 10_000);
    }

    #[test]
    fn zero_weight_is_never_drawn() {
        let mut raffle = WeightedRaffle::seeded([3; 32]);
        raffle.add("never", 0.0).unwrap();
        raffle.add("always", 1.0).unwrap();

        assert_eq!(raffle.len(), 2);
        assert!(raffle.draw_many(500).unwrap().all(|o| *o == "always"));
    }

    #[test]
    fn empty_or_weightless_raffle() {
        let mut raffle: WeightedRaffle<&str> = WeightedRaffle::new();
        assert!(matches!(raffle.draw_one(), Err(Error::EmptyRaffle)));

        raffle.add("nothing", 0.0).unwrap();
        assert!(matches!(raffle.draw_one(), Err(Error::EmptyRaffle)));
        assert!(matches!(raffle.draw_many(3), Err(Error::EmptyRaffle)));
    }

    #[test]
    fn invalid_weights_rejected() {
        let mut raffle = WeightedRaffle::new();
        assert!(matches!(raffle.add("a", -1.0), Err(Error::InvalidWeight(_))));
        assert!(matches!(raffle.add("a", f64::NAN), Err(Error::InvalidWeight(_))));
        assert!(matches!(
            raffle.add("a", f64::INFINITY),
            Err(Error::InvalidWeight(_))
        ));
        assert!(raffle.is_empty());
    }

    #[test]
    fn weights_accumulate_per_outcome() {
        let mut raffle = WeightedRaffle::new();
        raffle.add("a", 1.5).unwrap();
        raffle.add("a", 2.5).unwrap();
        raffle.add("b", 1.0).unwrap();

        assert_eq!(raffle.len(), 2);
        assert_eq!(raffle.weight(&"a"), Some(4.0));
        assert_eq!(raffle.total_weight(), 5.0);
    }

    #[test]
    fn draws_do_not_consume_outcomes() {
        let mut raffle = WeightedRaffle::new();
        raffle.add("only", 1.0).unwrap();

        for _ in 0..3 {
            assert_eq!(raffle.draw_one().unwrap(), &"only");
        }
        assert_eq!(raffle.draw_many(4).unwrap().len(), 4);
        assert_eq!(raffle.weight(&"only"), Some(1.0));
    }

    #[test]
    fn same_seed_same_draws() {
        let build = || {
            let mut raffle = WeightedRaffle::seeded([42; 32]);
            for (outcome, weight) in &[("a", 1.0), ("b", 2.0), ("c", 3.0)] {
                raffle.add(*outcome, *weight).unwrap();
            }
            raffle
        };

        let mut first = build();
        let mut second = build();
        let a: Vec<&str> = first.draw_many(50).unwrap().copied().collect();
        let b: Vec<&str> = second.draw_many(50).unwrap().copied().collect();
        assert_eq!(a, b);
    }
}
