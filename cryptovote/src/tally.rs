use crate::*;
use indexmap::IndexMap;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Majority means more than half of the weighted votes
pub const DEFAULT_MAJORITY_THRESHOLD: f64 = 0.5;

/// The count and weighted total of the votes cast for one outcome
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TallyEntry {
    pub count: usize,
    pub weighted_total: Decimal,
}

/// Per-outcome totals over a set of valid votes.
///
/// Outcomes are kept in the order they were first seen, so iteration and
/// tie-ordering are stable for a given vote set.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(bound(
    serialize = "D: Serialize + Eq + Hash",
    deserialize = "D: Deserialize<'de> + Eq + Hash"
))]
pub struct Tally<D> {
    totals: IndexMap<D, TallyEntry>,
}

impl<D: Eq + Hash> PartialEq for Tally<D> {
    fn eq(&self, other: &Self) -> bool {
        self.totals == other.totals
    }
}

impl<D: Eq + Hash> Default for Tally<D> {
    fn default() -> Self {
        Tally {
            totals: IndexMap::new(),
        }
    }
}

impl<D: Eq + Hash + Clone> Tally<D> {
    /// Tally the given votes. Votes are assumed to already be validated.
    pub fn from_votes<'a, I>(votes: I) -> Self
    where
        I: IntoIterator<Item = &'a Vote<D>>,
        D: 'a,
    {
        let mut totals: IndexMap<D, TallyEntry> = IndexMap::new();
        for vote in votes {
            let entry = totals.entry(vote.details().clone()).or_default();
            entry.count += 1;
            entry.weighted_total += vote.weight();
        }

        tracing::trace!(outcomes = totals.len(), "tallied votes");

        Tally { totals }
    }
}

impl<D: Eq + Hash> Tally<D> {
    /// The totals for an outcome, if anyone voted for it
    pub fn get(&self, details: &D) -> Option<&TallyEntry> {
        self.totals.get(details)
    }

    /// The totals for an outcome, zero if nobody voted for it
    pub fn vote_count(&self, details: &D) -> TallyEntry {
        self.get(details).copied().unwrap_or_default()
    }

    /// Number of distinct outcomes
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&D, &TallyEntry)> {
        self.totals.iter()
    }

    /// Number of votes tallied
    pub fn total_votes(&self) -> usize {
        self.totals.values().map(|e| e.count).sum()
    }

    /// Sum of all vote weights
    pub fn total_weighted(&self) -> Decimal {
        self.totals.values().map(|e| e.weighted_total).sum()
    }

    /// Outcomes from highest to lowest weighted total. Equal totals keep first-seen order.
    pub fn ranked(&self) -> Vec<(&D, &TallyEntry)> {
        let mut ranked: Vec<(&D, &TallyEntry)> = self.totals.iter().collect();
        ranked.sort_by(|a, b| b.1.weighted_total.cmp(&a.1.weighted_total));
        ranked
    }

    /// The outcome with the strictly highest weighted total.
    ///
    /// `None` when there are no votes, or when the two leading outcomes are tied.
    pub fn top_vote(&self) -> Option<&D> {
        let ranked = self.ranked();
        match ranked.as_slice() {
            [] => None,
            [(only, _)] => Some(*only),
            [(first, first_entry), (_, second_entry), ..] => {
                if first_entry.weighted_total > second_entry.weighted_total {
                    Some(*first)
                } else {
                    None
                }
            }
        }
    }

    /// The leading outcome, if its weighted total is strictly greater than
    /// `threshold` times the total weighted votes.
    ///
    /// A leader sitting exactly on the threshold is not a majority. A single outcome is
    /// always the majority. `threshold` must be within `[0, 1]`.
    pub fn majority_vote(&self, threshold: f64) -> Result<Option<&D>, Error> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::OutOfRangeThreshold(threshold));
        }
        let threshold =
            Decimal::from_f64(threshold).ok_or(Error::OutOfRangeThreshold(threshold))?;

        let ranked = self.ranked();
        match ranked.as_slice() {
            [] => Ok(None),
            [(only, _)] => Ok(Some(*only)),
            [(leader, entry), ..] => {
                let threshold_amount = self.total_weighted() * threshold;
                if entry.weighted_total > threshold_amount {
                    Ok(Some(*leader))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Majority using the default threshold of one half
    pub fn simple_majority(&self) -> Option<&D> {
        self.majority_vote(DEFAULT_MAJORITY_THRESHOLD)
            .ok()
            .flatten()
    }

    /// The outcome every cast vote agrees on, if there is one
    pub fn unanimous_vote(&self) -> Option<&D> {
        if self.totals.len() == 1 {
            self.totals.keys().next()
        } else {
            None
        }
    }
}
