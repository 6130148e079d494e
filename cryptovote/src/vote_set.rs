use crate::*;
use indexmap::IndexSet;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::hash::Hash;

/// A vote that was kept out of the valid set, and why
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RejectedVote<D> {
    pub vote: Vote<D>,
    pub reason: RejectReason,
}

/// The votes of a single election, partitioned into valid and rejected votes.
///
/// Valid votes are append-only: once accepted, a vote is never removed or changed.
/// Each voter, identified by their public key bytes, has at most one valid vote.
///
/// `submit` checks for a previous vote and then inserts, so concurrent use needs a
/// lock around the whole set.
pub struct ValidatedVoteSet<D, V = CryptoVerifier> {
    verifier: V,
    valid_votes: IndexSet<Vote<D>>,
    voted_keys: HashSet<Vec<u8>>,
    invalid_votes: Vec<RejectedVote<D>>,
}

impl<D> ValidatedVoteSet<D, CryptoVerifier>
where
    D: Eq + Hash + Clone + ToDeterministicHash,
{
    /// Create an empty vote set that verifies signatures with ed25519 / RSA
    pub fn new() -> Self {
        Self::with_verifier(CryptoVerifier)
    }
}

impl<D> Default for ValidatedVoteSet<D, CryptoVerifier>
where
    D: Eq + Hash + Clone + ToDeterministicHash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, V> ValidatedVoteSet<D, V>
where
    D: Eq + Hash + Clone + ToDeterministicHash,
    V: SignatureVerifier,
{
    /// Create an empty vote set using the given signature verifier
    pub fn with_verifier(verifier: V) -> Self {
        ValidatedVoteSet {
            verifier,
            valid_votes: IndexSet::new(),
            voted_keys: HashSet::new(),
            invalid_votes: Vec::new(),
        }
    }

    /// Submit a vote.
    ///
    /// The signature is checked first, then whether the voter has already voted.
    /// Rejected votes are kept in `invalid_votes` along with the reason.
    pub fn submit(&mut self, vote: Vote<D>) -> Result<(), RejectReason> {
        let reason = if !vote.is_valid_with(&self.verifier) {
            RejectReason::InvalidSignature
        } else if self.has_voted(vote.voter()) {
            RejectReason::DuplicateVoter
        } else {
            tracing::debug!(voter = vote.voter().voter_id(), "vote accepted");
            self.voted_keys.insert(vote.voter().public_key().to_vec());
            self.valid_votes.insert(vote);
            return Ok(());
        };

        tracing::warn!(voter = vote.voter().voter_id(), %reason, "vote rejected");
        self.invalid_votes.push(RejectedVote { vote, reason });
        Err(reason)
    }

    /// Submit several votes independently, returning how many were rejected.
    ///
    /// Zero means every vote was accepted. The reasons are in `invalid_votes`.
    pub fn submit_many<I>(&mut self, votes: I) -> usize
    where
        I: IntoIterator<Item = Vote<D>>,
    {
        votes
            .into_iter()
            .map(|vote| self.submit(vote))
            .filter(Result::is_err)
            .count()
    }

    /// Whether a valid vote exists for this voter's public key
    pub fn has_voted(&self, voter: &VoterInfo) -> bool {
        self.voted_keys.contains(voter.public_key())
    }

    /// Accepted votes, in the order they were submitted
    pub fn valid_votes(&self) -> &IndexSet<Vote<D>> {
        &self.valid_votes
    }

    /// Rejected votes, in the order they were submitted
    pub fn invalid_votes(&self) -> &[RejectedVote<D>] {
        &self.invalid_votes
    }

    /// Tally the valid votes.
    ///
    /// Computed fresh on every call. Tally once and reuse it when running several
    /// decision rules.
    pub fn tally(&self) -> Tally<D> {
        Tally::from_votes(&self.valid_votes)
    }

    /// Number of valid votes
    pub fn total_votes(&self) -> usize {
        self.valid_votes.len()
    }

    /// Sum of the weights of all valid votes
    pub fn total_weighted_votes(&self) -> Decimal {
        self.valid_votes.iter().map(|v| v.weight()).sum()
    }

    /// The totals for an outcome, zero if nobody voted for it
    pub fn vote_count(&self, details: &D) -> TallyEntry {
        self.tally().vote_count(details)
    }

    /// See [`Tally::top_vote`]
    pub fn top_vote(&self) -> Option<D> {
        self.tally().top_vote().cloned()
    }

    /// See [`Tally::majority_vote`]
    pub fn majority_vote(&self, threshold: f64) -> Result<Option<D>, Error> {
        Ok(self.tally().majority_vote(threshold)?.cloned())
    }

    /// See [`Tally::simple_majority`]
    pub fn simple_majority(&self) -> Option<D> {
        self.tally().simple_majority().cloned()
    }

    /// See [`Tally::unanimous_vote`]
    pub fn unanimous_vote(&self) -> Option<D> {
        self.tally().unanimous_vote().cloned()
    }

    /// A raffle over the valid votes, each outcome weighted by its votes' weights
    pub fn raffle(&self) -> Result<WeightedRaffle<D>, Error> {
        let mut raffle = WeightedRaffle::new();
        for vote in &self.valid_votes {
            raffle.add_vote(vote)?;
        }
        Ok(raffle)
    }
}
