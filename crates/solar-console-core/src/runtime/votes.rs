// crates/solar-console-core/src/runtime/votes.rs
// ============================================================================
// Module: Solar Console Vote Ledger
// Description: Local record of votes with per-voter uniqueness.
// Purpose: Reject a second vote before it reaches the backend.
// Dependencies: crate::core, crate::policy, thiserror
// ============================================================================

//! ## Overview
//! The ledger holds at most one vote per (proposal, voter). A second cast is
//! rejected with [`VoteError::DuplicateVote`] and the existing vote and tally
//! stay unchanged. Casting also requires the voter to hold
//! `ProposalVote.Cast` and the proposal to be pending.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::core::BallotProposal;
use crate::core::ConsoleError;
use crate::core::EntityStatus;
use crate::core::Identity;
use crate::core::ProposalId;
use crate::core::ResourceAction;
use crate::core::UserId;
use crate::core::VoteChoice;
use crate::core::VoteSummary;
use crate::policy::AuthorizationDenied;
use crate::policy::authorize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vote {
    /// Proposal voted on.
    pub proposal: ProposalId,
    /// Voting user.
    pub voter: UserId,
    /// Recorded choice.
    pub choice: VoteChoice,
}

/// Vote errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    /// The voter already voted on the proposal.
    #[error("user {voter} already voted on proposal {proposal}")]
    DuplicateVote {
        /// Proposal voted on.
        proposal: ProposalId,
        /// Voting user.
        voter: UserId,
    },
    /// The proposal is closed for voting.
    #[error("proposal {proposal} is {status}")]
    Closed {
        /// Proposal voted on.
        proposal: ProposalId,
        /// Current status.
        status: EntityStatus,
    },
    /// The voter may not vote.
    #[error("unauthorized: {0}")]
    Unauthorized(AuthorizationDenied),
}

impl From<VoteError> for ConsoleError {
    fn from(error: VoteError) -> Self {
        match error {
            VoteError::DuplicateVote {
                ..
            } => Self::DuplicateVote,
            VoteError::Closed {
                ..
            } => Self::AlreadyDecided,
            VoteError::Unauthorized(denied) => denied.into(),
        }
    }
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Local vote ledger keyed by (proposal, voter).
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    /// Every (proposal, voter) known to have voted, with or without a choice.
    voted: BTreeSet<(ProposalId, UserId)>,
    /// Recorded choices.
    votes: BTreeMap<(ProposalId, UserId), VoteChoice>,
    /// Proposal status snapshot.
    statuses: BTreeMap<ProposalId, EntityStatus>,
    /// Votes cast by other voters, as reported by the backend.
    baseline: BTreeMap<ProposalId, VoteSummary>,
}

impl VoteLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger from a citizen's ballot view.
    ///
    /// The backend tally is kept as a baseline; the voter's own vote, when
    /// reported, is recorded and subtracted from the baseline. A ballot that
    /// marks the proposal as voted without naming the choice still blocks a
    /// second cast; the baseline then already counts that vote.
    #[must_use]
    pub fn from_ballot(voter: UserId, ballot: &[BallotProposal]) -> Self {
        let mut ledger = Self::new();
        for entry in ballot {
            let proposal = entry.proposal.proposal_id;
            let mut summary = entry.vote_summary;
            ledger.statuses.insert(proposal, entry.proposal.status);
            if entry.has_voted {
                ledger.voted.insert((proposal, voter));
            }
            if entry.has_voted
                && let Some(choice) = entry.user_vote
            {
                match choice {
                    VoteChoice::For => summary.for_votes = summary.for_votes.saturating_sub(1),
                    VoteChoice::Against => {
                        summary.against_votes = summary.against_votes.saturating_sub(1);
                    }
                }
                ledger.votes.insert((proposal, voter), choice);
            }
            ledger.baseline.insert(proposal, summary);
        }
        ledger
    }

    /// Records the proposal's current status.
    pub fn track(&mut self, proposal: ProposalId, status: EntityStatus) {
        self.statuses.insert(proposal, status);
    }

    /// Casts a vote.
    ///
    /// # Errors
    ///
    /// Returns [`VoteError`] when the voter lacks the capability, the
    /// proposal is not pending, or the voter already voted.
    pub fn cast(
        &mut self,
        voter: &Identity,
        proposal: ProposalId,
        choice: VoteChoice,
    ) -> Result<Vote, VoteError> {
        authorize(voter, ResourceAction::PROPOSAL_VOTE_CAST, None)
            .map_err(VoteError::Unauthorized)?;
        if let Some(status) = self.statuses.get(&proposal).copied()
            && status != EntityStatus::Pending
        {
            return Err(VoteError::Closed {
                proposal,
                status,
            });
        }
        let key = (proposal, voter.id);
        if !self.voted.insert(key) {
            return Err(VoteError::DuplicateVote {
                proposal,
                voter: voter.id,
            });
        }
        self.votes.insert(key, choice);
        Ok(Vote {
            proposal,
            voter: voter.id,
            choice,
        })
    }

    /// Returns true when the voter has voted on the proposal.
    #[must_use]
    pub fn has_voted(&self, proposal: ProposalId, voter: UserId) -> bool {
        self.voted.contains(&(proposal, voter))
    }

    /// Returns the recorded vote of a voter.
    #[must_use]
    pub fn vote_of(&self, proposal: ProposalId, voter: UserId) -> Option<VoteChoice> {
        self.votes.get(&(proposal, voter)).copied()
    }

    /// Returns the tally: backend baseline plus locally recorded votes.
    #[must_use]
    pub fn tally(&self, proposal: ProposalId) -> VoteSummary {
        let mut summary = self.baseline.get(&proposal).copied().unwrap_or_default();
        for ((voted_on, _), choice) in &self.votes {
            if *voted_on != proposal {
                continue;
            }
            match choice {
                VoteChoice::For => summary.for_votes = summary.for_votes.saturating_add(1),
                VoteChoice::Against => {
                    summary.against_votes = summary.against_votes.saturating_add(1);
                }
            }
        }
        summary
    }
}
