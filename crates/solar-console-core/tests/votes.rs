// crates/solar-console-core/tests/votes.rs
// ============================================================================
// Module: Vote Ledger Tests
// Description: Vote uniqueness, tallies, and ballot seeding.
// Purpose: Ensure a second vote is rejected and never overwrites the first.
// Dependencies: solar-console-core, serde_json
// ============================================================================

//! Vote ledger behavior tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use common::citizen;
use common::galactic_leader;
use common::user;
use solar_console_core::BallotProposal;
use solar_console_core::ConsoleError;
use solar_console_core::EntityStatus;
use solar_console_core::ProposalId;
use solar_console_core::VoteChoice;
use solar_console_core::VoteError;
use solar_console_core::VoteLedger;
use solar_console_core::VoteSummary;
use serde_json::json;

fn proposal_id(raw: u64) -> ProposalId {
    ProposalId::from_raw(raw).unwrap()
}

#[test]
fn second_vote_is_rejected_and_tally_unchanged() {
    let mut ledger = VoteLedger::new();
    let voter = citizen(8);
    ledger.cast(&voter, proposal_id(5), VoteChoice::For).unwrap();
    let before = ledger.tally(proposal_id(5));

    let err = ledger.cast(&voter, proposal_id(5), VoteChoice::Against).unwrap_err();
    assert!(matches!(err, VoteError::DuplicateVote { .. }));
    assert_eq!(ledger.tally(proposal_id(5)), before);
    assert_eq!(ledger.vote_of(proposal_id(5), user(8)), Some(VoteChoice::For));
    assert_eq!(ConsoleError::from(err), ConsoleError::DuplicateVote);
}

#[test]
fn distinct_voters_and_proposals_are_independent() {
    let mut ledger = VoteLedger::new();
    ledger.cast(&citizen(8), proposal_id(5), VoteChoice::For).unwrap();
    ledger.cast(&citizen(9), proposal_id(5), VoteChoice::Against).unwrap();
    ledger.cast(&citizen(8), proposal_id(6), VoteChoice::Against).unwrap();
    assert_eq!(
        ledger.tally(proposal_id(5)),
        VoteSummary {
            for_votes: 1,
            against_votes: 1,
        }
    );
    assert_eq!(ledger.tally(proposal_id(6)).against_votes, 1);
}

#[test]
fn non_citizens_cannot_vote() {
    let mut ledger = VoteLedger::new();
    let err = ledger.cast(&galactic_leader(), proposal_id(5), VoteChoice::For).unwrap_err();
    assert!(matches!(err, VoteError::Unauthorized(_)));
    assert_eq!(ledger.tally(proposal_id(5)), VoteSummary::default());
}

#[test]
fn decided_proposals_are_closed() {
    let mut ledger = VoteLedger::new();
    ledger.track(proposal_id(5), EntityStatus::Approved);
    let err = ledger.cast(&citizen(8), proposal_id(5), VoteChoice::For).unwrap_err();
    assert!(matches!(err, VoteError::Closed { .. }));
}

#[test]
fn ballot_seeds_existing_vote_and_baseline() {
    let ballot: Vec<BallotProposal> = serde_json::from_value(json!([
        {
            "ProposalID": 5,
            "PlanetID": 10,
            "ProposedBy": 3,
            "ProposalType": "Modification",
            "Details": "Add a moon",
            "Status": "Pending",
            "DateProposed": "2025-03-01T10:00:00Z",
            "hasVoted": true,
            "userVote": "For",
            "voteSummary": { "for": 4, "against": 2 }
        },
        {
            "ProposalID": 6,
            "PlanetID": 10,
            "ProposedBy": 3,
            "Status": "Pending",
            "DateProposed": "2025-03-02T10:00:00Z",
            "hasVoted": false,
            "userVote": null,
            "voteSummary": { "for": 0, "against": 1 }
        }
    ]))
    .unwrap();

    let mut ledger = VoteLedger::from_ballot(user(8), &ballot);
    assert_eq!(
        ledger.tally(proposal_id(5)),
        VoteSummary {
            for_votes: 4,
            against_votes: 2,
        }
    );
    let err = ledger.cast(&citizen(8), proposal_id(5), VoteChoice::Against).unwrap_err();
    assert!(matches!(err, VoteError::DuplicateVote { .. }));

    ledger.cast(&citizen(8), proposal_id(6), VoteChoice::For).unwrap();
    assert_eq!(
        ledger.tally(proposal_id(6)),
        VoteSummary {
            for_votes: 1,
            against_votes: 1,
        }
    );
}

#[test]
fn voted_flag_without_choice_still_blocks_a_second_vote() {
    let ballot: Vec<BallotProposal> = serde_json::from_value(json!([{
        "ProposalID": 5,
        "PlanetID": 10,
        "ProposedBy": 3,
        "Status": "Pending",
        "DateProposed": "2025-03-01T10:00:00Z",
        "hasVoted": true,
        "userVote": null,
        "voteSummary": { "for": 3, "against": 1 }
    }]))
    .unwrap();

    let mut ledger = VoteLedger::from_ballot(user(8), &ballot);
    assert!(ledger.has_voted(proposal_id(5), user(8)));
    assert_eq!(ledger.vote_of(proposal_id(5), user(8)), None);
    let err = ledger.cast(&citizen(8), proposal_id(5), VoteChoice::For).unwrap_err();
    assert!(matches!(err, VoteError::DuplicateVote { .. }));
    assert_eq!(
        ledger.tally(proposal_id(5)),
        VoteSummary {
            for_votes: 3,
            against_votes: 1,
        }
    );
}

#[test]
fn tally_saturates_at_the_counter_limit() {
    let ballot: Vec<BallotProposal> = serde_json::from_value(json!([{
        "ProposalID": 5,
        "PlanetID": 10,
        "ProposedBy": 3,
        "Status": "Pending",
        "DateProposed": "2025-03-01T10:00:00Z",
        "hasVoted": false,
        "userVote": null,
        "voteSummary": { "for": u64::MAX, "against": 0 }
    }]))
    .unwrap();

    let mut ledger = VoteLedger::from_ballot(user(8), &ballot);
    ledger.cast(&citizen(8), proposal_id(5), VoteChoice::For).unwrap();
    assert_eq!(ledger.tally(proposal_id(5)).for_votes, u64::MAX);
}
