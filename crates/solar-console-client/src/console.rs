// crates/solar-console-client/src/console.rs
// ============================================================================
// Module: Console Workflows
// Description: Guarded, exactly-once workflows over the backend client.
// Purpose: Run every console action as precheck, submit, and authoritative re-fetch.
// Dependencies: solar-console-core, solar-console-config
// ============================================================================

//! ## Overview
//! [`Console`] owns the session context for one user and exposes one method
//! per console workflow. Every workflow follows the same order:
//!
//! 1. Require an identity and check the policy. Denials are audited and no
//!    request reaches the backend.
//! 2. Validate the form locally.
//! 3. Claim the submission key, so the same action on the same target cannot
//!    be re-issued while in flight.
//! 4. Call the backend.
//! 5. Re-fetch the affected view and return the backend's state, never the
//!    local prediction.
//!
//! A decision or vote the backend accepted is never reported as a failure.
//! When only the re-fetch fails, the local outcome is returned with
//! `confirmed: false` and the failure is audited.
//!
//! Decide and vote workflows additionally apply the local state machine
//! (`decide`, `VoteLedger`) to the freshly fetched entity before submitting,
//! so stale or duplicate actions fail without a backend round trip.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use solar_console_config::AuditSinkKind;
use solar_console_config::ConsoleConfig;
use solar_console_config::TokenStoreKind;
use solar_console_core::AuditEvent;
use solar_console_core::AuditEventKind;
use solar_console_core::AuditSink;
use solar_console_core::AuthBackend;
use solar_console_core::AuthorizationDenied;
use solar_console_core::BackendError;
use solar_console_core::BallotProposal;
use solar_console_core::Citizen;
use solar_console_core::CitizenId;
use solar_console_core::CitizenshipRequest;
use solar_console_core::CitizenshipRequestId;
use solar_console_core::CitizenshipTransfer;
use solar_console_core::ConsoleError;
use solar_console_core::Credentials;
use solar_console_core::Decided;
use solar_console_core::DecisionRecord;
use solar_console_core::DenialReason;
use solar_console_core::EntityStatus;
use solar_console_core::EntityRef;
use solar_console_core::GuardDecision;
use solar_console_core::Identity;
use solar_console_core::InMemorySessionTokenStore;
use solar_console_core::LeaderAssignment;
use solar_console_core::ManagedPlanet;
use solar_console_core::MenuEntry;
use solar_console_core::NewCitizen;
use solar_console_core::NewModificationRequest;
use solar_console_core::NewPlanet;
use solar_console_core::OwnedByUser;
use solar_console_core::OwnershipPredicate;
use solar_console_core::Planet;
use solar_console_core::PlanetId;
use solar_console_core::PlanetaryLeader;
use solar_console_core::Proposal;
use solar_console_core::ProposalId;
use solar_console_core::Registration;
use solar_console_core::ResourceAction;
use solar_console_core::Role;
use solar_console_core::SessionState;
use solar_console_core::SessionStore;
use solar_console_core::SessionTokenStore;
use solar_console_core::SubmissionGate;
use solar_console_core::Timestamp;
use solar_console_core::TransitionError;
use solar_console_core::UserId;
use solar_console_core::UserSummary;
use solar_console_core::Verdict;
use solar_console_core::VoteChoice;
use solar_console_core::VoteError;
use solar_console_core::VoteLedger;
use solar_console_core::VoteSummary;
use solar_console_core::authorize;
use solar_console_core::decide;
use solar_console_core::guard;
use solar_console_core::is_allowed;
use solar_console_core::navigation_menu;
use solar_console_core::runtime::FileAuditSink;
use solar_console_core::runtime::NoopAuditSink;
use solar_console_core::runtime::RouteMatch;
use solar_console_core::runtime::StatusfulEntity;
use solar_console_core::runtime::StderrAuditSink;
use solar_console_core::runtime::SubmissionKey;
use solar_console_core::runtime::SubmissionTicket;
use solar_console_core::runtime::Vote;
use solar_console_core::runtime::match_route;
use solar_console_core::runtime::reconcile;

use crate::BackendClient;
use crate::ClientError;
use crate::FileSessionTokenStore;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Resolved route and parameters.
    #[serde(rename = "match")]
    pub route: RouteMatch,
    /// Guard outcome.
    pub decision: GuardDecision,
    /// Redirect target when the guard redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Result of a decide workflow after the authoritative re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionOutcome<E> {
    /// Locally recorded decision.
    pub record: DecisionRecord,
    /// Entity as reported by the backend after the decision.
    pub entity: E,
    /// True when the backend status differs from the submitted verdict.
    pub diverged: bool,
    /// False when the backend accepted the decision but the re-fetch failed.
    pub confirmed: bool,
}

/// Result of a vote workflow after the authoritative re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    /// Recorded vote.
    pub vote: Vote,
    /// Tally after the vote.
    pub tally: VoteSummary,
    /// False when the backend accepted the vote but the re-fetch failed.
    pub confirmed: bool,
}

// ============================================================================
// SECTION: Console
// ============================================================================

/// Session-scoped console over the REST backend.
pub struct Console {
    /// Backend client.
    client: Arc<BackendClient>,
    /// Live session context.
    session: SessionStore,
    /// Audit sink for workflow events.
    audit: Arc<dyn AuditSink>,
    /// In-flight submission keys.
    gate: SubmissionGate,
}

impl Console {
    /// Creates a console with an unresolved session.
    #[must_use]
    pub fn new(client: Arc<BackendClient>, audit: Arc<dyn AuditSink>) -> Self {
        let backend: Arc<dyn AuthBackend> = Arc::clone(&client) as Arc<dyn AuthBackend>;
        let session = SessionStore::new(backend, Arc::clone(&audit));
        Self {
            client,
            session,
            audit,
            gate: SubmissionGate::new(),
        }
    }

    /// Builds the token store, audit sink, and backend client from config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the client or audit sink cannot be built.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ClientError> {
        let tokens: Arc<dyn SessionTokenStore> = match config.session.token_store {
            TokenStoreKind::File => {
                Arc::new(FileSessionTokenStore::new(&config.session.token_path))
            }
            TokenStoreKind::Memory => Arc::new(InMemorySessionTokenStore::new()),
        };
        let audit: Arc<dyn AuditSink> = match config.audit.sink {
            AuditSinkKind::Stderr => Arc::new(StderrAuditSink),
            AuditSinkKind::None => Arc::new(NoopAuditSink),
            AuditSinkKind::File => {
                let path = config
                    .audit
                    .path
                    .as_deref()
                    .ok_or_else(|| ClientError::Audit("audit.path is required".to_string()))?;
                let sink = FileAuditSink::new(Path::new(path))
                    .map_err(|err| ClientError::Audit(err.to_string()))?;
                Arc::new(sink)
            }
        };
        let client = BackendClient::new(&config.backend, tokens)?;
        Ok(Self::new(Arc::new(client), audit))
    }

    /// Returns the backend client.
    #[must_use]
    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        self.session.state()
    }

    /// Returns the live identity without I/O.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.session.current_identity()
    }

    /// Restores the persisted session. Failures resolve to anonymous.
    pub async fn restore(&mut self) -> Option<Identity> {
        self.session.restore_session().await
    }

    /// Logs in, replacing any previous identity.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidCredentials`] or the mapped transport
    /// failure.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Identity, ConsoleError> {
        self.session.authenticate(credentials).await.map_err(ConsoleError::from)
    }

    /// Logs out. Idempotent.
    pub async fn logout(&mut self) {
        self.session.deauthenticate().await;
    }

    /// Registers an account without touching the session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ValidationFailed`] for local form errors,
    /// otherwise the mapped backend failure.
    pub async fn register(&self, registration: &Registration) -> Result<(), ConsoleError> {
        self.session.register(registration).await.map_err(ConsoleError::from)
    }

    /// Returns the navigation menu for the live identity.
    #[must_use]
    pub fn menu(&self) -> Vec<MenuEntry> {
        self.identity().map(|identity| navigation_menu(identity.role)).unwrap_or_default()
    }

    /// Resolves a path and runs the route guard against the live session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotFound`] when no route matches.
    pub fn navigate(&self, path: &str) -> Result<Navigation, ConsoleError> {
        let route =
            match_route(path).ok_or_else(|| ConsoleError::NotFound(format!("route {path}")))?;
        let decision =
            guard(self.identity(), self.session.is_resolved(), route.route.requirement());
        if decision == GuardDecision::RedirectToUnauthorized {
            let mut event = AuditEvent::new(AuditEventKind::AuthorizationDenied)
                .with_detail(format!("route {}", route.route.pattern()));
            if let Some(identity) = self.identity() {
                event = event.with_identity(identity);
            }
            self.audit.record(&event);
        }
        Ok(Navigation {
            route,
            decision,
            redirect: decision.redirect_path(),
        })
    }

    // ------------------------------------------------------------------------
    // Planets and leaders
    // ------------------------------------------------------------------------

    /// Lists all planets.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn planets(&self) -> Result<Vec<Planet>, ConsoleError> {
        self.permit(ResourceAction::PLANET_VIEW_ANY, None)?;
        Ok(self.client.planets().await?)
    }

    /// Fetches one planet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn planet(&self, planet: PlanetId) -> Result<Planet, ConsoleError> {
        self.permit(ResourceAction::PLANET_VIEW_ANY, None)?;
        Ok(self.client.planet(planet).await?)
    }

    /// Fetches the leader view of a managed planet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] unless the identity manages the planet.
    pub async fn managed_planet(&self, planet: PlanetId) -> Result<Planet, ConsoleError> {
        self.permit(ResourceAction::PLANET_VIEW_MANAGED, Some(&ManagedPlanet(planet)))?;
        Ok(self.client.planet_details(planet).await?)
    }

    /// Creates a planet and returns the refreshed planet list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial, invalid input, a duplicate
    /// submission, or backend failure.
    pub async fn create_planet(&self, planet: &NewPlanet) -> Result<Vec<Planet>, ConsoleError> {
        let action = ResourceAction::PLANET_CREATE;
        let identity = self.permit(action, None)?;
        planet.validate()?;
        let ticket = self.begin(&identity, action, planet.name.trim())?;
        self.client.create_planet(planet).await?;
        drop(ticket);
        Ok(self.client.planets().await?)
    }

    /// Lists users eligible for planetary leadership.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn leader_candidates(&self) -> Result<Vec<UserSummary>, ConsoleError> {
        self.permit(ResourceAction::PLANET_ASSIGN_LEADER, None)?;
        let users = self.client.users().await?;
        Ok(users.into_iter().filter(|user| user.role != Role::GalacticLeader).collect())
    }

    /// Assigns a planetary leader and returns the refreshed leader list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial, a duplicate submission, or backend
    /// failure.
    pub async fn assign_leader(
        &self,
        planet: PlanetId,
        user: UserId,
    ) -> Result<Vec<PlanetaryLeader>, ConsoleError> {
        let action = ResourceAction::PLANET_ASSIGN_LEADER;
        let identity = self.permit(action, None)?;
        let ticket = self.begin(&identity, action, planet)?;
        let assignment = LeaderAssignment {
            user_id: user,
        };
        self.client.assign_leader(planet, &assignment).await?;
        drop(ticket);
        Ok(self.client.planetary_leaders().await?)
    }

    /// Lists planetary leaders.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn planetary_leaders(&self) -> Result<Vec<PlanetaryLeader>, ConsoleError> {
        self.permit(ResourceAction::PLANETARY_LEADER_VIEW_ALL, None)?;
        Ok(self.client.planetary_leaders().await?)
    }

    // ------------------------------------------------------------------------
    // Citizens
    // ------------------------------------------------------------------------

    /// Lists citizens of a managed planet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] unless the identity manages the planet.
    pub async fn citizens_on_planet(&self, planet: PlanetId) -> Result<Vec<Citizen>, ConsoleError> {
        self.permit(ResourceAction::CITIZEN_LIST_ON_PLANET, Some(&ManagedPlanet(planet)))?;
        Ok(self.client.citizens_on_planet(planet).await?)
    }

    /// Lists users that may be granted citizenship.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn citizen_candidates(&self) -> Result<Vec<UserSummary>, ConsoleError> {
        self.permit_role(ResourceAction::CITIZEN_CREATE)?;
        let users = self.client.users().await?;
        Ok(users.into_iter().filter(|user| user.role == Role::Citizen).collect())
    }

    /// Grants citizenship on a managed planet and returns the refreshed
    /// citizen list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial, a duplicate submission, or backend
    /// failure.
    pub async fn create_citizen(&self, citizen: &NewCitizen) -> Result<Vec<Citizen>, ConsoleError> {
        let action = ResourceAction::CITIZEN_CREATE;
        let identity = self.permit(action, Some(&ManagedPlanet(citizen.planet_id)))?;
        let ticket =
            self.begin(&identity, action, format_args!("{}/{}", citizen.planet_id, citizen.user_id))?;
        self.client.create_citizen(citizen).await?;
        drop(ticket);
        Ok(self.client.citizens_on_planet(citizen.planet_id).await?)
    }

    /// Fetches a citizen record.
    ///
    /// Leaders may read citizens of their managed planet; citizens may read
    /// their own record. Ownership is checked against the fetched record and
    /// a failing check discards it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] when neither rule holds.
    pub async fn citizen(&self, citizen: CitizenId) -> Result<Citizen, ConsoleError> {
        let identity = self.actor()?;
        let action = if is_allowed(identity.role, ResourceAction::CITIZEN_LIST_ON_PLANET) {
            ResourceAction::CITIZEN_LIST_ON_PLANET
        } else {
            ResourceAction::CITIZEN_VIEW_OWN_PROFILE
        };
        self.permit_role(action)?;
        let record = self.client.citizen(citizen).await?;
        if action == ResourceAction::CITIZEN_LIST_ON_PLANET {
            self.permit(action, Some(&ManagedPlanet(record.planet_id)))?;
        } else {
            self.permit_owner(&record)?;
        }
        Ok(record)
    }

    /// Fetches the acting citizen's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] when the profile belongs to someone else.
    pub async fn citizen_profile(&self, citizen: CitizenId) -> Result<Citizen, ConsoleError> {
        self.permit_role(ResourceAction::CITIZEN_VIEW_OWN_PROFILE)?;
        let record = self.client.citizen_profile(citizen).await?;
        self.permit_owner(&record)?;
        Ok(record)
    }

    /// Fetches the citizenship bound to the session.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn my_citizenship(&self) -> Result<Citizen, ConsoleError> {
        self.permit_role(ResourceAction::CITIZEN_VIEW_OWN_PROFILE)?;
        Ok(self.client.my_citizenship().await?)
    }

    // ------------------------------------------------------------------------
    // Proposals
    // ------------------------------------------------------------------------

    /// Lists modification requests of a managed planet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] unless the identity manages the planet.
    pub async fn modification_requests(
        &self,
        planet: PlanetId,
    ) -> Result<Vec<Proposal>, ConsoleError> {
        self.permit(ResourceAction::PROPOSAL_SUBMIT_MODIFICATION, Some(&ManagedPlanet(planet)))?;
        Ok(self.client.modification_requests(planet).await?)
    }

    /// Submits a modification request for a managed planet and returns the
    /// refreshed request list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial, invalid input, a duplicate
    /// submission, or backend failure.
    pub async fn submit_modification_request(
        &self,
        planet: PlanetId,
        request: &NewModificationRequest,
    ) -> Result<Vec<Proposal>, ConsoleError> {
        let action = ResourceAction::PROPOSAL_SUBMIT_MODIFICATION;
        let identity = self.permit(action, Some(&ManagedPlanet(planet)))?;
        request.validate()?;
        let ticket = self.begin(&identity, action, planet)?;
        self.client.submit_modification_request(planet, request).await?;
        drop(ticket);
        Ok(self.client.modification_requests(planet).await?)
    }

    /// Fetches one modification request for a voting citizen.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn modification_request(
        &self,
        planet: PlanetId,
        request: ProposalId,
    ) -> Result<Proposal, ConsoleError> {
        self.permit(ResourceAction::PROPOSAL_VIEW_BALLOT, None)?;
        Ok(self.client.modification_request(planet, request).await?)
    }

    /// Lists proposals for review, optionally only those in `status`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn proposals(
        &self,
        status: Option<EntityStatus>,
    ) -> Result<Vec<Proposal>, ConsoleError> {
        self.permit(ResourceAction::PROPOSAL_VIEW_ALL, None)?;
        let proposals = self.client.proposals().await?;
        Ok(match status {
            Some(wanted) => proposals.into_iter().filter(|p| p.status == wanted).collect(),
            None => proposals,
        })
    }

    /// Approves or rejects a pending proposal.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::AlreadyDecided`] when the freshly fetched
    /// proposal is not pending, [`ConsoleError::NotFound`] when it does not
    /// exist, otherwise the mapped denial or backend failure.
    pub async fn decide_proposal(
        &self,
        proposal: ProposalId,
        verdict: Verdict,
    ) -> Result<DecisionOutcome<Proposal>, ConsoleError> {
        let action = ResourceAction::PROPOSAL_DECIDE;
        let identity = self.permit(action, None)?;
        let current = find(self.client.proposals().await?, |p| p.proposal_id == proposal)
            .ok_or_else(|| ConsoleError::NotFound(format!("proposal {proposal}")))?;
        let decided = self.apply_decision(&identity, &current, verdict)?;
        let ticket = self.begin(&identity, action, proposal)?;
        self.client.decide_proposal(proposal, verdict).await?;
        self.record_decision(&identity, &current, verdict);
        drop(ticket);
        let refreshed = self.refetched(&identity, action, self.client.proposals().await);
        Ok(outcome(decided, refreshed.map(|list| find(list, |p| p.proposal_id == proposal))))
    }

    /// Returns the acting citizen's ballot.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn ballot(&self) -> Result<Vec<BallotProposal>, ConsoleError> {
        self.permit(ResourceAction::PROPOSAL_VIEW_BALLOT, None)?;
        Ok(self.client.ballot().await?)
    }

    /// Casts a vote on a pending proposal.
    ///
    /// The ballot is fetched first; a vote already recorded for the acting
    /// user is rejected locally and the tally is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::DuplicateVote`] for a second vote,
    /// [`ConsoleError::AlreadyDecided`] for a closed proposal, otherwise the
    /// mapped denial or backend failure.
    pub async fn cast_vote(
        &self,
        proposal: ProposalId,
        choice: VoteChoice,
    ) -> Result<VoteReceipt, ConsoleError> {
        let action = ResourceAction::PROPOSAL_VOTE_CAST;
        let identity = self.permit(action, None)?;
        let ballot = self.client.ballot().await?;
        let entry = find(ballot.iter().cloned(), |e| e.proposal.proposal_id == proposal)
            .ok_or_else(|| ConsoleError::NotFound(format!("proposal {proposal}")))?;
        let mut ledger = VoteLedger::from_ballot(identity.id, &ballot);
        let vote = ledger.cast(&identity, proposal, choice).map_err(|err| {
            if matches!(err, VoteError::DuplicateVote { .. }) {
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::DuplicateSubmission)
                        .with_identity(&identity)
                        .with_action(action)
                        .with_entity(EntityRef::Proposal(proposal)),
                );
            }
            ConsoleError::from(err)
        })?;
        let ticket = self.begin(&identity, action, proposal)?;
        self.client.cast_vote(entry.proposal.planet_id, proposal, choice).await?;
        self.audit.record(
            &AuditEvent::new(AuditEventKind::VoteCast)
                .with_identity(&identity)
                .with_action(action)
                .with_entity(EntityRef::Proposal(proposal))
                .with_detail(choice.as_str()),
        );
        drop(ticket);
        let refreshed = self.refetched(&identity, action, self.client.ballot().await);
        let confirmed = refreshed.is_some();
        let tally = refreshed
            .and_then(|ballot| find(ballot, |e| e.proposal.proposal_id == proposal))
            .map_or_else(|| ledger.tally(proposal), |e| e.vote_summary);
        Ok(VoteReceipt {
            vote,
            tally,
            confirmed,
        })
    }

    // ------------------------------------------------------------------------
    // Citizenship requests
    // ------------------------------------------------------------------------

    /// Lists planets a citizen may transfer to.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn transfer_targets(&self) -> Result<Vec<Planet>, ConsoleError> {
        self.permit(ResourceAction::CITIZENSHIP_REQUEST_SUBMIT, None)?;
        Ok(self.client.transfer_targets().await?)
    }

    /// Lists the acting citizen's own transfer requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] on denial or backend failure.
    pub async fn my_citizenship_requests(&self) -> Result<Vec<CitizenshipRequest>, ConsoleError> {
        self.permit(ResourceAction::CITIZENSHIP_REQUEST_SUBMIT, None)?;
        let me = self.client.my_citizenship().await?;
        Ok(self.client.citizenship_requests(me.citizen_id).await?)
    }

    /// Requests a citizenship transfer and returns the refreshed request list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::ValidationFailed`] when the target is the
    /// current planet, [`ConsoleError::PendingRequestExists`] when an earlier
    /// request is still pending, otherwise the mapped denial or backend
    /// failure.
    pub async fn submit_citizenship_request(
        &self,
        transfer: &CitizenshipTransfer,
    ) -> Result<Vec<CitizenshipRequest>, ConsoleError> {
        let action = ResourceAction::CITIZENSHIP_REQUEST_SUBMIT;
        let identity = self.permit(action, None)?;
        let me = self.client.my_citizenship().await?;
        transfer.validate(me.planet_id)?;
        let existing = self.client.citizenship_requests(me.citizen_id).await?;
        if let Some(pending) = existing.iter().find(|r| r.status == EntityStatus::Pending) {
            return Err(ConsoleError::PendingRequestExists(pending.request_id.to_string()));
        }
        let ticket = self.begin(&identity, action, me.citizen_id)?;
        self.client.submit_citizenship_request(me.citizen_id, transfer).await?;
        drop(ticket);
        Ok(self.client.citizenship_requests(me.citizen_id).await?)
    }

    /// Lists transfer requests into a managed planet.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] unless the identity manages the planet.
    pub async fn incoming_citizenship_requests(
        &self,
        planet: PlanetId,
    ) -> Result<Vec<CitizenshipRequest>, ConsoleError> {
        self.permit(ResourceAction::CITIZENSHIP_REQUEST_DECIDE, Some(&ManagedPlanet(planet)))?;
        Ok(self.client.incoming_citizenship_requests(planet).await?)
    }

    /// Approves or rejects a pending transfer into a managed planet.
    ///
    /// The incoming list may omit decided requests; when the decided request
    /// is no longer listed the local decision is reported as the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Forbidden`] before any request when the
    /// identity does not manage `planet`, [`ConsoleError::AlreadyDecided`]
    /// when the request is not pending, otherwise the mapped backend failure.
    pub async fn decide_citizenship_request(
        &self,
        planet: PlanetId,
        request: CitizenshipRequestId,
        verdict: Verdict,
    ) -> Result<DecisionOutcome<CitizenshipRequest>, ConsoleError> {
        let action = ResourceAction::CITIZENSHIP_REQUEST_DECIDE;
        let identity = self.permit(action, Some(&ManagedPlanet(planet)))?;
        let incoming = self.client.incoming_citizenship_requests(planet).await?;
        let current = find(incoming, |r| r.request_id == request)
            .ok_or_else(|| ConsoleError::NotFound(format!("citizenship request {request}")))?;
        let decided = self.apply_decision(&identity, &current, verdict)?;
        let ticket = self.begin(&identity, action, request)?;
        self.client.decide_citizenship_request(planet, request, verdict).await?;
        self.record_decision(&identity, &current, verdict);
        drop(ticket);
        let fetched = self.client.incoming_citizenship_requests(planet).await;
        let refreshed = self.refetched(&identity, action, fetched);
        Ok(outcome(decided, refreshed.map(|list| find(list, |r| r.request_id == request))))
    }

    // ------------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------------

    /// Returns a copy of the live identity.
    fn actor(&self) -> Result<Identity, ConsoleError> {
        self.identity().cloned().ok_or(ConsoleError::Unauthorized)
    }

    /// Full two-layer policy check.
    fn permit(
        &self,
        action: ResourceAction,
        ownership: Option<&dyn OwnershipPredicate>,
    ) -> Result<Identity, ConsoleError> {
        let identity = self.actor()?;
        authorize(&identity, action, ownership).map_err(|denied| self.deny(&identity, denied))?;
        Ok(identity)
    }

    /// Role-level check for actions whose owner is only known after a fetch.
    fn permit_role(&self, action: ResourceAction) -> Result<Identity, ConsoleError> {
        let identity = self.actor()?;
        if !is_allowed(identity.role, action) {
            let denied = AuthorizationDenied {
                role: identity.role,
                action,
                reason: DenialReason::RoleLacksCapability,
            };
            return Err(self.deny(&identity, denied));
        }
        Ok(identity)
    }

    /// Ownership check for a fetched citizen record.
    fn permit_owner(&self, record: &Citizen) -> Result<(), ConsoleError> {
        let owner = record.owner().map(OwnedByUser);
        self.permit(
            ResourceAction::CITIZEN_VIEW_OWN_PROFILE,
            owner.as_ref().map(|p| p as &dyn OwnershipPredicate),
        )
        .map(|_| ())
    }

    /// Audits a denial and converts it.
    fn deny(&self, identity: &Identity, denied: AuthorizationDenied) -> ConsoleError {
        self.audit.record(
            &AuditEvent::new(AuditEventKind::AuthorizationDenied)
                .with_identity(identity)
                .with_action(denied.action)
                .with_detail(denied.reason.as_str()),
        );
        denied.into()
    }

    /// Runs the local state machine, auditing unauthorized decisions.
    fn apply_decision<E: StatusfulEntity>(
        &self,
        identity: &Identity,
        entity: &E,
        verdict: Verdict,
    ) -> Result<Decided<E>, ConsoleError> {
        decide(entity, verdict, identity, now()).map_err(|err| match err {
            TransitionError::Unauthorized(denied) => self.deny(identity, denied),
            other @ TransitionError::AlreadyDecided {
                ..
            } => other.into(),
        })
    }

    /// Audits a submitted decision.
    fn record_decision<E: StatusfulEntity>(&self, identity: &Identity, entity: &E, verdict: Verdict) {
        self.audit.record(
            &AuditEvent::new(AuditEventKind::DecisionSubmitted)
                .with_identity(identity)
                .with_action(E::DECIDE_ACTION)
                .with_entity(entity.entity_ref())
                .with_detail(verdict.to_string()),
        );
    }

    /// Keeps a committed submission when only the follow-up read fails.
    fn refetched<T>(
        &self,
        identity: &Identity,
        action: ResourceAction,
        result: Result<T, BackendError>,
    ) -> Option<T> {
        result
            .inspect_err(|err| {
                self.audit.record(
                    &AuditEvent::new(AuditEventKind::RefreshFailed)
                        .with_identity(identity)
                        .with_action(action)
                        .with_detail(err.to_string()),
                );
            })
            .ok()
    }

    /// Claims a submission key, auditing duplicates.
    fn begin(
        &self,
        identity: &Identity,
        action: ResourceAction,
        target: impl fmt::Display,
    ) -> Result<SubmissionTicket, ConsoleError> {
        let key = SubmissionKey::new(action, target);
        self.gate.try_begin(key.clone()).inspect_err(|_| {
            self.audit.record(
                &AuditEvent::new(AuditEventKind::DuplicateSubmission)
                    .with_identity(identity)
                    .with_action(action)
                    .with_detail(key.as_str()),
            );
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the first item matching `predicate`.
fn find<T>(items: impl IntoIterator<Item = T>, predicate: impl Fn(&T) -> bool) -> Option<T> {
    items.into_iter().find(|item| predicate(item))
}

/// Combines the local decision with the re-fetched entity.
///
/// `refreshed` is `None` when the re-fetch failed and `Some(None)` when it
/// succeeded without listing the entity.
fn outcome<E: StatusfulEntity>(
    decided: Decided<E>,
    refreshed: Option<Option<E>>,
) -> DecisionOutcome<E> {
    let confirmed = refreshed.is_some();
    match refreshed.flatten() {
        Some(fetched) => {
            let reconciled = reconcile(&decided, fetched);
            DecisionOutcome {
                record: decided.record,
                entity: reconciled.entity,
                diverged: reconciled.diverged,
                confirmed,
            }
        }
        None => DecisionOutcome {
            record: decided.record,
            entity: decided.entity,
            diverged: false,
            confirmed,
        },
    }
}

/// Current wall-clock time.
fn now() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or_default();
    Timestamp::UnixMillis(i64::try_from(millis).unwrap_or(i64::MAX))
}
