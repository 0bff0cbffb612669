// crates/solar-console-client/src/http.rs
// ============================================================================
// Module: Backend HTTP Client
// Description: Cookie-session REST client for the solar system backend.
// Purpose: Map every backend endpoint to a typed call with the error taxonomy applied.
// Dependencies: reqwest, serde, solar-console-core, solar-console-config, url
// ============================================================================

//! ## Overview
//! [`BackendClient`] wraps a `reqwest` client configured from
//! [`BackendConfig`]: request and connect timeouts, no redirects, and a hard
//! cap on response body size. The session cookie captured at login is kept in
//! a [`SessionTokenStore`] and replayed as the `Cookie` header on every call.
//!
//! Security posture: backend responses are untrusted. Bodies are size-limited,
//! decoding fails closed, and error previews are truncated. The session
//! cookie never appears in errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::Response;
use reqwest::header::ACCEPT;
use reqwest::header::COOKIE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::SET_COOKIE;
use reqwest::header::USER_AGENT;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use solar_console_config::BackendConfig;
use solar_console_core::AuthBackend;
use solar_console_core::BackendError;
use solar_console_core::BackendMessage;
use solar_console_core::BallotProposal;
use solar_console_core::Citizen;
use solar_console_core::CitizenId;
use solar_console_core::CitizenshipRequest;
use solar_console_core::CitizenshipRequestId;
use solar_console_core::CitizenshipTransfer;
use solar_console_core::Credentials;
use solar_console_core::DecisionBody;
use solar_console_core::Identity;
use solar_console_core::LeaderAssignment;
use solar_console_core::LoginResponse;
use solar_console_core::NewCitizen;
use solar_console_core::NewModificationRequest;
use solar_console_core::NewPlanet;
use solar_console_core::Planet;
use solar_console_core::PlanetId;
use solar_console_core::PlanetaryLeader;
use solar_console_core::Proposal;
use solar_console_core::ProposalId;
use solar_console_core::Registration;
use solar_console_core::SessionToken;
use solar_console_core::SessionTokenStore;
use solar_console_core::UserId;
use solar_console_core::UserSummary;
use solar_console_core::Verdict;
use solar_console_core::VoteBody;
use solar_console_core::VoteChoice;
use url::Url;

use crate::ClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default user agent sent when the config does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("solar-console/", env!("CARGO_PKG_VERSION"));

/// Maximum characters of an error body echoed into messages.
const MAX_ERROR_PREVIEW_CHARS: usize = 256;

// ============================================================================
// SECTION: Call Classification
// ============================================================================

/// Endpoint family, used to classify rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    /// `POST /api/auth/login`.
    Login,
    /// Proposal or citizenship request decisions.
    Decide,
    /// Vote casting.
    Vote,
    /// Everything else.
    Other,
}

/// Successful response.
struct Reply {
    /// Response body bytes.
    body: Vec<u8>,
    /// Session cookie captured from `Set-Cookie`.
    cookie: Option<SessionToken>,
}

/// `GET /api/auth/me` payload; the backend returns either the bare user or
/// the login envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum SessionReply {
    /// `{"user": {...}}`.
    Wrapped(LoginResponse),
    /// `{...}`.
    Bare(Identity),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// REST client for the solar system backend.
pub struct BackendClient {
    /// Underlying HTTP client.
    client: Client,
    /// Backend base URL.
    base_url: Url,
    /// Response body cap in bytes.
    max_response_bytes: usize,
    /// Session cookie persistence.
    tokens: Arc<dyn SessionTokenStore>,
}

impl BackendClient {
    /// Builds a client from validated backend settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(
        config: &BackendConfig,
        tokens: Arc<dyn SessionTokenStore>,
    ) -> Result<Self, ClientError> {
        let base_url = config.url().map_err(|err| ClientError::Config(err.to_string()))?;
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| ClientError::Config("invalid user agent header".to_string()))?,
        );
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            max_response_bytes: config.max_response_bytes,
            tokens,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns true when a session cookie is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::TokenStore`] when the store cannot be read.
    pub fn has_session_token(&self) -> Result<bool, BackendError> {
        Ok(self.tokens.load()?.is_some())
    }

    /// Drops the persisted session cookie without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::TokenStore`] when the store cannot be cleared.
    pub fn forget_session(&self) -> Result<(), BackendError> {
        Ok(self.tokens.clear()?)
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// `GET /api/auth/users`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn users(&self) -> Result<Vec<UserSummary>, BackendError> {
        self.get_json("/api/auth/users").await
    }

    // ------------------------------------------------------------------------
    // Planets
    // ------------------------------------------------------------------------

    /// `GET /api/planets`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn planets(&self) -> Result<Vec<Planet>, BackendError> {
        self.get_json("/api/planets").await
    }

    /// `GET /api/planets/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn planet(&self, planet: PlanetId) -> Result<Planet, BackendError> {
        self.get_json(&format!("/api/planets/{planet}")).await
    }

    /// `GET /api/planets/{id}/details` (leader view of the managed planet).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn planet_details(&self, planet: PlanetId) -> Result<Planet, BackendError> {
        self.get_json(&format!("/api/planets/{planet}/details")).await
    }

    /// `POST /api/planets`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or status failure.
    pub async fn create_planet(&self, planet: &NewPlanet) -> Result<(), BackendError> {
        self.post("/api/planets", planet, CallKind::Other).await
    }

    /// `POST /api/planets/{id}/leader`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or status failure.
    pub async fn assign_leader(
        &self,
        planet: PlanetId,
        assignment: &LeaderAssignment,
    ) -> Result<(), BackendError> {
        self.post(&format!("/api/planets/{planet}/leader"), assignment, CallKind::Other).await
    }

    /// `GET /api/planetary-leaders`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn planetary_leaders(&self) -> Result<Vec<PlanetaryLeader>, BackendError> {
        self.get_json("/api/planetary-leaders").await
    }

    // ------------------------------------------------------------------------
    // Citizens
    // ------------------------------------------------------------------------

    /// `GET /api/planets/{id}/citizens`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn citizens_on_planet(&self, planet: PlanetId) -> Result<Vec<Citizen>, BackendError> {
        self.get_json(&format!("/api/planets/{planet}/citizens")).await
    }

    /// `POST /api/citizens`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or status failure.
    pub async fn create_citizen(&self, citizen: &NewCitizen) -> Result<(), BackendError> {
        self.post("/api/citizens", citizen, CallKind::Other).await
    }

    /// `GET /api/citizens/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn citizen(&self, citizen: CitizenId) -> Result<Citizen, BackendError> {
        self.get_json(&format!("/api/citizens/{citizen}")).await
    }

    /// `GET /api/citizens/{id}/profile`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn citizen_profile(&self, citizen: CitizenId) -> Result<Citizen, BackendError> {
        self.get_json(&format!("/api/citizens/{citizen}/profile")).await
    }

    /// `GET /api/citizen/me`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn my_citizenship(&self) -> Result<Citizen, BackendError> {
        self.get_json("/api/citizen/me").await
    }

    /// `GET /api/citizen/planets` (transfer targets).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn transfer_targets(&self) -> Result<Vec<Planet>, BackendError> {
        self.get_json("/api/citizen/planets").await
    }

    // ------------------------------------------------------------------------
    // Proposals and votes
    // ------------------------------------------------------------------------

    /// `GET /api/citizen/proposals` (ballot view).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn ballot(&self) -> Result<Vec<BallotProposal>, BackendError> {
        self.get_json("/api/citizen/proposals").await
    }

    /// `GET /api/planets/{id}/modification-requests`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn modification_requests(
        &self,
        planet: PlanetId,
    ) -> Result<Vec<Proposal>, BackendError> {
        self.get_json(&format!("/api/planets/{planet}/modification-requests")).await
    }

    /// `GET /api/planets/{id}/modification-requests/{rid}`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn modification_request(
        &self,
        planet: PlanetId,
        request: ProposalId,
    ) -> Result<Proposal, BackendError> {
        self.get_json(&format!("/api/planets/{planet}/modification-requests/{request}")).await
    }

    /// `POST /api/planets/{id}/modification-requests`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or status failure.
    pub async fn submit_modification_request(
        &self,
        planet: PlanetId,
        request: &NewModificationRequest,
    ) -> Result<(), BackendError> {
        self.post(&format!("/api/planets/{planet}/modification-requests"), request, CallKind::Other)
            .await
    }

    /// `POST /api/planets/{id}/modification-requests/{rid}/vote`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::DuplicateVote`] when the backend reports an
    /// existing vote, otherwise the mapped failure.
    pub async fn cast_vote(
        &self,
        planet: PlanetId,
        proposal: ProposalId,
        choice: VoteChoice,
    ) -> Result<(), BackendError> {
        let body = VoteBody {
            vote_type: choice,
        };
        self.post(
            &format!("/api/planets/{planet}/modification-requests/{proposal}/vote"),
            &body,
            CallKind::Vote,
        )
        .await
    }

    /// `GET /api/proposals`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn proposals(&self) -> Result<Vec<Proposal>, BackendError> {
        self.get_json("/api/proposals").await
    }

    /// `POST /api/proposals/{id}/decide`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::AlreadyDecided`] when the backend reports the
    /// proposal as decided, otherwise the mapped failure.
    pub async fn decide_proposal(
        &self,
        proposal: ProposalId,
        verdict: Verdict,
    ) -> Result<(), BackendError> {
        let body = DecisionBody {
            decision: verdict,
        };
        self.post(&format!("/api/proposals/{proposal}/decide"), &body, CallKind::Decide).await
    }

    // ------------------------------------------------------------------------
    // Citizenship requests
    // ------------------------------------------------------------------------

    /// `GET /api/citizens/{id}/citizenship-request`.
    ///
    /// A 404 means the citizen has no requests and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn citizenship_requests(
        &self,
        citizen: CitizenId,
    ) -> Result<Vec<CitizenshipRequest>, BackendError> {
        match self.get_json(&format!("/api/citizens/{citizen}/citizenship-request")).await {
            Err(BackendError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// `POST /api/citizens/{id}/citizenship-request`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport or status failure.
    pub async fn submit_citizenship_request(
        &self,
        citizen: CitizenId,
        transfer: &CitizenshipTransfer,
    ) -> Result<(), BackendError> {
        self.post(&format!("/api/citizens/{citizen}/citizenship-request"), transfer, CallKind::Other)
            .await
    }

    /// `GET /api/planets/{id}/citizenship-requests`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport, status, or decode failure.
    pub async fn incoming_citizenship_requests(
        &self,
        planet: PlanetId,
    ) -> Result<Vec<CitizenshipRequest>, BackendError> {
        self.get_json(&format!("/api/planets/{planet}/citizenship-requests")).await
    }

    /// `POST /api/planets/{id}/citizenship-requests/{rid}/decide`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::AlreadyDecided`] when the backend reports the
    /// request as decided, otherwise the mapped failure.
    pub async fn decide_citizenship_request(
        &self,
        planet: PlanetId,
        request: CitizenshipRequestId,
        verdict: Verdict,
    ) -> Result<(), BackendError> {
        let body = DecisionBody {
            decision: verdict,
        };
        self.post(
            &format!("/api/planets/{planet}/citizenship-requests/{request}/decide"),
            &body,
            CallKind::Decide,
        )
        .await
    }

    // ------------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------------

    /// Issues a GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let reply = self.send::<()>(Method::GET, path, None, CallKind::Other).await?;
        decode(&reply.body)
    }

    /// Issues a POST with a JSON body and discards the response body.
    async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
        kind: CallKind,
    ) -> Result<(), BackendError> {
        self.send(Method::POST, path, Some(body), kind).await.map(|_| ())
    }

    /// Sends a request with the persisted session cookie attached.
    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        kind: CallKind,
    ) -> Result<Reply, BackendError> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, url);
        if let Some(token) = self.tokens.load()? {
            let value = HeaderValue::from_str(token.expose()).map_err(|_| {
                BackendError::TokenStore("stored session token is not a valid header".to_string())
            })?;
            request = request.header(COOKIE, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| BackendError::Network(err.to_string()))?;
        let status = response.status();
        let cookie = if kind == CallKind::Login { capture_cookie(response.headers()) } else { None };
        let body = read_response_body_with_limit(response, self.max_response_bytes).await?;
        if !status.is_success() {
            return Err(map_status(status.as_u16(), &body, kind));
        }
        Ok(Reply {
            body,
            cookie,
        })
    }

    /// Joins an absolute API path onto the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|err| BackendError::Decode(format!("invalid endpoint {path}: {err}")))
    }
}

// ============================================================================
// SECTION: Auth Backend
// ============================================================================

#[async_trait]
impl AuthBackend for BackendClient {
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError> {
        let reply = self.send(Method::POST, "/api/auth/login", Some(credentials), CallKind::Login).await?;
        let response: LoginResponse = decode(&reply.body)?;
        let Some(cookie) = reply.cookie else {
            return Err(BackendError::Decode("login response carried no session cookie".to_string()));
        };
        self.tokens.save(&cookie)?;
        Ok(response.user)
    }

    async fn logout(&self) -> Result<(), BackendError> {
        let result = self.send::<()>(Method::POST, "/api/auth/logout", None, CallKind::Other).await;
        self.tokens.clear()?;
        result.map(|_| ())
    }

    async fn current_session(&self) -> Result<Identity, BackendError> {
        if self.tokens.load()?.is_none() {
            return Err(BackendError::Unauthorized);
        }
        match self.get_json::<SessionReply>("/api/auth/me").await {
            Ok(SessionReply::Wrapped(response)) => Ok(response.user),
            Ok(SessionReply::Bare(identity)) => Ok(identity),
            Err(BackendError::Unauthorized) => {
                self.tokens.clear()?;
                Err(BackendError::Unauthorized)
            }
            Err(err) => Err(err),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), BackendError> {
        self.post("/api/auth/register", registration, CallKind::Other).await
    }

    async fn managed_planet(&self, user: UserId) -> Result<Option<PlanetId>, BackendError> {
        let leaders = self.planetary_leaders().await?;
        Ok(leaders
            .into_iter()
            .find(|leader| leader.user.as_ref().is_some_and(|summary| summary.user_id == user))
            .map(|leader| leader.planet_id))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] when the body exceeds `max_bytes` and
/// [`BackendError::Network`] when the stream fails.
async fn read_response_body_with_limit(
    mut response: Response,
    max_bytes: usize,
) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let mut total = 0usize;
    while let Some(chunk) =
        response.chunk().await.map_err(|err| BackendError::Network(err.to_string()))?
    {
        total = total.checked_add(chunk.len()).ok_or_else(|| too_large(max_bytes))?;
        if total > max_bytes {
            return Err(too_large(max_bytes));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Builds the oversized-response error.
fn too_large(max_bytes: usize) -> BackendError {
    BackendError::Decode(format!("response body exceeds {max_bytes} bytes"))
}

/// Decodes a JSON body, failing closed.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|err| BackendError::Decode(err.to_string()))
}

/// Joins the `name=value` pairs of every `Set-Cookie` header.
pub(crate) fn capture_cookie(headers: &HeaderMap) -> Option<SessionToken> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();
    if pairs.is_empty() { None } else { Some(SessionToken::new(pairs.join("; "))) }
}

/// Maps a non-success status onto the backend error taxonomy.
pub(crate) fn map_status(status: u16, body: &[u8], kind: CallKind) -> BackendError {
    let parsed: BackendMessage = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| preview(body));
    match status {
        401 if kind == CallKind::Login => BackendError::InvalidCredentials,
        401 => BackendError::Unauthorized,
        403 => BackendError::Forbidden(message),
        404 => BackendError::NotFound(message),
        409 => match kind {
            CallKind::Decide => BackendError::AlreadyDecided,
            CallKind::Vote => BackendError::DuplicateVote,
            CallKind::Login | CallKind::Other => BackendError::Status {
                status,
                message,
            },
        },
        400 | 422 => {
            let already = message.to_ascii_lowercase().contains("already");
            match kind {
                CallKind::Decide if already => BackendError::AlreadyDecided,
                CallKind::Vote if already => BackendError::DuplicateVote,
                _ => BackendError::Validation {
                    field: parsed.field.unwrap_or_else(|| "request".to_string()),
                    message,
                },
            }
        }
        _ => BackendError::Status {
            status,
            message,
        },
    }
}

/// Returns a truncated, lossy UTF-8 preview of an error body.
fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(MAX_ERROR_PREVIEW_CHARS).collect()
}
