// crates/solar-console-client/tests/common/mod.rs
// =============================================================================
// Module: Client Test Helpers
// Description: Scripted tiny_http backend and console builders.
// Purpose: Reduce duplication across integration tests for solar-console-client.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test fixtures fail fast on setup errors."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use serde_json::Value;
use serde_json::json;
use solar_console_client::BackendClient;
use solar_console_client::Console;
use solar_console_config::BackendConfig;
use solar_console_core::AuditEventKind;
use solar_console_core::AuditSink;
use solar_console_core::InMemorySessionTokenStore;
use solar_console_core::SessionTokenStore;
use solar_console_core::runtime::RecordingAuditSink;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Scripted Backend
// ============================================================================

/// Canned response for one method and path.
#[derive(Debug, Clone)]
pub struct Canned {
    /// HTTP method.
    pub method: &'static str,
    /// Path without query.
    pub path: String,
    /// Status code.
    pub status: u16,
    /// JSON body.
    pub body: String,
    /// `Set-Cookie` header value.
    pub set_cookie: Option<&'static str>,
    /// Serve for every matching request instead of once.
    pub repeat: bool,
}

impl Canned {
    /// Repeating JSON response.
    pub fn json(method: &'static str, path: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            status,
            body: body.to_string(),
            set_cookie: None,
            repeat: true,
        }
    }

    /// Raw body response.
    pub fn raw(method: &'static str, path: impl Into<String>, status: u16, body: String) -> Self {
        Self {
            method,
            path: path.into(),
            status,
            body,
            set_cookie: None,
            repeat: true,
        }
    }

    /// Serves the response once, then falls through to later entries.
    pub fn once(mut self) -> Self {
        self.repeat = false;
        self
    }

    /// Adds a `Set-Cookie` header.
    pub fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }
}

/// A request seen by the scripted backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// HTTP method.
    pub method: String,
    /// Path without query.
    pub path: String,
    /// `Cookie` header value.
    pub cookie: Option<String>,
    /// Request body.
    pub body: String,
}

impl Recorded {
    /// Parses the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Local HTTP server answering from a script.
pub struct ScriptedBackend {
    /// Base URL of the server.
    pub url: String,
    /// Listening server.
    server: Arc<Server>,
    /// Requests received so far.
    requests: Arc<Mutex<Vec<Recorded>>>,
    /// Server thread.
    handle: Option<JoinHandle<()>>,
}

impl ScriptedBackend {
    /// Starts a server answering from `script`. Unmatched requests get 404.
    pub fn start(script: Vec<Canned>) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let thread_server = Arc::clone(&server);
        let thread_requests = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            let mut script = script;
            for mut request in thread_server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let path = request.url().split('?').next().unwrap_or_default().to_string();
                let cookie = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Cookie"))
                    .map(|header| header.value.as_str().to_string());
                thread_requests.lock().unwrap().push(Recorded {
                    method: method.clone(),
                    path: path.clone(),
                    cookie,
                    body,
                });
                let position =
                    script.iter().position(|entry| entry.method == method && entry.path == path);
                let canned = match position {
                    Some(index) if script[index].repeat => script[index].clone(),
                    Some(index) => script.remove(index),
                    None => Canned::json("ANY", path, 404, json!({ "message": "no route" })),
                };
                let mut response = Response::from_string(canned.body)
                    .with_status_code(canned.status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap(),
                    );
                if let Some(cookie) = canned.set_cookie {
                    response.add_header(
                        Header::from_bytes(&b"Set-Cookie"[..], cookie.as_bytes()).unwrap(),
                    );
                }
                let _ = request.respond(response);
            }
        });
        Self {
            url: format!("http://{addr}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns `"METHOD /path"` for every request received so far.
    pub fn calls(&self) -> Vec<String> {
        self.requests().iter().map(|req| format!("{} {}", req.method, req.path)).collect()
    }

    /// Returns the requests sent to `method path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method && req.path == path)
            .collect()
    }
}

impl Drop for ScriptedBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

// ============================================================================
// SECTION: Console Fixtures
// ============================================================================

/// Console wired to a scripted backend with in-memory tokens and audit.
pub struct Harness {
    /// Console under test.
    pub console: Console,
    /// Session token store.
    pub tokens: Arc<InMemorySessionTokenStore>,
    /// Recorded audit events.
    pub audit: Arc<RecordingAuditSink>,
}

impl Harness {
    /// Returns the recorded audit event kinds.
    pub fn audit_kinds(&self) -> Vec<AuditEventKind> {
        self.audit.events().iter().map(|event| event.event).collect()
    }

    /// Returns the persisted session cookie.
    pub fn cookie(&self) -> Option<String> {
        self.tokens.load().unwrap().map(|token| token.expose().to_string())
    }
}

/// Backend settings pointing at `url`.
pub fn backend_config(url: &str) -> BackendConfig {
    BackendConfig {
        base_url: url.to_string(),
        timeout_ms: 5_000,
        connect_timeout_ms: 1_000,
        ..BackendConfig::default()
    }
}

/// Builds a console against the scripted backend.
pub fn harness(backend: &ScriptedBackend) -> Harness {
    harness_with(Arc::new(InMemorySessionTokenStore::new()), backend_config(&backend.url))
}

/// Builds a console with explicit tokens and settings.
pub fn harness_with(
    tokens: Arc<InMemorySessionTokenStore>,
    config: BackendConfig,
) -> Harness {
    let audit = Arc::new(RecordingAuditSink::new());
    let client = BackendClient::new(&config, Arc::clone(&tokens) as Arc<dyn SessionTokenStore>)
        .unwrap();
    let console = Console::new(Arc::new(client), Arc::clone(&audit) as Arc<dyn AuditSink>);
    Harness {
        console,
        tokens,
        audit,
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Login route answering with `user` and a session cookie.
pub fn login_as(user: Value) -> Canned {
    Canned::json("POST", "/api/auth/login", 200, json!({ "message": "ok", "user": user }))
        .with_cookie("sid=s3cr3t; Path=/; HttpOnly")
}

/// Galactic leader user payload.
pub fn galactic_leader_user() -> Value {
    json!({ "id": 1, "name": "Ada", "role": "Galactic Leader" })
}

/// Planetary leader 3 as the backend reports it, without a managed planet.
pub fn planetary_leader_user() -> Value {
    json!({ "id": 3, "name": "Pat", "role": "Planetary Leader", "isGalactic": false })
}

/// Leader roster assigning user 3 to planet 10.
pub fn leader_roster() -> Canned {
    Canned::json(
        "GET",
        "/api/planetary-leaders",
        200,
        json!([{
            "LeaderID": 1,
            "PlanetID": 10,
            "StartDate": "2025-01-01T00:00:00Z",
            "User": { "UserID": 3, "Username": "pat", "FullName": "Pat", "Role": "Planetary Leader" },
            "Planet": { "PlanetID": 10, "Name": "Kepler" }
        }]),
    )
}

/// Citizen user 8.
pub fn citizen_user() -> Value {
    json!({ "id": 8, "name": "Cy", "role": "Citizen" })
}

/// Citizenship request payload.
pub fn citizenship_request(id: u64, status: &str) -> Value {
    json!({
        "RequestID": id,
        "CitizenID": 7,
        "FromPlanetID": 4,
        "ToPlanetID": 10,
        "Status": status,
        "RequestDate": "2025-03-01T00:00:00Z"
    })
}

/// Ballot entry for proposal 5 on planet 10.
pub fn ballot_entry(has_voted: bool, user_vote: Option<&str>, for_votes: u64) -> Value {
    json!({
        "ProposalID": 5,
        "PlanetID": 10,
        "ProposedBy": 3,
        "Title": "Rings",
        "Description": "Add rings",
        "Status": "Pending",
        "DateProposed": "2025-01-01T00:00:00Z",
        "hasVoted": has_voted,
        "userVote": user_vote,
        "voteSummary": { "for": for_votes, "against": 0 }
    })
}

/// Proposal payload.
pub fn proposal(id: u64, status: &str) -> Value {
    json!({
        "ProposalID": id,
        "PlanetID": 10,
        "ProposedBy": 3,
        "Title": "Rings",
        "Details": "Add rings",
        "Status": status,
        "DateProposed": "2025-01-01T00:00:00Z"
    })
}
