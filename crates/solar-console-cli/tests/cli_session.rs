// crates/solar-console-cli/tests/cli_session.rs
// ============================================================================
// Module: CLI Session Tests
// Description: Runs the `solar-console` binary against a scripted backend.
// Purpose: Ensure sessions persist across invocations and failures exit non-zero.
// Dependencies: solar-console-cli binary, tiny_http, tempfile
// ============================================================================

//! ## Overview
//! Each test writes a config pointing at a local `tiny_http` backend and a
//! temporary token file, then drives the binary as separate processes so the
//! session cookie must survive between invocations.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;

use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Local backend answering through a handler closure.
struct Backend {
    /// Base URL.
    url: String,
    /// Listening server.
    server: Arc<Server>,
    /// `"METHOD /path"` for each request received.
    calls: Arc<Mutex<Vec<String>>>,
    /// Server thread.
    handle: Option<JoinHandle<()>>,
}

impl Backend {
    /// Starts a server; `handler` maps `(method, path, cookie)` to
    /// `(status, body, set_cookie)`.
    fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, Option<&str>) -> (u16, String, Option<&'static str>) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let addr = server.server_addr().to_ip().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let thread_server = Arc::clone(&server);
        let thread_calls = Arc::clone(&calls);
        let handle = thread::spawn(move || {
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
                thread_calls.lock().unwrap().push(format!("{method} {path}"));
                let (status, body, set_cookie) = handler(&method, &path, cookie.as_deref());
                let mut response = Response::from_string(body).with_status_code(status).with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                );
                if let Some(value) = set_cookie {
                    response.add_header(
                        Header::from_bytes(&b"Set-Cookie"[..], value.as_bytes()).unwrap(),
                    );
                }
                let _ = request.respond(response);
            }
        });
        Self {
            url: format!("http://{addr}"),
            server,
            calls,
            handle: Some(handle),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Temporary workspace with a config file and a token path.
struct Workspace {
    /// Owned temporary directory.
    _dir: tempfile::TempDir,
    /// Config file path.
    config: PathBuf,
    /// Session token path.
    token: PathBuf,
}

fn workspace(backend_url: &str) -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("solar-console.toml");
    let token = dir.path().join("state").join("session");
    let contents = format!(
        "[backend]\nbase_url = '{backend_url}'\ntimeout_ms = 5000\nconnect_timeout_ms = \
         1000\n\n[session]\ntoken_store = 'file'\ntoken_path = '{}'\n\n[audit]\nsink = 'none'\n",
        token.display()
    );
    fs::write(&config, contents).unwrap();
    Workspace {
        _dir: dir,
        config,
        token,
    }
}

fn run(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-console"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("SOLAR_CONSOLE_LANG")
        .env_remove("SOLAR_CONSOLE_CONFIG")
        .output()
        .expect("run solar-console")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Backend with a galactic leader account `ada` and cookie `sid=abc`.
fn galactic_backend() -> Backend {
    Backend::start(|method, path, cookie| {
        let signed_in = cookie == Some("sid=abc");
        match (method, path) {
            ("POST", "/api/auth/login") => (
                200,
                r#"{"message":"ok","user":{"id":1,"name":"Ada","role":"Galactic Leader"}}"#
                    .to_string(),
                Some("sid=abc; Path=/; HttpOnly"),
            ),
            ("GET", "/api/auth/me") if signed_in => (
                200,
                r#"{"user":{"id":1,"name":"Ada","role":"Galactic Leader"}}"#.to_string(),
                None,
            ),
            ("GET", "/api/planets") if signed_in => (
                200,
                r#"[{"PlanetID":10,"Name":"Kepler","Mass":1.5,"Population":900,"PlanetType":"Rocky"}]"#
                    .to_string(),
                None,
            ),
            ("POST", "/api/auth/logout") => (200, r#"{"message":"bye"}"#.to_string(), None),
            _ => (401, r#"{"message":"unauthorized"}"#.to_string(), None),
        }
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies login persists the cookie and later invocations reuse it.
#[test]
fn session_survives_between_invocations() {
    let backend = galactic_backend();
    let ws = workspace(&backend.url);

    let login = run(&ws.config, &["login", "--username", "ada", "--password", "secret"]);
    assert!(login.status.success(), "login failed: {}", stderr(&login));
    assert!(stdout(&login).contains("Signed in as Ada (Galactic Leader)."));
    assert_eq!(fs::read_to_string(&ws.token).unwrap().trim(), "sid=abc");

    let whoami = run(&ws.config, &["whoami"]);
    assert!(whoami.status.success());
    assert!(stdout(&whoami).contains("Ada (user 1, Galactic Leader)"));

    let planets = run(&ws.config, &["planet", "list"]);
    assert!(planets.status.success(), "planet list failed: {}", stderr(&planets));
    let listed: serde_json::Value = serde_json::from_slice(&planets.stdout).unwrap();
    assert_eq!(listed[0]["Name"], "Kepler");

    let logout = run(&ws.config, &["logout"]);
    assert!(logout.status.success());
    assert!(!ws.token.exists());
    assert!(backend.calls().contains(&"POST /api/auth/logout".to_string()));
}

/// Verifies workflows fail with a localized message when not signed in.
#[test]
fn anonymous_workflow_exits_non_zero() {
    let backend = galactic_backend();
    let ws = workspace(&backend.url);

    let output = run(&ws.config, &["planet", "list"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not signed in"), "unexpected: {}", stderr(&output));
    assert!(backend.calls().is_empty(), "no token means no backend call");
}

/// Verifies the Catalan catalog is used when requested.
#[test]
fn catalan_output_when_requested() {
    let backend = galactic_backend();
    let ws = workspace(&backend.url);

    let output = run(&ws.config, &["--lang", "ca", "whoami"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No heu iniciat sessió."));
    assert!(stderr(&output).contains("traduïda automàticament"));
}

/// Verifies an unsupported language in the environment fails closed.
#[test]
fn invalid_environment_language_is_rejected() {
    let backend = galactic_backend();
    let ws = workspace(&backend.url);

    let output = Command::new(env!("CARGO_BIN_EXE_solar-console"))
        .arg("--config")
        .arg(&ws.config)
        .arg("whoami")
        .env("SOLAR_CONSOLE_LANG", "xx")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("SOLAR_CONSOLE_LANG"));
}

/// Verifies a rejected login leaves no token behind.
#[test]
fn invalid_credentials_leave_no_token() {
    let backend = Backend::start(|_, _, _| {
        (401, r#"{"message":"Invalid credentials"}"#.to_string(), None)
    });
    let ws = workspace(&backend.url);

    let output = run(&ws.config, &["login", "--username", "ada", "--password", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid username or password."));
    assert!(!ws.token.exists());
}

/// Verifies an invalid config file is reported before any backend call.
#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("solar-console.toml");
    fs::write(&config, "[backend]\nbase_url = 'ftp://example.com'\n").unwrap();

    let output = run(&config, &["whoami"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load configuration"));
}
