// crates/solar-console-client/src/token_store.rs
// ============================================================================
// Module: File Session Token Store
// Description: Persists the backend session cookie between invocations.
// Purpose: Let each CLI invocation resume the session established by login.
// Dependencies: solar-console-core
// ============================================================================

//! ## Overview
//! The token file holds one line: the `Cookie` header value captured at
//! login. Reads are size-limited and reject control characters so a
//! tampered file can never inject extra headers. On Unix the file is created
//! with owner-only permissions.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use solar_console_core::SessionToken;
use solar_console_core::SessionTokenStore;
use solar_console_core::TokenStoreError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum token file size in bytes.
pub const MAX_TOKEN_FILE_BYTES: u64 = 8 * 1024;

// ============================================================================
// SECTION: File Store
// ============================================================================

/// Session token store backed by a single file.
#[derive(Debug, Clone)]
pub struct FileSessionTokenStore {
    /// Token file location.
    path: PathBuf,
}

impl FileSessionTokenStore {
    /// Creates a store rooted at `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the token file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionTokenStore for FileSessionTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TokenStoreError::Io(err.to_string())),
        };
        let mut raw = String::new();
        file.take(MAX_TOKEN_FILE_BYTES + 1)
            .read_to_string(&mut raw)
            .map_err(|err| TokenStoreError::Invalid(err.to_string()))?;
        if raw.len() as u64 > MAX_TOKEN_FILE_BYTES {
            return Err(TokenStoreError::Invalid("token file exceeds size limit".to_string()));
        }
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }
        validate_token(value)?;
        Ok(Some(SessionToken::new(value)))
    }

    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        validate_token(token.expose())?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| TokenStoreError::Io(err.to_string()))?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file =
            options.open(&self.path).map_err(|err| TokenStoreError::Io(err.to_string()))?;
        writeln!(file, "{}", token.expose()).map_err(|err| TokenStoreError::Io(err.to_string()))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::Io(err.to_string())),
        }
    }
}

/// Rejects token values that cannot be sent as a header.
fn validate_token(value: &str) -> Result<(), TokenStoreError> {
    if value.is_empty() {
        return Err(TokenStoreError::Invalid("token is empty".to_string()));
    }
    if value.len() as u64 > MAX_TOKEN_FILE_BYTES {
        return Err(TokenStoreError::Invalid("token exceeds size limit".to_string()));
    }
    if value.chars().any(char::is_control) {
        return Err(TokenStoreError::Invalid("token contains control characters".to_string()));
    }
    Ok(())
}
