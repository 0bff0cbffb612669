// crates/solar-console-core/src/runtime/store.rs
// ============================================================================
// Module: Solar Console In-Memory Token Store
// Description: Process-local session token storage.
// Purpose: Hold the session token for embedded hosts and tests.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemorySessionTokenStore`] keeps the token behind a mutex. Nothing
//! survives the process; hosts that need persistence use a file-backed store.

use std::sync::Arc;
use std::sync::Mutex;

use crate::interfaces::SessionToken;
use crate::interfaces::SessionTokenStore;
use crate::interfaces::TokenStoreError;

/// In-memory session token store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionTokenStore {
    /// Stored token.
    token: Arc<Mutex<Option<SessionToken>>>,
}

impl InMemorySessionTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `token`.
    #[must_use]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
        }
    }
}

impl SessionTokenStore for InMemorySessionTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, TokenStoreError> {
        let guard = self
            .token
            .lock()
            .map_err(|_| TokenStoreError::Io("token store mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), TokenStoreError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| TokenStoreError::Io("token store mutex poisoned".to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| TokenStoreError::Io("token store mutex poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}
