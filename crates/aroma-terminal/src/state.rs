//! # Shared Session State
//!
//! The [`PosSession`] behind an `Arc<Mutex>`, cloned into every handler
//! that needs it. Sync operations take the lock for the duration of one
//! mutation; the async checkout path acquires and releases it around the
//! HTTP call instead of holding it across an await.

use std::sync::{Arc, Mutex};

use crate::session::PosSession;

/// Thread-safe handle to the terminal's session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<PosSession>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a closure with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PosSession) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Runs a closure with mutable access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PosSession) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}
