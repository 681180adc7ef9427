//! Session providers injected into backend callers.

use crate::{Session, SessionResult, SessionStore};
use async_trait::async_trait;

/// Resolves the session for the current caller.
///
/// Returning `Ok(None)` means nobody is signed in. Providers may also return
/// an expired session; callers decide validity via [`Session::is_valid`].
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> SessionResult<Option<Session>>;
}

/// Provider that always returns the same session (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    session: Option<Session>,
}

impl StaticSessionProvider {
    /// Provider for a signed-in caller.
    pub fn new(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Provider for a caller with no session.
    pub fn anonymous() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        Ok(self.session.clone())
    }
}

/// Provider backed by a [`SessionStore`].
pub struct StoredSessionProvider<S> {
    store: S,
}

impl<S: SessionStore> StoredSessionProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: SessionStore> SessionProvider for StoredSessionProvider<S> {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        let session = self.store.load()?;
        match &session {
            Some(s) if !s.is_valid() => {
                tracing::debug!(expires_at = ?s.expires_at, "Stored session is no longer valid");
            }
            None => tracing::debug!("No stored session"),
            _ => {}
        }
        Ok(session)
    }
}
