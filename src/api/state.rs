use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{providers::CatalogProvider, MatchResolver, MatchSession};

/// Sessions untouched for this long are dropped on the next session creation
pub const DEFAULT_SESSION_IDLE_MINUTES: u32 = 60;

/// Shared application state
///
/// The session lock is never held across a catalog call: handlers record the
/// intent, release the lock, await the catalog, then lock again to apply the
/// outcome.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub resolver: Arc<MatchResolver>,
    pub placeholder_image_url: Arc<str>,
    pub session_idle_timeout: Duration,
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, MatchSession>,
}

impl AppStateInner {
    pub fn session(&self, id: Uuid) -> AppResult<&MatchSession> {
        self.sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))
    }

    /// Mutable access; counts as activity for idle pruning
    pub fn session_mut(&mut self, id: Uuid) -> AppResult<&mut MatchSession> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))?;
        session.touch(Utc::now());
        Ok(session)
    }

    /// Drops sessions idle for longer than `max_idle`, returning how many went
    pub fn prune_idle(&mut self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_idle(now, max_idle));
        before - self.sessions.len()
    }
}

impl AppState {
    /// Creates state with no sessions, backed by `catalog`
    pub fn new(catalog: Arc<dyn CatalogProvider>, placeholder_image_url: impl Into<Arc<str>>) -> Self {
        Self {
            resolver: Arc::new(MatchResolver::new(catalog.clone())),
            catalog,
            placeholder_image_url: placeholder_image_url.into(),
            session_idle_timeout: Duration::minutes(i64::from(DEFAULT_SESSION_IDLE_MINUTES)),
            inner: Arc::new(RwLock::new(AppStateInner::default())),
        }
    }

    pub fn with_session_idle_timeout(mut self, timeout: Duration) -> Self {
        self.session_idle_timeout = timeout;
        self
    }
}
