//! Session Manager - serializes every request against its own session

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::storage::SessionStorage;
use crate::structs::Session;

/// A live session; `None` once it has been ended
type SessionHandle = Arc<Mutex<Option<Session>>>;

/// Session Manager - owns the sessions of every browser talking to the service
pub struct SessionManager<S: SessionStorage> {
    storage: Arc<S>,
    /// Live sessions, each behind its own lock (session_id -> session)
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl<S: SessionStorage> SessionManager<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the cached session, loading it from storage or starting an empty
    /// one when there is none yet.
    async fn session_handle(&self, session_id: &str) -> Result<SessionHandle> {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(session_id) {
                return Ok(handle.clone());
            }
        }

        let mut sessions = self.sessions.write().await;
        if let Some(handle) = sessions.get(session_id) {
            return Ok(handle.clone());
        }

        let session = match self.storage.load_session(session_id).await {
            Ok(session) => session,
            Err(SessionError::NotFound) => {
                debug!(session_id, "starting new session");
                Session::default()
            }
            Err(e) => return Err(e),
        };

        let handle = Arc::new(Mutex::new(Some(session)));
        sessions.insert(session_id.to_string(), handle.clone());
        Ok(handle)
    }

    /// Run `f` against the session as one unit.
    ///
    /// The session lock is held from load until the result is saved, so two
    /// requests for the same session never interleave. `f` works on a copy:
    /// if saving fails the live session keeps its previous state.
    pub async fn with_session<F, R>(&self, session_id: &str, f: F) -> Result<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        loop {
            let handle = self.session_handle(session_id).await?;
            let mut slot = handle.lock().await;
            // Ended while we waited for the lock; pick up the fresh session
            let Some(session) = slot.as_mut() else {
                continue;
            };

            let mut working = session.clone();
            let result = f(&mut working);
            working.touch();

            self.storage.save_session(session_id, &working).await?;
            *session = working;
            return Ok(result);
        }
    }

    /// Discard a session; the next request with this id starts empty
    pub async fn end_session(&self, session_id: &str) -> Result<()> {
        self.discard_if(session_id, |_| true).await?;
        info!(session_id, "session ended");
        Ok(())
    }

    /// Discard the session if `should_discard` holds for its current state.
    ///
    /// The cache write lock is held throughout, so no request can reload the
    /// stored blob while it is being deleted, and the check and the delete
    /// see the same state.
    async fn discard_if<P>(&self, session_id: &str, should_discard: P) -> Result<bool>
    where
        P: FnOnce(&Session) -> bool,
    {
        let mut sessions = self.sessions.write().await;

        match sessions.get(session_id).cloned() {
            Some(handle) => {
                let mut slot = handle.lock().await;
                if let Some(session) = slot.as_ref() {
                    if !should_discard(session) {
                        return Ok(false);
                    }
                }
                self.storage.delete_session(session_id).await?;
                *slot = None;
                sessions.remove(session_id);
            }
            None => {
                match self.storage.load_session(session_id).await {
                    Ok(session) if !should_discard(&session) => return Ok(false),
                    Ok(_) | Err(SessionError::NotFound) => {}
                    Err(e) => return Err(e),
                }
                self.storage.delete_session(session_id).await?;
            }
        }
        Ok(true)
    }

    /// End every session not touched within `max_idle`
    pub async fn purge_idle(&self, max_idle: Duration) -> Result<usize> {
        let now = Utc::now();
        let mut purged = 0;

        for session_id in self.storage.session_ids().await {
            let ended = self
                .discard_if(&session_id, |session| session.is_idle(max_idle, now))
                .await?;
            if ended {
                debug!(session_id, "idle session ended");
                purged += 1;
            }
        }

        if purged > 0 {
            info!(purged, "purged idle sessions");
        }
        Ok(purged)
    }

    /// Number of sessions currently held in memory
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
