//! Session data structures

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use todo_core::Store;

/// Status messages surfaced once on the next rendered view, then cleared
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            success: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

/// Everything one browser session owns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// The lists of this session
    #[serde(default)]
    pub store: Store,

    /// Pending status messages
    #[serde(default)]
    pub flash: Flash,

    /// Last time a request touched the session
    pub last_accessed: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            store: Store::default(),
            flash: Flash::default(),
            last_accessed: Utc::now(),
        }
    }
}

impl Session {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.flash.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.flash.success = Some(message.into());
    }

    /// Return the pending messages and clear them
    pub fn take_flash(&mut self) -> Flash {
        std::mem::take(&mut self.flash)
    }

    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    pub fn is_idle(&self, max_idle: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_accessed > max_idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_is_taken_once() {
        let mut session = Session::default();
        session.set_success("The list has been created.");

        let flash = session.take_flash();
        assert_eq!(flash.success.as_deref(), Some("The list has been created."));
        assert!(flash.error.is_none());
        assert!(session.take_flash().is_empty());
    }

    #[test]
    fn test_default_session_is_empty() {
        let session = Session::default();
        assert!(session.store.is_empty());
        assert!(session.flash.is_empty());
    }

    #[test]
    fn test_idle_detection() {
        let mut session = Session::default();
        let now = Utc::now();
        session.last_accessed = now - Duration::minutes(31);

        assert!(session.is_idle(Duration::minutes(30), now));
        assert!(!session.is_idle(Duration::minutes(45), now));
    }
}
