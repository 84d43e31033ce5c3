//! Recording session state.
//!
//! One session exists per executor. Starting a recording always discards the
//! previous log, even if it was never exported; stopping keeps the log so it
//! can still be generated.

use reel_common::{Action, RecordedAction};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Recording name must not be empty")]
    EmptyName,
}

/// Result of stopping an active recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSummary {
    pub name: String,
    pub actions: usize,
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    active: bool,
    name: String,
    log: Vec<RecordedAction>,
    last_timestamp: u64,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new recording and returns how many prior actions were dropped.
    ///
    /// Calling this while already recording restarts under the new name.
    pub fn start(&mut self, name: &str) -> Result<usize, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let discarded = self.log.len();
        self.active = true;
        self.name = name.to_string();
        self.log = Vec::new();
        Ok(discarded)
    }

    /// Ends the recording. `None` if nothing was being recorded.
    pub fn stop(&mut self) -> Option<StopSummary> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(StopSummary {
            name: self.name.clone(),
            actions: self.log.len(),
        })
    }

    /// Teardown path for a closed browser: drops the log and stops recording.
    pub fn reset(&mut self) {
        self.active = false;
        self.log.clear();
    }

    /// Appends `action` if recording. Returns whether it was appended.
    pub fn append(&mut self, action: Action, description: Option<String>) -> bool {
        if !self.active {
            return false;
        }
        let timestamp = self.next_timestamp();
        self.log.push(RecordedAction {
            action,
            timestamp,
            description,
        });
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &[RecordedAction] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    fn next_timestamp(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.last_timestamp = now.max(self.last_timestamp);
        self.last_timestamp
    }
}

/// Shared handle to a [`RecordingSession`].
///
/// A single mutex guards the active flag, name and log together, so each
/// operation sees and leaves a consistent session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<RecordingSession>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, RecordingSession> {
        // poisoned only if a holder panicked; each operation leaves the session consistent
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start(&self, name: &str) -> Result<usize, SessionError> {
        self.lock().start(name)
    }

    pub fn stop(&self) -> Option<StopSummary> {
        self.lock().stop()
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copies out the session name and log.
    pub fn snapshot(&self) -> (String, Vec<RecordedAction>) {
        let session = self.lock();
        (session.name().to_string(), session.actions().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(selector: &str) -> Action {
        Action::Click {
            selector: selector.into(),
        }
    }

    #[test]
    fn test_start_requires_name() {
        let mut session = RecordingSession::new();
        assert_eq!(session.start("   "), Err(SessionError::EmptyName));
        assert!(!session.is_active());
        assert_eq!(session.name(), "");
    }

    #[test]
    fn test_append_only_while_active() {
        let mut session = RecordingSession::new();
        assert!(!session.append(click("#a"), None));
        assert!(session.is_empty());

        session.start("s").unwrap();
        assert!(session.append(click("#a"), None));
        session.stop();
        assert!(!session.append(click("#b"), None));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_stop_keeps_log_and_name() {
        let mut session = RecordingSession::new();
        session.start("checkout").unwrap();
        session.append(click("#buy"), None);
        let summary = session.stop().unwrap();
        assert_eq!(
            summary,
            StopSummary {
                name: "checkout".into(),
                actions: 1
            }
        );
        assert_eq!(session.name(), "checkout");
        assert_eq!(session.len(), 1);
        assert!(session.stop().is_none());
    }

    #[test]
    fn test_restart_discards_previous_log() {
        let mut session = RecordingSession::new();
        session.start("first").unwrap();
        session.append(click("#a"), None);
        session.append(click("#b"), None);
        assert_eq!(session.start("second").unwrap(), 2);
        assert!(session.is_active());
        assert!(session.is_empty());
        assert_eq!(session.name(), "second");
    }

    #[test]
    fn test_reset_clears_and_deactivates() {
        let mut session = RecordingSession::new();
        session.start("s").unwrap();
        session.append(click("#a"), None);
        session.reset();
        assert!(!session.is_active());
        assert!(session.is_empty());
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut session = RecordingSession::new();
        session.last_timestamp = u64::MAX - 1;
        session.start("s").unwrap();
        session.append(click("#a"), None);
        session.append(click("#b"), None);
        let stamps: Vec<u64> = session.actions().iter().map(|a| a.timestamp).collect();
        assert_eq!(stamps, vec![u64::MAX - 1, u64::MAX - 1]);
    }

    #[test]
    fn test_handle_snapshot_is_detached() {
        let handle = SessionHandle::new();
        handle.start("snap").unwrap();
        handle.lock().append(click("#a"), Some("first".into()));
        let (name, log) = handle.snapshot();
        handle.lock().append(click("#b"), None);
        assert_eq!(name, "snap");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].description.as_deref(), Some("first"));
        assert_eq!(handle.len(), 2);
    }
}
