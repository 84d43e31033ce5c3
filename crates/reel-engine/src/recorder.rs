use crate::redact::Redactor;
use crate::session::SessionHandle;
use reel_common::Action;
use tracing::debug;

/// Entry point through which primitives report what they did.
///
/// Callers invoke [`ActionRecorder::record`] only after the browser operation
/// succeeded. Recording while no session is active is a silent no-op.
#[derive(Debug, Clone)]
pub struct ActionRecorder {
    session: SessionHandle,
    redactor: Redactor,
}

impl ActionRecorder {
    pub fn new(session: SessionHandle, redactor: Redactor) -> Self {
        Self { session, redactor }
    }

    /// Appends `action` with a fresh timestamp if recording. Returns whether it
    /// was appended.
    pub fn record(&self, action: Action) -> bool {
        self.append(action, None)
    }

    pub fn record_described(&self, action: Action, description: impl Into<String>) -> bool {
        self.append(action, Some(description.into()))
    }

    fn append(&self, action: Action, description: Option<String>) -> bool {
        let line = self.redactor.describe(&action);
        let mut session = self.session.lock();
        let appended = session.append(action, description);
        if appended {
            debug!("Recorded #{} in '{}': {}", session.len(), session.name(), line);
        }
        appended
    }
}
