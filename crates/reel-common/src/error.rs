/// Failures reported by a browser backend.
#[derive(thiserror::Error, Debug, Clone)]
pub enum BackendError {
    // ============================================================
    // Navigation Errors
    // ============================================================
    #[error("Navigation failed: {0}")]
    Navigation(String),

    // ============================================================
    // Element Errors
    // ============================================================
    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Element {selector} is not interactable: {reason}")]
    ElementNotInteractable { selector: String, reason: String },

    #[error("Option not found: {value}")]
    OptionNotFound { value: String },

    #[error("Invalid selector: {selector}")]
    SelectorInvalid { selector: String },

    // ============================================================
    // System Errors
    // ============================================================
    #[error("Browser not launched")]
    NotReady,

    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl BackendError {
    /// Whether the failure concerns a specific element rather than the session.
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            BackendError::ElementNotFound { .. }
                | BackendError::ElementNotInteractable { .. }
                | BackendError::OptionNotFound { .. }
                | BackendError::SelectorInvalid { .. }
        )
    }
}
