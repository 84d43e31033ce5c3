use async_trait::async_trait;
pub use reel_common::BackendError;

#[derive(Debug, Clone)]
pub struct NavigationResult {
    /// The URL the browser ended up on.
    pub url: String,
}

/// Browser automation primitives.
///
/// Implementations drive a real browser; this crate only calls them and
/// records what succeeded.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Launch the backend (start browser, connect to remote, etc.)
    async fn launch(&mut self) -> Result<(), BackendError>;

    /// Close the backend and cleanup resources.
    async fn close(&mut self) -> Result<(), BackendError>;

    /// Check if the backend is ready to accept commands.
    async fn is_ready(&self) -> bool;

    /// Navigate to a specific URL.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError>;

    async fn click(&mut self, selector: &str) -> Result<(), BackendError>;

    /// Replace the contents of an input.
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BackendError>;

    /// Type text key by key, optionally pausing `delay_ms` between keys.
    async fn type_text(
        &mut self,
        selector: &str,
        text: &str,
        delay_ms: Option<u64>,
    ) -> Result<(), BackendError>;

    /// Press a key on the focused element.
    async fn press_key(&mut self, key: &str) -> Result<(), BackendError>;

    /// Capture a screenshot of the current viewport.
    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError>;

    /// Choose an `<option>` by value.
    async fn select_option(&mut self, _selector: &str, _value: &str) -> Result<(), BackendError> {
        Err(BackendError::NotSupported("select_option".into()))
    }

    async fn hover(&mut self, _selector: &str) -> Result<(), BackendError> {
        Err(BackendError::NotSupported("hover".into()))
    }

    /// Check or uncheck a checkbox.
    async fn set_checked(&mut self, _selector: &str, _checked: bool) -> Result<(), BackendError> {
        Err(BackendError::NotSupported("set_checked".into()))
    }

    /// Wait until an element matching `selector` is attached.
    async fn wait_for_selector(
        &mut self,
        _selector: &str,
        _timeout_ms: Option<u64>,
    ) -> Result<(), BackendError> {
        Err(BackendError::NotSupported("wait_for_selector".into()))
    }
}
