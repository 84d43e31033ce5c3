//! A backend that drives no browser.
//!
//! Every primitive succeeds and is logged, except selectors that start with
//! the configured failure prefix. Used for scripting a recording offline and
//! for exercising the command pipeline end to end.

use crate::backend::{Backend, BackendError, NavigationResult};
use crate::config::schema::DryRunConfig;
use async_trait::async_trait;
use tracing::{debug, info};

/// PNG file signature; screenshots are this header and nothing else.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Default)]
pub struct DryRunBackend {
    launched: bool,
    current_url: Option<String>,
    fail_selector_prefix: Option<String>,
}

impl DryRunBackend {
    pub fn new(config: &DryRunConfig) -> Self {
        Self {
            launched: false,
            current_url: None,
            fail_selector_prefix: config.fail_selector_prefix.clone(),
        }
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    fn ensure_ready(&self) -> Result<(), BackendError> {
        if self.launched {
            Ok(())
        } else {
            Err(BackendError::NotReady)
        }
    }

    fn locate(&self, selector: &str) -> Result<(), BackendError> {
        self.ensure_ready()?;
        if selector.trim().is_empty() {
            return Err(BackendError::SelectorInvalid {
                selector: selector.to_string(),
            });
        }
        if let Some(prefix) = &self.fail_selector_prefix
            && selector.starts_with(prefix.as_str())
        {
            return Err(BackendError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for DryRunBackend {
    async fn launch(&mut self) -> Result<(), BackendError> {
        info!("Dry-run backend launched");
        self.launched = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        info!("Dry-run backend closed");
        self.launched = false;
        self.current_url = None;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.launched
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        self.ensure_ready()?;
        info!("[dry-run] goto {}", url);
        self.current_url = Some(url.to_string());
        Ok(NavigationResult {
            url: url.to_string(),
        })
    }

    async fn click(&mut self, selector: &str) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!("[dry-run] click {}", selector);
        Ok(())
    }

    async fn fill(&mut self, selector: &str, _value: &str) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!("[dry-run] fill {}", selector);
        Ok(())
    }

    async fn type_text(
        &mut self,
        selector: &str,
        text: &str,
        delay_ms: Option<u64>,
    ) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!(
            "[dry-run] type {} chars into {} (delay {:?})",
            text.chars().count(),
            selector,
            delay_ms
        );
        Ok(())
    }

    async fn press_key(&mut self, key: &str) -> Result<(), BackendError> {
        self.ensure_ready()?;
        debug!("[dry-run] press {}", key);
        Ok(())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError> {
        self.ensure_ready()?;
        Ok(PNG_SIGNATURE.to_vec())
    }

    async fn select_option(&mut self, selector: &str, value: &str) -> Result<(), BackendError> {
        self.locate(selector)?;
        if value.is_empty() {
            return Err(BackendError::OptionNotFound {
                value: value.to_string(),
            });
        }
        debug!("[dry-run] select {} in {}", value, selector);
        Ok(())
    }

    async fn hover(&mut self, selector: &str) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!("[dry-run] hover {}", selector);
        Ok(())
    }

    async fn set_checked(&mut self, selector: &str, checked: bool) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!("[dry-run] set {} checked={}", selector, checked);
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        _timeout_ms: Option<u64>,
    ) -> Result<(), BackendError> {
        self.locate(selector)?;
        debug!("[dry-run] found {}", selector);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_requires_launch() {
        let mut backend = DryRunBackend::default();
        assert!(matches!(
            backend.click("#go").await,
            Err(BackendError::NotReady)
        ));
        backend.launch().await.unwrap();
        assert!(backend.is_ready().await);
        backend.click("#go").await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_prefix() {
        let mut backend = DryRunBackend::new(&DryRunConfig {
            fail_selector_prefix: Some("#missing".into()),
        });
        backend.launch().await.unwrap();
        let err = backend.click("#missing-button").await.unwrap_err();
        assert!(err.is_element_error());
        backend.hover("#present").await.unwrap();
    }

    #[tokio::test]
    async fn test_navigate_and_screenshot() {
        let mut backend = DryRunBackend::default();
        backend.launch().await.unwrap();
        let res = backend.navigate("https://a.test/").await.unwrap();
        assert_eq!(res.url, "https://a.test/");
        assert_eq!(backend.current_url(), Some("https://a.test/"));
        assert_eq!(backend.screenshot().await.unwrap(), PNG_SIGNATURE.to_vec());
        backend.close().await.unwrap();
        assert_eq!(backend.current_url(), None);
    }
}
