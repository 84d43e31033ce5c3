//! Masking of recorded values in log output.
//!
//! Only log lines are masked. Recorded actions and generated code keep the
//! captured values.

use crate::config::schema::SecurityConfig;
use reel_common::Action;

const MASK: &str = "••••••••";

#[derive(Debug, Clone)]
pub struct Redactor {
    sensitive_fields: Vec<String>,
    enabled: bool,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::from_config(&SecurityConfig::default())
    }
}

impl Redactor {
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            sensitive_fields: config
                .sensitive_fields
                .iter()
                .map(|f| f.to_lowercase())
                .collect(),
            enabled: config.redact_in_logs,
        }
    }

    /// Whether a selector names a field whose value should not be logged.
    pub fn is_sensitive(&self, selector: &str) -> bool {
        let selector = selector.to_lowercase();
        self.sensitive_fields
            .iter()
            .any(|field| selector.contains(field.as_str()))
    }

    /// `value`, or a mask if it was typed into a sensitive field.
    pub fn mask<'a>(&self, selector: &str, value: &'a str) -> &'a str {
        if self.enabled && self.is_sensitive(selector) {
            MASK
        } else {
            value
        }
    }

    /// Human-readable description of `action` safe to write to logs.
    pub fn describe(&self, action: &Action) -> String {
        match action {
            Action::Fill { selector, value } => Action::Fill {
                selector: selector.clone(),
                value: self.mask(selector, value).to_string(),
            }
            .describe(),
            Action::Type {
                selector,
                value,
                delay,
            } => Action::Type {
                selector: selector.clone(),
                value: self.mask(selector, value).to_string(),
                delay: *delay,
            }
            .describe(),
            Action::Select { selector, value } => Action::Select {
                selector: selector.clone(),
                value: self.mask(selector, value).to_string(),
            }
            .describe(),
            other => other.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_sensitive_fill() {
        let redactor = Redactor::default();
        let line = redactor.describe(&Action::Fill {
            selector: "input[name=Password]".into(),
            value: "hunter2".into(),
        });
        assert!(!line.contains("hunter2"));
        assert!(line.contains(MASK));
    }

    #[test]
    fn test_plain_fields_untouched() {
        let redactor = Redactor::default();
        let line = redactor.describe(&Action::Fill {
            selector: "#email".into(),
            value: "a@b.c".into(),
        });
        assert!(line.contains("a@b.c"));
    }

    #[test]
    fn test_disabled_redaction() {
        let redactor = Redactor::from_config(&SecurityConfig {
            sensitive_fields: vec!["password".into()],
            redact_in_logs: false,
        });
        assert_eq!(redactor.mask("#password", "hunter2"), "hunter2");
    }
}
