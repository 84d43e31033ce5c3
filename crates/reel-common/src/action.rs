//! Recorded browser interactions.
//!
//! Every automation primitive that succeeds reports exactly one [`Action`].
//! The variant carries the fields the primitive needed, so an action with a
//! missing field cannot be constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One recordable interaction, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    Navigate {
        url: String,
    },
    Click {
        selector: String,
    },
    Fill {
        selector: String,
        value: String,
    },
    Type {
        selector: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
    },
    Press {
        key: String,
    },
    Select {
        selector: String,
        value: String,
    },
    Hover {
        selector: String,
    },
    Check {
        selector: String,
    },
    Uncheck {
        selector: String,
    },
    WaitForSelector {
        selector: String,
    },
    Screenshot {
        value: String,
    },
}

/// Discriminant of an [`Action`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Navigate,
    Click,
    Fill,
    Type,
    Press,
    Select,
    Hover,
    Check,
    Uncheck,
    WaitForSelector,
    Screenshot,
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::Navigate,
        ActionKind::Click,
        ActionKind::Fill,
        ActionKind::Type,
        ActionKind::Press,
        ActionKind::Select,
        ActionKind::Hover,
        ActionKind::Check,
        ActionKind::Uncheck,
        ActionKind::WaitForSelector,
        ActionKind::Screenshot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Navigate => "navigate",
            ActionKind::Click => "click",
            ActionKind::Fill => "fill",
            ActionKind::Type => "type",
            ActionKind::Press => "press",
            ActionKind::Select => "select",
            ActionKind::Hover => "hover",
            ActionKind::Check => "check",
            ActionKind::Uncheck => "uncheck",
            ActionKind::WaitForSelector => "waitForSelector",
            ActionKind::Screenshot => "screenshot",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Navigate { .. } => ActionKind::Navigate,
            Action::Click { .. } => ActionKind::Click,
            Action::Fill { .. } => ActionKind::Fill,
            Action::Type { .. } => ActionKind::Type,
            Action::Press { .. } => ActionKind::Press,
            Action::Select { .. } => ActionKind::Select,
            Action::Hover { .. } => ActionKind::Hover,
            Action::Check { .. } => ActionKind::Check,
            Action::Uncheck { .. } => ActionKind::Uncheck,
            Action::WaitForSelector { .. } => ActionKind::WaitForSelector,
            Action::Screenshot { .. } => ActionKind::Screenshot,
        }
    }

    /// The element selector this action targets, if any.
    pub fn selector(&self) -> Option<&str> {
        match self {
            Action::Click { selector }
            | Action::Fill { selector, .. }
            | Action::Type { selector, .. }
            | Action::Select { selector, .. }
            | Action::Hover { selector }
            | Action::Check { selector }
            | Action::Uncheck { selector }
            | Action::WaitForSelector { selector } => Some(selector),
            Action::Navigate { .. } | Action::Press { .. } | Action::Screenshot { .. } => None,
        }
    }

    /// Default human-readable label.
    pub fn describe(&self) -> String {
        match self {
            Action::Navigate { url } => format!("Navigate to {}", url),
            Action::Click { selector } => format!("Click {}", selector),
            Action::Fill { selector, value } => format!("Fill {} with \"{}\"", selector, value),
            Action::Type {
                selector, value, ..
            } => format!("Type \"{}\" into {}", value, selector),
            Action::Press { key } => format!("Press {}", key),
            Action::Select { selector, value } => format!("Select \"{}\" in {}", value, selector),
            Action::Hover { selector } => format!("Hover {}", selector),
            Action::Check { selector } => format!("Check {}", selector),
            Action::Uncheck { selector } => format!("Uncheck {}", selector),
            Action::WaitForSelector { selector } => format!("Wait for {}", selector),
            Action::Screenshot { value } => format!("Screenshot {}", value),
        }
    }
}

/// An [`Action`] as stored in a recording log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAction {
    #[serde(flatten)]
    pub action: Action,
    /// Milliseconds since the Unix epoch, non-decreasing within a session.
    pub timestamp: u64,
    /// Informational only; never used by code generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecordedAction {
    pub fn new(action: Action, timestamp: u64) -> Self {
        Self {
            action,
            timestamp,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tag_matches_display() {
        let action = Action::WaitForSelector {
            selector: "#app".into(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["kind"], json!(ActionKind::WaitForSelector.to_string()));
    }

    #[test]
    fn test_recorded_action_flattens_payload() {
        let recorded = RecordedAction::new(
            Action::Fill {
                selector: "#email".into(),
                value: "a@b.c".into(),
            },
            42,
        );
        let value = serde_json::to_value(&recorded).unwrap();
        assert_eq!(
            value,
            json!({"kind": "fill", "selector": "#email", "value": "a@b.c", "timestamp": 42})
        );
    }

    #[test]
    fn test_type_delay_is_optional() {
        let parsed: RecordedAction = serde_json::from_str(
            r##"{"kind": "type", "selector": "#q", "value": "rust", "timestamp": 7}"##,
        )
        .unwrap();
        assert_eq!(
            parsed.action,
            Action::Type {
                selector: "#q".into(),
                value: "rust".into(),
                delay: None
            }
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let parsed: Result<RecordedAction, _> =
            serde_json::from_str(r##"{"kind": "fill", "selector": "#q", "timestamp": 1}"##);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_selector_accessor() {
        assert_eq!(
            Action::Check {
                selector: "#agree".into()
            }
            .selector(),
            Some("#agree")
        );
        assert_eq!(Action::Press { key: "Enter".into() }.selector(), None);
    }
}
