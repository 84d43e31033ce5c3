use reel_codegen::{Framework, Interpolation, Language};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub codegen: CodegenConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub dry_run: DryRunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where generated tests and screenshots are written.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./generated")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default)]
    pub framework: Framework,
    #[serde(default)]
    pub language: Language,
    /// Escape quotes in captured values instead of splicing them verbatim.
    #[serde(default)]
    pub escape_values: bool,
}

impl CodegenConfig {
    pub fn interpolation(&self) -> Interpolation {
        Interpolation::from_escape_flag(self.escape_values)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Session name to start recording under at launch.
    #[serde(default)]
    pub auto_start: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,
    #[serde(default = "default_redact_in_logs")]
    pub redact_in_logs: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            sensitive_fields: default_sensitive_fields(),
            redact_in_logs: default_redact_in_logs(),
        }
    }
}

fn default_sensitive_fields() -> Vec<String> {
    vec![
        "password".to_string(),
        "token".to_string(),
        "card_number".to_string(),
        "cvv".to_string(),
        "ssn".to_string(),
        "secret".to_string(),
    ]
}

fn default_redact_in_logs() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DryRunConfig {
    /// Selectors starting with this prefix fail as if the element were missing.
    #[serde(default)]
    pub fail_selector_prefix: Option<String>,
}
