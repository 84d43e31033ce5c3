//! Shared command execution pipeline.
//!
//! input → parse → run primitive against the backend → record on success
//!
//! The executor also owns the recording controls (`record start`, `record
//! stop`, `generate`) and is the only place that creates a session.

use crate::artifact::{ArtifactError, ArtifactWriter, FsArtifactWriter};
use crate::backend::Backend;
use crate::command::{Command, ParseError, parse_command};
use crate::config::ReelConfig;
use crate::config::schema::CodegenConfig;
use crate::recorder::ActionRecorder;
use crate::redact::Redactor;
use crate::session::{SessionError, SessionHandle};
use reel_codegen::{
    CodegenError, Framework, GenerateOptions, Language, default_file_name, generate,
};
use reel_common::{Action, ActionKind, BackendError};
use std::path::PathBuf;
use tracing::{info, warn};

/// Reply to `generate` when there is nothing to render.
pub const NO_ACTIONS_MESSAGE: &str =
    "No actions recorded. Start a recording with 'record start <name>' and perform some actions first.";

const DEFAULT_SCREENSHOT_NAME: &str = "screenshot.png";

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Codegen error: {0}")]
    Codegen(#[from] CodegenError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// A file produced by `generate`.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub code: String,
    pub path: PathBuf,
    pub skipped: Vec<ActionKind>,
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Formatted output string for display.
    pub output: String,
    /// Whether execution was successful.
    pub success: bool,
    pub generated: Option<GeneratedArtifact>,
}

impl ExecutionResult {
    fn message(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
            generated: None,
        }
    }
}

pub struct CommandExecutor {
    session: SessionHandle,
    recorder: ActionRecorder,
    writer: Box<dyn ArtifactWriter>,
    codegen: CodegenConfig,
}

impl CommandExecutor {
    pub fn new(config: &ReelConfig) -> Self {
        let writer = FsArtifactWriter::new(config.output.directory.clone());
        Self::with_writer(config, Box::new(writer))
    }

    pub fn with_writer(config: &ReelConfig, writer: Box<dyn ArtifactWriter>) -> Self {
        let session = SessionHandle::new();
        let recorder =
            ActionRecorder::new(session.clone(), Redactor::from_config(&config.security));
        Self {
            session,
            recorder,
            writer,
            codegen: config.codegen.clone(),
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn recorder(&self) -> &ActionRecorder {
        &self.recorder
    }

    /// Execute a line of input. Blank lines and comments produce empty output.
    pub async fn execute_line<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        line: &str,
    ) -> Result<ExecutionResult, ExecutorError> {
        match parse_command(line)? {
            Some(command) => self.execute(backend, command).await,
            None => Ok(ExecutionResult::message("")),
        }
    }

    pub async fn execute<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        command: Command,
    ) -> Result<ExecutionResult, ExecutorError> {
        match command {
            Command::RecordStart { name } => self.start_recording(&name).map(ExecutionResult::message),
            Command::RecordStop => Ok(ExecutionResult::message(self.stop_recording())),
            Command::Status => Ok(ExecutionResult::message(self.status())),
            Command::Generate {
                framework,
                language,
                file,
            } => self.generate(framework, language, file.as_deref()),
            Command::Close => self.close(backend).await.map(ExecutionResult::message),
            primitive => self
                .run_primitive(backend, primitive)
                .await
                .map(ExecutionResult::message),
        }
    }

    /// Begins recording under `name`. Any log not yet generated is dropped.
    pub fn start_recording(&self, name: &str) -> Result<String, ExecutorError> {
        let discarded = self.session.start(name)?;
        if discarded > 0 {
            warn!("Discarded {} actions from the previous recording", discarded);
        }
        info!("Recording started: {}", name.trim());
        Ok(format!("Started recording session '{}'", name.trim()))
    }

    /// Stops recording. The log stays available to `generate`.
    pub fn stop_recording(&self) -> String {
        match self.session.stop() {
            Some(summary) => {
                info!(
                    "Recording stopped: {} ({} actions)",
                    summary.name, summary.actions
                );
                format!(
                    "Stopped recording session '{}' ({} actions captured)",
                    summary.name, summary.actions
                )
            }
            None => "No recording in progress".to_string(),
        }
    }

    pub fn status(&self) -> String {
        let session = self.session.lock();
        match (session.is_active(), session.name()) {
            (true, name) => format!("Recording '{}': {} actions", name, session.len()),
            (false, "") => "Not recording".to_string(),
            (false, name) => format!(
                "Not recording. Last session '{}' has {} actions",
                name,
                session.len()
            ),
        }
    }

    /// Renders the current log and writes it through the artifact writer.
    ///
    /// An empty log is not an error: the result carries
    /// [`NO_ACTIONS_MESSAGE`] and nothing is written.
    pub fn generate(
        &self,
        framework: Option<Framework>,
        language: Option<Language>,
        file: Option<&str>,
    ) -> Result<ExecutionResult, ExecutorError> {
        let framework = framework.unwrap_or(self.codegen.framework);
        let language = language.unwrap_or(self.codegen.language);
        let options = GenerateOptions::new(framework, language)
            .with_interpolation(self.codegen.interpolation());

        let (name, log) = self.session.snapshot();
        let code = match generate(&log, &name, &options) {
            Ok(code) => code,
            Err(CodegenError::EmptyLog) => return Ok(ExecutionResult::message(NO_ACTIONS_MESSAGE)),
            Err(e) => return Err(e.into()),
        };

        let file_name = file
            .map(str::to_string)
            .unwrap_or_else(|| default_file_name(&name, framework, language));
        let path = self.writer.write_text(&file_name, &code.source)?;

        let skipped = code.skipped();
        let mut output = format!(
            "Generated {} {} test with {} statements: {}",
            framework,
            language,
            code.emitted_count(),
            path.display()
        );
        if !skipped.is_empty() {
            let kinds: Vec<String> = skipped.iter().map(|k| k.to_string()).collect();
            warn!(
                "{} actions have no {} equivalent: {}",
                skipped.len(),
                framework,
                kinds.join(", ")
            );
            output.push_str(&format!(
                "\nSkipped {} actions with no {} equivalent: {}",
                skipped.len(),
                framework,
                kinds.join(", ")
            ));
        }
        output.push_str("\n\n");
        output.push_str(&code.source);

        Ok(ExecutionResult {
            output,
            success: true,
            generated: Some(GeneratedArtifact {
                code: code.source,
                path,
                skipped,
            }),
        })
    }

    /// Closes the browser and clears the recording.
    async fn close<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<String, ExecutorError> {
        backend.close().await?;
        self.session.reset();
        Ok("Browser closed; recording cleared".into())
    }

    async fn run_primitive<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        command: Command,
    ) -> Result<String, ExecutorError> {
        let result = match ensure_launched(backend).await {
            Ok(()) => self.perform(backend, command).await,
            Err(e) => Err(e),
        };
        match result {
            Ok((action, output)) => {
                if let Some(action) = action {
                    self.recorder.record(action);
                }
                Ok(output)
            }
            Err(ExecutorError::Backend(e)) => {
                if e.is_element_error() {
                    warn!("Element operation failed: {}", e);
                } else {
                    warn!("Browser operation failed: {}", e);
                }
                Err(ExecutorError::Backend(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Runs one browser primitive. Returns the action to record, if any.
    async fn perform<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        command: Command,
    ) -> Result<(Option<Action>, String), ExecutorError> {
        match command {
            Command::Goto { url } => {
                let url = normalize_url(&url)?;
                let res = backend.navigate(&url).await?;
                Ok((
                    Some(Action::Navigate { url }),
                    format!("Navigated to {}", res.url),
                ))
            }
            Command::Click { selector } => {
                backend.click(&selector).await?;
                let output = format!("Clicked {}", selector);
                Ok((Some(Action::Click { selector }), output))
            }
            Command::Fill { selector, value } => {
                backend.fill(&selector, &value).await?;
                let output = format!("Filled {}", selector);
                Ok((Some(Action::Fill { selector, value }), output))
            }
            Command::Type {
                selector,
                text,
                delay,
            } => {
                backend.type_text(&selector, &text, delay).await?;
                let output = format!("Typed into {}", selector);
                Ok((
                    Some(Action::Type {
                        selector,
                        value: text,
                        delay,
                    }),
                    output,
                ))
            }
            Command::Press { key } => {
                backend.press_key(&key).await?;
                let output = format!("Pressed {}", key);
                Ok((Some(Action::Press { key }), output))
            }
            Command::Select { selector, value } => {
                backend.select_option(&selector, &value).await?;
                let output = format!("Selected '{}' in {}", value, selector);
                Ok((Some(Action::Select { selector, value }), output))
            }
            Command::Hover { selector } => {
                backend.hover(&selector).await?;
                let output = format!("Hovered {}", selector);
                Ok((Some(Action::Hover { selector }), output))
            }
            Command::Check { selector } => {
                backend.set_checked(&selector, true).await?;
                let output = format!("Checked {}", selector);
                Ok((Some(Action::Check { selector }), output))
            }
            Command::Uncheck { selector } => {
                backend.set_checked(&selector, false).await?;
                let output = format!("Unchecked {}", selector);
                Ok((Some(Action::Uncheck { selector }), output))
            }
            Command::Wait {
                selector,
                timeout_ms,
            } => {
                backend.wait_for_selector(&selector, timeout_ms).await?;
                let output = format!("Found {}", selector);
                Ok((Some(Action::WaitForSelector { selector }), output))
            }
            Command::Screenshot { name } => {
                let data = backend.screenshot().await?;
                let name = name.unwrap_or_else(|| DEFAULT_SCREENSHOT_NAME.to_string());
                let path = self.writer.write(&name, &data)?;
                let output = format!(
                    "Screenshot saved to {} ({} bytes)",
                    path.display(),
                    data.len()
                );
                Ok((Some(Action::Screenshot { value: name }), output))
            }
            Command::RecordStart { .. }
            | Command::RecordStop
            | Command::Status
            | Command::Generate { .. }
            | Command::Close => Ok((None, String::new())),
        }
    }
}

/// A `close` leaves the backend down; the next primitive brings it back.
async fn ensure_launched<B: Backend + ?Sized>(backend: &mut B) -> Result<(), ExecutorError> {
    if !backend.is_ready().await {
        info!("Browser not running; launching");
        backend.launch().await?;
    }
    Ok(())
}

/// Schemes accepted as typed. Anything else without `://` is taken to be a
/// host, as in `localhost:3000`.
const KNOWN_SCHEMES: &[&str] = &["http", "https", "file", "about", "data"];

/// Adds `https://` to scheme-less input such as `example.com/login` or
/// `localhost:3000`.
pub fn normalize_url(raw: &str) -> Result<String, ExecutorError> {
    let raw = raw.trim();
    let invalid = |e: url::ParseError| ExecutorError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    };
    let parsed = match url::Url::parse(raw) {
        Ok(url) if raw.contains("://") || KNOWN_SCHEMES.contains(&url.scheme()) => url,
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
            url::Url::parse(&format!("https://{}", raw)).map_err(invalid)?
        }
        Err(e) => return Err(invalid(e)),
    };
    Ok(parsed.to_string())
}
