use anyhow::{Context, Result};
use reel_engine::RecordedAction;
use reel_engine::codegen::{GenerateOptions, GeneratedCode, generate};
use std::path::Path;

/// Reads a JSON action log, as written by a recording, from `path`.
pub async fn load_log(path: &Path) -> Result<Vec<RecordedAction>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading action log {}", path.display()))?;
    parse_log(&content).with_context(|| format!("parsing action log {}", path.display()))
}

pub fn parse_log(content: &str) -> Result<Vec<RecordedAction>> {
    Ok(serde_json::from_str(content)?)
}

pub fn render(
    log: &[RecordedAction],
    name: &str,
    options: &GenerateOptions,
) -> Result<GeneratedCode> {
    generate(log, name, options).context("rendering action log")
}
