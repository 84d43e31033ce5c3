use crate::backend::Backend;
use crate::command::parse_command;
use crate::executor::{CommandExecutor, ExecutorError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub const PROMPT: &str = "reel> ";
pub const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Where command output and errors are printed.
#[derive(Clone, Copy)]
pub struct Console {
    pub out: fn(&str),
    pub err: fn(&str),
}

impl Console {
    pub const STDIO: Console = Console {
        out: |msg| println!("{}", msg),
        err: |msg| eprintln!("{}", msg),
    };
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Read(#[from] io::Error),
    #[error("line {number} '{line}': {source}")]
    Line {
        number: usize,
        line: String,
        #[source]
        source: ExecutorError,
    },
}

/// What a script or interactive session did.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Commands executed successfully. Blank lines and comments are not
    /// counted.
    pub commands: usize,
    /// Test files written by `generate`, in order.
    pub generated: Vec<PathBuf>,
}

impl RunReport {
    /// One-line summary, ending with the recording state.
    pub fn summary(&self, executor: &CommandExecutor) -> String {
        let mut out = format!("{} commands", self.commands);
        match self.generated.as_slice() {
            [] => out.push_str(", no tests generated"),
            paths => {
                let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                out.push_str(&format!(", generated {}", names.join(", ")));
            }
        }
        out.push_str(&format!(". {}", executor.status()));
        out
    }
}

/// Parses and runs one line. `Ok(None)` for blank lines and comments.
async fn step<B: Backend + ?Sized>(
    backend: &mut B,
    executor: &mut CommandExecutor,
    report: &mut RunReport,
    line: &str,
) -> Result<Option<String>, ExecutorError> {
    let Some(command) = parse_command(line)? else {
        return Ok(None);
    };
    let result = executor.execute(backend, command).await?;
    report.commands += 1;
    if let Some(artifact) = &result.generated {
        report.generated.push(artifact.path.clone());
    }
    Ok(Some(result.output))
}

/// Runs a script top to bottom, stopping at the first failing line.
pub async fn run_file<B: Backend + ?Sized>(
    backend: &mut B,
    executor: &mut CommandExecutor,
    console: Console,
    path: &Path,
) -> Result<RunReport, ScriptError> {
    let content = tokio::fs::read_to_string(path).await?;
    debug!("Running script {}", path.display());

    let mut report = RunReport::default();
    for (index, line) in content.lines().enumerate() {
        match step(backend, executor, &mut report, line).await {
            Ok(Some(output)) if !output.is_empty() => (console.out)(&output),
            Ok(_) => {}
            Err(source) => {
                return Err(ScriptError::Line {
                    number: index + 1,
                    line: line.trim().to_string(),
                    source,
                });
            }
        }
    }
    Ok(report)
}

enum ReadLineResult {
    Input(String),
    Skip,
    /// EOF, an exit command or Ctrl-C.
    Exit,
    Error(io::Error),
}

async fn read_line(
    reader: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
    console: Console,
) -> ReadLineResult {
    tokio::select! {
        line = reader.next_line() => classify_line(line),
        _ = tokio::signal::ctrl_c() => {
            (console.out)("Interrupted");
            ReadLineResult::Exit
        }
    }
}

fn classify_line(result: Result<Option<String>, io::Error>) -> ReadLineResult {
    match result {
        Ok(Some(input)) => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                ReadLineResult::Skip
            } else if EXIT_COMMANDS.contains(&trimmed) {
                ReadLineResult::Exit
            } else {
                ReadLineResult::Input(trimmed.to_string())
            }
        }
        Ok(None) => ReadLineResult::Exit,
        Err(e) => ReadLineResult::Error(e),
    }
}

/// `reel> ` becomes `reel[● login]> ` while a recording is active.
pub fn recording_prompt(executor: &CommandExecutor) -> String {
    let session = executor.session().lock();
    if !session.is_active() {
        return PROMPT.to_string();
    }
    let stem = PROMPT.trim_end().trim_end_matches('>');
    format!("{}[● {}]> ", stem, session.name())
}

/// Interactive loop. Errors are printed and the loop carries on.
pub async fn run_repl<B: Backend + ?Sized>(
    backend: &mut B,
    executor: &mut CommandExecutor,
    console: Console,
    banner: &[&str],
) -> io::Result<RunReport> {
    for line in banner {
        (console.out)(line);
    }

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();
    let mut report = RunReport::default();

    loop {
        print!("{}", recording_prompt(executor));
        stdout.flush()?;

        match read_line(&mut reader, console).await {
            ReadLineResult::Input(line) => {
                match step(backend, executor, &mut report, &line).await {
                    Ok(Some(output)) if !output.is_empty() => (console.out)(&output),
                    Ok(_) => {}
                    Err(e) => (console.err)(&format!("Error: {}", e)),
                }
            }
            ReadLineResult::Skip => continue,
            ReadLineResult::Exit => break,
            ReadLineResult::Error(e) => return Err(e),
        }
    }
    Ok(report)
}
