use crate::literal::{DEFAULT_TEST_NAME, Interpolation, sanitize_identifier};
use crate::python::PythonStrategy;
use crate::target::{Framework, Language};
use crate::templates::{EntryName, RenderContext, playwright, puppeteer, selenium};
use reel_common::{Action, ActionKind, RecordedAction};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("No actions recorded")]
    EmptyLog,
    #[error("Unknown framework: {0} (expected playwright, puppeteer or selenium)")]
    UnknownFramework(String),
    #[error("Unknown language: {0} (expected typescript, javascript or python)")]
    UnknownLanguage(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    pub framework: Framework,
    pub language: Language,
    pub interpolation: Interpolation,
}

impl GenerateOptions {
    pub fn new(framework: Framework, language: Language) -> Self {
        Self {
            framework,
            language,
            interpolation: Interpolation::default(),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// What happened to one logged action during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Emitted { index: usize, kind: ActionKind },
    /// The target framework has no statement for this kind.
    Skipped { index: usize, kind: ActionKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub source: String,
    /// One entry per input action, in log order.
    pub outcomes: Vec<ActionOutcome>,
}

impl GeneratedCode {
    pub fn emitted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ActionOutcome::Emitted { .. }))
            .count()
    }

    pub fn skipped(&self) -> Vec<ActionKind> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                ActionOutcome::Skipped { kind, .. } => Some(*kind),
                ActionOutcome::Emitted { .. } => None,
            })
            .collect()
    }
}

/// Rendering procedure for one (framework, language) pair.
pub trait Strategy: Sync {
    /// Imports, setup and the opening of the test entry point.
    fn prologue(&self, entry: &EntryName, ctx: &RenderContext) -> String;

    /// One statement without indentation, or `None` if the kind is unmapped.
    fn statement(&self, action: &Action, ctx: &RenderContext) -> Option<String>;

    fn indent(&self) -> &'static str;

    /// Filler for a body in which every action was skipped, where the language
    /// rejects an empty block.
    fn empty_body(&self) -> Option<&'static str> {
        None
    }

    /// Teardown and the closing of the entry point.
    fn epilogue(&self, entry: &EntryName, ctx: &RenderContext) -> String;
}

/// TypeScript and JavaScript share one table per framework.
struct ScriptStrategy {
    framework: Framework,
}

impl Strategy for ScriptStrategy {
    fn prologue(&self, entry: &EntryName, ctx: &RenderContext) -> String {
        match self.framework {
            Framework::Playwright => playwright::prologue(entry, ctx),
            Framework::Puppeteer => puppeteer::prologue(entry, ctx),
            Framework::Selenium => selenium::prologue(entry, ctx),
        }
    }

    fn statement(&self, action: &Action, ctx: &RenderContext) -> Option<String> {
        let table = match self.framework {
            Framework::Playwright => &playwright::TABLE,
            Framework::Puppeteer => &puppeteer::TABLE,
            Framework::Selenium => &selenium::TABLE,
        };
        table.render(action, ctx)
    }

    fn indent(&self) -> &'static str {
        match self.framework {
            Framework::Playwright => playwright::INDENT,
            Framework::Puppeteer => puppeteer::INDENT,
            Framework::Selenium => selenium::BODY_INDENT,
        }
    }

    fn epilogue(&self, _entry: &EntryName, ctx: &RenderContext) -> String {
        match self.framework {
            Framework::Playwright => playwright::epilogue(ctx),
            Framework::Puppeteer => puppeteer::epilogue(ctx),
            Framework::Selenium => selenium::epilogue(ctx),
        }
    }
}

static PLAYWRIGHT_SCRIPT: ScriptStrategy = ScriptStrategy {
    framework: Framework::Playwright,
};
static PUPPETEER_SCRIPT: ScriptStrategy = ScriptStrategy {
    framework: Framework::Puppeteer,
};
static SELENIUM_SCRIPT: ScriptStrategy = ScriptStrategy {
    framework: Framework::Selenium,
};

/// Looks up the rendering strategy for a target pair.
///
/// Python does not go through the framework-keyed script tables; it has its
/// own path that picks a program shape from the framework.
pub fn strategy_for(framework: Framework, language: Language) -> &'static dyn Strategy {
    match (framework, language) {
        (framework, Language::Python) => PythonStrategy::for_framework(framework),
        (Framework::Playwright, _) => &PLAYWRIGHT_SCRIPT,
        (Framework::Puppeteer, _) => &PUPPETEER_SCRIPT,
        (Framework::Selenium, _) => &SELENIUM_SCRIPT,
    }
}

/// Renders `log` as a single test named after `session_name`.
///
/// Actions appear in log order, one statement each. Kinds the target cannot
/// express are left out and reported as [`ActionOutcome::Skipped`].
pub fn generate(
    log: &[RecordedAction],
    session_name: &str,
    options: &GenerateOptions,
) -> Result<GeneratedCode, CodegenError> {
    if log.is_empty() {
        return Err(CodegenError::EmptyLog);
    }

    let strategy = strategy_for(options.framework, options.language);
    let ctx = RenderContext::new(options.language, options.interpolation);
    let entry = entry_name(session_name);

    let mut source = strategy.prologue(&entry, &ctx);
    let mut outcomes = Vec::with_capacity(log.len());

    for (index, recorded) in log.iter().enumerate() {
        let kind = recorded.kind();
        match strategy.statement(&recorded.action, &ctx) {
            Some(statement) => {
                source.push_str(strategy.indent());
                source.push_str(&statement);
                source.push('\n');
                outcomes.push(ActionOutcome::Emitted { index, kind });
            }
            None => {
                debug!(
                    "Skipping {} action #{}: no {} {} equivalent",
                    kind, index, options.framework, options.language
                );
                outcomes.push(ActionOutcome::Skipped { index, kind });
            }
        }
    }

    let all_skipped = outcomes
        .iter()
        .all(|o| matches!(o, ActionOutcome::Skipped { .. }));
    if all_skipped && let Some(filler) = strategy.empty_body() {
        source.push_str(strategy.indent());
        source.push_str(filler);
        source.push('\n');
    }
    source.push_str(&strategy.epilogue(&entry, &ctx));

    Ok(GeneratedCode { source, outcomes })
}

fn entry_name(session_name: &str) -> EntryName {
    let title = session_name.trim();
    EntryName {
        title: if title.is_empty() {
            DEFAULT_TEST_NAME.to_string()
        } else {
            title.to_string()
        },
        ident: sanitize_identifier(session_name),
    }
}
