//! Per-framework statement tables.
//!
//! A table maps an [`ActionKind`] to a small formatting function. A kind that
//! is missing from a table has no equivalent in that framework and is skipped
//! by the generator.

pub mod playwright;
pub mod puppeteer;
pub mod selenium;

use crate::literal::Interpolation;
use crate::target::Language;
use reel_common::{Action, ActionKind};

/// Formatting inputs shared by every template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub language: Language,
    pub interpolation: Interpolation,
}

impl RenderContext {
    pub fn new(language: Language, interpolation: Interpolation) -> Self {
        Self {
            language,
            interpolation,
        }
    }

    pub fn quote(&self, value: &str) -> String {
        self.interpolation.quote(value)
    }
}

/// Names for the generated entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Free-form title, used where the framework takes a string.
    pub title: String,
    /// Identifier-safe form, used for function names.
    pub ident: String,
}

/// The payload fields of an action, flattened for templates.
///
/// Fields a kind does not carry are empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slots<'a> {
    pub url: &'a str,
    pub selector: &'a str,
    pub value: &'a str,
    pub key: &'a str,
    pub delay: Option<u64>,
}

impl<'a> From<&'a Action> for Slots<'a> {
    fn from(action: &'a Action) -> Self {
        let mut slots = Slots::default();
        match action {
            Action::Navigate { url } => slots.url = url.as_str(),
            Action::Click { selector }
            | Action::Hover { selector }
            | Action::Check { selector }
            | Action::Uncheck { selector }
            | Action::WaitForSelector { selector } => slots.selector = selector.as_str(),
            Action::Fill { selector, value } | Action::Select { selector, value } => {
                slots.selector = selector.as_str();
                slots.value = value.as_str();
            }
            Action::Type {
                selector,
                value,
                delay,
            } => {
                slots.selector = selector.as_str();
                slots.value = value.as_str();
                slots.delay = *delay;
            }
            Action::Press { key } => slots.key = key.as_str(),
            Action::Screenshot { value } => slots.value = value.as_str(),
        }
        slots
    }
}

pub type Template = fn(&Slots<'_>, &RenderContext) -> String;

/// Lookup from action kind to statement template.
pub struct TemplateTable {
    pub entries: &'static [(ActionKind, Template)],
}

impl TemplateTable {
    pub fn lookup(&self, kind: ActionKind) -> Option<Template> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, template)| *template)
    }

    pub fn supports(&self, kind: ActionKind) -> bool {
        self.lookup(kind).is_some()
    }

    /// Renders one statement, or `None` when the kind has no template.
    pub fn render(&self, action: &Action, ctx: &RenderContext) -> Option<String> {
        let template = self.lookup(action.kind())?;
        Some(template(&Slots::from(action), ctx))
    }
}

/// Selenium key constant for a Playwright-style key name.
pub fn selenium_key(key: &str) -> Option<&'static str> {
    let constant = match key {
        "Enter" => "ENTER",
        "Tab" => "TAB",
        "Escape" => "ESCAPE",
        "Backspace" => "BACK_SPACE",
        "Delete" => "DELETE",
        "ArrowUp" => "ARROW_UP",
        "ArrowDown" => "ARROW_DOWN",
        "ArrowLeft" => "ARROW_LEFT",
        "ArrowRight" => "ARROW_RIGHT",
        "Home" => "HOME",
        "End" => "END",
        "PageUp" => "PAGE_UP",
        "PageDown" => "PAGE_DOWN",
        "Space" => "SPACE",
        _ => return None,
    };
    Some(constant)
}
