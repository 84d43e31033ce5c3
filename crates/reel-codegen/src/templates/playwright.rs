//! `@playwright/test` output for TypeScript and JavaScript.

use super::{EntryName, RenderContext, Slots, Template, TemplateTable};
use crate::literal::escape_single_quoted;
use reel_common::ActionKind;

pub const INDENT: &str = "  ";

pub static TABLE: TemplateTable = TemplateTable {
    entries: &[
        (ActionKind::Navigate, navigate as Template),
        (ActionKind::Click, click as Template),
        (ActionKind::Fill, fill as Template),
        (ActionKind::Type, type_text as Template),
        (ActionKind::Press, press as Template),
        (ActionKind::Select, select as Template),
        (ActionKind::Hover, hover as Template),
        (ActionKind::Check, check as Template),
        (ActionKind::Uncheck, uncheck as Template),
        (ActionKind::WaitForSelector, wait_for_selector as Template),
        (ActionKind::Screenshot, screenshot as Template),
    ],
};

/// The test title is escaped whatever the interpolation mode.
pub fn prologue(entry: &EntryName, ctx: &RenderContext) -> String {
    let import = if ctx.language.is_typed() {
        "import { test } from '@playwright/test';"
    } else {
        "const { test } = require('@playwright/test');"
    };
    format!(
        "{}\n\ntest('{}', async ({{ page }}) => {{\n",
        import,
        escape_single_quoted(&entry.title)
    )
}

pub fn epilogue(_ctx: &RenderContext) -> String {
    format!("{}await page.close();\n}});\n", INDENT)
}

fn navigate(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.goto({});", ctx.quote(s.url))
}

fn click(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.click({});", ctx.quote(s.selector))
}

fn fill(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await page.fill({}, {});",
        ctx.quote(s.selector),
        ctx.quote(s.value)
    )
}

fn type_text(s: &Slots<'_>, ctx: &RenderContext) -> String {
    match s.delay {
        Some(delay) => format!(
            "await page.type({}, {}, {{ delay: {} }});",
            ctx.quote(s.selector),
            ctx.quote(s.value),
            delay
        ),
        None => format!(
            "await page.type({}, {});",
            ctx.quote(s.selector),
            ctx.quote(s.value)
        ),
    }
}

fn press(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.keyboard.press({});", ctx.quote(s.key))
}

fn select(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await page.selectOption({}, {});",
        ctx.quote(s.selector),
        ctx.quote(s.value)
    )
}

fn hover(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.hover({});", ctx.quote(s.selector))
}

fn check(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.check({});", ctx.quote(s.selector))
}

fn uncheck(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.uncheck({});", ctx.quote(s.selector))
}

fn wait_for_selector(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.waitForSelector({});", ctx.quote(s.selector))
}

fn screenshot(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.screenshot({{ path: {} }});", ctx.quote(s.value))
}
