//! Puppeteer output for TypeScript and JavaScript.
//!
//! Puppeteer has no checkbox helpers, so `check`/`uncheck` are absent.

use super::{EntryName, RenderContext, Slots, Template, TemplateTable};
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
        (ActionKind::WaitForSelector, wait_for_selector as Template),
        (ActionKind::Screenshot, screenshot as Template),
    ],
};

pub fn prologue(entry: &EntryName, ctx: &RenderContext) -> String {
    if ctx.language.is_typed() {
        format!(
            "import puppeteer, {{ Browser, Page }} from 'puppeteer';\n\n\
             (async function {}(): Promise<void> {{\n\
             {INDENT}const browser: Browser = await puppeteer.launch();\n\
             {INDENT}const page: Page = await browser.newPage();\n",
            entry.ident
        )
    } else {
        format!(
            "const puppeteer = require('puppeteer');\n\n\
             (async function {}() {{\n\
             {INDENT}const browser = await puppeteer.launch();\n\
             {INDENT}const page = await browser.newPage();\n",
            entry.ident
        )
    }
}

pub fn epilogue(_ctx: &RenderContext) -> String {
    format!("{INDENT}await browser.close();\n}})();\n")
}

fn navigate(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.goto({});", ctx.quote(s.url))
}

fn click(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.click({});", ctx.quote(s.selector))
}

fn fill(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await page.locator({}).fill({});",
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
        "await page.select({}, {});",
        ctx.quote(s.selector),
        ctx.quote(s.value)
    )
}

fn hover(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.hover({});", ctx.quote(s.selector))
}

fn wait_for_selector(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.waitForSelector({});", ctx.quote(s.selector))
}

fn screenshot(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await page.screenshot({{ path: {} }});", ctx.quote(s.value))
}
