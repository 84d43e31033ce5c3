//! `selenium-webdriver` output for TypeScript and JavaScript.
//!
//! WebDriver has no checkbox helpers, so `check`/`uncheck` are absent. `fill`
//! and `type` both become `sendKeys`; the typing delay has no equivalent.

use super::{EntryName, RenderContext, Slots, Template, TemplateTable, selenium_key};
use crate::literal::Interpolation;
use reel_common::ActionKind;

pub const INDENT: &str = "    ";

/// Statements sit inside the `try` block.
pub const BODY_INDENT: &str = "        ";

/// How long `waitForSelector` polls before failing.
pub const WAIT_TIMEOUT_MS: u64 = 10_000;

pub static TABLE: TemplateTable = TemplateTable {
    entries: &[
        (ActionKind::Navigate, navigate as Template),
        (ActionKind::Click, click as Template),
        (ActionKind::Fill, send_keys as Template),
        (ActionKind::Type, send_keys as Template),
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
            "import {{ Builder, By, Key, until, WebDriver }} from 'selenium-webdriver';\n\
             import * as fs from 'fs';\n\n\
             (async function {}(): Promise<void> {{\n\
             {INDENT}const driver: WebDriver = await new Builder().forBrowser('chrome').build();\n\
             {INDENT}try {{\n",
            entry.ident
        )
    } else {
        format!(
            "const {{ Builder, By, Key, until }} = require('selenium-webdriver');\n\
             const fs = require('fs');\n\n\
             (async function {}() {{\n\
             {INDENT}const driver = await new Builder().forBrowser('chrome').build();\n\
             {INDENT}try {{\n",
            entry.ident
        )
    }
}

pub fn epilogue(_ctx: &RenderContext) -> String {
    format!("{INDENT}}} finally {{\n{INDENT}{INDENT}await driver.quit();\n{INDENT}}}\n}})();\n")
}

fn find(selector: &str, ctx: &RenderContext) -> String {
    format!("driver.findElement(By.css({}))", ctx.quote(selector))
}

fn navigate(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await driver.get({});", ctx.quote(s.url))
}

fn click(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("await {}.click();", find(s.selector, ctx))
}

fn send_keys(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await {}.sendKeys({});",
        find(s.selector, ctx),
        ctx.quote(s.value)
    )
}

fn press(s: &Slots<'_>, ctx: &RenderContext) -> String {
    let key = match selenium_key(s.key) {
        Some(constant) => format!("Key.{}", constant),
        None => ctx.quote(s.key),
    };
    format!("await driver.actions().sendKeys({}).perform();", key)
}

/// Contents of a double-quoted CSS attribute value.
fn css_string(value: &str, ctx: &RenderContext) -> String {
    match ctx.interpolation {
        Interpolation::Verbatim => value.to_string(),
        Interpolation::Escaped => value.replace('\\', "\\\\").replace('"', "\\\""),
    }
}

fn select(s: &Slots<'_>, ctx: &RenderContext) -> String {
    let option = format!(
        "{} option[value=\"{}\"]",
        s.selector,
        css_string(s.value, ctx)
    );
    format!("await {}.click();", find(&option, ctx))
}

fn hover(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await driver.actions().move({{ origin: await {} }}).perform();",
        find(s.selector, ctx)
    )
}

fn wait_for_selector(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "await driver.wait(until.elementLocated(By.css({})), {});",
        ctx.quote(s.selector),
        WAIT_TIMEOUT_MS
    )
}

fn screenshot(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "fs.writeFileSync({}, await driver.takeScreenshot(), 'base64');",
        ctx.quote(s.value)
    )
}
