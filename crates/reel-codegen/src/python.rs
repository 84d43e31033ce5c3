//! Python output.
//!
//! Python's two supported frameworks have different call shapes: Playwright
//! runs inside a `with sync_playwright()` block, Selenium drives an explicit
//! `webdriver` object inside `try`/`finally`. Each shape has its own table.
//! Puppeteer has no Python port and falls back to the Playwright shape.

use crate::generator::Strategy;
use crate::literal::python_test_name;
use crate::target::Framework;
use crate::templates::{
    EntryName, RenderContext, Slots, Template, TemplateTable, selenium_key,
};
use reel_common::{Action, ActionKind};

const WAIT_TIMEOUT_SECS: u64 = 10;

/// Which Python program layout to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PythonShape {
    SyncPlaywright,
    SeleniumDriver,
}

impl PythonShape {
    pub fn for_framework(framework: Framework) -> Self {
        match framework {
            Framework::Playwright | Framework::Puppeteer => PythonShape::SyncPlaywright,
            Framework::Selenium => PythonShape::SeleniumDriver,
        }
    }

    pub fn table(&self) -> &'static TemplateTable {
        match self {
            PythonShape::SyncPlaywright => &PLAYWRIGHT_TABLE,
            PythonShape::SeleniumDriver => &SELENIUM_TABLE,
        }
    }

    /// Statement indentation inside the test function.
    pub fn indent(&self) -> &'static str {
        "        "
    }

    pub fn prologue(&self, entry: &EntryName, degraded_from: Option<Framework>) -> String {
        let mut out = String::new();
        if let Some(framework) = degraded_from {
            out.push_str(&format!(
                "# {} has no Python bindings; rendered with Playwright.\n",
                framework
            ));
        }
        let name = python_test_name(&entry.ident);
        match self {
            PythonShape::SyncPlaywright => out.push_str(&format!(
                "from playwright.sync_api import sync_playwright\n\n\n\
                 def {}():\n\
                 \x20   with sync_playwright() as p:\n\
                 \x20       browser = p.chromium.launch()\n\
                 \x20       page = browser.new_page()\n",
                name
            )),
            PythonShape::SeleniumDriver => out.push_str(&format!(
                "from selenium import webdriver\n\
                 from selenium.webdriver.common.action_chains import ActionChains\n\
                 from selenium.webdriver.common.by import By\n\
                 from selenium.webdriver.common.keys import Keys\n\
                 from selenium.webdriver.support import expected_conditions as EC\n\
                 from selenium.webdriver.support.ui import Select, WebDriverWait\n\n\n\
                 def {}():\n\
                 \x20   driver = webdriver.Chrome()\n\
                 \x20   try:\n",
                name
            )),
        }
        out
    }

    pub fn epilogue(&self, entry: &EntryName) -> String {
        let teardown = match self {
            PythonShape::SyncPlaywright => "        browser.close()\n",
            PythonShape::SeleniumDriver => "    finally:\n        driver.quit()\n",
        };
        format!(
            "{}\n\nif __name__ == '__main__':\n    {}()\n",
            teardown,
            python_test_name(&entry.ident)
        )
    }
}

/// Strategy for every `(framework, Language::Python)` pair.
pub struct PythonStrategy {
    shape: PythonShape,
    /// Set when the requested framework has no Python port.
    degraded_from: Option<Framework>,
}

static PYTHON_PLAYWRIGHT: PythonStrategy = PythonStrategy {
    shape: PythonShape::SyncPlaywright,
    degraded_from: None,
};
static PYTHON_PUPPETEER: PythonStrategy = PythonStrategy {
    shape: PythonShape::SyncPlaywright,
    degraded_from: Some(Framework::Puppeteer),
};
static PYTHON_SELENIUM: PythonStrategy = PythonStrategy {
    shape: PythonShape::SeleniumDriver,
    degraded_from: None,
};

impl PythonStrategy {
    pub fn for_framework(framework: Framework) -> &'static dyn Strategy {
        match framework {
            Framework::Playwright => &PYTHON_PLAYWRIGHT,
            Framework::Puppeteer => &PYTHON_PUPPETEER,
            Framework::Selenium => &PYTHON_SELENIUM,
        }
    }
}

impl Strategy for PythonStrategy {
    fn prologue(&self, entry: &EntryName, _ctx: &RenderContext) -> String {
        self.shape.prologue(entry, self.degraded_from)
    }

    fn statement(&self, action: &Action, ctx: &RenderContext) -> Option<String> {
        self.shape.table().render(action, ctx)
    }

    fn indent(&self) -> &'static str {
        self.shape.indent()
    }

    fn empty_body(&self) -> Option<&'static str> {
        // `try:` directly followed by `finally:` is a syntax error
        match self.shape {
            PythonShape::SeleniumDriver => Some("pass"),
            PythonShape::SyncPlaywright => None,
        }
    }

    fn epilogue(&self, entry: &EntryName, _ctx: &RenderContext) -> String {
        self.shape.epilogue(entry)
    }
}

pub static PLAYWRIGHT_TABLE: TemplateTable = TemplateTable {
    entries: &[
        (ActionKind::Navigate, pw_navigate as Template),
        (ActionKind::Click, pw_click as Template),
        (ActionKind::Fill, pw_fill as Template),
        (ActionKind::Type, pw_type as Template),
        (ActionKind::Press, pw_press as Template),
        (ActionKind::Select, pw_select as Template),
        (ActionKind::Hover, pw_hover as Template),
        (ActionKind::Check, pw_check as Template),
        (ActionKind::Uncheck, pw_uncheck as Template),
        (ActionKind::WaitForSelector, pw_wait_for_selector as Template),
        (ActionKind::Screenshot, pw_screenshot as Template),
    ],
};

pub static SELENIUM_TABLE: TemplateTable = TemplateTable {
    entries: &[
        (ActionKind::Navigate, se_navigate as Template),
        (ActionKind::Click, se_click as Template),
        (ActionKind::Fill, se_send_keys as Template),
        (ActionKind::Type, se_send_keys as Template),
        (ActionKind::Press, se_press as Template),
        (ActionKind::Select, se_select as Template),
        (ActionKind::Hover, se_hover as Template),
        (ActionKind::WaitForSelector, se_wait_for_selector as Template),
        (ActionKind::Screenshot, se_screenshot as Template),
    ],
};

fn pw_navigate(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.goto({})", ctx.quote(s.url))
}

fn pw_click(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.click({})", ctx.quote(s.selector))
}

fn pw_fill(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.fill({}, {})", ctx.quote(s.selector), ctx.quote(s.value))
}

fn pw_type(s: &Slots<'_>, ctx: &RenderContext) -> String {
    match s.delay {
        Some(delay) => format!(
            "page.type({}, {}, delay={})",
            ctx.quote(s.selector),
            ctx.quote(s.value),
            delay
        ),
        None => format!("page.type({}, {})", ctx.quote(s.selector), ctx.quote(s.value)),
    }
}

fn pw_press(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.keyboard.press({})", ctx.quote(s.key))
}

fn pw_select(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "page.select_option({}, {})",
        ctx.quote(s.selector),
        ctx.quote(s.value)
    )
}

fn pw_hover(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.hover({})", ctx.quote(s.selector))
}

fn pw_check(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.check({})", ctx.quote(s.selector))
}

fn pw_uncheck(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.uncheck({})", ctx.quote(s.selector))
}

fn pw_wait_for_selector(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.wait_for_selector({})", ctx.quote(s.selector))
}

fn pw_screenshot(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("page.screenshot(path={})", ctx.quote(s.value))
}

fn se_find(selector: &str, ctx: &RenderContext) -> String {
    format!("driver.find_element(By.CSS_SELECTOR, {})", ctx.quote(selector))
}

fn se_navigate(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("driver.get({})", ctx.quote(s.url))
}

fn se_click(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("{}.click()", se_find(s.selector, ctx))
}

fn se_send_keys(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("{}.send_keys({})", se_find(s.selector, ctx), ctx.quote(s.value))
}

fn se_press(s: &Slots<'_>, ctx: &RenderContext) -> String {
    let key = match selenium_key(s.key) {
        Some(constant) => format!("Keys.{}", constant),
        None => ctx.quote(s.key),
    };
    format!("ActionChains(driver).send_keys({}).perform()", key)
}

fn se_select(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "Select({}).select_by_value({})",
        se_find(s.selector, ctx),
        ctx.quote(s.value)
    )
}

fn se_hover(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "ActionChains(driver).move_to_element({}).perform()",
        se_find(s.selector, ctx)
    )
}

fn se_wait_for_selector(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!(
        "WebDriverWait(driver, {}).until(EC.presence_of_element_located((By.CSS_SELECTOR, {})))",
        WAIT_TIMEOUT_SECS,
        ctx.quote(s.selector)
    )
}

fn se_screenshot(s: &Slots<'_>, ctx: &RenderContext) -> String {
    format!("driver.save_screenshot({})", ctx.quote(s.value))
}
