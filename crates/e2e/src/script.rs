//! Interaction steps and Playwright script generation
//!
//! A scenario compiles to a single Node script: one browser session, the
//! steps in order, and a newline-delimited JSON observation stream on
//! stdout that the harness parses back into typed values. Board seeding
//! happens through `addInitScript` before navigation so the game reads the
//! custom position during its own initialization.

use checkers_board::markers::{
    BOARD_DIMENSION, BOARD_SEED_STORAGE_KEY, BOARD_SIZE, GAME_OVER_MESSAGE, SQUARE_NAME_PREFIX,
};
use checkers_board::PieceColor;

use crate::locators;
use crate::playwright::PlaywrightConfig;

/// Default timeout for element visibility waits.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// Interval between message-region samples while polling for game over.
pub const STATUS_POLL_INTERVAL_MS: u64 = 250;

/// One interaction step against the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    /// Open the game page (relative route).
    Navigate { route: String },

    /// Click an element.
    Click { selector: String },

    /// Wait until an element is visible; failing the wait fails the step.
    WaitVisible { selector: String, timeout_ms: u64 },

    /// Wait until an element is hidden or detached.
    WaitHidden { selector: String, timeout_ms: u64 },

    /// Wait until the message region text matches a pattern.
    ExpectMessage { pattern: String, timeout_ms: u64 },

    /// Emit per-color piece counts.
    CaptureCounts { label: String },

    /// Emit the raw `src` attribute of all 64 squares.
    CaptureBoard { label: String },

    /// Poll the message region for a terminal-status text up to a
    /// deadline; emits the text found, or null on timeout. Timing out is
    /// the normal "game still going" signal, not a failure.
    PollStatus { label: String, timeout_ms: u64 },
}

impl GameAction {
    /// Short name used in logs and failure reports.
    pub fn name(&self) -> String {
        match self {
            GameAction::Navigate { route } => format!("navigate:{route}"),
            GameAction::Click { selector } => format!("click:{selector}"),
            GameAction::WaitVisible { selector, .. } => format!("wait-visible:{selector}"),
            GameAction::WaitHidden { selector, .. } => format!("wait-hidden:{selector}"),
            GameAction::ExpectMessage { pattern, .. } => format!("expect-message:{pattern}"),
            GameAction::CaptureCounts { label } => format!("capture-counts:{label}"),
            GameAction::CaptureBoard { label } => format!("capture-board:{label}"),
            GameAction::PollStatus { label, .. } => format!("poll-status:{label}"),
        }
    }
}

fn js_quote(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Build the complete Node script for one browser session.
pub fn build_script(
    config: &PlaywrightConfig,
    seed: Option<&[f64]>,
    actions: &[GameAction],
) -> String {
    let mut script = String::new();

    script.push_str(&format!(
        r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const baseUrl = '{base_url}';

  const emit = (obj) => console.log(JSON.stringify(obj));

  const messageText = async (page) => {{
    const el = await page.$('{message_display}');
    return el ? await el.textContent() : null;
  }};

  const countPieces = async (page, selector) =>
    page.locator(selector).count();

  const captureBoard = async (page, label) => {{
    const cells = await Promise.all(
      Array.from({{ length: {board_size} }}, (_, i) => {{
        const x = i % {dimension};
        const y = Math.floor(i / {dimension});
        return page
          .locator(`img[name="{prefix}${{x}}${{y}}"]`)
          .getAttribute('src');
      }})
    );
    emit({{ kind: 'board', label, cells }});
  }};
"#,
        browser = config.browser.as_str(),
        headless = config.headless,
        width = config.viewport_width,
        height = config.viewport_height,
        base_url = js_quote(&config.base_url),
        message_display = js_quote(locators::message_display()),
        board_size = BOARD_SIZE,
        dimension = BOARD_DIMENSION,
        prefix = SQUARE_NAME_PREFIX,
    ));

    if let Some(cells) = seed {
        let payload = serde_json::to_string(cells).unwrap_or_else(|_| "[]".to_string());
        script.push_str(&format!(
            r#"
  await context.addInitScript((cells) => {{
    window.sessionStorage.setItem('{key}', JSON.stringify(cells));
  }}, {payload});
"#,
            key = BOARD_SEED_STORAGE_KEY,
        ));
    }

    script.push_str(
        r#"
  const page = await context.newPage();
  let step = 'setup';

  try {
"#,
    );

    for (i, action) in actions.iter().enumerate() {
        script.push_str(&format!(
            "\n    // Step {}: {}\n    step = '{}';\n",
            i + 1,
            action.name(),
            js_quote(&action.name())
        ));
        script.push_str(&action_to_js(action));
        script.push('\n');
    }

    script.push_str(&format!(
        r#"
    emit({{ kind: 'done' }});
  }} catch (error) {{
    emit({{ kind: 'error', step, message: error.message }});
    try {{ await captureBoard(page, 'final'); }} catch {{}}
    process.exitCode = 1;
  }} finally {{
    await browser.close();
  }}
}})();
"#,
    ));

    script
}

fn action_to_js(action: &GameAction) -> String {
    match action {
        GameAction::Navigate { route } => {
            format!("    await page.goto(baseUrl + '{}');", js_quote(route))
        }
        GameAction::Click { selector } => {
            format!(
                "    await page.click('{}', {{ timeout: {DEFAULT_WAIT_TIMEOUT_MS} }});",
                js_quote(selector)
            )
        }
        GameAction::WaitVisible {
            selector,
            timeout_ms,
        } => format!(
            "    await page.waitForSelector('{}', {{ state: 'visible', timeout: {timeout_ms} }});",
            js_quote(selector)
        ),
        GameAction::WaitHidden {
            selector,
            timeout_ms,
        } => format!(
            "    await page.waitForSelector('{}', {{ state: 'hidden', timeout: {timeout_ms} }});",
            js_quote(selector)
        ),
        GameAction::ExpectMessage {
            pattern,
            timeout_ms,
        } => {
            let (body, flags) = js_regex_parts(pattern);
            format!(
                r#"    await page.waitForFunction(
      ([body, flags]) => {{
        const el = document.querySelector('{display}');
        return el !== null && new RegExp(body, flags).test(el.textContent);
      }},
      ['{body}', '{flags}'],
      {{ timeout: {timeout_ms} }}
    );"#,
                display = js_quote(locators::message_display()),
                body = js_quote(body),
            )
        }
        GameAction::CaptureCounts { label } => format!(
            r#"    emit({{
      kind: 'counts',
      label: '{label}',
      orange: await countPieces(page, '{orange}'),
      blue: await countPieces(page, '{blue}')
    }});"#,
            label = js_quote(label),
            orange = js_quote(&locators::all_pieces(PieceColor::Orange)),
            blue = js_quote(&locators::all_pieces(PieceColor::Blue)),
        ),
        GameAction::CaptureBoard { label } => {
            format!("    await captureBoard(page, '{}');", js_quote(label))
        }
        GameAction::PollStatus { label, timeout_ms } => format!(
            r#"    {{
      const deadline = Date.now() + {timeout_ms};
      let text = null;
      while (Date.now() < deadline) {{
        const current = await messageText(page);
        if (current !== null && {game_over}.test(current)) {{
          text = current;
          break;
        }}
        await page.waitForTimeout({STATUS_POLL_INTERVAL_MS});
      }}
      emit({{ kind: 'message', label: '{label}', text }});
    }}"#,
            label = js_quote(label),
            game_over = game_over_js_regex(),
        ),
    }
}

/// Split a pattern into JS regex body and flags. Rust's inline `(?i)` flag
/// is not valid JS regex syntax, so it moves out of the pattern.
fn js_regex_parts(pattern: &str) -> (&str, &'static str) {
    match pattern.strip_prefix("(?i)") {
        Some(body) => (body, "i"),
        None => (pattern, ""),
    }
}

/// The terminal-message pattern as a JS regex literal.
fn game_over_js_regex() -> String {
    let (body, flags) = js_regex_parts(GAME_OVER_MESSAGE.as_str());
    format!("/{body}/{flags}")
}
