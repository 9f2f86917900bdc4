//! Playwright session execution and observation parsing
//!
//! One browser session per scenario: the generated script runs under node,
//! the harness reads the NDJSON observation stream it prints, and all
//! decoding/assertion happens on this side of the process boundary.

use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::script::{self, GameAction};

/// Browser engine to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for the browser session
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            browser: Browser::Chromium,
            viewport_width: 1280,
            viewport_height: 720,
            headless: true,
        }
    }
}

/// One typed record from the script's stdout stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    /// Per-color piece counts at a labelled point.
    Counts {
        label: String,
        orange: usize,
        blue: usize,
    },

    /// Raw `src` attributes of all 64 squares, row-major; absent
    /// attributes are null.
    Board {
        label: String,
        cells: Vec<Option<String>>,
    },

    /// Message-region text found by a bounded status poll, or null when
    /// the poll timed out with the game still going.
    Message {
        label: String,
        text: Option<String>,
    },

    /// The step that threw, aborting the session.
    Error { step: String, message: String },

    /// All steps completed.
    Done,
}

/// Handle for running checkers sessions through Playwright
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlaywrightConfig {
        &self.config
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.config.base_url = base_url;
    }

    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Run one full session: build the script for the actions, execute it
    /// under node, and parse the observation stream.
    ///
    /// A failed step is reported through an `Observation::Error` so the
    /// caller still sees everything observed before the failure, including
    /// the best-effort final board capture.
    pub async fn run_session(
        &self,
        seed: Option<&[f64]>,
        actions: &[GameAction],
    ) -> E2eResult<Vec<Observation>> {
        let script = script::build_script(&self.config, seed, actions);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("session.js");
        std::fs::write(&script_path, &script)?;

        debug!("running Playwright session: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let observations = parse_observations(&stdout);

        if !output.status.success()
            && !observations
                .iter()
                .any(|o| matches!(o, Observation::Error { .. }))
        {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(E2eError::Playwright(format!(
                "session exited abnormally:\nstdout: {stdout}\nstderr: {stderr}"
            )));
        }

        Ok(observations)
    }
}

/// Parse the NDJSON stream, skipping anything that is not an observation
/// (the page may log through the same pipe).
pub fn parse_observations(stdout: &str) -> Vec<Observation> {
    stdout
        .lines()
        .filter(|line| line.trim_start().starts_with('{'))
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}
