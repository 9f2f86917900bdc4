//! Checkers E2E Test Harness
//!
//! Rust-controlled browser testing for the web checkers game:
//! - Spawns (or attaches to) the game's web server
//! - Drives Playwright through generated Node scripts, one session per
//!   scenario
//! - Infers board state from rendered image `src` markers and verifies it
//!   against the declarative fixtures in `checkers-board`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Scenario Runner (Rust)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                              │
//! │    ├── start_server() -> ServerHandle                        │
//! │    ├── build_steps(scenario) -> [GameAction]                 │
//! │    ├── PlaywrightHandle::run_session -> [Observation]        │
//! │    └── evaluate(scenario, observations) -> report            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Session script (generated JS, NDJSON on stdout)             │
//! │    ├── addInitScript: seed sessionStorage board              │
//! │    ├── clicks + visibility waits per move                    │
//! │    ├── counts / board captures (Promise.all over 64 cells)   │
//! │    └── bounded status poll of the message region             │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod error;
pub mod locators;
pub mod playwright;
pub mod runner;
pub mod script;
pub mod server;

pub use error::{E2eError, E2eResult};
pub use playwright::{Observation, PlaywrightConfig, PlaywrightHandle};
pub use runner::{RunnerConfig, ScenarioRunner, SuiteResult};
pub use script::GameAction;
