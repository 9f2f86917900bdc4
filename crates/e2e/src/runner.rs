//! Scenario runner orchestrating sessions, observations, and assertions
//!
//! One pass per scenario: seed the board, navigate, baseline counts, play
//! the moves, classify the terminal status, verify the final board, and
//! attach the final grid as a diagnostic whether the scenario passed or
//! not.

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use checkers_board::markers::{DEFAULT_GAME_OVER_TIMEOUT_MS, DEFAULT_GAME_ROUTE};
use checkers_board::{
    board_grid_string, boards_match, catalog, decode_capture, encode_state, BoardTestScenario,
    GameStatus, PieceColor,
};

use crate::actions;
use crate::error::{E2eError, E2eResult};
use crate::playwright::{Observation, PlaywrightConfig, PlaywrightHandle};
use crate::script::GameAction;
use crate::server::{ServerConfig, ServerHandle};

/// Result of running one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,

    /// Final rendered board as a row-major 8x8 grid string, when a
    /// capture was obtained. Attached on failure too.
    pub final_board: Option<String>,

    pub error: Option<String>,
}

/// Result of running a set of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub reports: Vec<ScenarioReport>,
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub playwright: PlaywrightConfig,

    /// Server to spawn; None attaches to whatever already listens at the
    /// session base URL.
    pub server: Option<ServerConfig>,

    /// Route of the game page, relative to the base URL.
    pub game_route: String,

    /// Window for the terminal-status poll.
    pub status_timeout_ms: u64,

    /// Directory the suite report is written into.
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            playwright: PlaywrightConfig::default(),
            server: None,
            game_route: DEFAULT_GAME_ROUTE.to_string(),
            status_timeout_ms: DEFAULT_GAME_OVER_TIMEOUT_MS,
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Drives scenarios against the live game
pub struct ScenarioRunner {
    config: RunnerConfig,
    server: Option<ServerHandle>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            config,
            server: None,
        }
    }

    /// Spawn the game server if one is configured and not yet running,
    /// and point the browser sessions at it.
    pub async fn start_server(&mut self) -> E2eResult<()> {
        if self.server.is_some() {
            return Ok(());
        }

        if let Some(server_config) = self.config.server.clone() {
            let server = ServerHandle::spawn(server_config).await?;
            self.config.playwright.base_url = server.base_url().to_string();
            self.server = Some(server);
        }

        Ok(())
    }

    /// Session configuration in effect, including the base URL of a
    /// server spawned by `start_server`.
    pub fn playwright_config(&self) -> &PlaywrightConfig {
        &self.config.playwright
    }

    pub fn stop_server(&mut self) -> E2eResult<()> {
        if let Some(mut server) = self.server.take() {
            server.stop()?;
        }
        Ok(())
    }

    /// Run every scenario in the catalogue.
    pub async fn run_all(&mut self) -> E2eResult<SuiteResult> {
        let scenarios = catalog::all_scenarios();
        self.run_scenarios(&scenarios).await
    }

    /// Run catalogue scenarios by key.
    pub async fn run_keys(&mut self, keys: &[String]) -> E2eResult<SuiteResult> {
        let mut scenarios = Vec::new();
        for key in keys {
            let scenario = catalog::scenario(key)
                .ok_or_else(|| E2eError::UnknownScenario(key.clone()))?;
            scenarios.push(scenario);
        }
        self.run_scenarios(&scenarios).await
    }

    /// Run a list of scenarios sequentially, summarizing pass/fail.
    pub async fn run_scenarios(&mut self, scenarios: &[BoardTestScenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let mut reports = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        self.start_server().await?;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            match self.run_scenario(scenario).await {
                Ok(report) => {
                    if report.success {
                        passed += 1;
                        info!("✓ {} ({} ms)", report.name, report.duration_ms);
                    } else {
                        failed += 1;
                        error!(
                            "✗ {} - {}",
                            report.name,
                            report.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    reports.push(report);
                }
                Err(e) => {
                    failed += 1;
                    error!("✗ {} - {}", scenario.name, e);
                    reports.push(ScenarioReport {
                        name: scenario.name.clone(),
                        success: false,
                        duration_ms: 0,
                        final_board: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            reports,
        })
    }

    /// Run a single scenario in its own browser session.
    pub async fn run_scenario(&mut self, scenario: &BoardTestScenario) -> E2eResult<ScenarioReport> {
        let start = Instant::now();
        debug!("running scenario: {}", scenario.name);

        // Fixture problems abort before the browser is touched.
        scenario.validate()?;
        let seed = encode_state(&scenario.board_state)?;

        self.start_server().await?;
        let playwright = PlaywrightHandle::new(self.config.playwright.clone())?;

        let steps = self.build_steps(scenario)?;
        let observations = playwright.run_session(Some(&seed), &steps).await?;

        let (test_error, final_board) = evaluate(scenario, &observations);
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            success: test_error.is_none(),
            duration_ms,
            final_board,
            error: test_error,
        })
    }

    /// Compile a scenario into its interaction steps.
    fn build_steps(&self, scenario: &BoardTestScenario) -> E2eResult<Vec<GameAction>> {
        let mut steps = vec![GameAction::Navigate {
            route: self.config.game_route.clone(),
        }];

        if scenario.expected_counts.is_some() {
            steps.push(GameAction::CaptureCounts {
                label: "baseline".to_string(),
            });
        }

        for mv in &scenario.moves {
            steps.extend(actions::player_turn(mv)?);
            // A normal-marker match also satisfies a freshly promoted king.
            steps.push(actions::verify_piece_at(mv.to, mv.player, false));
            steps.push(actions::verify_empty(mv.from));
        }

        if scenario.expected_result.is_some() {
            steps.push(actions::poll_game_over(Some(self.config.status_timeout_ms)));
            steps.push(GameAction::CaptureCounts {
                label: "post".to_string(),
            });
        }

        steps.push(GameAction::CaptureBoard {
            label: "final".to_string(),
        });

        Ok(steps)
    }

    /// Write the suite report to JSON.
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("scenario-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScenarioRunner {
    fn drop(&mut self) {
        let _ = self.stop_server();
    }
}

fn find_counts(observations: &[Observation], wanted: &str) -> Option<(usize, usize)> {
    observations.iter().find_map(|o| match o {
        Observation::Counts {
            label,
            orange,
            blue,
        } if label == wanted => Some((*orange, *blue)),
        _ => None,
    })
}

fn find_board<'a>(observations: &'a [Observation], wanted: &str) -> Option<&'a [Option<String>]> {
    observations.iter().find_map(|o| match o {
        Observation::Board { label, cells } if label == wanted => Some(cells.as_slice()),
        _ => None,
    })
}

/// Check every expectation against the observation stream. Returns the
/// combined assertion failure (if any) and the final board grid string.
fn evaluate(
    scenario: &BoardTestScenario,
    observations: &[Observation],
) -> (Option<String>, Option<String>) {
    let mut errors: Vec<String> = Vec::new();

    let mut step_failed = false;
    for observation in observations {
        if let Observation::Error { step, message } = observation {
            errors.push(format!("step {step} failed: {message}"));
            step_failed = true;
        }
    }

    if let Some(expected) = scenario.expected_counts {
        match find_counts(observations, "baseline") {
            Some((orange, blue)) => {
                if orange != expected.orange || blue != expected.blue {
                    errors.push(format!(
                        "piece counts: expected {}/{} orange/blue, observed {orange}/{blue}",
                        expected.orange, expected.blue
                    ));
                }
            }
            None if !step_failed => errors.push("baseline piece counts missing".to_string()),
            None => {}
        }
    }

    if let Some(expected) = scenario.expected_result {
        let text = observations.iter().find_map(|o| match o {
            Observation::Message { label, text } if label == "result" => Some(text.clone()),
            _ => None,
        });

        match text {
            Some(text) => {
                let observed = actions::classify_message(text.as_deref());
                if observed != expected {
                    errors.push(format!(
                        "terminal result: expected {expected}, observed {observed} (message: {:?})",
                        text
                    ));
                } else if let Some(loser) = match expected {
                    GameStatus::OrangeWins => Some(PieceColor::Blue),
                    GameStatus::BlueWins => Some(PieceColor::Orange),
                    GameStatus::InProgress => None,
                } {
                    match find_counts(observations, "post") {
                        Some((orange, blue)) => {
                            let count = match loser {
                                PieceColor::Orange => orange,
                                PieceColor::Blue => blue,
                            };
                            if count != 0 {
                                errors.push(format!(
                                    "{loser} lost but still has {count} piece(s) on the board"
                                ));
                            }
                        }
                        None if !step_failed => {
                            errors.push("post-result piece counts missing".to_string())
                        }
                        None => {}
                    }
                }
            }
            None if !step_failed => errors.push("terminal-status observation missing".to_string()),
            None => {}
        }
    }

    let final_board = find_board(observations, "final").map(|cells| {
        decode_capture(cells)
            .map(|board| board_grid_string(&board))
            .unwrap_or_else(|e| format!("<undecodable capture: {e}>"))
    });

    if let Some(expected_state) = &scenario.expected_board {
        match (encode_state(expected_state), find_board(observations, "final")) {
            (Ok(expected), Some(cells)) => match decode_capture(cells) {
                Ok(actual) => {
                    if !boards_match(&expected, &actual) {
                        errors.push(format!(
                            "board mismatch\nexpected:\n{}\nactual:\n{}",
                            board_grid_string(&expected),
                            board_grid_string(&actual)
                        ));
                    }
                }
                Err(e) => errors.push(format!("final board capture: {e}")),
            },
            (Err(e), _) => errors.push(format!("expected board does not encode: {e}")),
            (Ok(_), None) if !step_failed => {
                errors.push("final board capture missing".to_string())
            }
            (Ok(_), None) => {}
        }
    }

    let error = if errors.is_empty() {
        None
    } else {
        Some(errors.join("\n"))
    };

    (error, final_board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_board::markers::BOARD_SIZE;
    use checkers_board::{GamePosition, MoveData, PieceCounts};

    fn counts(label: &str, orange: usize, blue: usize) -> Observation {
        Observation::Counts {
            label: label.to_string(),
            orange,
            blue,
        }
    }

    fn board_cells(state: &checkers_board::GameState) -> Vec<Option<String>> {
        let board = encode_state(state).unwrap();
        board
            .iter()
            .map(|&v| {
                let marker = if v == 1.0 {
                    "you1"
                } else if v == 1.1 {
                    "you1k"
                } else if v == -1.0 {
                    "me1"
                } else if v == -1.1 {
                    "me1k"
                } else {
                    "gray"
                };
                Some(format!("img/{marker}.png"))
            })
            .collect()
    }

    #[test]
    fn build_steps_verifies_the_move_landed_and_vacated() {
        let runner = ScenarioRunner::new();
        let scenario = catalog::scenario("basic-movement").unwrap();
        let steps = runner.build_steps(&scenario).unwrap();

        let destination_click = steps
            .iter()
            .position(|s| matches!(s, GameAction::Click { selector } if selector.contains("space13")))
            .unwrap();
        let after = &steps[destination_click + 1..];

        assert!(after.iter().any(|s| matches!(s, GameAction::WaitVisible { selector, .. }
            if selector.contains("space13") && selector.contains("you1"))));
        assert!(after.iter().any(|s| matches!(s, GameAction::WaitVisible { selector, .. }
            if selector.contains("space02") && selector.contains("gray"))));
    }

    #[test]
    fn passing_scenario_produces_no_error() {
        let scenario = catalog::scenario("jump-capture").unwrap();
        let expected = scenario.expected_board.clone().unwrap();

        let observations = vec![
            counts("baseline", 2, 2),
            Observation::Board {
                label: "final".to_string(),
                cells: board_cells(&expected),
            },
            Observation::Done,
        ];

        let (error, final_board) = evaluate(&scenario, &observations);
        assert_eq!(error, None);
        assert!(final_board.is_some());
    }

    #[test]
    fn count_mismatch_reports_both_values() {
        let scenario = catalog::scenario("basic-movement").unwrap();
        let observations = vec![
            counts("baseline", 11, 12),
            counts("post", 11, 12),
            Observation::Message {
                label: "result".to_string(),
                text: None,
            },
            Observation::Board {
                label: "final".to_string(),
                cells: vec![None; BOARD_SIZE],
            },
        ];

        let (error, _) = evaluate(&scenario, &observations);
        let error = error.unwrap();
        assert!(error.contains("expected 12/12"));
        assert!(error.contains("observed 11/12"));
    }

    #[test]
    fn win_with_surviving_loser_pieces_fails() {
        let scenario = catalog::scenario("orange-victory").unwrap();
        let expected = scenario.expected_board.clone().unwrap();

        let observations = vec![
            counts("baseline", 1, 1),
            Observation::Message {
                label: "result".to_string(),
                text: Some("You won!".to_string()),
            },
            counts("post", 1, 1),
            Observation::Board {
                label: "final".to_string(),
                cells: board_cells(&expected),
            },
        ];

        let (error, _) = evaluate(&scenario, &observations);
        assert!(error.unwrap().contains("blue lost but still has 1"));
    }

    #[test]
    fn poll_timeout_counts_as_in_progress() {
        let scenario = catalog::scenario("king-vs-king").unwrap();
        let expected = scenario.expected_board.clone().unwrap();

        let observations = vec![
            counts("baseline", 1, 1),
            Observation::Message {
                label: "result".to_string(),
                text: None,
            },
            counts("post", 1, 1),
            Observation::Board {
                label: "final".to_string(),
                cells: board_cells(&expected),
            },
        ];

        let (error, _) = evaluate(&scenario, &observations);
        assert_eq!(error, None);
    }

    #[test]
    fn board_mismatch_attaches_both_grids() {
        let scenario = catalog::scenario("minimal-endgame").unwrap();

        let observations = vec![
            counts("baseline", 2, 1),
            Observation::Message {
                label: "result".to_string(),
                text: None,
            },
            counts("post", 2, 1),
            Observation::Board {
                label: "final".to_string(),
                cells: vec![None; BOARD_SIZE],
            },
        ];

        let (error, final_board) = evaluate(&scenario, &observations);
        let error = error.unwrap();
        assert!(error.contains("board mismatch"));
        assert!(error.contains("expected:"));
        assert!(error.contains("actual:"));
        assert!(final_board.is_some());
    }

    #[test]
    fn failed_step_keeps_its_diagnostic_board() {
        let scenario = catalog::scenario("basic-movement").unwrap();

        let observations = vec![
            counts("baseline", 12, 12),
            Observation::Error {
                step: "wait-visible:img[name=\"space13\"]".to_string(),
                message: "Timeout 5000ms exceeded".to_string(),
            },
            Observation::Board {
                label: "final".to_string(),
                cells: vec![None; BOARD_SIZE],
            },
        ];

        let (error, final_board) = evaluate(&scenario, &observations);
        let error = error.unwrap();
        assert!(error.contains("Timeout 5000ms exceeded"));
        // The missing terminal status is a consequence of the failed
        // step, not a separate finding.
        assert!(!error.contains("terminal-status observation missing"));
        assert!(final_board.is_some());
    }

    #[test]
    fn malformed_fixture_aborts_before_the_browser() {
        let scenario = BoardTestScenario {
            name: "broken".to_string(),
            description: String::new(),
            board_state: catalog::initial_board(),
            moves: vec![MoveData {
                from: GamePosition::new(0, 2),
                to: GamePosition::new(2, 4),
                is_jump: true,
                captured_piece: None,
                player: checkers_board::PieceColor::Orange,
            }],
            expected_board: None,
            expected_counts: Some(PieceCounts {
                orange: 12,
                blue: 12,
            }),
            expected_result: None,
        };
        assert!(scenario.validate().is_err());
    }
}
