//! Game server management - spawning and readiness checking
//!
//! The checkers app is a black box; the harness only needs it listening
//! before navigation. Attach to an already-running instance by skipping
//! this module and pointing the session config at its base URL.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Handle to a running game server process
pub struct ServerHandle {
    child: Child,
    base_url: String,
    port: u16,
}

impl ServerHandle {
    /// Spawn the checkers app server and wait until it answers.
    pub async fn spawn(config: ServerConfig) -> E2eResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("spawning checkers app server on port {}", port);

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .env("PORT", port.to_string())
            .env("HOST", "127.0.0.1")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            E2eError::ServerStartup(format!("failed to spawn {}: {}", config.command.display(), e))
        })?;

        let handle = ServerHandle {
            child,
            base_url,
            port,
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("game server is ready at {}", handle.base_url);
        Ok(handle)
    }

    /// Poll the base URL until it responds or the timeout elapses.
    async fn wait_for_ready(&self, timeout: Duration) -> E2eResult<()> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout {
            attempts += 1;

            match client.get(&self.base_url).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(()),
                Ok(resp) => {
                    warn!("readiness check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("waiting for game server to start...");
                    }
                    // Connection refused is expected while starting up
                    if !e.is_connect() {
                        warn!("readiness check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(100)).await;
        }

        Err(E2eError::ServerNotReady(attempts))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the server, politely first.
    pub fn stop(&mut self) -> E2eResult<()> {
        info!("stopping game server (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Configuration for spawning the checkers app server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Program that serves the game (e.g. the app's node entry point)
    pub command: PathBuf,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Port to listen on (None = find a free port)
    pub port: Option<u16>,

    /// Timeout for server startup
    pub startup_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("node"),
            args: vec!["server.js".to_string()],
            port: None,
            startup_timeout: Duration::from_secs(30),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }
}
