//! Application under test - optional spawning and readiness checks

use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{E2eError, E2eResult};

/// Handle to the application under test.
///
/// When a command is configured the process is owned by the handle and
/// terminated on drop; otherwise an already-running instance is probed.
pub struct SutHandle {
    child: Option<Child>,
    base_url: String,
}

impl SutHandle {
    /// Spawn (if configured) and wait until the base URL answers
    pub async fn start(config: SutConfig) -> E2eResult<Self> {
        let child = match config.command.split_first() {
            Some((program, args)) => {
                info!("Spawning application under test: {}", config.command.join(" "));
                let child = Command::new(program)
                    .args(args)
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
                    .map_err(|e| {
                        E2eError::SutStartup(format!("Failed to spawn {}: {}", program, e))
                    })?;
                Some(child)
            }
            None => None,
        };

        let handle = SutHandle {
            child,
            base_url: config.base_url.clone(),
        };

        handle.wait_for_ready(config.startup_timeout).await?;

        info!("Application under test is up at {}", handle.base_url);
        Ok(handle)
    }

    /// Wait for the application to respond with a non-5xx status
    async fn wait_for_ready(&self, timeout_duration: Duration) -> E2eResult<()> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()?;

        let start = std::time::Instant::now();
        let mut attempts = 0;

        while start.elapsed() < timeout_duration {
            attempts += 1;

            match client.get(&self.base_url).send().await {
                Ok(resp) if !resp.status().is_server_error() => {
                    return Ok(());
                }
                Ok(resp) => {
                    warn!("Readiness check returned {}", resp.status());
                }
                Err(e) => {
                    if attempts == 1 {
                        info!("Waiting for application under test...");
                    }
                    // Connection refused is expected while it is starting
                    if !e.is_connect() {
                        warn!("Readiness check error: {}", e);
                    }
                }
            }

            sleep(Duration::from_millis(250)).await;
        }

        Err(E2eError::SutUnreachable(attempts))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the application if this handle spawned it
    pub fn stop(&mut self) -> E2eResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        info!("Stopping application under test (pid: {})", child.id());

        // Try graceful shutdown first
        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(500));
            }
        }

        // Force kill if still running
        let _ = child.kill();
        child.wait()?;

        Ok(())
    }
}

impl Drop for SutHandle {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// How to reach (and optionally launch) the application under test
#[derive(Debug, Clone)]
pub struct SutConfig {
    pub base_url: String,

    /// Program and arguments, e.g. `java -jar ./artifacts/app-ibank.jar -P:profile=test`.
    /// Empty = attach to a running instance.
    pub command: Vec<String>,

    pub startup_timeout: Duration,
}

impl Default for SutConfig {
    fn default() -> Self {
        Self {
            base_url: authprobe_common::config::DEFAULT_BASE_URL.to_string(),
            command: Vec::new(),
            startup_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_times_out() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let result = SutHandle::start(SutConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            command: Vec::new(),
            startup_timeout: Duration::from_millis(600),
        })
        .await;

        assert!(matches!(result, Err(E2eError::SutUnreachable(n)) if n >= 1));
    }

    #[tokio::test]
    async fn test_missing_binary_is_startup_error() {
        let result = SutHandle::start(SutConfig {
            command: vec!["/nonexistent/authprobe-sut".to_string()],
            startup_timeout: Duration::from_millis(100),
            ..Default::default()
        })
        .await;

        assert!(matches!(result, Err(E2eError::SutStartup(_))));
    }
}
