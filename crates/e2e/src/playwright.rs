//! Playwright browser automation
//!
//! Each scenario is rendered as one Node script so the page state carries
//! from filling the form through to the final assertions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::driver::{DriveReport, UiDriver};
use crate::error::{E2eError, E2eResult};
use crate::spec::TestStep;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(format!("unknown browser '{}'", other)),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub step_timeout_ms: u64,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: authprobe_common::config::DEFAULT_BASE_URL.to_string(),
            browser: Browser::Chromium,
            headless: true,
            step_timeout_ms: 5000,
        }
    }
}

/// Last line the script prints, on stdout or stderr
#[derive(Debug, Deserialize)]
struct ScriptReport {
    success: bool,
    #[serde(default)]
    step: Option<usize>,
    #[serde(default)]
    error: Option<String>,
}

/// Playwright-backed [`UiDriver`]
pub struct PlaywrightDriver {
    config: PlaywrightConfig,
}

impl PlaywrightDriver {
    /// Create a driver, failing early if Playwright is not installed
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        Ok(Self { config })
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

    /// Build the Node script for a plan
    pub fn build_script(&self, steps: &[TestStep]) -> String {
        build_script(&self.config, steps)
    }

    async fn run_script(&self, script: &str) -> E2eResult<DriveReport> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // The script lives in a temp dir; resolve @playwright/test from the project.
        let project_dir = std::env::current_dir()?;
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(&project_dir)
            .env("NODE_PATH", project_dir.join("node_modules"))
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        match parse_report(&stdout).or_else(|| parse_report(&stderr)) {
            Some(report) if report.success && output.status.success() => Ok(DriveReport::passed()),
            Some(report) => Ok(DriveReport::failed(
                report.step,
                report.error.unwrap_or_else(|| "unknown script failure".to_string()),
            )),
            None => Err(E2eError::Playwright(format!(
                "Script produced no report (exit {}):\nstdout: {}\nstderr: {}",
                output.status, stdout, stderr
            ))),
        }
    }
}

#[async_trait]
impl UiDriver for PlaywrightDriver {
    async fn drive(&self, scenario: &str, steps: &[TestStep]) -> E2eResult<DriveReport> {
        debug!("Driving '{}' through {} step(s)", scenario, steps.len());
        let script = self.build_script(steps);
        self.run_script(&script).await
    }
}

fn parse_report(output: &str) -> Option<ScriptReport> {
    output
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<ScriptReport>(line.trim()).ok())
}

/// Quote a value as a JavaScript string literal
fn js(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn build_script(config: &PlaywrightConfig, steps: &[TestStep]) -> String {
    let mut script = String::new();

    // Header
    script.push_str(&format!(
        r#"
const {{ chromium, firefox, webkit, expect }} = require('@playwright/test');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const page = await browser.newPage();
  page.setDefaultTimeout({timeout});
  const baseUrl = {base_url};
  let current = null;

  try {{
"#,
        browser = config.browser.as_str(),
        headless = config.headless,
        timeout = config.step_timeout_ms,
        base_url = js(config.base_url.trim_end_matches('/')),
    ));

    for (i, step) in steps.iter().enumerate() {
        script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.name()));
        script.push_str(&format!("    current = {};\n", i));
        script.push_str(&step_to_js(step, config.step_timeout_ms));
        script.push('\n');
    }

    // Footer
    script.push_str(
        r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, step: current, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
    );

    script
}

fn step_to_js(step: &TestStep, timeout_ms: u64) -> String {
    match step {
        TestStep::Navigate {
            url,
            wait_for_selector,
        } => {
            let wait = wait_for_selector
                .as_ref()
                .map(|s| format!("\n    await page.waitForSelector({});", js(s)))
                .unwrap_or_default();
            format!("    await page.goto(baseUrl + {});{}", js(url), wait)
        }
        TestStep::Fill { selector, value } => {
            format!("    await page.fill({}, {});", js(selector), js(value))
        }
        TestStep::Click { selector } => {
            format!("    await page.click({});", js(selector))
        }
        TestStep::Assert {
            selector,
            visible,
            text_contains,
        } => {
            let mut assertions = Vec::new();
            let locator = format!("page.locator({})", js(selector));

            if let Some(text) = text_contains {
                assertions.push(format!(
                    "    await expect({}).toContainText({}, {{ timeout: {} }});",
                    locator,
                    js(text),
                    timeout_ms
                ));
            }

            match visible {
                Some(true) => assertions.push(format!(
                    "    await expect({}).toBeVisible({{ timeout: {} }});",
                    locator, timeout_ms
                )),
                Some(false) => assertions.push(format!(
                    "    await expect({}).toBeHidden({{ timeout: {} }});",
                    locator, timeout_ms
                )),
                None => {}
            }

            assertions.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_escaped() {
        let config = PlaywrightConfig::default();
        let steps = vec![TestStep::Fill {
            selector: "[data-test-id=password] input[name=password]".to_string(),
            value: "it's \"quoted\"\n".to_string(),
        }];

        let script = build_script(&config, &steps);
        assert!(script.contains(r#"await page.fill("[data-test-id=password] input[name=password]", "it's \"quoted\"\n");"#));
    }

    #[test]
    fn test_script_tracks_current_step() {
        let config = PlaywrightConfig {
            base_url: "http://localhost:9999/".to_string(),
            headless: false,
            ..Default::default()
        };
        let steps = vec![
            TestStep::Navigate {
                url: "/".to_string(),
                wait_for_selector: None,
            },
            TestStep::Assert {
                selector: "h2".to_string(),
                visible: Some(true),
                text_contains: Some("Личный кабинет".to_string()),
            },
        ];

        let script = build_script(&config, &steps);
        assert!(script.contains("const baseUrl = \"http://localhost:9999\";"));
        assert!(script.contains("headless: false"));
        assert!(script.contains("current = 0;"));
        assert!(script.contains("current = 1;"));
        assert!(script.contains("toContainText(\"Личный кабинет\""));
        assert!(script.contains("toBeVisible"));
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let config = PlaywrightConfig {
            base_url: "http://sut:9999/app".to_string(),
            ..Default::default()
        };
        let steps = vec![TestStep::Navigate {
            url: "/".to_string(),
            wait_for_selector: None,
        }];

        let script = build_script(&config, &steps);
        assert!(script.contains("const baseUrl = \"http://sut:9999/app\";"));
        assert!(script.contains("await page.goto(baseUrl + \"/\");"));
    }

    #[test]
    fn test_parse_report_takes_last_json_line() {
        let stderr = "warning: something\n{\"success\":false,\"step\":5,\"error\":\"Timeout 5000ms exceeded\"}\n";
        let report = parse_report(stderr).unwrap();
        assert!(!report.success);
        assert_eq!(report.step, Some(5));
        assert_eq!(report.error.as_deref(), Some("Timeout 5000ms exceeded"));

        assert!(parse_report("no json here").is_none());
    }

    #[test]
    fn test_browser_parse() {
        assert_eq!("webkit".parse::<Browser>().unwrap(), Browser::Webkit);
        assert!("netscape".parse::<Browser>().is_err());
    }
}
