//! Command line of the scenario runner binary

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DriverConfig;
use crate::playwright::Browser;
use crate::sut::SutConfig;

#[derive(Parser, Debug)]
#[command(name = "authprobe-e2e")]
#[command(about = "Login-flow scenario runner")]
#[command(after_help = "Anything after `--` is the command that launches the application, e.g.\n  \
    -- java -jar ./artifacts/app-ibank.jar -P:profile=test")]
pub struct RunArgs {
    /// Actually run against a live application
    #[arg(long, env = "AUTHPROBE_E2E")]
    pub run: bool,

    /// Harness configuration file
    #[arg(short, long, default_value = "authprobe.toml")]
    pub config: PathBuf,

    /// Override the application base URL
    #[arg(long, env = "AUTHPROBE_BASE_URL")]
    pub base_url: Option<String>,

    /// Directory of YAML scenarios (built-in suite when absent)
    #[arg(short, long)]
    pub scenarios: Option<PathBuf>,

    /// Run only scenarios with this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run only the scenario with this name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Seconds to wait for the application to answer
    #[arg(long, default_value = "30")]
    pub startup_timeout: u64,

    /// Browser to use (chromium, firefox, webkit); overrides [driver]
    #[arg(long)]
    pub browser: Option<Browser>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Per-step timeout in milliseconds; overrides [driver]
    #[arg(long)]
    pub step_timeout: Option<u64>,

    /// Output directory for results
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,

    /// Program and arguments that launch the application, passed verbatim
    #[arg(last = true, value_name = "SUT_COMMAND")]
    pub sut_command: Vec<String>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the `[driver]` table
    pub fn apply(&self, driver: &mut DriverConfig) {
        if let Some(browser) = self.browser {
            driver.browser = browser;
        }
        if self.headed {
            driver.headless = false;
        }
        if let Some(step_timeout) = self.step_timeout {
            driver.step_timeout_ms = step_timeout;
        }
    }

    pub fn sut_config(&self, base_url: &str) -> SutConfig {
        SutConfig {
            base_url: base_url.to_string(),
            command: self.sut_command.clone(),
            startup_timeout: Duration::from_secs(self.startup_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        RunArgs::command().debug_assert();
    }

    #[test]
    fn test_sut_command_arguments_kept_verbatim() {
        let args = RunArgs::try_parse_from([
            "authprobe-e2e",
            "--startup-timeout",
            "5",
            "--",
            "java",
            "-jar",
            "./artifacts/app ibank.jar",
            "-P:profile=test",
        ])
        .unwrap();

        let sut = args.sut_config("http://localhost:9999");
        assert_eq!(
            sut.command,
            vec!["java", "-jar", "./artifacts/app ibank.jar", "-P:profile=test"]
        );
        assert_eq!(sut.startup_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_no_sut_command_attaches() {
        let args = RunArgs::try_parse_from(["authprobe-e2e"]).unwrap();
        assert!(args.sut_config("http://localhost:9999").command.is_empty());
    }

    #[test]
    fn test_overrides_apply_to_driver_config() {
        let args = RunArgs::try_parse_from([
            "authprobe-e2e",
            "--browser",
            "webkit",
            "--headed",
            "--step-timeout",
            "750",
        ])
        .unwrap();

        let mut driver = DriverConfig::default();
        args.apply(&mut driver);
        assert_eq!(driver.browser, Browser::Webkit);
        assert!(!driver.headless);
        assert_eq!(driver.step_timeout_ms, 750);
    }
}
