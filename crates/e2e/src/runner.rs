//! Scenario runner: provision, consult the oracle, drive the page, report

use authprobe_common::{
    AccountProvisioner, ExpectedOutcome, HarnessConfig, Identity, LoginAttempt, OutcomeOracle,
    SubjectStatus, Validity,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::driver::{DriveReport, UiDriver};
use crate::error::{E2eError, E2eResult};
use crate::page::{LoginPage, Selectors, UiTexts};
use crate::spec::{ScenarioSpec, TestStep};

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub status: SubjectStatus,
    pub login: Validity,
    pub password: Validity,
    /// Login of the account the attempt targeted
    pub subject: Option<String>,
    pub expected: Option<ExpectedOutcome>,
    pub success: bool,
    pub duration_ms: u64,
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

/// Result of running a suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub run_id: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub harness: HarnessConfig,
    pub selectors: Selectors,
    pub texts: UiTexts,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            harness: HarnessConfig::default(),
            selectors: Selectors::default(),
            texts: UiTexts::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Runs login scenarios one after another.
///
/// The oracle is consulted first, then the account is provisioned, and only
/// after registration is acknowledged is the page touched. Any failure fails
/// the scenario without retrying.
pub struct ScenarioRunner<D: UiDriver> {
    provisioner: AccountProvisioner,
    oracle: OutcomeOracle,
    page: LoginPage,
    driver: D,
    output_dir: PathBuf,
}

impl<D: UiDriver> ScenarioRunner<D> {
    /// Build a runner that registers accounts over HTTP
    pub fn new(config: RunnerConfig, driver: D) -> E2eResult<Self> {
        config.harness.validate()?;
        let provisioner = config.harness.provisioner()?;
        Ok(Self::with_provisioner(config, provisioner, driver))
    }

    /// Build a runner around an existing provisioner
    pub fn with_provisioner(config: RunnerConfig, provisioner: AccountProvisioner, driver: D) -> Self {
        // Same texts `authprobe expect` reports for this configuration.
        let oracle = config.harness.oracle();
        Self {
            provisioner,
            oracle,
            page: LoginPage::new(config.selectors, config.texts),
            driver,
            output_dir: config.output_dir,
        }
    }

    /// Run a list of scenarios
    pub async fn run_specs(&self, specs: &[ScenarioSpec]) -> SuiteResult {
        let started_at = chrono::Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(specs.len());

        info!("Running {} scenario(s)...", specs.len());

        for spec in specs {
            let result = self.run_spec(spec).await;
            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteResult {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at,
            total: specs.len(),
            passed,
            failed,
            duration_ms,
            results,
        }
    }

    /// Run the scenario with the given name
    pub async fn run_named(&self, specs: &[ScenarioSpec], name: &str) -> E2eResult<SuiteResult> {
        let spec = specs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::ScenarioNotFound(name.to_string()))?;
        Ok(self.run_specs(std::slice::from_ref(spec)).await)
    }

    /// Run a single scenario
    pub async fn run_spec(&self, spec: &ScenarioSpec) -> ScenarioResult {
        let start = Instant::now();
        debug!("Running scenario: {}", spec.name);

        let mut result = ScenarioResult {
            name: spec.name.clone(),
            status: spec.status,
            login: spec.login,
            password: spec.password,
            subject: None,
            expected: None,
            success: false,
            duration_ms: 0,
            failed_step: None,
            error: None,
        };

        match self.execute(spec, &mut result).await {
            Ok(report) => {
                result.success = report.success;
                result.error = report.error;
            }
            Err(e) => result.error = Some(e),
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        result
    }

    async fn execute(&self, spec: &ScenarioSpec, result: &mut ScenarioResult) -> Result<DriveReport, String> {
        // An undeclared combination must abort before anything is registered.
        let expected = self
            .oracle
            .expected_outcome(spec.status, spec.login, spec.password)
            .map_err(|e| e.to_string())?;
        result.expected = Some(expected.clone());

        let identity = self.subject(spec.status).await?;
        result.subject = Some(identity.login.clone());

        let attempt =
            LoginAttempt::build(&identity, spec.login, spec.password, self.provisioner.generator());

        let steps = self.page.plan(&attempt, &expected);
        debug!("Scenario '{}' expands to {} step(s)", spec.name, steps.len());

        let report = self
            .driver
            .drive(&spec.name, &steps)
            .await
            .map_err(|e| e.to_string())?;

        result.failed_step = report
            .failed_step
            .and_then(|i| steps.get(i))
            .map(TestStep::name);
        Ok(report)
    }

    async fn subject(&self, status: SubjectStatus) -> Result<Identity, String> {
        match status {
            SubjectStatus::Registered(account_status) => self
                .provisioner
                .provision(account_status)
                .await
                .map(|user| user.identity)
                .map_err(|e| e.to_string()),
            SubjectStatus::NotRegistered => Ok(self.provisioner.unregistered_identity()),
        }
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        write_results(&self.output_dir, results)
    }
}

/// Write suite results to `<dir>/scenario-results.json`
pub fn write_results(dir: &Path, results: &SuiteResult) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join("scenario-results.json");
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json)?;

    info!("Results written to: {}", path.display());
    Ok(path)
}
