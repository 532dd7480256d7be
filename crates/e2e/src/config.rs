//! Driver configuration, read from the `[driver]` table of the harness file

use authprobe_common::{ConfigurationError, HarnessConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::E2eResult;
use crate::page::{Selectors, UiTexts};
use crate::playwright::{Browser, PlaywrightConfig};
use crate::runner::RunnerConfig;

/// Browser and page settings for scenario runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub browser: Browser,
    pub headless: bool,
    pub step_timeout_ms: u64,
    pub selectors: Selectors,
    pub texts: UiTexts,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            step_timeout_ms: 5000,
            selectors: Selectors::default(),
            texts: UiTexts::default(),
        }
    }
}

#[derive(Deserialize, Default)]
struct HarnessFile {
    #[serde(default)]
    driver: DriverConfig,
}

impl DriverConfig {
    /// Load the `[driver]` table, falling back to defaults when the file or
    /// table is absent. Other tables are left to [`HarnessConfig::load`].
    pub fn load(path: &Path) -> E2eResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let file: HarnessFile = toml::from_str(&content)
            .map_err(|e| ConfigurationError::Parse(format!("{}: {}", path.display(), e)))?;
        Ok(file.driver)
    }

    pub fn playwright(&self, base_url: &str) -> PlaywrightConfig {
        PlaywrightConfig {
            base_url: base_url.to_string(),
            browser: self.browser,
            headless: self.headless,
            step_timeout_ms: self.step_timeout_ms,
        }
    }

    pub fn runner(&self, harness: HarnessConfig, output_dir: PathBuf) -> RunnerConfig {
        RunnerConfig {
            harness,
            selectors: self.selectors.clone(),
            texts: self.texts.clone(),
            output_dir,
        }
    }
}
