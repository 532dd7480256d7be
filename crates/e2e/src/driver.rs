//! UI automation seam used by the scenario runner

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::E2eResult;
use crate::spec::TestStep;

/// Outcome of driving one scenario's steps through a browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveReport {
    pub success: bool,
    /// Index into the submitted steps of the first failure
    pub failed_step: Option<usize>,
    pub error: Option<String>,
}

impl DriveReport {
    pub fn passed() -> Self {
        Self {
            success: true,
            failed_step: None,
            error: None,
        }
    }

    pub fn failed(step: Option<usize>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            failed_step: step,
            error: Some(error.into()),
        }
    }
}

/// Executes step plans against a live page.
///
/// `Err` means the driver itself could not run; a failed assertion is an
/// `Ok` report with `success == false`.
#[async_trait]
pub trait UiDriver: Send + Sync {
    async fn drive(&self, scenario: &str, steps: &[TestStep]) -> E2eResult<DriveReport>;
}
