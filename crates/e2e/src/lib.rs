//! AuthProbe E2E Scenario Driver
//!
//! Drives the login form of the application under test through Playwright,
//! using accounts and expected outcomes from `authprobe-common`:
//! - Optionally spawns the application and waits for it to answer
//! - Provisions an account per scenario before the page is opened
//! - Expands each scenario into declarative UI steps
//! - Renders the steps as a Playwright script and reports the result
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ScenarioRunner<D: UiDriver>                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioSpec { status, login, password }                   │
//! │    ├── AccountProvisioner::provision / unregistered_identity│
//! │    ├── LoginAttempt::build                                  │
//! │    ├── OutcomeOracle::expected_outcome                      │
//! │    ├── LoginPage::plan -> [TestStep]                        │
//! │    │     ├── navigate { url }                               │
//! │    │     ├── fill { selector, value }                       │
//! │    │     ├── click { selector }                             │
//! │    │     └── assert { selector, visible?, text_contains? }  │
//! │    └── UiDriver::drive (PlaywrightDriver)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod page;
pub mod playwright;
pub mod runner;
pub mod spec;
pub mod sut;

pub use config::DriverConfig;
pub use driver::{DriveReport, UiDriver};
pub use error::{E2eError, E2eResult};
pub use runner::{RunnerConfig, ScenarioRunner, SuiteResult};
pub use spec::{ScenarioSpec, TestStep};
