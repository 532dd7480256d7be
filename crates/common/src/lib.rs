//! AuthProbe Common Library
//!
//! Test identities, account provisioning and the expected-outcome oracle
//! for verifying a login form against the application under test.
//!
//! ```text
//! IdentityGenerator ──> AccountProvisioner ──POST /api/system/users──> application
//!                              │
//!                              └── RegisteredUser / Identity
//!                                         │
//!  (status, login validity, password validity) ──> OutcomeOracle ──> ExpectedOutcome
//! ```

pub mod attempt;
pub mod config;
pub mod error;
pub mod generator;
pub mod oracle;
pub mod provisioner;
pub mod registrar;
pub mod types;

// Re-export commonly used types
pub use attempt::LoginAttempt;
pub use config::{rendered_messages, HarnessConfig};
pub use error::{
    ConfigurationError, Error, ProvisioningError, RegistrationFailure, Result,
    UnspecifiedScenarioError,
};
pub use generator::{CredentialPolicy, GeneratorConfig, IdentityGenerator};
pub use oracle::{expected_outcome, OutcomeMessages, OutcomeOracle};
pub use provisioner::AccountProvisioner;
pub use registrar::{HttpRegistrar, Registrar, RegistrationRequest};
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub use registrar::RecordingRegistrar;

/// AuthProbe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file location
pub fn default_config_path() -> std::path::PathBuf {
    std::path::PathBuf::from("authprobe.toml")
}
