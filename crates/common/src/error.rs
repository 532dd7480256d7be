//! Error types for AuthProbe

use std::time::Duration;
use thiserror::Error;

use crate::types::{AccountStatus, SubjectStatus, Validity};

/// Result type alias using the AuthProbe umbrella error
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for callers that drive the whole core
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    #[error(transparent)]
    UnspecifiedScenario(#[from] UnspecifiedScenarioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid generator or harness configuration.
///
/// Raised before any external call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Empty charset configured for {0}")]
    EmptyCharset(&'static str),

    #[error("Zero length configured for {0}")]
    ZeroLength(&'static str),

    #[error("Zero request timeout configured")]
    ZeroTimeout,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid configuration file: {0}")]
    Parse(String),
}

/// Registration of a test account with the application under test failed
#[derive(Error, Debug)]
#[error("Failed to register '{login}' as {status}: {cause}")]
pub struct ProvisioningError {
    pub login: String,
    pub status: AccountStatus,
    #[source]
    pub cause: RegistrationFailure,
}

/// Why a single registration attempt failed
#[derive(Error, Debug)]
pub enum RegistrationFailure {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("no acknowledgement within {0:?}")]
    Timeout(Duration),

    #[error("rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// The oracle was asked about a combination its decision table does not declare
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No expected outcome declared for status={status}, login={login}, password={password}")]
pub struct UnspecifiedScenarioError {
    pub status: SubjectStatus,
    pub login: Validity,
    pub password: Validity,
}
