//! Registration of test accounts with the application under test

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ConfigurationError, RegistrationFailure};
use crate::types::{AccountStatus, Identity};

/// Body of a registration call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub login: String,
    pub password: String,
    pub status: AccountStatus,
}

impl RegistrationRequest {
    pub fn new(identity: &Identity, status: AccountStatus) -> Self {
        Self {
            login: identity.login.clone(),
            password: identity.password.clone(),
            status,
        }
    }
}

/// Anything that can create an account with a given status.
///
/// Implementations make exactly one attempt per call and resolve only once
/// the application has acknowledged or refused the account.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), RegistrationFailure>;
}

/// Registers accounts through the application's test-mode HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpRegistrar {
    client: reqwest::Client,
    endpoint: url::Url,
    timeout: Duration,
}

impl HttpRegistrar {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        if timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout);
        }

        let mut base = url::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        // Keep any path prefix on the base: "http://host/app" + "/api/x" is "http://host/app/api/x".
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        let endpoint = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| invalid(e.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl Registrar for HttpRegistrar {
    async fn register(&self, request: &RegistrationRequest) -> Result<(), RegistrationFailure> {
        debug!("POST {} login={} status={}", self.endpoint, request.login, request.status);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RegistrationFailure::Timeout(self.timeout)
                } else {
                    RegistrationFailure::Transport(e)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        warn!("Registration of '{}' rejected with {}", request.login, status);
        Err(rejection(status.as_u16(), response.text().await))
    }
}

/// A refusal keeps whatever explains it, including a body that failed to read
fn rejection<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> RegistrationFailure {
    let body = body.unwrap_or_else(|e| format!("<unreadable response body: {}>", e));
    RegistrationFailure::Rejected { status, body }
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingRegistrar;

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory registrar that records every request.
    ///
    /// Optionally refuses one status, to stand in for an application that
    /// does not support it.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingRegistrar {
        requests: Arc<Mutex<Vec<RegistrationRequest>>>,
        attempts: Arc<Mutex<usize>>,
        refuse: Option<AccountStatus>,
    }

    impl RecordingRegistrar {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn refusing(status: AccountStatus) -> Self {
            Self {
                refuse: Some(status),
                ..Self::default()
            }
        }

        pub fn requests(&self) -> Vec<RegistrationRequest> {
            self.requests.lock().clone()
        }

        /// Calls received, accepted or not
        pub fn attempts(&self) -> usize {
            *self.attempts.lock()
        }

        pub fn is_registered(&self, login: &str) -> bool {
            self.requests.lock().iter().any(|r| r.login == login)
        }
    }

    #[async_trait]
    impl Registrar for RecordingRegistrar {
        async fn register(&self, request: &RegistrationRequest) -> Result<(), RegistrationFailure> {
            *self.attempts.lock() += 1;
            if self.refuse == Some(request.status) {
                return Err(RegistrationFailure::Rejected {
                    status: 400,
                    body: format!("status '{}' not supported", request.status),
                });
            }
            self.requests.lock().push(request.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = RegistrationRequest::new(
            &Identity::new("alice123", "Secret#1"),
            AccountStatus::Active,
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"login": "alice123", "password": "Secret#1", "status": "active"})
        );
    }

    #[test]
    fn test_endpoint_join() {
        let registrar =
            HttpRegistrar::new("http://localhost:9999", "/api/system/users", Duration::from_secs(1))
                .unwrap();
        assert_eq!(registrar.endpoint(), "http://localhost:9999/api/system/users");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for base in ["http://sut:9999/app", "http://sut:9999/app/"] {
            let registrar =
                HttpRegistrar::new(base, "/api/system/users", Duration::from_secs(1)).unwrap();
            assert_eq!(registrar.endpoint(), "http://sut:9999/app/api/system/users");
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = HttpRegistrar::new("http://localhost:9999", "/api/system/users", Duration::ZERO)
            .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroTimeout);
    }

    #[test]
    fn test_rejection_keeps_body_read_error() {
        match rejection(503, Err::<String, _>("connection reset")) {
            RegistrationFailure::Rejected { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "<unreadable response body: connection reset>");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert!(matches!(
            rejection::<String>(400, Ok("unknown status".to_string())),
            RegistrationFailure::Rejected { status: 400, ref body } if body == "unknown status"
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpRegistrar::new("not a url", "/api/system/users", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidBaseUrl { .. }));
    }
}
