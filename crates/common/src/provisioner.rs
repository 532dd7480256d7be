//! Account provisioning
//!
//! Every call generates a brand-new identity. Registered statuses go through
//! the [`Registrar`] exactly once and the call only resolves after the
//! application under test has answered, so a subsequent login attempt always
//! observes the account. Failures are returned as-is; nothing is retried.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ProvisioningError;
use crate::generator::IdentityGenerator;
use crate::registrar::{Registrar, RegistrationRequest};
use crate::types::{AccountStatus, Identity, RegisteredUser};

/// Creates test accounts in a declared status
pub struct AccountProvisioner {
    generator: IdentityGenerator,
    registrar: Arc<dyn Registrar>,
}

impl AccountProvisioner {
    pub fn new(generator: IdentityGenerator, registrar: Arc<dyn Registrar>) -> Self {
        Self {
            generator,
            registrar,
        }
    }

    pub fn generator(&self) -> &IdentityGenerator {
        &self.generator
    }

    /// Register a fresh identity with `status`
    pub async fn provision(&self, status: AccountStatus) -> Result<RegisteredUser, ProvisioningError> {
        let identity = self.generator.generate_identity();
        let request = RegistrationRequest::new(&identity, status);

        debug!("Provisioning '{}' as {}", identity.login, status);

        self.registrar
            .register(&request)
            .await
            .map_err(|cause| ProvisioningError {
                login: identity.login.clone(),
                status,
                cause,
            })?;

        info!("Provisioned '{}' as {}", identity.login, status);
        Ok(RegisteredUser::new(identity, status))
    }

    /// A fresh identity that is never sent to the application
    pub fn unregistered_identity(&self) -> Identity {
        let identity = self.generator.generate_identity();
        debug!("Generated unregistered identity '{}'", identity.login);
        identity
    }
}
