//! Harness configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ConfigurationError, Error, Result};
use crate::generator::{GeneratorConfig, IdentityGenerator};
use crate::oracle::{OutcomeMessages, OutcomeOracle};
use crate::provisioner::AccountProvisioner;
use crate::registrar::HttpRegistrar;

/// Default address of the application under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:9999";

/// Test-mode endpoint that creates users with a given status
pub const DEFAULT_REGISTRATION_PATH: &str = "/api/system/users";

/// Outcome texts exactly as the application's login page renders them
pub fn rendered_messages() -> OutcomeMessages {
    OutcomeMessages {
        blocked: "Пользователь заблокирован".to_string(),
        wrong_credentials: "Неверно указан логин или пароль".to_string(),
        field_required: "Поле обязательно для заполнения".to_string(),
    }
}

#[derive(Deserialize)]
struct MessageOverrides {
    blocked: Option<String>,
    wrong_credentials: Option<String>,
    field_required: Option<String>,
}

/// A `[messages]` table only replaces the keys it lists
fn messages_over_rendered<'de, D>(deserializer: D) -> std::result::Result<OutcomeMessages, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = MessageOverrides::deserialize(deserializer)?;
    let rendered = rendered_messages();
    Ok(OutcomeMessages {
        blocked: overrides.blocked.unwrap_or(rendered.blocked),
        wrong_credentials: overrides.wrong_credentials.unwrap_or(rendered.wrong_credentials),
        field_required: overrides.field_required.unwrap_or(rendered.field_required),
    })
}

/// Everything the core needs, passed explicitly to each component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the application under test
    pub base_url: String,

    /// Path of the registration endpoint, joined onto `base_url`
    pub registration_path: String,

    /// HTTP client timeout for a registration call
    pub request_timeout_secs: u64,

    /// Identity generation
    pub generator: GeneratorConfig,

    /// Texts carried by expected outcomes. Both `authprobe expect` and
    /// scenario runs read them from here.
    #[serde(deserialize_with = "messages_over_rendered")]
    pub messages: OutcomeMessages,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            registration_path: DEFAULT_REGISTRATION_PATH.to_string(),
            request_timeout_secs: 10,
            generator: GeneratorConfig::default(),
            messages: rendered_messages(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| Error::Configuration(ConfigurationError::Parse(e.to_string())))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(ConfigurationError::Parse(e.to_string())))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check everything that would otherwise fail on first use
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        self.generator.validate()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigurationError::ZeroTimeout);
        }
        url::Url::parse(&self.base_url).map_err(|e| ConfigurationError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn identity_generator(&self) -> std::result::Result<IdentityGenerator, ConfigurationError> {
        IdentityGenerator::new(&self.generator)
    }

    pub fn registrar(&self) -> std::result::Result<HttpRegistrar, ConfigurationError> {
        HttpRegistrar::new(&self.base_url, &self.registration_path, self.request_timeout())
    }

    /// Provisioner registering over HTTP against `base_url`
    pub fn provisioner(&self) -> std::result::Result<AccountProvisioner, ConfigurationError> {
        Ok(AccountProvisioner::new(
            self.identity_generator()?,
            Arc::new(self.registrar()?),
        ))
    }

    pub fn oracle(&self) -> OutcomeOracle {
        OutcomeOracle::new(self.messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::CredentialPolicy;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("authprobe.toml");

        let config = HarnessConfig {
            base_url: "http://127.0.0.1:7777".to_string(),
            request_timeout_secs: 3,
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(HarnessConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authprobe.toml");
        std::fs::write(
            &path,
            r#"
base_url = "http://sut:9999"

[generator.login]
length = 8
charset = "xyz"
"#,
        )
        .unwrap();

        let config = HarnessConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://sut:9999");
        assert_eq!(config.registration_path, DEFAULT_REGISTRATION_PATH);
        assert_eq!(config.generator.login, CredentialPolicy::new(8, "xyz"));
        assert_eq!(config.generator.password, GeneratorConfig::default().password);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = HarnessConfig::default();
        config.generator.login.charset.clear();
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::EmptyCharset("login")
        );

        let config = HarnessConfig {
            base_url: "::nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigurationError::InvalidBaseUrl { .. }
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = HarnessConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::ZeroTimeout);
        assert_eq!(config.registrar().unwrap_err(), ConfigurationError::ZeroTimeout);
    }

    #[test]
    fn test_partial_messages_keep_rendered_texts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authprobe.toml");
        std::fs::write(&path, "[messages]\nblocked = \"Заблокирован\"\n").unwrap();

        let config = HarnessConfig::load(&path).unwrap();
        assert_eq!(config.messages.blocked, "Заблокирован");
        assert_eq!(config.messages.wrong_credentials, rendered_messages().wrong_credentials);
        assert_eq!(config.messages.field_required, "Поле обязательно для заполнения");
    }

    #[test]
    fn test_missing_messages_are_rendered_texts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authprobe.toml");
        std::fs::write(&path, "base_url = \"http://sut:9999\"\n").unwrap();

        let config = HarnessConfig::load(&path).unwrap();
        assert_eq!(config.messages, rendered_messages());
        assert_ne!(config.messages, OutcomeMessages::default());
    }

    #[test]
    fn test_garbage_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authprobe.toml");
        std::fs::write(&path, "base_url = [").unwrap();

        assert!(matches!(
            HarnessConfig::load(&path),
            Err(Error::Configuration(ConfigurationError::Parse(_)))
        ));
    }
}
