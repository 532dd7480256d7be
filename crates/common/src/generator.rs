//! Random test identity generation
//!
//! Each call draws from the thread-local CSPRNG, so concurrent callers
//! never contend on shared state and uniqueness does not depend on a
//! counter.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::types::Identity;

/// Lowercase ASCII letters and digits (36 symbols)
pub const ALPHANUMERIC_LOWER: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Mixed-case letters, digits and a few punctuation marks the login form accepts
pub const PASSWORD_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789#$%&*+-=?@_";

const DEFAULT_LOGIN_LENGTH: usize = 12;
const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Length and alphabet for one kind of credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPolicy {
    pub length: usize,
    pub charset: String,
}

impl CredentialPolicy {
    pub fn new(length: usize, charset: impl Into<String>) -> Self {
        Self {
            length,
            charset: charset.into(),
        }
    }

    fn compile(&self, what: &'static str) -> Result<Alphabet, ConfigurationError> {
        let symbols: Vec<char> = self.charset.chars().collect();
        if symbols.is_empty() {
            return Err(ConfigurationError::EmptyCharset(what));
        }
        if self.length == 0 {
            return Err(ConfigurationError::ZeroLength(what));
        }
        Ok(Alphabet {
            symbols,
            length: self.length,
        })
    }
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub login: CredentialPolicy,
    pub password: CredentialPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            login: CredentialPolicy::new(DEFAULT_LOGIN_LENGTH, ALPHANUMERIC_LOWER),
            password: CredentialPolicy::new(DEFAULT_PASSWORD_LENGTH, PASSWORD_CHARSET),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.login.compile("login")?;
        self.password.compile("password")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Alphabet {
    symbols: Vec<char>,
    length: usize,
}

impl Alphabet {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| self.symbols[rng.gen_range(0..self.symbols.len())])
            .collect()
    }
}

/// Produces random logins and passwords
#[derive(Debug, Clone)]
pub struct IdentityGenerator {
    login: Alphabet,
    password: Alphabet,
}

impl IdentityGenerator {
    /// Create a generator, rejecting empty charsets and zero lengths
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            login: config.login.compile("login")?,
            password: config.password.compile("password")?,
        })
    }

    pub fn generate_login(&self) -> String {
        self.login.sample(&mut rand::thread_rng())
    }

    pub fn generate_password(&self) -> String {
        self.password.sample(&mut rand::thread_rng())
    }

    pub fn generate_identity(&self) -> Identity {
        Identity::new(self.generate_login(), self.generate_password())
    }
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self {
            login: Alphabet {
                symbols: ALPHANUMERIC_LOWER.chars().collect(),
                length: DEFAULT_LOGIN_LENGTH,
            },
            password: Alphabet {
                symbols: PASSWORD_CHARSET.chars().collect(),
                length: DEFAULT_PASSWORD_LENGTH,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_logins_are_unique() {
        let generator = IdentityGenerator::default();
        let logins: HashSet<String> = (0..5000).map(|_| generator.generate_login()).collect();
        assert_eq!(logins.len(), 5000);
    }

    #[test]
    fn test_respects_length_and_charset() {
        let config = GeneratorConfig {
            login: CredentialPolicy::new(20, "ab"),
            password: CredentialPolicy::new(7, "xyz"),
        };
        let generator = IdentityGenerator::new(&config).unwrap();

        let login = generator.generate_login();
        assert_eq!(login.chars().count(), 20);
        assert!(login.chars().all(|c| c == 'a' || c == 'b'));

        let password = generator.generate_password();
        assert_eq!(password.chars().count(), 7);
        assert!(password.chars().all(|c| "xyz".contains(c)));
    }

    #[test]
    fn test_multibyte_charset_counts_chars() {
        let config = GeneratorConfig {
            login: CredentialPolicy::new(10, "абв"),
            ..Default::default()
        };
        let login = IdentityGenerator::new(&config).unwrap().generate_login();
        assert_eq!(login.chars().count(), 10);
    }

    #[test]
    fn test_empty_charset_is_configuration_error() {
        let config = GeneratorConfig {
            password: CredentialPolicy::new(8, ""),
            ..Default::default()
        };
        assert_eq!(
            IdentityGenerator::new(&config).unwrap_err(),
            ConfigurationError::EmptyCharset("password")
        );
    }

    #[test]
    fn test_zero_length_is_configuration_error() {
        let config = GeneratorConfig {
            login: CredentialPolicy::new(0, ALPHANUMERIC_LOWER),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigurationError::ZeroLength("login")
        );
    }

    #[test]
    fn test_unique_across_threads() {
        let generator = IdentityGenerator::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = generator.clone();
                std::thread::spawn(move || {
                    (0..1000).map(|_| generator.generate_login()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for login in handle.join().unwrap() {
                assert!(all.insert(login), "duplicate login across threads");
            }
        }
        assert_eq!(all.len(), 4000);
    }
}
