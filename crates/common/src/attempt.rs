//! Login attempts derived from an identity and per-field validity

use serde::{Deserialize, Serialize};

use crate::generator::IdentityGenerator;
use crate::types::{Identity, Validity};

const MAX_REDRAWS: usize = 64;

/// What a test case types into the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub entered_login: String,
    pub entered_password: String,
}

impl LoginAttempt {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            entered_login: login.into(),
            entered_password: password.into(),
        }
    }

    /// Submit the identity exactly as provisioned
    pub fn exact(identity: &Identity) -> Self {
        Self::new(identity.login.clone(), identity.password.clone())
    }

    /// Derive an attempt from `identity`.
    ///
    /// `Incorrect` values are fresh random strings that never equal the
    /// identity's own value.
    pub fn build(
        identity: &Identity,
        login: Validity,
        password: Validity,
        generator: &IdentityGenerator,
    ) -> Self {
        Self {
            entered_login: derive(&identity.login, login, || generator.generate_login()),
            entered_password: derive(&identity.password, password, || {
                generator.generate_password()
            }),
        }
    }
}

fn derive(correct: &str, validity: Validity, mut fresh: impl FnMut() -> String) -> String {
    match validity {
        Validity::Correct => correct.to_string(),
        Validity::Empty => String::new(),
        Validity::Incorrect => {
            for _ in 0..MAX_REDRAWS {
                let candidate = fresh();
                if candidate != correct {
                    return candidate;
                }
            }
            // Alphabet too small to escape the correct value; lengthen it instead.
            format!("{}{}", correct, fresh())
        }
    }
}
