//! Expected outcome of a login attempt
//!
//! Field validation wins over authentication errors, which win over success.
//! Combinations the decision table does not list are authoring errors and
//! are reported as [`UnspecifiedScenarioError`].

use serde::{Deserialize, Serialize};

use crate::error::UnspecifiedScenarioError;
use crate::types::{AccountStatus, ExpectedOutcome, Field, FieldWarnings, SubjectStatus, Validity};

/// Canonical texts carried by expected outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeMessages {
    pub blocked: String,
    pub wrong_credentials: String,
    pub field_required: String,
}

impl Default for OutcomeMessages {
    fn default() -> Self {
        Self {
            blocked: "user is blocked".to_string(),
            wrong_credentials: "wrong login or password".to_string(),
            field_required: "field required".to_string(),
        }
    }
}

/// Maps (status, login validity, password validity) to an expected outcome
#[derive(Debug, Clone, Default)]
pub struct OutcomeOracle {
    messages: OutcomeMessages,
}

impl OutcomeOracle {
    pub fn new(messages: OutcomeMessages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &OutcomeMessages {
        &self.messages
    }

    pub fn expected_outcome(
        &self,
        status: SubjectStatus,
        login: Validity,
        password: Validity,
    ) -> Result<ExpectedOutcome, UnspecifiedScenarioError> {
        use AccountStatus::{Active, Blocked};
        use SubjectStatus::{NotRegistered, Registered};
        use Validity::{Correct, Empty, Incorrect};

        let required = || self.messages.field_required.clone();

        let outcome = match (login, password, status) {
            (Empty, Empty, _) => ExpectedOutcome::FieldWarnings(
                FieldWarnings::new(Field::Login, required()).with(Field::Password, required()),
            ),
            (Empty, _, _) => ExpectedOutcome::FieldWarnings(FieldWarnings::new(Field::Login, required())),
            (_, Empty, _) => {
                ExpectedOutcome::FieldWarnings(FieldWarnings::new(Field::Password, required()))
            }
            (Correct, Correct, Registered(Active)) => ExpectedOutcome::Success,
            (Correct, Correct, Registered(Blocked)) => {
                ExpectedOutcome::ErrorMessage(self.messages.blocked.clone())
            }
            (Correct, Correct, NotRegistered)
            | (Incorrect, Correct, Registered(Active))
            | (Correct, Incorrect, Registered(Active)) => {
                ExpectedOutcome::ErrorMessage(self.messages.wrong_credentials.clone())
            }
            _ => {
                return Err(UnspecifiedScenarioError {
                    status,
                    login,
                    password,
                })
            }
        };

        Ok(outcome)
    }
}

/// [`OutcomeOracle::expected_outcome`] with the canonical messages
pub fn expected_outcome(
    status: SubjectStatus,
    login: Validity,
    password: Validity,
) -> Result<ExpectedOutcome, UnspecifiedScenarioError> {
    OutcomeOracle::default().expected_outcome(status, login, password)
}
