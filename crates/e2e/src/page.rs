//! Login page model: selectors, rendered texts and step plans

use authprobe_common::{ExpectedOutcome, Field, LoginAttempt};
use serde::{Deserialize, Serialize};

use crate::spec::TestStep;

/// Element selectors, keyed by the page's `data-test-id` attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub login_input: String,
    pub password_input: String,
    pub submit_button: String,
    pub account_heading: String,
    pub error_notification: String,
    /// `{field}` is replaced with `login` or `password`
    pub field_warning: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            login_input: "[data-test-id=login] input[name=login]".to_string(),
            password_input: "[data-test-id=password] input[name=password]".to_string(),
            submit_button: "[data-test-id=action-login].button".to_string(),
            account_heading: "h2".to_string(),
            error_notification: "[data-test-id=error-notification] .notification__content"
                .to_string(),
            field_warning: "[data-test-id={field}].input_invalid .input__sub".to_string(),
        }
    }
}

impl Selectors {
    pub fn field_warning(&self, field: Field) -> String {
        self.field_warning.replace("{field}", &field.to_string())
    }
}

/// Page texts that are not outcomes, exactly as the application renders them.
///
/// Outcome texts live in the harness `[messages]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiTexts {
    pub login_button: String,
    pub account_heading: String,
}

impl Default for UiTexts {
    fn default() -> Self {
        Self {
            login_button: "Продолжить".to_string(),
            account_heading: "Личный кабинет".to_string(),
        }
    }
}

/// Turns an attempt and its expected outcome into UI steps
#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub selectors: Selectors,
    pub texts: UiTexts,
}

impl LoginPage {
    pub fn new(selectors: Selectors, texts: UiTexts) -> Self {
        Self { selectors, texts }
    }

    /// Fill and submit the form, then check what the user sees
    pub fn plan(&self, attempt: &LoginAttempt, expected: &ExpectedOutcome) -> Vec<TestStep> {
        let s = &self.selectors;
        let mut steps = vec![
            TestStep::Navigate {
                url: "/".to_string(),
                wait_for_selector: Some(s.login_input.clone()),
            },
            TestStep::Fill {
                selector: s.login_input.clone(),
                value: attempt.entered_login.clone(),
            },
            TestStep::Fill {
                selector: s.password_input.clone(),
                value: attempt.entered_password.clone(),
            },
            TestStep::Assert {
                selector: s.submit_button.clone(),
                visible: None,
                text_contains: Some(self.texts.login_button.clone()),
            },
            TestStep::Click {
                selector: s.submit_button.clone(),
            },
        ];

        match expected {
            ExpectedOutcome::Success => steps.push(TestStep::Assert {
                selector: s.account_heading.clone(),
                visible: Some(true),
                text_contains: Some(self.texts.account_heading.clone()),
            }),
            ExpectedOutcome::ErrorMessage(text) => steps.push(TestStep::Assert {
                selector: s.error_notification.clone(),
                visible: Some(true),
                text_contains: Some(text.clone()),
            }),
            ExpectedOutcome::FieldWarnings(warnings) => {
                steps.extend(warnings.iter().map(|(field, message)| TestStep::Assert {
                    selector: s.field_warning(field),
                    visible: None,
                    text_contains: Some(message.to_string()),
                }));
            }
        }

        steps
    }
}
