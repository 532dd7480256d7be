//! Declarative login scenarios and the UI steps they expand to

use authprobe_common::{SubjectStatus, Validity};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// One login scenario, built in or parsed from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering scenarios
    #[serde(default)]
    pub tags: Vec<String>,

    /// Account the attempt is made against
    pub status: SubjectStatus,

    /// What is typed into the login field
    pub login: Validity,

    /// What is typed into the password field
    pub password: Validity,
}

impl ScenarioSpec {
    pub fn new(
        name: &str,
        description: &str,
        status: SubjectStatus,
        login: Validity,
        password: Validity,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            tags: Vec::new(),
            status,
            login,
            password,
        }
    }

    fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// The standard login-form suite
    pub fn builtin() -> Vec<Self> {
        use Validity::{Correct, Empty, Incorrect};

        vec![
            Self::new(
                "active-user-login",
                "Should successfully login with active registered user",
                SubjectStatus::ACTIVE,
                Correct,
                Correct,
            )
            .tagged(&["smoke", "auth"]),
            Self::new(
                "not-registered-user",
                "Should get error message if login with not registered user",
                SubjectStatus::NotRegistered,
                Correct,
                Correct,
            )
            .tagged(&["auth"]),
            Self::new(
                "blocked-user",
                "Should get error message if login with blocked registered user",
                SubjectStatus::BLOCKED,
                Correct,
                Correct,
            )
            .tagged(&["auth"]),
            Self::new(
                "wrong-login",
                "Should get error message if login with wrong login",
                SubjectStatus::ACTIVE,
                Incorrect,
                Correct,
            )
            .tagged(&["auth"]),
            Self::new(
                "wrong-password",
                "Should get error message if login with wrong password",
                SubjectStatus::ACTIVE,
                Correct,
                Incorrect,
            )
            .tagged(&["auth"]),
            Self::new(
                "empty-login",
                "Should get warning if login with empty login",
                SubjectStatus::ACTIVE,
                Empty,
                Correct,
            )
            .tagged(&["validation"]),
            Self::new(
                "empty-password",
                "Should get warning if login with empty password",
                SubjectStatus::ACTIVE,
                Correct,
                Empty,
            )
            .tagged(&["validation"]),
            Self::new(
                "empty-login-and-password",
                "Should get warning if login with empty login and password",
                SubjectStatus::NotRegistered,
                Empty,
                Empty,
            )
            .tagged(&["validation"]),
        ]
    }

    /// Parse a scenario from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::ScenarioParse(format!("{}: {}", path.display(), e)))
    }

    /// Load all scenarios from a directory, sorted by file path
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut entries: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .map(|e| e.into_path())
            .collect();
        entries.sort();

        entries.iter().map(|path| Self::from_file(path)).collect()
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.tags.iter().any(|t| t == tag)).collect()
    }
}

/// A single UI step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (relative to base)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Fill an input field, replacing its content
    Fill { selector: String, value: String },

    /// Click an element
    Click { selector: String },

    /// Assert something about an element
    Assert {
        selector: String,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text_contains: Option<String>,
    },
}

impl TestStep {
    /// Short label used in logs and results
    pub fn name(&self) -> String {
        match self {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Fill { selector, .. } => format!("fill:{}", selector),
            TestStep::Click { selector } => format!("click:{}", selector),
            TestStep::Assert { selector, .. } => format!("assert:{}", selector),
        }
    }
}
