//! Core types for AuthProbe

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A login/password pair used to exercise the authentication flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: String,
    pub password: String,
}

impl Identity {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

/// Status an account is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "blocked" => Ok(AccountStatus::Blocked),
            other => Err(format!("unknown account status '{}'", other)),
        }
    }
}

/// Whether the subject of a login attempt exists, and in which status.
///
/// `NotRegistered` is never provisioned; it describes an identity the
/// application under test has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubjectStatus {
    Registered(AccountStatus),
    NotRegistered,
}

impl SubjectStatus {
    pub const ACTIVE: Self = SubjectStatus::Registered(AccountStatus::Active);
    pub const BLOCKED: Self = SubjectStatus::Registered(AccountStatus::Blocked);

    pub fn account_status(&self) -> Option<AccountStatus> {
        match self {
            SubjectStatus::Registered(status) => Some(*status),
            SubjectStatus::NotRegistered => None,
        }
    }
}

impl From<AccountStatus> for SubjectStatus {
    fn from(status: AccountStatus) -> Self {
        SubjectStatus::Registered(status)
    }
}

impl TryFrom<String> for SubjectStatus {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SubjectStatus> for String {
    fn from(status: SubjectStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectStatus::Registered(status) => write!(f, "{}", status),
            SubjectStatus::NotRegistered => write!(f, "not_registered"),
        }
    }
}

impl std::str::FromStr for SubjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "not_registered" | "not-registered" => Ok(SubjectStatus::NotRegistered),
            other => other.parse::<AccountStatus>().map(SubjectStatus::Registered),
        }
    }
}

/// A provisioned account. Only the provisioner creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub identity: Identity,
    pub status: AccountStatus,
}

impl RegisteredUser {
    pub(crate) fn new(identity: Identity, status: AccountStatus) -> Self {
        Self { identity, status }
    }

    pub fn login(&self) -> &str {
        &self.identity.login
    }

    pub fn password(&self) -> &str {
        &self.identity.password
    }
}

/// How an entered credential relates to the subject's real one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Correct,
    Incorrect,
    Empty,
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validity::Correct => write!(f, "correct"),
            Validity::Incorrect => write!(f, "incorrect"),
            Validity::Empty => write!(f, "empty"),
        }
    }
}

impl std::str::FromStr for Validity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "correct" => Ok(Validity::Correct),
            "incorrect" => Ok(Validity::Incorrect),
            "empty" => Ok(Validity::Empty),
            other => Err(format!("unknown validity '{}'", other)),
        }
    }
}

/// Login form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Login,
    Password,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Login => write!(f, "login"),
            Field::Password => write!(f, "password"),
        }
    }
}

/// Non-empty set of field validation warnings, at most one per field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Field, String>", into = "BTreeMap<Field, String>")]
pub struct FieldWarnings(BTreeMap<Field, String>);

impl FieldWarnings {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        let mut warnings = BTreeMap::new();
        warnings.insert(field, message.into());
        Self(warnings)
    }

    pub fn with(mut self, field: Field, message: impl Into<String>) -> Self {
        self.0.insert(field, message.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl TryFrom<BTreeMap<Field, String>> for FieldWarnings {
    type Error = String;

    fn try_from(map: BTreeMap<Field, String>) -> std::result::Result<Self, Self::Error> {
        if map.is_empty() {
            return Err("field warnings must not be empty".to_string());
        }
        Ok(Self(map))
    }
}

impl From<FieldWarnings> for BTreeMap<Field, String> {
    fn from(warnings: FieldWarnings) -> Self {
        warnings.0
    }
}

/// What the user should see after submitting the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Success,
    ErrorMessage(String),
    FieldWarnings(FieldWarnings),
}

impl ExpectedOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExpectedOutcome::Success)
    }
}

impl std::fmt::Display for ExpectedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedOutcome::Success => write!(f, "success"),
            ExpectedOutcome::ErrorMessage(text) => write!(f, "error: {}", text),
            ExpectedOutcome::FieldWarnings(warnings) => {
                let parts: Vec<String> = warnings
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect();
                write!(f, "warnings: {}", parts.join("; "))
            }
        }
    }
}
