//! CLI Commands

pub mod expect;
pub mod generate;
pub mod init;
pub mod provision;
pub mod status;

use authprobe_common::Identity;
use serde::Serialize;

use crate::output::TableDisplay;

/// Identity display wrapper shared by `generate` and `provision`
#[derive(Debug, Serialize)]
pub struct IdentityDisplay {
    pub login: String,
    pub password: String,
    /// `None` for identities that were never registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<Identity> for IdentityDisplay {
    fn from(identity: Identity) -> Self {
        Self {
            login: identity.login,
            password: identity.password,
            status: None,
        }
    }
}

impl TableDisplay for IdentityDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Login", "Password", "Status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.login.clone(),
            self.password.clone(),
            self.status.clone().unwrap_or_else(|| "not registered".to_string()),
        ]
    }
}
