//! Expect Command

use anyhow::Result;
use authprobe_common::{ExpectedOutcome, HarnessConfig, SubjectStatus, Validity};
use clap::Args;
use serde::Serialize;

use crate::output::{print_list, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct ExpectArgs {
    /// Subject status (active, blocked, not-registered)
    #[arg(short, long)]
    pub status: SubjectStatus,

    /// Login validity (correct, incorrect, empty)
    #[arg(short, long)]
    pub login: Validity,

    /// Password validity (correct, incorrect, empty)
    #[arg(short, long)]
    pub password: Validity,
}

/// One row per element the page is expected to show
#[derive(Debug, Serialize)]
pub struct OutcomeDisplay {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TableDisplay for OutcomeDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Outcome", "Field", "Text"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.field.clone().unwrap_or_else(|| "-".to_string()),
            self.text.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

fn rows(outcome: &ExpectedOutcome) -> Vec<OutcomeDisplay> {
    match outcome {
        ExpectedOutcome::Success => vec![OutcomeDisplay {
            kind: "success",
            field: None,
            text: None,
        }],
        ExpectedOutcome::ErrorMessage(text) => vec![OutcomeDisplay {
            kind: "error_message",
            field: None,
            text: Some(text.clone()),
        }],
        ExpectedOutcome::FieldWarnings(warnings) => warnings
            .iter()
            .map(|(field, message)| OutcomeDisplay {
                kind: "field_warning",
                field: Some(field.to_string()),
                text: Some(message.to_string()),
            })
            .collect(),
    }
}

pub fn execute(args: ExpectArgs, config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let outcome = config
        .oracle()
        .expected_outcome(args.status, args.login, args.password)?;

    match format {
        // The outcome's own serde form is the stable machine-readable shape.
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        _ => print_list(&rows(&outcome), format)?,
    }
    Ok(())
}
