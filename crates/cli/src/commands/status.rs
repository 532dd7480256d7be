//! Status Command

use anyhow::Result;
use authprobe_common::HarnessConfig;
use serde::Serialize;
use tracing::debug;

use crate::output::{print_error, print_item, print_success, OutputFormat, TableDisplay};

/// Reachability of the application under test
#[derive(Debug, Serialize)]
pub struct StatusDisplay {
    pub base_url: String,
    pub registration_endpoint: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDisplay for StatusDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Base URL", "Registration", "Reachable", "HTTP", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.base_url.clone(),
            self.registration_endpoint.clone(),
            if self.reachable { "yes" } else { "no" }.to_string(),
            self.http_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.error.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Check the base URL. Any HTTP answer below 500 counts as reachable.
pub async fn check_reachable(config: &HarnessConfig) -> Result<StatusDisplay> {
    let registration_endpoint = config.registrar()?.endpoint().to_string();
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;

    debug!("Probing {}", config.base_url);

    let mut display = StatusDisplay {
        base_url: config.base_url.clone(),
        registration_endpoint,
        reachable: false,
        http_status: None,
        error: None,
    };

    match client.get(&config.base_url).send().await {
        Ok(resp) => {
            let status = resp.status();
            display.http_status = Some(status.as_u16());
            display.reachable = !status.is_server_error();
        }
        Err(e) => display.error = Some(e.to_string()),
    }

    Ok(display)
}

/// Returns whether the application answered
pub async fn execute(config: &HarnessConfig, format: OutputFormat) -> Result<bool> {
    let display = check_reachable(config).await?;

    match format {
        OutputFormat::Table if display.reachable => {
            print_success(&format!("Application is answering at {}", display.base_url))
        }
        OutputFormat::Table => print_error(&format!(
            "Application is not answering at {}: {}",
            display.base_url,
            display
                .error
                .clone()
                .or_else(|| display.http_status.map(|s| format!("HTTP {}", s)))
                .unwrap_or_default()
        )),
        _ => print_item(&display, format)?,
    }

    Ok(display.reachable)
}
