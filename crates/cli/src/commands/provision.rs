//! Provision Command

use anyhow::{Context, Result};
use authprobe_common::{AccountProvisioner, AccountStatus, HarnessConfig};
use clap::Args;

use super::IdentityDisplay;
use crate::output::{print_item, OutputFormat};

#[derive(Args)]
pub struct ProvisionArgs {
    /// Status to register the account with (active, blocked)
    #[arg(short, long, default_value = "active")]
    pub status: AccountStatus,
}

pub async fn execute(args: ProvisionArgs, config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    config.validate()?;
    let provisioner = config.provisioner()?;
    let display = provision(&provisioner, args.status)
        .await
        .with_context(|| format!("is the application running at {}?", config.base_url))?;
    print_item(&display, format)
}

async fn provision(provisioner: &AccountProvisioner, status: AccountStatus) -> Result<IdentityDisplay> {
    let user = provisioner.provision(status).await?;
    let mut display = IdentityDisplay::from(user.identity);
    display.status = Some(user.status.to_string());
    Ok(display)
}
