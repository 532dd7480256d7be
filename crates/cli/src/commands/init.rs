//! Init Command

use anyhow::{bail, Result};
use authprobe_common::HarnessConfig;
use clap::Args;
use std::path::Path;

use crate::output::print_success;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Write the effective configuration, so defaults and overrides can be edited
pub fn execute(args: InitArgs, config: &HarnessConfig, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    config.validate()?;
    config.save(path)?;
    print_success(&format!("Wrote {}", path.display()));
    Ok(())
}
