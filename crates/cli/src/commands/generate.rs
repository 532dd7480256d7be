//! Generate Command

use anyhow::Result;
use authprobe_common::HarnessConfig;
use clap::Args;

use super::IdentityDisplay;
use crate::output::{print_list, OutputFormat};

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of identities to generate
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,
}

pub fn execute(args: GenerateArgs, config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let generator = config.identity_generator()?;

    let identities: Vec<IdentityDisplay> = (0..args.count)
        .map(|_| generator.generate_identity().into())
        .collect();

    print_list(&identities, format)
}
