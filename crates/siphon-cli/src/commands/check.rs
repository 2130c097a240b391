//! Check command - validate a template configuration file.

use std::path::PathBuf;

use clap::Args;
use console::style;

use siphon_core::TemplateSet;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Template configuration file (JSON)
    #[arg(short, long)]
    templates: PathBuf,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let templates = TemplateSet::from_json_file(&args.templates).map_err(|config_error| {
        anyhow::anyhow!(
            "{} is not a valid template configuration: {config_error}",
            args.templates.display()
        )
    })?;

    println!(
        "{} {} templates configured",
        style("✓").green(),
        templates.len()
    );
    for name in templates.template_names() {
        println!("  - {name}");
    }

    Ok(())
}
