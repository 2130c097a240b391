//! Extract command - run one document through a template set.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use siphon_core::{ExtractedAttribute, TemplateSet};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text document
    #[arg(required = true)]
    input: PathBuf,

    /// Template configuration file (JSON)
    #[arg(short, long)]
    templates: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of attribute objects
    Json,
    /// One `AttrName | AttrValue` line per attribute
    Text,
}

pub fn run(args: ExtractArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let templates = TemplateSet::from_json_file(&args.templates)?;
    info!(
        "loaded {} templates from {}",
        templates.len(),
        args.templates.display()
    );

    let document = fs::read_to_string(&args.input)?;
    let attributes = templates.parse_text(&document);
    info!("extracted {} attributes", attributes.len());

    let rendered = render_attributes(&attributes, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Wrote {} attributes to {}",
            style("✓").green(),
            attributes.len(),
            output_path.display()
        );
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// Render attributes in the requested output format.
pub(crate) fn render_attributes(
    attributes: &[ExtractedAttribute],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(attributes)?),
        OutputFormat::Text => Ok(attributes
            .iter()
            .map(|attribute| {
                format!(
                    "AttrName: {} | AttrValue: {}",
                    attribute.attribute_name, attribute.attribute_value
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(name: &str, value: &str) -> ExtractedAttribute {
        ExtractedAttribute {
            attribute_name: name.into(),
            attribute_value: value.into(),
        }
    }

    #[test]
    fn text_format_renders_one_line_per_attribute() {
        let attributes = vec![attribute("invoiceNumber", "AB123"), attribute("total", "9.0")];
        let rendered = render_attributes(&attributes, OutputFormat::Text).unwrap();
        assert_eq!(
            rendered,
            "AttrName: invoiceNumber | AttrValue: AB123\nAttrName: total | AttrValue: 9.0"
        );
    }

    #[test]
    fn json_format_uses_camel_case_keys() {
        let attributes = vec![attribute("total", "9.0")];
        let rendered = render_attributes(&attributes, OutputFormat::Json).unwrap();
        assert!(rendered.contains("\"attributeName\": \"total\""));
        assert!(rendered.contains("\"attributeValue\": \"9.0\""));
    }
}
