//! CLI application for template-driven attribute extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, check, extract};

/// siphon - Extract structured attributes from text documents using
/// configured templates
#[derive(Parser)]
#[command(name = "siphon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract attributes from a single document
    Extract(extract::ExtractArgs),

    /// Extract attributes from multiple documents
    Batch(batch::BatchArgs),

    /// Validate a template configuration file
    Check(check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Batch(args) => batch::run(args),
        Commands::Check(args) => check::run(args),
    }
}
