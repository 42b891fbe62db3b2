use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "readiness",
    version,
    about = "IFS Food v8 certification readiness self-assessment CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Question catalog to use instead of the built-in IFS Food v8 bank
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score an answers file and print the eligibility report
    Evaluate(EvaluateCommand),
    /// Answer the questionnaire interactively on stdin
    Assess(AssessCommand),
    /// List the categories and questions of the catalog
    Catalog(CatalogCommand),
    /// Summarize a previously exported JSON report
    Inspect(InspectCommand),
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// TOML file with an [answers] table keyed by question id
    pub answers: PathBuf,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AssessCommand {
    /// Directory receiving the JSON export once the assessment completes
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct CatalogCommand {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InspectCommand {
    pub report: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
