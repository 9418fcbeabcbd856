use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "commcheck",
    version,
    about = "Local commissioning report validation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Validate(ValidateArgs),
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long)]
    pub extraction_path: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Date the field test was performed (ISO, e.g. 2026-07-01). Defaults to today.
    #[arg(long)]
    pub test_date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub extraction_path: PathBuf,
}
