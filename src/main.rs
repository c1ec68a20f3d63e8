use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use roster_tools::config::{DEFAULT_OUTPUT, DEFAULT_SOURCE_1, DEFAULT_SOURCE_2, RunConfig};
use roster_tools::io::fetch::Source;
use roster_tools::pipeline::{self, Progress};
use roster_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli) {
        match &error {
            ToolError::Retrieval { .. } => eprintln!("Error loading spreadsheets: {error}"),
            ToolError::Persistence { .. } => eprintln!("Failed to save data: {error}"),
            _ => eprintln!("error: {error}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config();
    pipeline::run(&config, |progress| match progress {
        Progress::Loaded => println!("Spreadsheets loaded successfully."),
        Progress::Saved(path) => println!("Data saved to {}.", path.display()),
    })?;
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge two participant spreadsheets into one cleaned workbook."
)]
struct Cli {
    /// First spreadsheet: an http(s) URL or a local .xlsx path.
    #[arg(long, default_value = DEFAULT_SOURCE_1)]
    source1: String,

    /// Second spreadsheet: an http(s) URL or a local .xlsx path.
    #[arg(long, default_value = DEFAULT_SOURCE_2)]
    source2: String,

    /// Output workbook path.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Optional path for a JSON summary of the run.
    #[arg(long)]
    report: Option<PathBuf>,

    /// HTTP request timeout in seconds. Without it, or with 0, requests wait
    /// indefinitely.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        RunConfig {
            sources: [Source::parse(&self.source1), Source::parse(&self.source2)],
            output: self.output,
            report: self.report,
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}
