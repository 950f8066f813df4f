use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate, generate_to};

pub const DEFAULT_INPUT_PATH: &str = "data/input/readings.json";
pub const DEFAULT_CSV_PATH: &str = "data/output/report.csv";
pub const DEFAULT_HTML_PATH: &str = "data/output/report.html";

pub const INPUT_HELP: &str = "Readings file to load: a .json object keyed by day, or a .csv file with day,v1,v2 columns (defaults to data/input/readings.json).";
pub const SAVE_CSV_HELP: &str = "Save the computed report rows to the given CSV file (defaults to data/output/report.csv when no path is provided). Use --archive-csv to store a .gz instead.";
pub const SAVE_HTML_HELP: &str = "Save the HTML report to the given file (defaults to data/output/report.html when no path is provided).";
pub const ARCHIVE_CSV_HELP: &str = "Archive the saved CSV output into a .gz file.";

#[derive(Debug, Parser)]
#[command(
    name = "volreport",
    about = "Compute day-over-day deviation between two sensor volume readings and render it as a report.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(value_name = "FILE", default_value = DEFAULT_INPUT_PATH, help = INPUT_HELP)]
    pub input: PathBuf,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CSV_PATH,
        help = SAVE_CSV_HELP
    )]
    pub save_csv: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_HTML_PATH,
        help = SAVE_HTML_HELP
    )]
    pub save_html: Option<PathBuf>,
    #[arg(long, help = ARCHIVE_CSV_HELP)]
    pub archive_csv: bool,
    #[arg(long, help = "Minify the saved HTML report.")]
    pub minify_html: bool,
    #[arg(short, long, help = "Enable debug logging.")]
    pub verbose: bool,
    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Suppress logging and the terminal summary."
    )]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a shell completion script, or write it into a directory.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to instead of stdout."
        )]
        output_dir: Option<PathBuf>,
    },
}

/// # Errors
///
/// Fails when the completion script cannot be written.
pub fn handle_command(command: Commands) -> Result<()> {
    let Commands::Completions { shell, output_dir } = command;

    if let Some(dir) = output_dir {
        let path = write_completions(shell, &dir)?;
        println!("Wrote {shell:?} completions to {}", path.display());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    print_completions(shell, &mut stdout);
    stdout
        .flush()
        .context("failed to flush completion output")
}

fn print_completions(shell: Shell, out: &mut impl Write) {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    generate(shell, &mut command, bin_name, out);
}

fn write_completions(shell: Shell, dir: &Path) -> Result<PathBuf> {
    if dir.as_os_str().is_empty() {
        return Err(anyhow!("completion directory must not be empty"));
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    generate_to(shell, &mut command, bin_name, dir).context("failed to write completion file")
}
