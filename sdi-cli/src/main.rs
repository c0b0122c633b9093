//! sdi: command-line access to SDI depth sounder survey files.
#![allow(clippy::uninlined_format_args)]

use clap::{Args, Parser, Subcommand};
use sdi_io::{ContainerFormat, OutputLayout, ReadConfig, Survey, SurveyReader, TraceCsvWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Sdi(#[from] sdi_io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported output extension for {0}; use .csv or .json")]
    OutputFormat(PathBuf),
}

/// Reader for SDI depth sounder survey files.
#[derive(Parser)]
#[command(name = "sdi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a survey.
#[derive(Args)]
struct ReadArgs {
    /// Input survey file
    input: PathBuf,

    /// Read the alternate (fixed-layout) container
    #[arg(long)]
    alternate: bool,

    /// Keep traces in file order instead of grouping by frequency
    #[arg(long)]
    interleaved: bool,

    /// JSON read configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl ReadArgs {
    fn read_config(&self) -> Result<ReadConfig> {
        let mut config = match &self.config {
            Some(path) => ReadConfig::from_file(path)?,
            None => ReadConfig::default(),
        };
        if self.alternate {
            config = config.with_container(ContainerFormat::Alternate);
        }
        if self.interleaved {
            config = config.with_layout(OutputLayout::Interleaved);
        }
        Ok(config)
    }

    fn read(&self) -> Result<Survey> {
        let reader = SurveyReader::open(&self.input)?.with_config(self.read_config()?);
        log::info!(
            "reading {} ({} bytes)",
            self.input.display(),
            reader.file_size()
        );
        Ok(reader.read()?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show header facts and per-frequency trace counts
    Info {
        #[command(flatten)]
        read: ReadArgs,
    },

    /// Export trace metadata (.csv) or a survey summary (.json)
    Export {
        #[command(flatten)]
        read: ReadArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Info { read } | Commands::Export { read, .. } => read.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn print_info(survey: &Survey) {
    let summary = survey.summary();
    println!("File: {}", summary.filepath);
    println!("Survey line: {}", summary.survey_line_number);
    println!("Date: {}", summary.date);
    println!("Format version: {}", summary.file_version);
    if let Some(number) = summary.file_number {
        println!("File number: {}", number);
    }
    println!("Traces: {}", summary.trace_count);

    for group in &summary.groups {
        let label = match group.transducer {
            Some(transducer) => format!("{} kHz (transducer {})", group.khz, transducer),
            None => "all frequencies".to_string(),
        };
        let (rows, cols) = group.intensity_shape;
        print!("  {}: {} traces, intensity {}x{}", label, group.traces, rows, cols);
        if let (Some(first), Some(last)) = (group.first_trace, group.last_trace) {
            print!(", traces {}-{}", first, last);
        }
        println!();
    }

    if !summary.advisories.is_empty() {
        println!("Advisories:");
        for advisory in &summary.advisories {
            println!("  {}", advisory);
        }
    }
}

fn export(survey: &Survey, output: &Path) -> Result<()> {
    let extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("csv") => {
            let mut writer = TraceCsvWriter::create(output)?;
            writer.write_survey(survey)?;
        }
        Some("json") => {
            let mut writer = BufWriter::new(File::create(output)?);
            serde_json::to_writer_pretty(&mut writer, &survey.summary())?;
            writer.flush()?;
        }
        _ => return Err(CliError::OutputFormat(output.to_path_buf())),
    }
    println!(
        "Wrote {} traces to {}",
        survey.trace_count(),
        output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    match cli.command {
        Commands::Info { read } => print_info(&read.read()?),
        Commands::Export { read, output } => export(&read.read()?, &output)?,
    }

    Ok(())
}
