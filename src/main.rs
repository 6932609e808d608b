use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use reelprep::logging::init_logging;
use reelprep::pipeline::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use reelprep::pipeline::schema::lookup;
use reelprep::{clean_movie_data, OutputFormat, PipelineConfig, Stage, COLUMN_SCHEMA};

#[derive(Parser)]
#[command(name = "reelprep")]
#[command(about = "Clean and feature-engineer raw movie metadata")]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the cleaning stage (the default when no command is given)
    Clean(CleanArgs),
    /// Verify a cleaned table has the columns a downstream stage needs
    Check {
        #[arg(value_enum)]
        stage: Stage,

        /// Cleaned table to inspect
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        input: PathBuf,

        /// Field delimiter of the cleaned table
        #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },
    /// Print the declared output schema as JSON lines
    Schema {
        /// Only print this column
        column: Option<String>,
    },
}

#[derive(Args)]
struct CleanArgs {
    /// Raw dataset
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the cleaned table
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Field delimiter of the raw dataset
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

impl From<CleanArgs> for PipelineConfig {
    fn from(args: CleanArgs) -> Self {
        PipelineConfig {
            input: args.input,
            output: args.output,
            delimiter: args.delimiter,
            output_format: args.format,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    let value = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("Delimiter must be a single ASCII character, got '{}'", value)),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if let Err(e) = run(cli.command) {
        eprintln!("reelprep: error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Option<Command>) -> anyhow::Result<()> {
    match command {
        None => clean(PipelineConfig::default()),
        Some(Command::Clean(args)) => clean(args.into()),
        Some(Command::Check {
            stage,
            input,
            delimiter,
        }) => {
            stage
                .check_artifact(&input, delimiter)
                .with_context(|| format!("Checking '{}' for the {} stage", input.display(), stage.name()))?;
            println!("{} has every column the {} stage needs.", input.display(), stage.name());
            Ok(())
        }
        Some(Command::Schema { column: None }) => {
            for spec in COLUMN_SCHEMA {
                println!("{}", serde_json::to_string(spec)?);
            }
            Ok(())
        }
        Some(Command::Schema { column: Some(name) }) => {
            let spec = lookup(&name).with_context(|| format!("'{}' is not a declared column", name))?;
            println!("{}", serde_json::to_string(spec)?);
            Ok(())
        }
    }
}

fn clean(config: PipelineConfig) -> anyhow::Result<()> {
    let summary = clean_movie_data(&config).context("Cleaning stage failed")?;
    println!(
        "Saved cleaned data to {} with {} rows.",
        summary.output.display(),
        summary.rows_written
    );
    Ok(())
}
