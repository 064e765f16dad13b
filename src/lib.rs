//! cxtprep: Burmeister context preparation.
//!
//! cxtprep assembles Formal Concept Analysis contexts in the Burmeister
//! (`.cxt`) format. Each concept directory provides a raw relation and one
//! label file per language; cxtprep writes one context per concept and
//! language. It can also copy pre-built contexts and merge YAML metadata
//! fragments.
//!
//! # Modules
//!
//! - [`context`]: Relation and language readers, Burmeister composition
//! - [`walk`]: Concept directory walking and output writing
//! - [`validation`]: Optional structural checks (strict mode)
//! - [`metadata`]: YAML metadata merging
//! - [`error`]: Error types for cxtprep operations

pub mod context;
pub mod error;
pub mod metadata;
pub mod validation;
pub mod walk;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::CxtError;

use context::LanguageFilter;
use metadata::{
    MergeOptions, DEFAULT_METADATA_COMMENT, DEFAULT_METADATA_INPUT, DEFAULT_METADATA_OUTPUT,
};
use walk::{BuildOptions, DEFAULT_DESTINATION_DIR, DEFAULT_SOURCE_ROOT};

/// The cxtprep CLI application.
#[derive(Parser)]
#[command(name = "cxtprep")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG overrides it.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compose one Burmeister context per concept and language.
    Build(BuildArgs),
    /// Copy pre-built .cxt files from each concept directory.
    Copy(CopyArgs),
    /// Merge YAML metadata fragments into one document.
    MergeMetadata(MergeArgs),
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    /// Directory containing one subdirectory per concept.
    #[arg(long, default_value = DEFAULT_SOURCE_ROOT)]
    source: PathBuf,

    /// Existing directory receiving the .cxt files.
    #[arg(long, default_value = DEFAULT_DESTINATION_DIR)]
    dest: PathBuf,

    /// Only compose these language codes (repeatable or comma-separated).
    #[arg(long = "lang", value_name = "CODE", value_delimiter = ',')]
    languages: Vec<String>,

    /// Fail instead of writing contexts whose labels or rows do not match.
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the copy subcommand.
#[derive(clap::Args)]
struct CopyArgs {
    /// Directory containing one subdirectory per concept.
    #[arg(long, default_value = DEFAULT_SOURCE_ROOT)]
    source: PathBuf,

    /// Existing directory receiving the .cxt files.
    #[arg(long, default_value = DEFAULT_DESTINATION_DIR)]
    dest: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the merge-metadata subcommand.
#[derive(clap::Args)]
struct MergeArgs {
    /// Directory searched recursively for .yaml/.yml files.
    #[arg(long, default_value = DEFAULT_METADATA_INPUT)]
    input: PathBuf,

    /// Merged output file.
    #[arg(long, default_value = DEFAULT_METADATA_OUTPUT)]
    out: PathBuf,

    /// Comment written at the top of the merged file.
    #[arg(long, default_value = DEFAULT_METADATA_COMMENT)]
    comment: String,

    /// Do not write a header comment.
    #[arg(long, conflicts_with = "comment")]
    no_comment: bool,
}

/// Run the cxtprep CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CxtError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Build(args)) => run_build(args, cli.verbose),
        Some(Commands::Copy(args)) => run_copy(args, cli.verbose),
        Some(Commands::MergeMetadata(args)) => run_merge(args),
        None => {
            println!("cxtprep {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Burmeister context preparation.");
            println!();
            println!("Run 'cxtprep --help' for usage information.");
            Ok(())
        }
    }
}

/// Initialize tracing on stderr so stdout carries only results.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "cxtprep=warn",
        1 => "cxtprep=info",
        2 => "cxtprep=debug",
        _ => "cxtprep=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // A subscriber may already be installed when embedded; keep it.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs, verbose: u8) -> Result<(), CxtError> {
    check_output_format(&args.output)?;

    let opts = BuildOptions {
        source_root: args.source,
        destination_dir: args.dest,
        languages: LanguageFilter::from_codes(args.languages),
        strict: args.strict,
    };

    let report = walk::build_contexts(&opts)?;

    match args.output.as_str() {
        "json" => print_json(&report),
        _ => {
            println!("Prepared contexts in {}", opts.destination_dir.display());
            if verbose > 0 {
                print!("{}", report);
            }
            Ok(())
        }
    }
}

/// Execute the copy subcommand.
fn run_copy(args: CopyArgs, verbose: u8) -> Result<(), CxtError> {
    check_output_format(&args.output)?;

    let report = walk::copy_contexts(&args.source, &args.dest)?;

    match args.output.as_str() {
        "json" => print_json(&report),
        _ => {
            println!("Prepared contexts in {}", args.dest.display());
            if verbose > 0 {
                print!("{}", report);
            }
            Ok(())
        }
    }
}

/// Execute the merge-metadata subcommand.
fn run_merge(args: MergeArgs) -> Result<(), CxtError> {
    let opts = MergeOptions {
        input_dir: args.input,
        output_file: args.out,
        comment: (!args.no_comment).then_some(args.comment),
    };

    metadata::merge_metadata(&opts)?;
    println!("Merged YAML files into {}", opts.output_file.display());
    Ok(())
}

fn check_output_format(output: &str) -> Result<(), CxtError> {
    match output {
        "text" | "json" => Ok(()),
        other => Err(CxtError::UnsupportedOutput(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn print_json<T: serde::Serialize>(report: &T) -> Result<(), CxtError> {
    let json = serde_json::to_string_pretty(report).map_err(CxtError::ReportSerialize)?;
    println!("{}", json);
    Ok(())
}
