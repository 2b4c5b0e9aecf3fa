//! Code City Layout CLI
//!
//! Computes code city layouts from extractor output.
//! Logs go to stderr so stdout can carry layout data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use codecity_layout::commands::{
    display_schema, display_version, execute_layout, validate_args, validate_layout_file,
    LayoutArgs, OutputFormat,
};
use codecity_layout::utils::config::DEFAULT_DIRECTORY_FOOTPRINT;
use codecity_layout::LayoutConfig;
use env_logger::Env;
use std::path::PathBuf;

/// Code City Layout - footprints and positions for 3D code cities
#[derive(Parser, Debug)]
#[command(name = "codecity")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a layout from entity records
    Layout {
        /// Entity records (JSON array, wrapped object or JSON Lines); `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Project name (defaults to the input's project or file name)
        #[arg(short, long, env = "CODECITY_PROJECT")]
        project: Option<String>,

        /// Snapshot (commit) identifier recorded in the output
        #[arg(short, long)]
        snapshot: Option<String>,

        /// Exclusion glob (repeatable or comma-separated)
        #[arg(short = 'x', long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Do not exclude vendored code by default
        #[arg(long)]
        no_default_excludes: bool,

        /// Fail on malformed paths instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Footprint reserved for directory children
        #[arg(long, default_value_t = DEFAULT_DIRECTORY_FOOTPRINT)]
        directory_footprint: f64,

        /// Pack directories with their real size instead of a fixed footprint
        #[arg(long, conflicts_with = "directory_footprint")]
        natural_directories: bool,

        /// Do not grow files by their attribute count
        #[arg(long)]
        no_file_padding: bool,

        /// Only emit this node (display path) and its subtree
        #[arg(long)]
        focus: Option<String>,

        /// Print a summary to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Validate a layout JSON file
    Validate {
        /// Path to layout JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Layout {
            input,
            output,
            format,
            project,
            snapshot,
            exclude,
            no_default_excludes,
            strict,
            directory_footprint,
            natural_directories,
            no_file_padding,
            focus,
            summary,
        } => {
            let directory_footprint = if natural_directories {
                None
            } else {
                Some(directory_footprint)
            };

            let layout_config = LayoutConfig::new()
                .with_directory_footprint(directory_footprint)
                .with_file_member_padding(!no_file_padding);

            let args = LayoutArgs {
                input,
                output,
                format,
                project,
                snapshot_id: snapshot,
                exclude,
                default_excludes: !no_default_excludes,
                strict,
                layout_config,
                focus,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_layout(args)?;
        }

        Commands::Validate { file } => {
            validate_layout_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
