//! Command-line interface implementation for finscore.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for finscore.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "FinScore Analyzer CLI - Command line tools for project management.",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates a new project from a template.
    New(NewArgs),
}

/// Arguments of the `new` subcommand.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct NewArgs {
    /// The directory where the project will be created.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub output_dir: PathBuf,

    /// A JSON string with extra variables for the template.
    #[arg(long, value_name = "JSON", default_value = "{}")]
    pub extra_context: String,
}

impl Default for NewArgs {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("."), extra_context: "{}".to_string() }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the full help when no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    }
}
