use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;
mod output;

use commands::{group, permission, types};
use config::CliConfig;

/// permref - Convert permissions between descriptor and entity reference form
#[derive(Parser)]
#[command(name = "permref")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json, yaml) [default: $PERMREF_FORMAT or text]
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a permission descriptor into an entity reference
    Encode {
        /// Entitlement, e.g. "can_view"
        entitlement: String,

        /// Entity type, e.g. "instance"
        entity_type: String,

        /// Entity argument, repeatable (e.g. -a name=c1 -a project=default)
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = permission::parse_key_value)]
        args: Vec<(String, String)>,
    },

    /// Decode an entity reference into a permission descriptor
    Decode {
        /// Entitlement, e.g. "can_view"
        entitlement: String,

        /// Entity type the reference is expected to identify
        entity_type: String,

        /// Entity reference, e.g. "/1.0/instances/c1?project=default"
        reference: String,
    },

    /// Convert whole auth groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// List every known entity type and its reference template
    Types,
}

#[derive(Subcommand)]
enum GroupAction {
    /// Read a group in descriptor form and print the stored record
    ToRecord {
        /// YAML or JSON file (by extension)
        file: PathBuf,
    },

    /// Read a stored group record and print it in descriptor form
    FromRecord {
        /// YAML or JSON file (by extension)
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load()?;
    let _guard = logging::init_logging(cli.verbose, config.log_dir.as_deref())?;
    let format = config.output_format(cli.format.as_deref());

    match cli.command {
        Commands::Encode {
            entitlement,
            entity_type,
            args,
        } => {
            permission::encode(entitlement, entity_type, args, format)?;
        }
        Commands::Decode {
            entitlement,
            entity_type,
            reference,
        } => {
            permission::decode(entitlement, entity_type, reference, format)?;
        }
        Commands::Group { action } => match action {
            GroupAction::ToRecord { file } => {
                group::to_record(&file, format)?;
            }
            GroupAction::FromRecord { file } => {
                group::from_record(&file, format)?;
            }
        },
        Commands::Types => {
            types::list(format)?;
        }
    }

    Ok(())
}
