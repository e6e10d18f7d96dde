#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for filling household registration documents.
//!
//! With a subcommand it runs non-interactively; without one it prompts
//! for everything through `dialoguer`. Logging goes through
//! [`house_reg_cli_utils::init_logger`] so log lines and progress bars
//! share the terminal.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::FillOptions;

#[derive(Parser)]
#[command(name = "house_reg", about = "Household registration document filler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fields found in each registration PDF as JSON
    Parse {
        /// Registration PDFs
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,
    },
    /// Fill the template for one to six registration PDFs
    Fill {
        /// Registration PDFs, in slot order (first is person A)
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,
        /// Document date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Start time shown on the document, e.g. 08:30
        #[arg(long, default_value = "")]
        time_start: String,
        /// Config file (overrides `HOUSE_REG_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the merged context as JSON instead of rendering
        #[arg(long)]
        context_only: bool,
    },
    /// List the template for each person count and whether it exists
    Templates {
        /// Config file (overrides `HOUSE_REG_CONFIG`)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = house_reg_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    match command {
        Commands::Parse { pdfs } => commands::parse(&pdfs)?,
        Commands::Fill {
            pdfs,
            date,
            time_start,
            config,
            context_only,
        } => {
            let date = match date {
                Some(value) => commands::parse_date(&value)
                    .map_err(|e| format!("invalid --date {value:?}: {e}"))?,
                None => chrono::Local::now().date_naive(),
            };
            commands::fill(
                &FillOptions {
                    pdfs: &pdfs,
                    date,
                    time_start: &time_start,
                    config: config.as_deref(),
                    context_only,
                },
                &multi,
            )?;
        }
        Commands::Templates { config } => commands::templates(config.as_deref())?,
        Commands::Config => commands::print_default_config(),
    }

    Ok(())
}
