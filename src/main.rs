//! code-launcher: find recently opened editor projects and SSH hosts

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "code-launcher")]
#[command(about = "Search recently opened editor projects and SSH hosts", long_about = None)]
#[command(version)]
struct Cli {
    /// Log skipped records and cache activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recently opened projects, newest first
    Projects {
        /// Text to match against project name or location
        query: Option<String>,

        /// Filter: local or remote
        #[arg(long, short)]
        filter: Option<String>,

        /// Limit number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Workspace storage directory (defaults to the editor's)
        #[arg(long)]
        storage_dir: Option<PathBuf>,
    },

    /// List SSH hosts from the SSH config
    Hosts {
        /// Text to match against host alias or hostname
        query: Option<String>,

        /// Include wildcard entries such as `Host *`
        #[arg(long, short)]
        all: bool,

        /// SSH config file (defaults to ~/.ssh/config)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "code_launcher=debug"
    } else {
        "code_launcher=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Projects {
            query,
            filter,
            limit,
            storage_dir,
        } => {
            let options = commands::projects::ProjectsOptions {
                query,
                filter,
                limit,
                storage_dir,
            };
            let output = commands::projects::execute(options)?;
            println!("{}", output);
        }

        Commands::Hosts { query, all, config } => {
            let options = commands::hosts::HostsOptions { query, all, config };
            let output = commands::hosts::execute(options)?;
            println!("{}", output);
        }
    }

    Ok(())
}
