//! atomspace CLI - load, inspect and dump Atomese files
//!
//! Every subcommand works on one process-wide store registered at start-up
//! and released before exit.

use anyhow::{Context, Result};
use atomspace::{global, AtomSpace};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

mod commands;
mod config;
mod utils;

use commands::*;
use config::CliConfig;

/// atomspace CLI - load, inspect and dump Atomese files
#[derive(Parser)]
#[command(name = "atomspace")]
#[command(about = "Load, inspect and dump Atomese s-expression files")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load files into one store and print a summary
    Load {
        /// Atomese files, loaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Load files and write the canonical dump
    Dump {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only write atoms no link points at
        #[arg(long)]
        roots_only: bool,
        /// Put each child of a link on its own line
        #[arg(long)]
        pretty: bool,
    },

    /// Show atom counts
    Stats {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check that load -> dump -> reload -> dump is byte-identical
    Roundtrip {
        file: PathBuf,
    },

    /// Evaluate a single cog command
    Eval {
        /// Files to load first
        #[arg(short, long)]
        preload: Vec<PathBuf>,
        /// Command text, e.g. "(cog-get-atoms 'ConceptNode)"
        command: String,
    },

    /// Start an interactive shell
    Repl {
        /// Files to load first
        #[arg(short, long)]
        preload: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    let result = run(cli).await;
    global::finalize();

    match result {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;

    global::initialize(Arc::new(AtomSpace::new().named("cli")));
    let space = global::default_space().context("Default atomspace is not initialized")?;

    match cli.command {
        Commands::Load { files } => load_command(&config, &space, &files).await,
        Commands::Dump {
            files,
            output,
            roots_only,
            pretty,
        } => dump_command(&config, &space, &files, output.as_deref(), roots_only, pretty).await,
        Commands::Stats { files, format } => stats_command(&config, &space, &files, &format).await,
        Commands::Roundtrip { file } => roundtrip_command(&config, &file).await,
        Commands::Eval { preload, command } => eval_command(&config, &space, &preload, &command).await,
        Commands::Repl { preload } => repl_command(&config, &space, &preload).await,
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dump_flags() {
        let cli = Cli::parse_from(["atomspace", "dump", "a.scm", "b.scm", "--roots-only", "-o", "out.scm"]);
        match cli.command {
            Commands::Dump {
                files,
                output,
                roots_only,
                pretty,
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out.scm")));
                assert!(roots_only);
                assert!(!pretty);
            }
            _ => panic!("expected dump"),
        }
    }
}
