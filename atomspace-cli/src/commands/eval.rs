//! One-shot command evaluation

use crate::commands::load_files;
use crate::config::CliConfig;
use anyhow::{Context, Result};
use atomspace::AtomSpace;
use atomspace_sexpr::Commands;
use std::path::PathBuf;

pub async fn eval_command(
    config: &CliConfig,
    space: &AtomSpace,
    preload: &[PathBuf],
    command: &str,
) -> Result<()> {
    load_files(config, space, preload)?;
    let reply = Commands::with_config(config.loader)
        .interpret(space, command)
        .with_context(|| format!("Failed to evaluate `{}`", command))?;
    println!("{}", reply);
    Ok(())
}
