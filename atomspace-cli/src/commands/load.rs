//! Loading Atomese files into the default store

use crate::config::CliConfig;
use crate::utils::{format_duration, print_success, ProgressIndicator};
use anyhow::{Context, Result};
use atomspace::AtomSpace;
use atomspace_sexpr::{LoadError, LoadReport, Loader};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub async fn load_command(config: &CliConfig, space: &AtomSpace, files: &[PathBuf]) -> Result<()> {
    let reports = load_files(config, space, files)?;

    let expressions: usize = reports.iter().map(|report| report.expressions).sum();
    let elapsed: Duration = reports.iter().map(|report| report.elapsed).sum();
    print_success(&format!(
        "Loaded {} expressions from {} file(s) into {} atoms in {}",
        expressions,
        files.len(),
        space.count(),
        format_duration(elapsed)
    ));
    Ok(())
}

/// Load `files` in order into `space`, stopping at the first failure
pub fn load_files(config: &CliConfig, space: &AtomSpace, files: &[PathBuf]) -> Result<Vec<LoadReport>> {
    let loader = Loader::new(config.loader);
    let progress = ProgressIndicator::new("Loading");
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        progress.set_message(&format!("Loading {}", path.display()));
        match load_one(&loader, space, path) {
            Ok(report) => {
                debug!(path = %path.display(), expressions = report.expressions, "Loaded file");
                reports.push(report);
            }
            Err(error) => {
                progress.finish_error(&format!("Failed to load {}", path.display()));
                return Err(error);
            }
        }
    }

    progress.finish(&format!("{} atoms", space.count()));
    Ok(reports)
}

fn load_one(loader: &Loader, space: &AtomSpace, path: &Path) -> Result<LoadReport> {
    match loader.load_file(path, space) {
        Ok(report) => Ok(report),
        Err(error) => {
            if let LoadError::Parse { source, .. } = &error {
                if let Ok(text) = fs::read_to_string(path) {
                    eprint!("{}", source.render(&text));
                }
            }
            Err(error).with_context(|| format!("Failed to load {}", path.display()))
        }
    }
}
