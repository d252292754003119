//! Load -> dump -> reload -> dump verification

use crate::config::CliConfig;
use crate::utils::{format_duration, print_success};
use anyhow::{bail, Context, Result};
use atomspace::{write_store, AtomPrinter, AtomSpace, DumpOptions};
use atomspace_sexpr::Loader;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub first_count: usize,
    pub second_count: usize,
    pub first_dump: Vec<u8>,
    pub second_dump: Vec<u8>,
}

impl RoundTrip {
    pub fn is_identical(&self) -> bool {
        self.first_count == self.second_count && self.first_dump == self.second_dump
    }
}

pub async fn roundtrip_command(config: &CliConfig, input: &Path) -> Result<()> {
    let started = Instant::now();
    let result = verify_roundtrip(config, input)?;

    if !result.is_identical() {
        bail!(
            "Round trip of {} is not stable: {} atoms / {} bytes, then {} atoms / {} bytes",
            input.display(),
            result.first_count,
            result.first_dump.len(),
            result.second_count,
            result.second_dump.len()
        );
    }

    print_success(&format!(
        "{}: {} atoms, {} bytes, identical after reload ({})",
        input.display(),
        result.first_count,
        result.first_dump.len(),
        format_duration(started.elapsed())
    ));
    Ok(())
}

/// Load `input`, dump it to a scratch file, load the dump into a fresh store
/// and dump that again.
pub fn verify_roundtrip(config: &CliConfig, input: &Path) -> Result<RoundTrip> {
    let loader = Loader::new(config.loader);
    let scratch = TempDir::new().context("Failed to create scratch directory")?;

    let first = AtomSpace::new().named("roundtrip-first");
    loader
        .load_file(input, &first)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let first_path = scratch.path().join("first.scm");
    dump_to(&first, &first_path)?;

    let second = AtomSpace::new().named("roundtrip-second");
    loader
        .load_file(&first_path, &second)
        .context("Failed to reload canonical dump")?;
    let second_path = scratch.path().join("second.scm");
    dump_to(&second, &second_path)?;

    debug!(first = first.count(), second = second.count(), "Round trip finished");
    Ok(RoundTrip {
        first_count: first.count(),
        second_count: second.count(),
        first_dump: fs::read(&first_path)?,
        second_dump: fs::read(&second_path)?,
    })
}

fn dump_to(space: &AtomSpace, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_store(
        space,
        &mut BufWriter::new(file),
        &AtomPrinter::compact(),
        &DumpOptions::default(),
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
