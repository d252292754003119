//! Canonical dumps of loaded files

use crate::commands::load_files;
use crate::config::CliConfig;
use crate::utils::print_info;
use anyhow::{Context, Result};
use atomspace::{write_store, AtomPrinter, AtomSpace, DumpOptions, PrintStyle};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

pub async fn dump_command(
    config: &CliConfig,
    space: &AtomSpace,
    files: &[PathBuf],
    output: Option<&Path>,
    roots_only: bool,
    pretty: bool,
) -> Result<()> {
    load_files(config, space, files)?;

    let mut print_config = config.printer.clone();
    if pretty {
        print_config.style = PrintStyle::Pretty;
    }
    let printer = AtomPrinter::new(print_config);
    let options = DumpOptions {
        roots_only: roots_only || config.dump.roots_only,
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let written = write_store(space, &mut BufWriter::new(file), &printer, &options)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_info(&format!("Wrote {} atoms to {}", written, path.display()));
        }
        None => {
            let stdout = io::stdout();
            write_store(space, &mut stdout.lock(), &printer, &options)
                .context("Failed to write dump to stdout")?;
        }
    }
    Ok(())
}
