//! Store statistics

use crate::commands::load_files;
use crate::config::CliConfig;
use crate::utils::TableBuilder;
use anyhow::{bail, Result};
use atomspace::AtomSpace;
use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub atoms: usize,
    pub nodes: usize,
    pub links: usize,
    pub roots: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl StoreStats {
    pub fn collect(space: &AtomSpace) -> Self {
        let mut stats = StoreStats {
            roots: space.roots().len(),
            ..Self::default()
        };
        for atom in space.enumerate() {
            stats.atoms += 1;
            if atom.is_node() {
                stats.nodes += 1;
            } else {
                stats.links += 1;
            }
            *stats.by_type.entry(atom.type_name().to_string()).or_default() += 1;
        }
        stats
    }
}

pub async fn stats_command(
    config: &CliConfig,
    space: &AtomSpace,
    files: &[PathBuf],
    format: &str,
) -> Result<()> {
    if format != "table" && format != "json" {
        bail!("Unknown format: {} (expected table or json)", format);
    }
    load_files(config, space, files)?;
    let stats = StoreStats::collect(space);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "AtomSpace Statistics".bold().underline());
    println!();
    TableBuilder::new()
        .headers(vec!["Metric", "Value"])
        .row(vec!["Atoms".to_string(), stats.atoms.to_string()])
        .row(vec!["Nodes".to_string(), stats.nodes.to_string()])
        .row(vec!["Links".to_string(), stats.links.to_string()])
        .row(vec!["Roots".to_string(), stats.roots.to_string()])
        .print();

    println!();
    println!("{}", "Atoms by Type".bold());
    stats
        .by_type
        .iter()
        .fold(TableBuilder::new().headers(vec!["Type", "Count"]), |table, (name, count)| {
            table.row(vec![name.clone(), count.to_string()])
        })
        .print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_stats() {
        let space = AtomSpace::new();
        let a = space.add_node("ConceptNode", "a").unwrap();
        let b = space.add_node("ConceptNode", "b").unwrap();
        space.add_link("ListLink", vec![a, b]).unwrap();

        let stats = StoreStats::collect(&space);
        assert_eq!(stats.atoms, 3);
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.links, 1);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.by_type.get("ConceptNode"), Some(&2));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["by_type"]["ListLink"], 1);
    }
}
