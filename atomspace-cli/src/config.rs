//! Configuration management

use anyhow::{Context, Result};
use atomspace::{DumpOptions, PrintConfig};
use atomspace_sexpr::LoaderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Parser and loader settings
    pub loader: LoaderConfig,

    /// Layout of printed atoms
    pub printer: PrintConfig,

    /// Which atoms `dump` writes
    pub dump: DumpOptions,

    /// Interactive shell settings
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "atomspace> ".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file. A missing file yields the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_owned(),
            None => match Self::default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: CliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// `<config_dir>/atomspace/config.toml`, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("atomspace").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomspace::PrintStyle;
    use tempfile::TempDir;

    #[test]
    fn test_config_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_load_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = CliConfig::default();
        config.printer.style = PrintStyle::Pretty;
        config.dump.roots_only = true;
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CliConfig::load(Some(&config_path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[loader]\nstrict_types = false\n\n[printer]\nstyle = \"pretty\"\n",
        )
        .unwrap();

        let config = CliConfig::load(Some(&config_path)).unwrap();
        assert!(!config.loader.strict_types);
        assert!(config.loader.allow_comments);
        assert_eq!(config.printer.style, PrintStyle::Pretty);
        assert_eq!(config.printer.indent, 2);
        assert_eq!(config.repl.prompt, "atomspace> ");
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CliConfig::load(Some(&temp_dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[printer]\nstyle = \"sideways\"\n").unwrap();
        assert!(CliConfig::load(Some(&config_path)).is_err());
    }
}
