use super::smart_load;
use super::{OutputConfig, overrides};
use crate::scanner::ScannerConfig;
use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository config looked up in the working directory, in any supported format
const REPO_CONFIG_FILES: [&str; 2] = ["sigscan.toml", "sigscan.json"];

#[derive(Debug)]
pub struct SigscanConfig {
    figment: Figment,
}

impl SigscanConfig {
    /// Load the layered configuration.
    ///
    /// Precedence, lowest first: embedded defaults, repository config (or the
    /// custom file when given), `SIGSCAN_` environment variables, CLI overrides.
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !std::path::Path::new(custom_path).exists() {
                anyhow::bail!("Config file {:?} does not exist", custom_path);
            }
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            for file in REPO_CONFIG_FILES {
                figment = figment.merge(smart_load::auto(file));
            }
        }

        figment = figment.merge(Env::prefixed("SIGSCAN_").split("__"));

        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides::strip_nulls(cli)?));
        }

        Ok(SigscanConfig { figment })
    }

    /// Extract a typed section, e.g. `scanner`
    pub fn section<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.figment
            .extract_inner(path)
            .with_context(|| format!("Invalid configuration section '{}'", path))
    }

    pub fn scanner(&self) -> Result<ScannerConfig> {
        self.section("scanner")
    }

    pub fn output(&self) -> Result<OutputConfig> {
        self.section("output")
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::scanner::ScanMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_loads_defaults() {
        let config = SigscanConfig::load(None, None::<()>).expect("Should load default config");

        let scanner = config.scanner().unwrap();
        assert_eq!(scanner, ScannerConfig::default());
        assert_eq!(config.output().unwrap().format, OutputFormat::Text);

        let full = config.get_full_config().unwrap();
        assert!(full.get("scanner").is_some());
        assert!(full.get("output").is_some());
    }

    #[test]
    fn test_custom_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[scanner]\nmode = \"sequential\"\nmax_workers = 2\n").unwrap();

        let config = SigscanConfig::load(path.to_str(), None::<()>).unwrap();
        let scanner = config.scanner().unwrap();
        assert_eq!(scanner.mode, ScanMode::Sequential);
        assert_eq!(scanner.max_workers, 2);
        assert_eq!(scanner.thread_percentage, 100);
    }

    #[test]
    fn test_custom_json_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{"output": {"format": "json"}}"#).unwrap();

        let config = SigscanConfig::load(path.to_str(), None::<()>).unwrap();
        assert_eq!(config.output().unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_custom_config_is_error() {
        let config = SigscanConfig::load(Some("non_existent.toml"), None::<()>);
        assert!(config.is_err());
    }

    #[test]
    fn test_cli_overrides_take_priority() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[scanner]\nmax_workers = 2\n").unwrap();

        let overrides = serde_json::json!({
            "scanner": { "max_workers": 8, "mode": null },
            "output": { "format": "json" }
        });
        let config = SigscanConfig::load(path.to_str(), Some(overrides)).unwrap();

        let scanner = config.scanner().unwrap();
        assert_eq!(scanner.max_workers, 8);
        assert_eq!(scanner.mode, ScanMode::Parallel);
        assert_eq!(config.output().unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let overrides = serde_json::json!({ "scanner": { "mode": "turbo" } });
        let config = SigscanConfig::load(None, Some(overrides)).unwrap();
        let err = config.scanner().unwrap_err();
        assert!(err.to_string().contains("scanner"));
    }

    #[test]
    fn test_unserializable_cli_overrides_fail_load() {
        let mut overrides = std::collections::BTreeMap::new();
        overrides.insert((0u8, 1u8), "sequential");

        let err = SigscanConfig::load(None, Some(overrides)).unwrap_err();
        assert!(err.to_string().contains("CLI overrides"));
    }
}
