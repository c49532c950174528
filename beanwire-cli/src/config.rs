//! Configuration file loading for beanwire.
//!
//! Discovers and loads `beanwire.toml` from the working root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use beanwire_domain::ProcessingMode;
use beanwire_types::capability::StereotypeDefinitions;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "beanwire.toml";

/// Top-level configuration from beanwire.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BeanwireConfig {
    pub processing: ProcessingConfig,

    /// Extra stereotype definitions: marker -> markers it carries.
    pub stereotypes: StereotypeDefinitions,
}

/// Processing section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Forces one processing mode for every class. Detected per class when absent.
    pub mode: Option<ProcessingMode>,

    /// Register value fields as optional.
    pub optional_field_values: bool,

    /// Let dynamic-dialect classes expose non-private executable methods.
    pub legacy_dialect_access: bool,

    /// Stop at the first rejected class.
    pub fail_fast: bool,
}

/// Discover the beanwire.toml config file.
///
/// Returns `None` if no config file is found in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a beanwire.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<BeanwireConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<BeanwireConfig> {
    let config: BeanwireConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<BeanwireConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(BeanwireConfig::default()),
    }
}

/// Configuration after merging the config file with CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub mode: Option<ProcessingMode>,
    pub optional_field_values: bool,
    pub legacy_dialect_access: bool,
    pub fail_fast: bool,
    pub stereotypes: StereotypeDefinitions,
}

/// CLI values for the `plan` command that may override the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOverrides {
    pub mode: Option<ProcessingMode>,
    pub optional_field_values: bool,
    pub legacy_dialect_access: bool,
    pub fail_fast: bool,
}

/// Merges config file settings with CLI arguments.
pub struct ConfigMerger {
    config: BeanwireConfig,
}

impl ConfigMerger {
    pub fn new(config: BeanwireConfig) -> Self {
        Self { config }
    }

    /// Merge with plan command CLI arguments.
    ///
    /// A CLI mode replaces the configured one. Boolean flags can only switch a
    /// setting on; an absent flag keeps the config file value.
    pub fn merge_plan_args(self, cli: PlanOverrides) -> MergedConfig {
        let processing = self.config.processing;
        MergedConfig {
            mode: cli.mode.or(processing.mode),
            optional_field_values: cli.optional_field_values || processing.optional_field_values,
            legacy_dialect_access: cli.legacy_dialect_access || processing.legacy_dialect_access,
            fail_fast: cli.fail_fast || processing.fail_fast,
            stereotypes: self.config.stereotypes,
        }
    }
}
