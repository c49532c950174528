//! Clap-free settings for the plan pipeline.

use beanwire_domain::ProcessingMode;
use beanwire_types::capability::StereotypeDefinitions;
use camino::Utf8PathBuf;

/// Settings for the plan pipeline.
#[derive(Debug, Clone)]
pub struct PlanSettings {
    /// Batch files, or directories scanned for `*.json` batches.
    pub inputs: Vec<Utf8PathBuf>,
    pub out_dir: Utf8PathBuf,

    /// Forces one mode for every class; `None` detects it per class.
    pub mode: Option<ProcessingMode>,
    pub optional_field_values: bool,
    pub legacy_dialect_access: bool,

    /// Stereotype definitions added to those of every batch.
    pub stereotypes: StereotypeDefinitions,

    /// Stop classifying after the first rejected class.
    pub fail_fast: bool,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            inputs: vec![Utf8PathBuf::from("classes")],
            out_dir: Utf8PathBuf::from("artifacts/beanwire"),
            mode: None,
            optional_field_values: false,
            legacy_dialect_access: false,
            stereotypes: StereotypeDefinitions::new(),
            fail_fast: false,
        }
    }
}
