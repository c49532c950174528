//! BDD harness (cucumber-rs).
//!
//! This crate keeps scenario tests isolated from the production crates. It only holds
//! small helpers shared by the step definitions.

use beanwire_types::report::ToolInfo;
use serde::Serialize;

/// Tool identity recorded by pipeline scenarios.
pub fn scenario_tool() -> ToolInfo {
    ToolInfo {
        name: "beanwire".to_string(),
        version: Some("0.0.0-bdd".to_string()),
        commit: None,
    }
}

/// Serialized form of a unit enum value, e.g. `"fail"` for `ReportStatus::Fail`.
pub fn wire_label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(e) => format!("<unserializable: {e}>"),
    }
}
