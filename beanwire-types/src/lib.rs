//! Shared DTOs (schemas-as-code) for the beanwire workspace.
//!
//! # Design constraints
//! - Class models are produced by an external provider and deserialized from disk.
//! - Plans are serialized to disk; be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod capability;
pub mod model;
pub mod plan;
pub mod report;
pub mod wire;

/// Schema identifiers.
pub mod schema {
    pub const BEANWIRE_PLANS_V1: &str = "beanwire.plans.v1";
    pub const BEANWIRE_REPORT_V1: &str = "beanwire.report.v1";
}

/// Well-known marker names understood by the classifier.
///
/// Markers are matched by name; any other marker is carried through untouched.
pub mod markers {
    pub const INJECT: &str = "Inject";
    pub const QUALIFIER: &str = "Qualifier";
    pub const BEAN: &str = "Bean";
    pub const VALUE: &str = "Value";
    pub const PROPERTY: &str = "Property";
    pub const POST_CONSTRUCT: &str = "PostConstruct";
    pub const PRE_DESTROY: &str = "PreDestroy";
    pub const EXECUTABLE: &str = "Executable";
    pub const ADAPTER: &str = "Adapter";
    pub const AROUND: &str = "Around";
    pub const REQUIRES_VALIDATION: &str = "RequiresValidation";
    pub const VALIDATED: &str = "Validated";
    pub const CONFIGURATION_READER: &str = "ConfigurationReader";

    /// Attribute of [`EXECUTABLE`] requesting startup processing.
    pub const PROCESS_ON_STARTUP: &str = "process_on_startup";
    /// Attribute of [`ADAPTER`] naming the interface the generated adapter implements.
    pub const ADAPTED_TYPE: &str = "adapted_type";
}
