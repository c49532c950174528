//! Classification failures.
//!
//! Every variant is fatal to the class being classified: the caller discards all plans
//! built so far for that class and never emits a partial plan set.

use thiserror::Error;

/// A static-analysis violation found while classifying a class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The class must be proxied but is final.
    #[error(
        "cannot apply AOP advice to final class {class}: the class must be made non-final to support proxying"
    )]
    FinalClassProxy { class: String },

    /// The method carries its own around-advice but is final.
    #[error(
        "method {method} declares advice but is final: change the method to be non-final in order for the advice to be applied"
    )]
    FinalAdvisedMethod { method: String },

    /// Class-level advice reaches a final public or package-private method declared on the
    /// class itself.
    #[error(
        "method {method} inherits class-level advice but is final and declared here: make the method private or protected, or apply advice only to non-final methods"
    )]
    FinalInheritedAdvice { method: String },

    #[error(
        "method {method} carries advice but is private: change the method to be non-private in order for the advice to be applied"
    )]
    PrivateAdvisedMethod { method: String },

    #[error("method {method} carries advice but is static")]
    StaticAdvisedMethod { method: String },

    /// Static lifecycle/injection/adapter methods need an explicit executable marker.
    #[error("static method {method} is only allowed when explicitly marked executable")]
    StaticNotExecutable { method: String },

    /// A static method must be reachable without reflection.
    #[error(
        "method {method} is not accessible for direct invocation from the generated code; reflective access is not supported for static methods"
    )]
    InaccessibleMethod { method: String },

    /// The method itself is marked executable but cannot be reached without reflection.
    #[error(
        "method {method} is marked executable but is not accessible without reflection: make the method accessible or remove the executable marker"
    )]
    InaccessibleExecutable { method: String },
}

impl ConfigurationError {
    /// Stable key of the rule that was broken.
    pub fn rule_key(&self) -> &'static str {
        match self {
            ConfigurationError::FinalClassProxy { .. } => "final-class-proxy",
            ConfigurationError::FinalAdvisedMethod { .. } => "final-advised-method",
            ConfigurationError::FinalInheritedAdvice { .. } => "final-inherited-advice",
            ConfigurationError::PrivateAdvisedMethod { .. } => "private-advised-method",
            ConfigurationError::StaticAdvisedMethod { .. } => "static-advised-method",
            ConfigurationError::StaticNotExecutable { .. } => "static-not-executable",
            ConfigurationError::InaccessibleMethod { .. } => "inaccessible-method",
            ConfigurationError::InaccessibleExecutable { .. } => "inaccessible-executable",
        }
    }

    /// The offending element (class name or `Declaring#signature`).
    pub fn element(&self) -> &str {
        match self {
            ConfigurationError::FinalClassProxy { class } => class,
            ConfigurationError::FinalAdvisedMethod { method }
            | ConfigurationError::FinalInheritedAdvice { method }
            | ConfigurationError::PrivateAdvisedMethod { method }
            | ConfigurationError::StaticAdvisedMethod { method }
            | ConfigurationError::StaticNotExecutable { method }
            | ConfigurationError::InaccessibleMethod { method }
            | ConfigurationError::InaccessibleExecutable { method } => method,
        }
    }
}

/// Every rule key, in the order the rules are documented.
pub const RULE_KEYS: &[&str] = &[
    "final-class-proxy",
    "final-advised-method",
    "final-inherited-advice",
    "private-advised-method",
    "static-advised-method",
    "static-not-executable",
    "inaccessible-method",
    "inaccessible-executable",
];
