//! Rule explanations for the `beanwire explain` command.
//!
//! Each entry documents one rule that can reject a class: what it checks
//! and how to change the class so it passes.

/// Information about one classification rule.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Stable rule key, as reported in `report.json` (e.g., "final-class-proxy").
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Where in classification the rule is checked.
    pub stage: &'static str,
    /// What the rule checks.
    pub description: &'static str,
    /// How to change the class so the rule passes.
    pub remediation: &'static str,
}

/// Registry of all rule explanations.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    RuleExplanation {
        key: "final-class-proxy",
        title: "Final Class Cannot Be Proxied",
        stage: "proxy",
        description: r#"A proxy plan subclasses the bean it advises. A final class cannot be
subclassed, so it can never receive a proxy.

The rule fires when the class is processed in always-proxy mode (class-level
around-advice) or when any of its methods needs interception. In always-proxy
mode it fires before any member is visited."#,
        remediation: r#"- Make the class non-final, or
- Remove the class-level around-advice stereotype and advise individual
  methods of a non-final subclass instead."#,
    },
    RuleExplanation {
        key: "final-advised-method",
        title: "Final Method Declares Advice",
        stage: "interception",
        description: r#"The method carries around-advice written directly on it, but it is
final. A proxy cannot override a final method, so the advice would silently
never run.

A method declared on a final class counts as final."#,
        remediation: r#"- Make the method non-final, or
- Remove the advice marker from the method."#,
    },
    RuleExplanation {
        key: "final-inherited-advice",
        title: "Final Method Inherits Class Advice",
        stage: "interception",
        description: r#"The class is proxied as a whole (class-level around-advice), which
advises every public and package-private method. This method is declared on the
class itself and is final, so the proxy cannot override it.

Final methods inherited from a supertype are skipped instead of rejected. Outside
always-proxy mode, a final method that only inherits advice is not intercepted."#,
        remediation: r#"- Make the method non-final, or
- Make the method private or protected so class-level advice does not apply to it."#,
    },
    RuleExplanation {
        key: "private-advised-method",
        title: "Private Method Carries Advice",
        stage: "interception",
        description: r#"Advice is applied by overriding the method in a proxy. Private methods
cannot be overridden."#,
        remediation: r#"- Make the method non-private, or
- Remove the advice marker."#,
    },
    RuleExplanation {
        key: "static-advised-method",
        title: "Static Method Carries Advice",
        stage: "interception",
        description: r#"Static methods are not dispatched through the bean instance, so a proxy
can never intercept them."#,
        remediation: r#"- Make the method an instance method, or
- Remove the advice marker."#,
    },
    RuleExplanation {
        key: "static-not-executable",
        title: "Static Method Without Explicit Executable Marker",
        stage: "validation",
        description: r#"Static lifecycle callbacks and static adapter methods are only wired
when the method itself is explicitly marked executable. A class-level executable
marker does not count."#,
        remediation: r#"- Add the executable marker to the method, or
- Make the method an instance method."#,
    },
    RuleExplanation {
        key: "inaccessible-method",
        title: "Static Method Needs Reflection",
        stage: "validation",
        description: r#"The static method is explicitly executable, but generated code cannot
call it directly. Reflective invocation is not supported for static methods."#,
        remediation: r#"- Make the method accessible (for example, non-private), or
- Make the method an instance method."#,
    },
    RuleExplanation {
        key: "inaccessible-executable",
        title: "Executable Method Needs Reflection",
        stage: "exposure",
        description: r#"The method is itself marked executable, but generated code cannot reach
it without reflection. Executable methods are invoked directly, so the marker can
never be honoured."#,
        remediation: r#"- Make the method accessible, or
- Remove the executable marker from the method."#,
    },
];

/// Look up a rule explanation by key.
///
/// Matching is case-insensitive and treats underscores as hyphens.
pub fn lookup_rule(query: &str) -> Option<&'static RuleExplanation> {
    let normalized = query.to_lowercase().replace('_', "-");
    RULE_REGISTRY.iter().find(|rule| rule.key == normalized)
}

/// List all rule keys.
pub fn list_rule_keys() -> Vec<&'static str> {
    RULE_REGISTRY.iter().map(|r| r.key).collect()
}
