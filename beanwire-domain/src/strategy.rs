//! Per-mode classification behaviour, selected once when the classifier is built.

use crate::error::ConfigurationError;
use beanwire_types::capability::StereotypeRegistry;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, PropertyModel};
use beanwire_types::plan::BeanDefinitionPlan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingMode {
    #[default]
    Simple,
    Properties,
    AlwaysProxy,
}

impl ProcessingMode {
    /// Pick a mode from the class's own capabilities.
    ///
    /// `registry` is only consulted when the class capabilities are not resolved yet.
    pub fn detect(class: &ClassModel, registry: &StereotypeRegistry) -> Self {
        let carries = |marker: &str| {
            if class.capabilities.is_resolved() {
                class.capabilities.has_stereotype(marker)
            } else {
                class
                    .capabilities
                    .marker_names()
                    .any(|m| registry.carries(m, marker))
            }
        };
        if carries(markers::AROUND) && !class.is_abstract {
            ProcessingMode::AlwaysProxy
        } else if carries(markers::CONFIGURATION_READER) {
            ProcessingMode::Properties
        } else {
            ProcessingMode::Simple
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingMode::Simple => "simple",
            ProcessingMode::Properties => "properties",
            ProcessingMode::AlwaysProxy => "always-proxy",
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(ProcessingMode::Simple),
            "properties" => Ok(ProcessingMode::Properties),
            "always-proxy" => Ok(ProcessingMode::AlwaysProxy),
            other => Err(format!(
                "unknown processing mode '{other}' (expected simple, properties or always-proxy)"
            )),
        }
    }
}

/// What a property handler may touch while registering one property.
pub struct PropertyContext<'a> {
    pub class: &'a ClassModel,
    pub plan: &'a mut BeanDefinitionPlan,
    pub optional_values: bool,
}

/// Hook deciding how a logical property is wired in properties mode.
///
/// Returning `Ok(true)` claims the property and its constituent members.
pub trait PropertyHandler {
    fn name(&self) -> &'static str;

    fn visit_property(
        &self,
        ctx: &mut PropertyContext<'_>,
        property: &PropertyModel,
    ) -> Result<bool, ConfigurationError>;
}

/// Leaves every property unclaimed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPropertyHandler;

impl PropertyHandler for NoopPropertyHandler {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn visit_property(
        &self,
        _ctx: &mut PropertyContext<'_>,
        _property: &PropertyModel,
    ) -> Result<bool, ConfigurationError> {
        Ok(false)
    }
}

/// Binds every property that has a non-private instance write accessor as a setter value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationPropertyHandler;

impl PropertyHandler for ConfigurationPropertyHandler {
    fn name(&self) -> &'static str {
        "configuration"
    }

    fn visit_property(
        &self,
        ctx: &mut PropertyContext<'_>,
        property: &PropertyModel,
    ) -> Result<bool, ConfigurationError> {
        let Some(idx) = ctx.class.write_method_index(property) else {
            return Ok(false);
        };
        let setter = &ctx.class.methods[idx];
        if setter.is_private() || setter.is_static {
            return Ok(false);
        }
        ctx.plan.visit_setter_value(&property.name, setter, ctx.optional_values);
        Ok(true)
    }
}

/// Behaviour switches for one processing mode.
pub struct ClassificationStrategy {
    mode: ProcessingMode,
    pub optional_field_values: bool,
    pub legacy_dialect_access: bool,
    property_handler: Box<dyn PropertyHandler>,
}

impl std::fmt::Debug for ClassificationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationStrategy")
            .field("mode", &self.mode)
            .field("optional_field_values", &self.optional_field_values)
            .field("legacy_dialect_access", &self.legacy_dialect_access)
            .field("property_handler", &self.property_handler.name())
            .finish()
    }
}

impl Default for ClassificationStrategy {
    fn default() -> Self {
        Self::simple()
    }
}

impl ClassificationStrategy {
    pub fn simple() -> Self {
        Self {
            mode: ProcessingMode::Simple,
            optional_field_values: false,
            legacy_dialect_access: false,
            property_handler: Box::new(NoopPropertyHandler),
        }
    }

    pub fn properties(handler: Box<dyn PropertyHandler>) -> Self {
        Self {
            mode: ProcessingMode::Properties,
            property_handler: handler,
            ..Self::simple()
        }
    }

    pub fn always_proxy() -> Self {
        Self {
            mode: ProcessingMode::AlwaysProxy,
            ..Self::simple()
        }
    }

    /// Strategy with the built-in behaviour of `mode`.
    pub fn for_mode(mode: ProcessingMode) -> Self {
        match mode {
            ProcessingMode::Simple => Self::simple(),
            ProcessingMode::Properties => Self::properties(Box::new(ConfigurationPropertyHandler))
                .with_optional_field_values(true),
            ProcessingMode::AlwaysProxy => Self::always_proxy(),
        }
    }

    pub fn with_optional_field_values(mut self, optional: bool) -> Self {
        self.optional_field_values = optional;
        self
    }

    pub fn with_legacy_dialect_access(mut self, enabled: bool) -> Self {
        self.legacy_dialect_access = enabled;
        self
    }

    pub fn with_property_handler(mut self, handler: Box<dyn PropertyHandler>) -> Self {
        self.property_handler = handler;
        self
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    pub fn always_proxy_enabled(&self) -> bool {
        self.mode == ProcessingMode::AlwaysProxy
    }

    pub fn process_as_properties(&self) -> bool {
        self.mode == ProcessingMode::Properties
    }

    pub fn property_handler(&self) -> &dyn PropertyHandler {
        self.property_handler.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanwire_types::capability::CapabilitySet;
    use beanwire_types::model::{MethodModel, ParameterModel, Visibility};
    use beanwire_types::plan::PlanKind;

    fn registry() -> StereotypeRegistry {
        StereotypeRegistry::new(
            &[
                ("Transactional".to_string(), vec![markers::AROUND.to_string()]),
                (
                    "ConfigurationProperties".to_string(),
                    vec![markers::CONFIGURATION_READER.to_string()],
                ),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn detect_prefers_always_proxy_for_concrete_advised_classes() {
        let registry = registry();
        let mut class = ClassModel::new("app.Service");
        class.capabilities = CapabilitySet::new().with_declared("Transactional");
        assert_eq!(
            ProcessingMode::detect(&class, &registry),
            ProcessingMode::AlwaysProxy
        );

        class.is_abstract = true;
        assert_eq!(
            ProcessingMode::detect(&class, &registry),
            ProcessingMode::Simple
        );
    }

    #[test]
    fn detect_recognises_configuration_readers() {
        let registry = registry();
        let mut class = ClassModel::new("app.Settings");
        class.capabilities = CapabilitySet::new().with_declared("ConfigurationProperties");
        class.capabilities.resolve(&registry);
        assert_eq!(
            ProcessingMode::detect(&class, &registry),
            ProcessingMode::Properties
        );
    }

    #[test]
    fn mode_parses_from_kebab_case() {
        assert_eq!(
            "always-proxy".parse::<ProcessingMode>(),
            Ok(ProcessingMode::AlwaysProxy)
        );
        assert!("proxy".parse::<ProcessingMode>().is_err());
        assert_eq!(ProcessingMode::Properties.to_string(), "properties");
    }

    #[test]
    fn configuration_handler_binds_public_setters() {
        let mut class = ClassModel::new("app.Settings");
        class.methods = vec![MethodModel {
            name: "setHost".to_string(),
            declaring_type: "app.Settings".to_string(),
            parameters: vec![ParameterModel {
                name: "host".to_string(),
                type_name: "java.lang.String".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }];
        let property = PropertyModel {
            name: "host".to_string(),
            type_name: "java.lang.String".to_string(),
            write_method: Some("setHost".to_string()),
            ..Default::default()
        };
        let mut plan = BeanDefinitionPlan::new("$Settings$Definition", "app.Settings", PlanKind::Bean);

        let mut ctx = PropertyContext {
            class: &class,
            plan: &mut plan,
            optional_values: true,
        };
        assert_eq!(
            ConfigurationPropertyHandler.visit_property(&mut ctx, &property),
            Ok(true)
        );
        assert_eq!(plan.setter_values.len(), 1);
        assert_eq!(plan.setter_values[0].property, "host");

        class.methods[0].visibility = Visibility::Private;
        let mut plan = BeanDefinitionPlan::new("$Settings$Definition", "app.Settings", PlanKind::Bean);
        let mut ctx = PropertyContext {
            class: &class,
            plan: &mut plan,
            optional_values: true,
        };
        assert_eq!(
            ConfigurationPropertyHandler.visit_property(&mut ctx, &property),
            Ok(false)
        );
        assert!(plan.setter_values.is_empty());
    }

    #[test]
    fn noop_handler_never_claims() {
        let class = ClassModel::new("app.Settings");
        let mut plan = BeanDefinitionPlan::new("$Settings$Definition", "app.Settings", PlanKind::Bean);
        let mut ctx = PropertyContext {
            class: &class,
            plan: &mut plan,
            optional_values: false,
        };
        let property = PropertyModel::default();
        assert_eq!(NoopPropertyHandler.visit_property(&mut ctx, &property), Ok(false));
    }
}
