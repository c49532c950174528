use beanwire_types::capability::CapabilitySet;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, MethodModel};
use beanwire_types::plan::{BeanDefinitionPlan, MethodRef, PlanKind};

/// Collaborator that knows how interception proxies and method adapters are shaped.
///
/// beanwire-domain only decides *whether* a proxy or adapter is needed; the helper
/// decides what the resulting plan looks like.
pub trait AopHelper {
    /// Create an empty proxy plan for `class`, carrying the advice markers that
    /// triggered it. Constructor, type arguments and the super-bean reference are
    /// filled in by the caller.
    fn create_proxy_plan(
        &self,
        class: &ClassModel,
        main: &BeanDefinitionPlan,
        advice: &CapabilitySet,
    ) -> BeanDefinitionPlan;

    /// Record an around-interception entry on the proxy plan.
    fn visit_around_method(
        &self,
        proxy: &mut BeanDefinitionPlan,
        class: &ClassModel,
        method: &MethodModel,
        interceptor_bindings: Vec<String>,
    );

    /// Plan a generated adapter forwarding to `method`. `None` declines.
    fn synthesize_adapter(
        &self,
        class: &ClassModel,
        method: &MethodModel,
        index: u32,
    ) -> Option<BeanDefinitionPlan>;
}

/// Default helper: names plans after the bean type and requires adapters to name the
/// type they adapt to.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAopHelper;

impl AopHelper for DefaultAopHelper {
    fn create_proxy_plan(
        &self,
        class: &ClassModel,
        _main: &BeanDefinitionPlan,
        advice: &CapabilitySet,
    ) -> BeanDefinitionPlan {
        let mut plan = BeanDefinitionPlan::new(
            BeanDefinitionPlan::proxy_name(&class.name),
            class.name.clone(),
            PlanKind::Proxy,
        );
        plan.visit_markers(advice);
        plan
    }

    fn visit_around_method(
        &self,
        proxy: &mut BeanDefinitionPlan,
        _class: &ClassModel,
        method: &MethodModel,
        interceptor_bindings: Vec<String>,
    ) {
        proxy.visit_around_method(method, interceptor_bindings);
    }

    fn synthesize_adapter(
        &self,
        class: &ClassModel,
        method: &MethodModel,
        index: u32,
    ) -> Option<BeanDefinitionPlan> {
        let adapted_type = method
            .capabilities
            .attribute(markers::ADAPTER, markers::ADAPTED_TYPE)
            .and_then(|v| v.as_str())
            .or_else(|| method.capabilities.find_string_attribute(markers::ADAPTED_TYPE))
            .filter(|t| !t.trim().is_empty())?;

        let mut plan = BeanDefinitionPlan::new(
            BeanDefinitionPlan::adapter_name(&class.name, &method.name, index),
            class.name.clone(),
            PlanKind::Adapter { index },
        );
        plan.visit_default_constructor();
        plan.adapted_type = Some(adapted_type.to_string());
        plan.adapted_method = Some(MethodRef::of(method, false));
        Some(plan)
    }
}
