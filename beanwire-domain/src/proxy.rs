//! Lazy, memoized interception proxy for one class.

use crate::classifier::visit_type_shape;
use crate::error::ConfigurationError;
use crate::guard::check_proxyable;
use crate::ports::AopHelper;
use beanwire_types::model::{ClassModel, MethodModel};
use beanwire_types::plan::BeanDefinitionPlan;
use tracing::debug;

/// Holds the proxy plan of the class being classified, once something needs it.
#[derive(Debug, Default)]
pub struct ProxyOrchestrator {
    plan: Option<BeanDefinitionPlan>,
}

impl ProxyOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_created(&self) -> bool {
        self.plan.is_some()
    }

    /// Return the proxy plan, creating it on first use.
    ///
    /// Creation fails for final classes. Advice markers are taken from the class when it is
    /// always proxied or no method triggered the proxy, else from the triggering method.
    pub fn get_or_create(
        &mut self,
        aop: &dyn AopHelper,
        class: &ClassModel,
        main: &BeanDefinitionPlan,
        always_proxy: bool,
        method: Option<&MethodModel>,
    ) -> Result<&mut BeanDefinitionPlan, ConfigurationError> {
        let plan = match self.plan.take() {
            Some(plan) => plan,
            None => create_proxy(aop, class, main, always_proxy, method)?,
        };
        Ok(self.plan.insert(plan))
    }

    pub(crate) fn plan_mut(&mut self) -> Option<&mut BeanDefinitionPlan> {
        self.plan.as_mut()
    }

    pub fn into_plan(self) -> Option<BeanDefinitionPlan> {
        self.plan
    }
}

fn create_proxy(
    aop: &dyn AopHelper,
    class: &ClassModel,
    main: &BeanDefinitionPlan,
    always_proxy: bool,
    method: Option<&MethodModel>,
) -> Result<BeanDefinitionPlan, ConfigurationError> {
    check_proxyable(class)?;

    let advice = match method {
        Some(m) if !always_proxy => &m.capabilities,
        _ => &class.capabilities,
    };
    let mut plan = aop.create_proxy_plan(class, main, advice);
    visit_type_shape(&mut plan, class);
    plan.visit_super_bean_definition(&main.name);

    debug!(
        class = %class.name,
        proxy = %plan.name,
        trigger = method.map(|m| m.name.as_str()).unwrap_or("<class>"),
        "created proxy plan"
    );
    Ok(plan)
}
