//! Generated adapters for adapter-stereotyped methods.

use crate::ports::AopHelper;
use beanwire_types::model::{ClassModel, MethodModel};
use beanwire_types::plan::BeanDefinitionPlan;
use tracing::debug;

/// Per-class adapter counter. Starts at 0 and only advances when an adapter is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdapterIndex {
    next: u32,
}

impl AdapterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> u32 {
        self.next
    }

    fn advance(&mut self) -> u32 {
        let current = self.next;
        self.next += 1;
        current
    }
}

/// Collects the adapter plans of one class pass.
#[derive(Debug, Default)]
pub struct AdapterSynthesizer {
    index: AdapterIndex,
    plans: Vec<BeanDefinitionPlan>,
}

impl AdapterSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the helper for an adapter of `method`; returns the index it was given, or
    /// `None` when the helper declined.
    pub fn synthesize(
        &mut self,
        aop: &dyn AopHelper,
        class: &ClassModel,
        method: &MethodModel,
    ) -> Option<u32> {
        let plan = aop.synthesize_adapter(class, method, self.index.peek())?;
        let index = self.index.advance();
        debug!(class = %class.name, method = %method.name, index, adapter = %plan.name, "synthesized adapter");
        self.plans.push(plan);
        Some(index)
    }

    pub fn into_plans(self) -> Vec<BeanDefinitionPlan> {
        self.plans
    }
}
