//! Class member classifier: one pass per class, producing a [`PlanSet`].

use crate::adapter::AdapterSynthesizer;
use crate::error::ConfigurationError;
use crate::ordering::{classification_order, MemberSlot};
use crate::ports::{AopHelper, DefaultAopHelper};
use crate::proxy::ProxyOrchestrator;
use crate::rules::field::classify_field;
use crate::rules::method::classify_method;
use crate::rules::property::{
    classify_property, propagate_method_validation, propagate_property_validation,
};
use crate::strategy::ClassificationStrategy;
use beanwire_types::capability::StereotypeRegistry;
use beanwire_types::model::{ClassModel, ElementQuery, Member};
use beanwire_types::plan::{
    BeanDefinitionPlan, Disposition, MemberDisposition, MemberKind, PlanKind, PlanSet,
};
use tracing::debug;

pub struct Classifier {
    strategy: ClassificationStrategy,
    registry: StereotypeRegistry,
    aop: Box<dyn AopHelper>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("strategy", &self.strategy)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn new(strategy: ClassificationStrategy, registry: StereotypeRegistry) -> Self {
        Self {
            strategy,
            registry,
            aop: Box::new(DefaultAopHelper),
        }
    }

    pub fn with_aop_helper(mut self, aop: Box<dyn AopHelper>) -> Self {
        self.aop = aop;
        self
    }

    pub fn strategy(&self) -> &ClassificationStrategy {
        &self.strategy
    }

    pub fn registry(&self) -> &StereotypeRegistry {
        &self.registry
    }

    /// Classify every member of `class`.
    ///
    /// The only changes made to `class` are resolved stereotype caches and derived
    /// validation markers. On error nothing built so far is returned.
    pub fn build(&self, class: &mut ClassModel) -> Result<PlanSet, ConfigurationError> {
        class.resolve_capabilities(&self.registry);
        let mut pass = ClassificationPass::new(self, class);

        if self.strategy.always_proxy_enabled() {
            let aop = pass.aop;
            pass.proxy
                .get_or_create(aop, class, &pass.main, true, None)?;
        }

        let mut query = ElementQuery::ALL;
        if self.strategy.process_as_properties() {
            for idx in 0..class.properties.len() {
                propagate_property_validation(class, idx, &self.registry);
                let disposition = classify_property(&mut pass, class, idx)?;
                let name = format!("{}#{}", class.name, class.properties[idx].name);
                pass.record_named(class, MemberKind::Property, name, disposition);
            }
            query = query.exclude_property_elements();
        }

        let fields = class.field_indices(query.include_hidden());
        let methods = class.method_indices(query);
        for slot in classification_order(class, &fields, &methods) {
            match slot {
                MemberSlot::Field(idx) => {
                    let field = &class.fields[idx];
                    let disposition = classify_field(&mut pass, class, field);
                    pass.record(class, MemberKind::Field, field, disposition);
                }
                MemberSlot::Method(idx) => {
                    propagate_method_validation(&mut class.methods[idx], &self.registry);
                    let method = &class.methods[idx];
                    let disposition = classify_method(&mut pass, class, method)?;
                    pass.record(class, MemberKind::Method, method, disposition);
                }
            }
        }

        Ok(pass.finish(class))
    }
}

/// Type arguments and constructor, shared by the main plan and the proxy plan.
pub(crate) fn visit_type_shape(plan: &mut BeanDefinitionPlan, class: &ClassModel) {
    plan.visit_type_arguments(&class.type_arguments);
    match &class.primary_constructor {
        Some(ctor) => plan.visit_constructor(ctor, ctor.is_private()),
        None => plan.visit_default_constructor(),
    }
}

/// Mutable state of one `build` call.
pub(crate) struct ClassificationPass<'a> {
    pub(crate) strategy: &'a ClassificationStrategy,
    pub(crate) registry: &'a StereotypeRegistry,
    pub(crate) aop: &'a dyn AopHelper,
    pub(crate) main: BeanDefinitionPlan,
    pub(crate) proxy: ProxyOrchestrator,
    pub(crate) adapters: AdapterSynthesizer,
    dispositions: Vec<MemberDisposition>,
}

impl<'a> ClassificationPass<'a> {
    fn new(classifier: &'a Classifier, class: &ClassModel) -> Self {
        let mut main = BeanDefinitionPlan::new(
            BeanDefinitionPlan::definition_name(&class.name),
            class.name.clone(),
            PlanKind::Bean,
        );
        visit_type_shape(&mut main, class);
        main.visit_markers(&class.capabilities);

        Self {
            strategy: &classifier.strategy,
            registry: &classifier.registry,
            aop: classifier.aop.as_ref(),
            main,
            proxy: ProxyOrchestrator::new(),
            adapters: AdapterSynthesizer::new(),
            dispositions: Vec::new(),
        }
    }

    fn record(
        &mut self,
        class: &ClassModel,
        kind: MemberKind,
        member: &dyn Member,
        disposition: Disposition,
    ) {
        if disposition.is_claimed() && !class.is_declared_here(member) {
            let target = match disposition {
                Disposition::Intercepted => self.proxy.plan_mut(),
                _ => None,
            }
            .unwrap_or(&mut self.main);
            target.add_originating_element(member.declaring_type());
        }
        self.record_named(class, kind, member.describe(), disposition);
    }

    fn record_named(
        &mut self,
        class: &ClassModel,
        kind: MemberKind,
        member: String,
        disposition: Disposition,
    ) {
        debug!(class = %class.name, ?kind, member = %member, ?disposition, "classified member");
        self.dispositions.push(MemberDisposition {
            kind,
            member,
            disposition,
        });
    }

    fn finish(self, class: &ClassModel) -> PlanSet {
        PlanSet {
            class_name: class.name.clone(),
            main: self.main,
            proxy: self.proxy.into_plan(),
            adapters: self.adapters.into_plans(),
            dispositions: self.dispositions,
        }
    }
}
