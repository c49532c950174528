//! Bean wiring plans.
//!
//! A [`BeanDefinitionPlan`] records every visitation made while classifying one class;
//! a [`PlanSet`] groups the main plan with its proxy and adapter plans.

use crate::capability::CapabilitySet;
use crate::model::{
    simple_name_of, ConstructorModel, FieldModel, Member, MethodModel, TypeArguments,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanKind {
    Bean,
    Proxy,
    Adapter { index: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    pub declaring_type: String,
    pub name: String,
    pub signature: String,

    #[serde(default)]
    pub requires_reflection: bool,
}

impl MethodRef {
    pub fn of(method: &MethodModel, requires_reflection: bool) -> Self {
        Self {
            declaring_type: method.declaring_type.clone(),
            name: method.name.clone(),
            signature: method.signature(),
            requires_reflection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub declaring_type: String,
    pub name: String,
    pub type_name: String,

    #[serde(default)]
    pub requires_reflection: bool,
}

impl FieldRef {
    pub fn of(field: &FieldModel, requires_reflection: bool) -> Self {
        Self {
            declaring_type: field.declaring_type.clone(),
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            requires_reflection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValueBinding {
    pub field: FieldRef,
    pub optional: bool,

    /// Markers of the field, carried to the emitter for value resolution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterValueBinding {
    pub property: String,
    pub setter: MethodRef,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRef {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConstructorBinding {
    Declared {
        parameters: Vec<ParameterRef>,
        requires_reflection: bool,
    },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptedMethod {
    pub method: MethodRef,

    /// Advice markers applying to the method.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interceptor_bindings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanDefinitionPlan {
    pub name: String,
    pub bean_type: String,
    pub kind: PlanKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_arguments: TypeArguments,

    /// Class-level markers propagated to the plan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<ConstructorBinding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_bean: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapted_method: Option<MethodRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapted_type: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_construct_methods: Vec<MethodRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_destroy_methods: Vec<MethodRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub method_injection_points: Vec<MethodRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_injection_points: Vec<FieldRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_values: Vec<FieldValueBinding>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setter_values: Vec<SetterValueBinding>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executable_methods: Vec<MethodRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub around_methods: Vec<InterceptedMethod>,

    #[serde(default)]
    pub requires_method_processing: bool,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub originating_elements: BTreeSet<String>,
}

impl BeanDefinitionPlan {
    pub fn new(name: impl Into<String>, bean_type: impl Into<String>, kind: PlanKind) -> Self {
        Self {
            name: name.into(),
            bean_type: bean_type.into(),
            kind,
            type_arguments: TypeArguments::new(),
            markers: vec![],
            constructor: None,
            super_bean: None,
            adapted_method: None,
            adapted_type: None,
            post_construct_methods: vec![],
            pre_destroy_methods: vec![],
            method_injection_points: vec![],
            field_injection_points: vec![],
            field_values: vec![],
            setter_values: vec![],
            executable_methods: vec![],
            around_methods: vec![],
            requires_method_processing: false,
            originating_elements: BTreeSet::new(),
        }
    }

    /// `$Widget$Definition`
    pub fn definition_name(bean_type: &str) -> String {
        format!("${}$Definition", simple_name_of(bean_type))
    }

    /// `$Widget$Definition$Intercepted`
    pub fn proxy_name(bean_type: &str) -> String {
        format!("{}$Intercepted", Self::definition_name(bean_type))
    }

    /// `$Widget$onEvent$Adapter0`
    pub fn adapter_name(bean_type: &str, method: &str, index: u32) -> String {
        format!("${}${}$Adapter{}", simple_name_of(bean_type), method, index)
    }

    pub fn visit_type_arguments(&mut self, type_arguments: &TypeArguments) {
        self.type_arguments = type_arguments.clone();
    }

    pub fn visit_markers(&mut self, capabilities: &CapabilitySet) {
        self.markers = capabilities.marker_names().map(str::to_string).collect();
    }

    pub fn visit_constructor(&mut self, constructor: &ConstructorModel, requires_reflection: bool) {
        self.constructor = Some(ConstructorBinding::Declared {
            parameters: constructor
                .parameters
                .iter()
                .map(|p| ParameterRef {
                    name: p.name.clone(),
                    type_name: p.type_name.clone(),
                })
                .collect(),
            requires_reflection,
        });
    }

    pub fn visit_default_constructor(&mut self) {
        self.constructor = Some(ConstructorBinding::Default);
    }

    pub fn visit_super_bean_definition(&mut self, name: &str) {
        self.super_bean = Some(name.to_string());
    }

    pub fn visit_post_construct_method(&mut self, method: &MethodModel, requires_reflection: bool) {
        self.post_construct_methods
            .push(MethodRef::of(method, requires_reflection));
    }

    pub fn visit_pre_destroy_method(&mut self, method: &MethodModel, requires_reflection: bool) {
        self.pre_destroy_methods
            .push(MethodRef::of(method, requires_reflection));
    }

    pub fn visit_method_injection_point(&mut self, method: &MethodModel, requires_reflection: bool) {
        self.method_injection_points
            .push(MethodRef::of(method, requires_reflection));
    }

    pub fn visit_field_injection_point(&mut self, field: &FieldModel, requires_reflection: bool) {
        self.field_injection_points
            .push(FieldRef::of(field, requires_reflection));
    }

    pub fn visit_field_value(&mut self, field: &FieldModel, optional: bool, requires_reflection: bool) {
        self.field_values.push(FieldValueBinding {
            field: FieldRef::of(field, requires_reflection),
            optional,
            markers: field
                .capabilities()
                .marker_names()
                .map(str::to_string)
                .collect(),
        });
    }

    pub fn visit_setter_value(&mut self, property: &str, setter: &MethodModel, optional: bool) {
        self.setter_values.push(SetterValueBinding {
            property: property.to_string(),
            setter: MethodRef::of(setter, false),
            optional,
        });
    }

    pub fn visit_executable_method(&mut self, method: &MethodModel) {
        self.executable_methods.push(MethodRef::of(method, false));
    }

    pub fn visit_around_method(&mut self, method: &MethodModel, interceptor_bindings: Vec<String>) {
        self.around_methods.push(InterceptedMethod {
            method: MethodRef::of(method, false),
            interceptor_bindings,
        });
    }

    pub fn set_requires_method_processing(&mut self, requires: bool) {
        self.requires_method_processing = requires;
    }

    pub fn add_originating_element(&mut self, type_name: &str) {
        self.originating_elements.insert(type_name.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
    Property,
}

/// Terminal outcome of classifying one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Disposition {
    Unclaimed,
    FieldValue,
    FieldInjection,
    Lifecycle { post_construct: bool, pre_destroy: bool },
    MethodInjection,
    Adapter { index: u32 },
    /// Adapter-stereotyped method the helper declined to adapt. Claimed, but nothing
    /// is registered for it.
    AdapterDeclined,
    Intercepted,
    Executable,
    Property,
}

impl Disposition {
    pub fn is_claimed(self) -> bool {
        !matches!(self, Disposition::Unclaimed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDisposition {
    pub kind: MemberKind,
    pub member: String,
    pub disposition: Disposition,
}

/// Everything produced for one class: main plan, optional proxy, adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSet {
    pub class_name: String,
    pub main: BeanDefinitionPlan,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<BeanDefinitionPlan>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adapters: Vec<BeanDefinitionPlan>,

    #[serde(default)]
    pub dispositions: Vec<MemberDisposition>,
}

impl PlanSet {
    /// Main plan first, then the proxy, then adapters by index.
    pub fn plans(&self) -> impl Iterator<Item = &BeanDefinitionPlan> {
        std::iter::once(&self.main)
            .chain(self.proxy.iter())
            .chain(self.adapters.iter())
    }

    pub fn plan_count(&self) -> usize {
        1 + usize::from(self.proxy.is_some()) + self.adapters.len()
    }

    pub fn disposition_of(&self, member: &str) -> Option<Disposition> {
        self.dispositions
            .iter()
            .find(|d| d.member == member)
            .map(|d| d.disposition)
    }
}
