//! Read-only class model supplied by the class model provider.
//!
//! Members reference their declaring type by qualified name; a member whose declaring
//! type differs from [`ClassModel::name`] is inherited.

use crate::capability::{CapabilitySet, StereotypeDefinitions, StereotypeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Supertype name -> (type parameter -> bound type).
pub type TypeArguments = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    PackagePrivate,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
    pub fn is_private(self) -> bool {
        matches!(self, Visibility::Private)
    }
    pub fn is_package_private(self) -> bool {
        matches!(self, Visibility::PackagePrivate)
    }
}

/// Source dialect the class was written in, fixed when the model is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceDialect {
    #[default]
    Standard,
    Dynamic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterModel {
    pub name: String,
    pub type_name: String,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructorModel {
    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub parameters: Vec<ParameterModel>,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

impl ConstructorModel {
    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    pub type_name: String,
    pub declaring_type: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_final: bool,

    /// Shadowed by a field of the same name further down the hierarchy.
    #[serde(default)]
    pub hidden: bool,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    pub declaring_type: String,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_final: bool,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub parameters: Vec<ParameterModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

impl MethodModel {
    /// `name(T1, T2)`.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }
}

/// A logical bean property: optional backing field plus read/write accessors.
///
/// Accessors are referenced by method name (read: no parameters, write: one parameter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyModel {
    pub name: String,
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_method: Option<String>,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupertypeModel {
    pub name: String,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,
}

/// The type under analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,

    #[serde(default)]
    pub is_final: bool,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub dialect: SourceDialect,

    #[serde(default, skip_serializing_if = "CapabilitySet::is_empty")]
    pub capabilities: CapabilitySet,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_arguments: TypeArguments,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_constructor: Option<ConstructorModel>,

    /// All fields, inherited ones included, in provider enumeration order.
    #[serde(default)]
    pub fields: Vec<FieldModel>,

    /// All methods, inherited ones included, in provider enumeration order.
    #[serde(default)]
    pub methods: Vec<MethodModel>,

    #[serde(default)]
    pub properties: Vec<PropertyModel>,

    #[serde(default)]
    pub supertypes: Vec<SupertypeModel>,
}

/// One input file of class models, with the stereotype definitions they rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassBatch {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stereotypes: StereotypeDefinitions,

    #[serde(default)]
    pub classes: Vec<ClassModel>,
}

/// Filters for member enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementQuery {
    pub only_declared: bool,
    pub include_hidden: bool,
    pub exclude_property_elements: bool,
}

impl ElementQuery {
    pub const ALL: ElementQuery = ElementQuery {
        only_declared: false,
        include_hidden: false,
        exclude_property_elements: false,
    };

    pub fn only_declared(mut self) -> Self {
        self.only_declared = true;
        self
    }

    pub fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }

    pub fn exclude_property_elements(mut self) -> Self {
        self.exclude_property_elements = true;
        self
    }
}

/// Package part of a qualified type name (empty for the default package).
pub fn package_of(type_name: &str) -> &str {
    type_name
        .rfind('.')
        .map(|idx| &type_name[..idx])
        .unwrap_or("")
}

/// Simple part of a qualified type name.
pub fn simple_name_of(type_name: &str) -> &str {
    type_name
        .rfind('.')
        .map(|idx| &type_name[idx + 1..])
        .unwrap_or(type_name)
}

/// Common view over fields and methods.
pub trait Member {
    fn name(&self) -> &str;
    fn declaring_type(&self) -> &str;
    fn visibility(&self) -> Visibility;
    fn is_static(&self) -> bool;
    fn is_final(&self) -> bool;
    fn capabilities(&self) -> &CapabilitySet;

    fn is_public(&self) -> bool {
        self.visibility().is_public()
    }

    fn is_private(&self) -> bool {
        self.visibility().is_private()
    }

    fn is_package_private(&self) -> bool {
        self.visibility().is_package_private()
    }

    /// Whether generated code living next to `class` can reach the member directly.
    fn is_accessible_from(&self, class: &ClassModel) -> bool {
        match self.visibility() {
            Visibility::Public => true,
            Visibility::Private => false,
            Visibility::Protected | Visibility::PackagePrivate => {
                package_of(self.declaring_type()) == package_of(&class.name)
            }
        }
    }

    fn requires_reflection(&self, class: &ClassModel) -> bool {
        !self.is_accessible_from(class)
    }

    /// `Declaring#name` for diagnostics.
    fn describe(&self) -> String {
        format!("{}#{}", self.declaring_type(), self.name())
    }
}

impl Member for FieldModel {
    fn name(&self) -> &str {
        &self.name
    }
    fn declaring_type(&self) -> &str {
        &self.declaring_type
    }
    fn visibility(&self) -> Visibility {
        self.visibility
    }
    fn is_static(&self) -> bool {
        self.is_static
    }
    fn is_final(&self) -> bool {
        self.is_final
    }
    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
}

impl Member for MethodModel {
    fn name(&self) -> &str {
        &self.name
    }
    fn declaring_type(&self) -> &str {
        &self.declaring_type
    }
    fn visibility(&self) -> Visibility {
        self.visibility
    }
    fn is_static(&self) -> bool {
        self.is_static
    }
    fn is_final(&self) -> bool {
        self.is_final
    }
    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }
    fn describe(&self) -> String {
        format!("{}#{}", self.declaring_type, self.signature())
    }
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn package(&self) -> &str {
        package_of(&self.name)
    }

    pub fn is_declared_here(&self, member: &dyn Member) -> bool {
        member.declaring_type() == self.name
    }

    /// Capabilities of this class or one of its listed supertypes.
    pub fn type_capabilities(&self, type_name: &str) -> Option<&CapabilitySet> {
        if type_name == self.name {
            return Some(&self.capabilities);
        }
        self.supertypes
            .iter()
            .find(|s| s.name == type_name)
            .map(|s| &s.capabilities)
    }

    /// Cache stereotype closures on every capability set of the model.
    pub fn resolve_capabilities(&mut self, registry: &StereotypeRegistry) {
        self.capabilities.resolve(registry);
        if let Some(ctor) = self.primary_constructor.as_mut() {
            ctor.capabilities.resolve(registry);
            for p in &mut ctor.parameters {
                p.capabilities.resolve(registry);
            }
        }
        for f in &mut self.fields {
            f.capabilities.resolve(registry);
        }
        for m in &mut self.methods {
            m.capabilities.resolve(registry);
            for p in &mut m.parameters {
                p.capabilities.resolve(registry);
            }
        }
        for p in &mut self.properties {
            p.capabilities.resolve(registry);
        }
        for s in &mut self.supertypes {
            s.capabilities.resolve(registry);
        }
    }

    /// Index of the field backing a property (the first visible field with that name).
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name && !f.hidden)
    }

    /// Index of an accessor by name and parameter count.
    pub fn method_index(&self, name: &str, arity: usize) -> Option<usize> {
        self.methods
            .iter()
            .position(|m| m.name == name && m.parameters.len() == arity)
    }

    pub fn read_method_index(&self, property: &PropertyModel) -> Option<usize> {
        property
            .read_method
            .as_deref()
            .and_then(|name| self.method_index(name, 0))
    }

    pub fn write_method_index(&self, property: &PropertyModel) -> Option<usize> {
        property
            .write_method
            .as_deref()
            .and_then(|name| self.method_index(name, 1))
    }

    fn property_field_indices(&self) -> BTreeSet<usize> {
        self.properties
            .iter()
            .filter_map(|p| p.field.as_deref().and_then(|f| self.field_index(f)))
            .collect()
    }

    fn property_method_indices(&self) -> BTreeSet<usize> {
        self.properties
            .iter()
            .flat_map(|p| [self.read_method_index(p), self.write_method_index(p)])
            .flatten()
            .collect()
    }

    /// Field indices matching `query`, in enumeration order.
    pub fn field_indices(&self, query: ElementQuery) -> Vec<usize> {
        let excluded = if query.exclude_property_elements {
            self.property_field_indices()
        } else {
            BTreeSet::new()
        };
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| query.include_hidden || !f.hidden)
            .filter(|(_, f)| !query.only_declared || f.declaring_type == self.name)
            .filter(|(idx, _)| !excluded.contains(idx))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Method indices matching `query`, in enumeration order.
    pub fn method_indices(&self, query: ElementQuery) -> Vec<usize> {
        let excluded = if query.exclude_property_elements {
            self.property_method_indices()
        } else {
            BTreeSet::new()
        };
        self.methods
            .iter()
            .enumerate()
            .filter(|(_, m)| !query.only_declared || m.declaring_type == self.name)
            .filter(|(idx, _)| !excluded.contains(idx))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn fields(&self, query: ElementQuery) -> Vec<&FieldModel> {
        self.field_indices(query)
            .into_iter()
            .map(|idx| &self.fields[idx])
            .collect()
    }

    pub fn methods(&self, query: ElementQuery) -> Vec<&MethodModel> {
        self.method_indices(query)
            .into_iter()
            .map(|idx| &self.methods[idx])
            .collect()
    }
}
