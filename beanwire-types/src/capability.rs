//! Declarative capability markers attached to classes and members.
//!
//! A marker is identified by name and may carry attributes. A *stereotype* is a
//! marker that transitively carries other markers; the relation is described once
//! in a [`StereotypeRegistry`] and its closure is cached per [`CapabilitySet`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Attribute values of a single marker.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Stereotype definitions: marker name -> markers it directly carries.
pub type StereotypeDefinitions = BTreeMap<String, Vec<String>>;

/// Transitive stereotype relation, computed once at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StereotypeRegistry {
    definitions: BTreeMap<String, BTreeSet<String>>,
    closure: BTreeMap<String, BTreeSet<String>>,
}

impl StereotypeRegistry {
    pub fn new(definitions: &StereotypeDefinitions) -> Self {
        let mut registry = Self::default();
        registry.extend(definitions);
        registry
    }

    /// Add definitions and recompute the closure.
    ///
    /// Carried markers accumulate: defining the same stereotype twice unions both lists.
    pub fn extend(&mut self, definitions: &StereotypeDefinitions) {
        for (marker, carried) in definitions {
            self.definitions
                .entry(marker.clone())
                .or_default()
                .extend(carried.iter().cloned());
        }
        self.closure = self
            .definitions
            .keys()
            .map(|marker| (marker.clone(), self.walk(marker)))
            .collect();
    }

    fn walk(&self, start: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([start.to_string()]);
        while let Some(marker) = queue.pop_front() {
            if !seen.insert(marker.clone()) {
                continue;
            }
            if let Some(carried) = self.definitions.get(&marker) {
                queue.extend(carried.iter().filter(|m| !seen.contains(*m)).cloned());
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.definitions
    }

    /// Whether `marker` is `target` or transitively carries it.
    pub fn carries(&self, marker: &str, target: &str) -> bool {
        marker == target
            || self
                .closure
                .get(marker)
                .is_some_and(|reachable| reachable.contains(target))
    }

    /// Every marker reachable from `names`, the names themselves included.
    pub fn expand<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for name in names {
            match self.closure.get(name) {
                Some(reachable) => out.extend(reachable.iter().cloned()),
                None => {
                    out.insert(name.clone());
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ResolvedStereotypes {
    declared: BTreeSet<String>,
    all: BTreeSet<String>,
}

/// Markers of one program element.
///
/// `declared` markers are written directly on the element; `inherited` ones come from
/// overridden members or an enclosing context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub declared: BTreeMap<String, Attributes>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inherited: BTreeMap<String, Attributes>,

    #[serde(skip)]
    resolved: Option<ResolvedStereotypes>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declared(mut self, marker: &str) -> Self {
        self.declared.entry(marker.to_string()).or_default();
        self.resolved = None;
        self
    }

    pub fn with_declared_attribute(
        mut self,
        marker: &str,
        attribute: &str,
        value: serde_json::Value,
    ) -> Self {
        self.declared
            .entry(marker.to_string())
            .or_default()
            .insert(attribute.to_string(), value);
        self.resolved = None;
        self
    }

    pub fn with_inherited(mut self, marker: &str) -> Self {
        self.inherited.entry(marker.to_string()).or_default();
        self.resolved = None;
        self
    }

    /// Cache the stereotype closure of this set.
    pub fn resolve(&mut self, registry: &StereotypeRegistry) {
        let declared = registry.expand(self.declared.keys());
        let mut all = declared.clone();
        all.extend(registry.expand(self.inherited.keys()));
        self.resolved = Some(ResolvedStereotypes { declared, all });
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Add a derived marker during a classification pass.
    ///
    /// The cached closure is refreshed so later reads in the same pass observe it.
    pub fn add_derived_marker(&mut self, marker: &str, registry: &StereotypeRegistry) {
        self.declared.entry(marker.to_string()).or_default();
        self.resolve(registry);
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty() && self.inherited.is_empty()
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.declared.contains_key(marker) || self.inherited.contains_key(marker)
    }

    pub fn has_declared_marker(&self, marker: &str) -> bool {
        self.declared.contains_key(marker)
    }

    pub fn has_stereotype(&self, marker: &str) -> bool {
        match &self.resolved {
            Some(resolved) => resolved.all.contains(marker),
            None => self.has_marker(marker),
        }
    }

    pub fn has_declared_stereotype(&self, marker: &str) -> bool {
        match &self.resolved {
            Some(resolved) => resolved.declared.contains(marker),
            None => self.has_declared_marker(marker),
        }
    }

    pub fn attribute(&self, marker: &str, attribute: &str) -> Option<&serde_json::Value> {
        self.declared
            .get(marker)
            .and_then(|attrs| attrs.get(attribute))
            .or_else(|| {
                self.inherited
                    .get(marker)
                    .and_then(|attrs| attrs.get(attribute))
            })
    }

    pub fn is_true(&self, marker: &str, attribute: &str) -> bool {
        matches!(
            self.attribute(marker, attribute),
            Some(serde_json::Value::Bool(true))
        )
    }

    /// First string value of `attribute` on any marker, declared markers first.
    pub fn find_string_attribute(&self, attribute: &str) -> Option<&str> {
        self.declared
            .values()
            .chain(self.inherited.values())
            .find_map(|attrs| attrs.get(attribute).and_then(|v| v.as_str()))
    }

    /// Names of every marker in the set, declared first.
    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.declared
            .keys()
            .chain(self.inherited.keys().filter(|k| !self.declared.contains_key(*k)))
            .map(String::as_str)
    }
}

/// Capabilities of a member seen together with those of its enclosing class.
///
/// Class-level markers behave as inherited markers of the member: they count for
/// `has_marker`/`has_stereotype` but never for the `declared` queries.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveCapabilities<'a> {
    own: &'a CapabilitySet,
    context: &'a CapabilitySet,
}

impl<'a> EffectiveCapabilities<'a> {
    pub fn new(own: &'a CapabilitySet, context: &'a CapabilitySet) -> Self {
        Self { own, context }
    }

    /// The member's own markers, without the class-level context.
    pub fn own(&self) -> &'a CapabilitySet {
        self.own
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.own.has_marker(marker) || self.context.has_marker(marker)
    }

    pub fn has_declared_marker(&self, marker: &str) -> bool {
        self.own.has_declared_marker(marker)
    }

    pub fn has_stereotype(&self, marker: &str) -> bool {
        self.own.has_stereotype(marker) || self.context.has_stereotype(marker)
    }

    pub fn has_declared_stereotype(&self, marker: &str) -> bool {
        self.own.has_declared_stereotype(marker)
    }

    pub fn is_true(&self, marker: &str, attribute: &str) -> bool {
        match self.own.attribute(marker, attribute) {
            Some(value) => matches!(value, serde_json::Value::Bool(true)),
            None => self.context.is_true(marker, attribute),
        }
    }
}
