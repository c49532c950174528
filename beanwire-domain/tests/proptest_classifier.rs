//! Property-based tests for classifier invariants.
//!
//! These tests verify that:
//! - Classes without a primary constructor always get a default constructor
//! - Any number of advised methods yields exactly one proxy plan
//! - Static methods without an explicit executable marker are never registered
//! - Inherited methods are registered before methods declared on the class

use beanwire_domain::{ClassificationStrategy, Classifier};
use beanwire_types::capability::{CapabilitySet, StereotypeRegistry};
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, MethodModel, Visibility};
use beanwire_types::plan::{ConstructorBinding, Disposition};
use proptest::prelude::*;

fn registry() -> StereotypeRegistry {
    StereotypeRegistry::new(
        &[("Timed".to_string(), vec![markers::AROUND.to_string()])]
            .into_iter()
            .collect(),
    )
}

fn arb_visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Public),
        Just(Visibility::Protected),
        Just(Visibility::PackagePrivate),
        Just(Visibility::Private),
    ]
}

/// Marker subsets that never trip a validation rule on their own.
fn arb_plain_caps() -> impl Strategy<Value = CapabilitySet> {
    prop::collection::btree_set(
        prop_oneof![Just("Inject"), Just("Singleton"), Just("Named")],
        0..3,
    )
    .prop_map(|names| {
        names
            .into_iter()
            .fold(CapabilitySet::new(), |caps, name| caps.with_declared(name))
    })
}

/// Markers a static method may carry without opting into executable.
fn arb_static_caps() -> impl Strategy<Value = CapabilitySet> {
    prop::collection::btree_set(
        prop_oneof![
            Just(markers::INJECT),
            Just("Timed"),
            Just(markers::ADAPTER),
            Just(markers::VALUE),
        ],
        0..4,
    )
    .prop_map(|names| {
        names
            .into_iter()
            .fold(CapabilitySet::new(), |caps, name| caps.with_declared(name))
            .with_inherited(markers::EXECUTABLE)
    })
}

fn method(name: String, declaring: &str) -> MethodModel {
    MethodModel {
        name,
        declaring_type: declaring.to_string(),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn default_constructor_without_primary(
        specs in prop::collection::vec((arb_visibility(), arb_plain_caps()), 0..8)
    ) {
        let mut class = ClassModel::new("app.Generated");
        class.methods = specs
            .into_iter()
            .enumerate()
            .map(|(i, (visibility, capabilities))| MethodModel {
                visibility,
                capabilities,
                ..method(format!("m{i}"), "app.Generated")
            })
            .collect();

        let classifier = Classifier::new(ClassificationStrategy::simple(), registry());
        let plans = classifier.build(&mut class).expect("build");
        prop_assert_eq!(plans.main.constructor, Some(ConstructorBinding::Default));
    }

    #[test]
    fn advised_methods_share_one_proxy(count in 1usize..10) {
        let mut class = ClassModel::new("app.Service");
        class.methods = (0..count)
            .map(|i| MethodModel {
                capabilities: CapabilitySet::new().with_declared("Timed"),
                ..method(format!("m{i}"), "app.Service")
            })
            .collect();

        let classifier = Classifier::new(ClassificationStrategy::simple(), registry());
        let plans = classifier.build(&mut class).expect("build");
        prop_assert_eq!(plans.plan_count(), 2);
        let proxy = plans.proxy.as_ref().expect("proxy");
        prop_assert_eq!(proxy.around_methods.len(), count);
    }

    #[test]
    fn static_methods_need_explicit_executable(
        specs in prop::collection::vec((arb_visibility(), arb_static_caps()), 1..8)
    ) {
        let mut class = ClassModel::new("app.Util");
        class.methods = specs
            .into_iter()
            .enumerate()
            .map(|(i, (visibility, capabilities))| MethodModel {
                visibility,
                capabilities,
                is_static: true,
                ..method(format!("s{i}"), "app.Util")
            })
            .collect();

        let classifier = Classifier::new(ClassificationStrategy::simple(), registry());
        let plans = classifier.build(&mut class).expect("build");
        for plan in plans.plans() {
            prop_assert!(plan.executable_methods.is_empty());
            prop_assert!(plan.method_injection_points.is_empty());
            prop_assert!(plan.around_methods.is_empty());
        }
        prop_assert!(plans.adapters.is_empty());
        prop_assert!(plans
            .dispositions
            .iter()
            .all(|d| d.disposition == Disposition::Unclaimed));
    }

    #[test]
    fn inherited_methods_register_first(declared in prop::collection::vec(any::<bool>(), 0..12)) {
        let mut class = ClassModel::new("app.Child");
        class.capabilities = CapabilitySet::new().with_declared(markers::EXECUTABLE);
        class.methods = declared
            .iter()
            .enumerate()
            .map(|(i, here)| {
                let declaring = if *here { "app.Child" } else { "app.Base" };
                method(format!("m{i}"), declaring)
            })
            .collect();

        let classifier = Classifier::new(ClassificationStrategy::simple(), registry());
        let plans = classifier.build(&mut class).expect("build");

        let expected: Vec<String> = declared
            .iter()
            .enumerate()
            .filter(|(_, here)| !**here)
            .chain(declared.iter().enumerate().filter(|(_, here)| **here))
            .map(|(i, _)| format!("m{i}"))
            .collect();
        let actual: Vec<String> = plans
            .main
            .executable_methods
            .iter()
            .map(|m| m.name.clone())
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
