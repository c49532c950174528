//! End-to-end classification scenarios over hand-built class models.

use beanwire_domain::{ClassificationStrategy, Classifier, ProcessingMode};
use beanwire_types::capability::{CapabilitySet, StereotypeRegistry};
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, FieldModel, MethodModel, ParameterModel, PropertyModel, Visibility};
use beanwire_types::plan::{ConstructorBinding, Disposition, PlanKind};
use pretty_assertions::assert_eq;

fn registry() -> StereotypeRegistry {
    StereotypeRegistry::new(
        &[
            ("Timed".to_string(), vec![markers::AROUND.to_string()]),
            (markers::VALIDATED.to_string(), vec![markers::AROUND.to_string()]),
            ("EventListener".to_string(), vec![markers::ADAPTER.to_string()]),
        ]
        .into_iter()
        .collect(),
    )
}

fn classifier(strategy: ClassificationStrategy) -> Classifier {
    Classifier::new(strategy, registry())
}

fn method(name: &str, declaring: &str, caps: CapabilitySet) -> MethodModel {
    MethodModel {
        name: name.to_string(),
        declaring_type: declaring.to_string(),
        capabilities: caps,
        ..Default::default()
    }
}

fn adapter_caps() -> CapabilitySet {
    CapabilitySet::new()
        .with_declared("EventListener")
        .with_declared_attribute(
            markers::ADAPTER,
            markers::ADAPTED_TYPE,
            serde_json::json!("app.ApplicationEventListener"),
        )
}

#[test]
fn final_class_with_advised_method_fails() {
    let mut class = ClassModel::new("app.Widget");
    class.is_final = true;
    class.methods = vec![method(
        "m",
        "app.Widget",
        CapabilitySet::new().with_declared(markers::AROUND),
    )];

    let err = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect_err("final advised method");
    assert_eq!(err.rule_key(), "final-advised-method");
    assert!(err.to_string().contains("declares advice but is final"));
    assert_eq!(err.element(), "app.Widget#m()");
}

#[test]
fn advised_method_gets_one_proxy_linked_to_main_plan() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![method(
        "m",
        "app.Service",
        CapabilitySet::new().with_declared("Timed"),
    )];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    let proxy = plans.proxy.as_ref().expect("proxy plan");
    assert_eq!(proxy.kind, PlanKind::Proxy);
    assert_eq!(proxy.name, "$Service$Definition$Intercepted");
    assert_eq!(proxy.super_bean.as_deref(), Some(plans.main.name.as_str()));
    assert_eq!(proxy.around_methods.len(), 1);
    assert_eq!(proxy.around_methods[0].method.name, "m");
    assert_eq!(
        plans.disposition_of("app.Service#m()"),
        Some(Disposition::Intercepted)
    );
    assert!(plans.main.executable_methods.is_empty());
}

#[test]
fn validation_requirement_reaches_both_accessors() {
    let mut class = ClassModel::new("app.Settings");
    class.fields = vec![FieldModel {
        name: "name".to_string(),
        type_name: "java.lang.String".to_string(),
        declaring_type: "app.Settings".to_string(),
        visibility: Visibility::Private,
        ..Default::default()
    }];
    class.methods = vec![
        method(
            "getName",
            "app.Settings",
            CapabilitySet::new().with_declared(markers::REQUIRES_VALIDATION),
        ),
        MethodModel {
            parameters: vec![ParameterModel {
                name: "name".to_string(),
                type_name: "java.lang.String".to_string(),
                ..Default::default()
            }],
            ..method("setName", "app.Settings", CapabilitySet::new())
        },
    ];
    class.properties = vec![PropertyModel {
        name: "name".to_string(),
        type_name: "java.lang.String".to_string(),
        field: Some("name".to_string()),
        read_method: Some("getName".to_string()),
        write_method: Some("setName".to_string()),
        ..Default::default()
    }];

    let plans = classifier(ClassificationStrategy::for_mode(ProcessingMode::Properties))
        .build(&mut class)
        .expect("build");

    assert!(class.methods[0].capabilities.has_declared_marker(markers::VALIDATED));
    assert!(class.methods[1].capabilities.has_declared_marker(markers::VALIDATED));
    assert_eq!(
        plans.disposition_of("app.Settings#name"),
        Some(Disposition::Property)
    );
    assert_eq!(plans.main.setter_values.len(), 1);
    assert!(plans.main.setter_values[0].optional);
    // Accessors belong to the property and are not classified again.
    assert!(plans.proxy.is_none());
    assert_eq!(plans.dispositions.len(), 1);
}

#[test]
fn adapters_get_increasing_indices() {
    let mut class = ClassModel::new("app.Listener");
    class.methods = vec![
        method("onStartup", "app.Listener", adapter_caps()),
        method("onShutdown", "app.Listener", adapter_caps()),
    ];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    let kinds: Vec<_> = plans.adapters.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![PlanKind::Adapter { index: 0 }, PlanKind::Adapter { index: 1 }]
    );
    assert_eq!(plans.adapters[1].name, "$Listener$onShutdown$Adapter1");
    assert_eq!(plans.main.executable_methods.len(), 2);
    assert_eq!(
        plans.disposition_of("app.Listener#onStartup()"),
        Some(Disposition::Adapter { index: 0 })
    );
}

#[test]
fn declined_adapter_registers_nothing() {
    let mut class = ClassModel::new("app.Listener");
    class.methods = vec![method(
        "onEvent",
        "app.Listener",
        CapabilitySet::new().with_declared("EventListener"),
    )];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert!(plans.adapters.is_empty());
    assert!(plans.main.executable_methods.is_empty());
    assert_eq!(
        plans.disposition_of("app.Listener#onEvent()"),
        Some(Disposition::AdapterDeclined)
    );
}

#[test]
fn inherited_declined_adapter_keeps_originating_element() {
    let mut class = ClassModel::new("app.Listener");
    class.methods = vec![method(
        "on",
        "app.Base",
        CapabilitySet::new().with_declared("EventListener"),
    )];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert!(plans.adapters.is_empty());
    assert_eq!(
        plans.disposition_of("app.Base#on()"),
        Some(Disposition::AdapterDeclined)
    );
    assert!(plans.main.originating_elements.contains("app.Base"));
}

#[test]
fn lifecycle_wins_over_injection() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![method(
        "init",
        "app.Service",
        CapabilitySet::new()
            .with_declared(markers::POST_CONSTRUCT)
            .with_declared(markers::INJECT),
    )];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert_eq!(plans.main.post_construct_methods.len(), 1);
    assert!(plans.main.method_injection_points.is_empty());
    assert_eq!(
        plans.disposition_of("app.Service#init()"),
        Some(Disposition::Lifecycle {
            post_construct: true,
            pre_destroy: false
        })
    );
}

#[test]
fn static_injectable_field_is_ignored() {
    let mut class = ClassModel::new("app.Service");
    class.fields = vec![FieldModel {
        name: "shared".to_string(),
        type_name: "app.Repo".to_string(),
        declaring_type: "app.Service".to_string(),
        is_static: true,
        capabilities: CapabilitySet::new().with_declared(markers::INJECT),
        ..Default::default()
    }];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert!(plans.main.field_injection_points.is_empty());
    assert_eq!(
        plans.disposition_of("app.Service#shared"),
        Some(Disposition::Unclaimed)
    );
}

#[test]
fn static_lifecycle_method_needs_explicit_executable() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![MethodModel {
        is_static: true,
        ..method(
            "init",
            "app.Service",
            CapabilitySet::new().with_declared(markers::POST_CONSTRUCT),
        )
    }];

    let err = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect_err("static lifecycle");
    assert_eq!(err.rule_key(), "static-not-executable");
}

#[test]
fn final_always_proxy_class_fails_before_members() {
    let mut class = ClassModel::new("app.Widget");
    class.is_final = true;
    // Would fail with static-not-executable if members were visited first.
    class.methods = vec![MethodModel {
        is_static: true,
        ..method(
            "init",
            "app.Widget",
            CapabilitySet::new().with_declared(markers::POST_CONSTRUCT),
        )
    }];

    let err = classifier(ClassificationStrategy::always_proxy())
        .build(&mut class)
        .expect_err("final class");
    assert_eq!(err.rule_key(), "final-class-proxy");
}

#[test]
fn always_proxy_intercepts_public_and_package_private_methods() {
    let mut class = ClassModel::new("app.Service");
    class.capabilities = CapabilitySet::new().with_declared("Timed");
    class.methods = vec![
        method("a", "app.Service", CapabilitySet::new()),
        MethodModel {
            visibility: Visibility::PackagePrivate,
            ..method("b", "app.Service", CapabilitySet::new())
        },
        MethodModel {
            visibility: Visibility::Protected,
            ..method("c", "app.Service", CapabilitySet::new())
        },
    ];

    let plans = classifier(ClassificationStrategy::always_proxy())
        .build(&mut class)
        .expect("build");

    let proxy = plans.proxy.as_ref().expect("eager proxy");
    let names: Vec<_> = proxy
        .around_methods
        .iter()
        .map(|m| m.method.name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(proxy.markers, vec!["Timed".to_string()]);
    assert_eq!(proxy.around_methods[0].interceptor_bindings, vec!["Timed"]);
    assert_eq!(
        plans.disposition_of("app.Service#c()"),
        Some(Disposition::Unclaimed)
    );
}

#[test]
fn final_method_inheriting_class_advice_elsewhere_is_not_intercepted() {
    let mut class = ClassModel::new("app.Child");
    class.capabilities = CapabilitySet::new()
        .with_declared("Timed")
        .with_declared(markers::EXECUTABLE);
    class.methods = vec![MethodModel {
        is_final: true,
        ..method("describe", "app.Base", CapabilitySet::new())
    }];

    let plans = classifier(ClassificationStrategy::always_proxy())
        .build(&mut class)
        .expect("build");

    let proxy = plans.proxy.as_ref().expect("eager proxy");
    assert!(proxy.around_methods.is_empty());
    assert_eq!(
        plans.disposition_of("app.Base#describe()"),
        Some(Disposition::Executable)
    );
    assert!(plans.main.originating_elements.contains("app.Base"));
}

#[test]
fn final_public_method_declared_here_with_class_advice_fails() {
    let mut class = ClassModel::new("app.Service");
    class.capabilities = CapabilitySet::new().with_declared("Timed");
    class.methods = vec![MethodModel {
        is_final: true,
        ..method("run", "app.Service", CapabilitySet::new())
    }];

    let err = classifier(ClassificationStrategy::always_proxy())
        .build(&mut class)
        .expect_err("final inherited advice");
    assert_eq!(err.rule_key(), "final-inherited-advice");
}

#[test]
fn final_package_private_method_declared_here_with_class_advice_fails() {
    let mut class = ClassModel::new("app.Service");
    class.capabilities = CapabilitySet::new().with_declared("Timed");
    class.methods = vec![MethodModel {
        is_final: true,
        visibility: Visibility::PackagePrivate,
        ..method("run", "app.Service", CapabilitySet::new())
    }];

    let err = classifier(ClassificationStrategy::always_proxy())
        .build(&mut class)
        .expect_err("final inherited advice");
    assert_eq!(err.rule_key(), "final-inherited-advice");
    assert_eq!(err.element(), "app.Service#run()");
}

#[test]
fn final_method_with_only_inherited_advice_falls_through_outside_always_proxy() {
    let mut class = ClassModel::new("app.Service");
    class.capabilities = CapabilitySet::new().with_declared(markers::EXECUTABLE);
    class.methods = vec![MethodModel {
        is_final: true,
        ..method(
            "m",
            "app.Service",
            CapabilitySet::new().with_inherited(markers::AROUND),
        )
    }];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert!(plans.proxy.is_none());
    assert_eq!(
        plans.disposition_of("app.Service#m()"),
        Some(Disposition::Executable)
    );
    assert_eq!(plans.main.executable_methods.len(), 1);
}

#[test]
fn private_advised_method_fails() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![MethodModel {
        visibility: Visibility::Private,
        ..method("run", "app.Service", CapabilitySet::new().with_declared("Timed"))
    }];

    let err = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect_err("private advice");
    assert_eq!(err.rule_key(), "private-advised-method");
}

#[test]
fn private_executable_method_fails() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![MethodModel {
        visibility: Visibility::Private,
        ..method(
            "run",
            "app.Service",
            CapabilitySet::new().with_declared(markers::EXECUTABLE),
        )
    }];

    let err = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect_err("private executable");
    assert_eq!(err.rule_key(), "inaccessible-executable");
}

#[test]
fn class_level_executable_skips_private_and_foreign_non_public_methods() {
    let mut class = ClassModel::new("app.Service");
    class.capabilities = CapabilitySet::new().with_declared(markers::EXECUTABLE);
    class.methods = vec![
        MethodModel {
            visibility: Visibility::Protected,
            ..method("hook", "lib.Base", CapabilitySet::new())
        },
        method("open", "lib.Base", CapabilitySet::new()),
        MethodModel {
            visibility: Visibility::Private,
            ..method("secret", "app.Service", CapabilitySet::new())
        },
        method("run", "app.Service", CapabilitySet::new()),
    ];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    let names: Vec<_> = plans
        .main
        .executable_methods
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["open", "run"]);
    assert_eq!(
        plans.disposition_of("lib.Base#hook()"),
        Some(Disposition::Unclaimed)
    );
}

#[test]
fn legacy_dialect_access_registers_non_private_inaccessible_methods() {
    use beanwire_types::model::SourceDialect;

    let build = |legacy: bool| {
        let mut class = ClassModel::new("app.Script");
        class.dialect = SourceDialect::Dynamic;
        class.capabilities = CapabilitySet::new().with_declared(markers::EXECUTABLE);
        class.supertypes = vec![beanwire_types::model::SupertypeModel {
            name: "lib.Base".to_string(),
            capabilities: CapabilitySet::new().with_declared(markers::EXECUTABLE),
        }];
        class.methods = vec![MethodModel {
            visibility: Visibility::Protected,
            ..method("hook", "lib.Base", CapabilitySet::new())
        }];
        classifier(ClassificationStrategy::simple().with_legacy_dialect_access(legacy))
            .build(&mut class)
            .expect("build")
    };

    assert!(build(false).main.executable_methods.is_empty());
    assert_eq!(build(true).main.executable_methods.len(), 1);
}

#[test]
fn value_fields_bind_before_injection() {
    let mut class = ClassModel::new("app.Service");
    class.fields = vec![
        FieldModel {
            name: "port".to_string(),
            type_name: "int".to_string(),
            declaring_type: "app.Service".to_string(),
            visibility: Visibility::Private,
            capabilities: CapabilitySet::new()
                .with_declared(markers::VALUE)
                .with_declared(markers::INJECT),
            ..Default::default()
        },
        FieldModel {
            name: "named".to_string(),
            type_name: "app.Repo".to_string(),
            declaring_type: "app.Service".to_string(),
            capabilities: CapabilitySet::new().with_declared(markers::QUALIFIER),
            ..Default::default()
        },
        FieldModel {
            name: "produced".to_string(),
            type_name: "app.Repo".to_string(),
            declaring_type: "app.Service".to_string(),
            capabilities: CapabilitySet::new()
                .with_declared(markers::QUALIFIER)
                .with_declared(markers::BEAN),
            ..Default::default()
        },
    ];

    let plans = classifier(ClassificationStrategy::simple().with_optional_field_values(true))
        .build(&mut class)
        .expect("build");

    assert_eq!(plans.main.field_values.len(), 1);
    assert!(plans.main.field_values[0].optional);
    assert!(plans.main.field_values[0].field.requires_reflection);
    assert_eq!(plans.main.field_injection_points.len(), 1);
    assert_eq!(plans.main.field_injection_points[0].name, "named");
    assert_eq!(
        plans.disposition_of("app.Service#produced"),
        Some(Disposition::Unclaimed)
    );
}

#[test]
fn requires_validation_turns_into_advice() {
    let mut class = ClassModel::new("app.Service");
    class.methods = vec![method(
        "save",
        "app.Service",
        CapabilitySet::new().with_declared(markers::REQUIRES_VALIDATION),
    )];

    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");

    assert!(class.methods[0].capabilities.has_declared_marker(markers::VALIDATED));
    assert_eq!(
        plans.disposition_of("app.Service#save()"),
        Some(Disposition::Intercepted)
    );
}

#[test]
fn class_without_constructor_records_default() {
    let mut class = ClassModel::new("app.Plain");
    let plans = classifier(ClassificationStrategy::simple())
        .build(&mut class)
        .expect("build");
    assert_eq!(plans.main.constructor, Some(ConstructorBinding::Default));
    assert_eq!(plans.plan_count(), 1);
}
