use crate::classifier::ClassificationPass;
use crate::error::ConfigurationError;
use crate::strategy::PropertyContext;
use beanwire_types::capability::StereotypeRegistry;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, MethodModel};
use beanwire_types::plan::Disposition;

/// Copy the derived validation marker onto both accessors when the property or either
/// accessor requires validation.
pub(crate) fn propagate_property_validation(
    class: &mut ClassModel,
    property: usize,
    registry: &StereotypeRegistry,
) {
    let prop = &class.properties[property];
    let read = class.read_method_index(prop);
    let write = class.write_method_index(prop);

    let requires = prop.capabilities.has_stereotype(markers::REQUIRES_VALIDATION)
        || [read, write].into_iter().flatten().any(|idx| {
            class.methods[idx]
                .capabilities
                .has_stereotype(markers::REQUIRES_VALIDATION)
        });
    if !requires {
        return;
    }
    for idx in [read, write].into_iter().flatten() {
        class.methods[idx]
            .capabilities
            .add_derived_marker(markers::VALIDATED, registry);
    }
}

/// Any method requiring validation is marked validated before it is classified.
pub(crate) fn propagate_method_validation(method: &mut MethodModel, registry: &StereotypeRegistry) {
    if method
        .capabilities
        .has_stereotype(markers::REQUIRES_VALIDATION)
        && !method.capabilities.has_declared_marker(markers::VALIDATED)
    {
        method
            .capabilities
            .add_derived_marker(markers::VALIDATED, registry);
    }
}

pub(crate) fn classify_property(
    pass: &mut ClassificationPass<'_>,
    class: &ClassModel,
    property: usize,
) -> Result<Disposition, ConfigurationError> {
    let prop = &class.properties[property];
    let mut ctx = PropertyContext {
        class,
        plan: &mut pass.main,
        optional_values: pass.strategy.optional_field_values,
    };
    if !pass.strategy.property_handler().visit_property(&mut ctx, prop)? {
        return Ok(Disposition::Unclaimed);
    }

    let read = class.read_method_index(prop).map(|idx| &class.methods[idx]);
    let write = class.write_method_index(prop).map(|idx| &class.methods[idx]);
    let field = prop
        .field
        .as_deref()
        .and_then(|name| class.field_index(name))
        .map(|idx| &class.fields[idx]);

    let members = [
        read.map(|m| m as &dyn Member),
        write.map(|m| m as &dyn Member),
        field.map(|f| f as &dyn Member),
    ];
    for member in members.into_iter().flatten() {
        if !class.is_declared_here(member) {
            pass.main.add_originating_element(member.declaring_type());
        }
    }
    Ok(Disposition::Property)
}
