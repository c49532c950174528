use crate::classifier::ClassificationPass;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, FieldModel, Member};
use beanwire_types::plan::Disposition;

pub(crate) fn classify_field(
    pass: &mut ClassificationPass<'_>,
    class: &ClassModel,
    field: &FieldModel,
) -> Disposition {
    if field.is_static || field.is_final {
        return Disposition::Unclaimed;
    }

    let caps = &field.capabilities;
    let requires_reflection = field.requires_reflection(class);

    if caps.has_stereotype(markers::VALUE) || caps.has_stereotype(markers::PROPERTY) {
        pass.main.visit_field_value(
            field,
            pass.strategy.optional_field_values,
            requires_reflection,
        );
        return Disposition::FieldValue;
    }

    if caps.has_stereotype(markers::INJECT)
        || (caps.has_declared_stereotype(markers::QUALIFIER)
            && !caps.has_declared_marker(markers::BEAN))
    {
        pass.main
            .visit_field_injection_point(field, requires_reflection);
        return Disposition::FieldInjection;
    }

    Disposition::Unclaimed
}
