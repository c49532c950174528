use crate::classifier::ClassificationPass;
use crate::error::ConfigurationError;
use beanwire_types::capability::EffectiveCapabilities;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, MethodModel, SourceDialect};

/// Register the method for reflection-free invocation. `Ok(true)` only when registered.
pub(crate) fn expose(
    pass: &mut ClassificationPass<'_>,
    class: &ClassModel,
    method: &MethodModel,
) -> Result<bool, ConfigurationError> {
    let view = EffectiveCapabilities::new(&method.capabilities, &class.capabilities);
    if !view.has_stereotype(markers::EXECUTABLE) {
        return Ok(false);
    }

    let accessible = method.is_accessible_from(class);

    if method.capabilities.has_stereotype(markers::EXECUTABLE) {
        if !accessible {
            return Err(ConfigurationError::InaccessibleExecutable {
                method: method.describe(),
            });
        }
    } else if !class.is_declared_here(method)
        && !declaring_type_is_executable(class, method)
        && !method.is_public()
    {
        return Ok(false);
    }

    let legacy = pass.strategy.legacy_dialect_access
        && class.dialect == SourceDialect::Dynamic
        && !method.is_private();
    if accessible || legacy {
        pass.main.visit_executable_method(method);
        return Ok(true);
    }
    Ok(false)
}

fn declaring_type_is_executable(class: &ClassModel, method: &MethodModel) -> bool {
    class
        .type_capabilities(&method.declaring_type)
        .is_some_and(|caps| caps.has_stereotype(markers::EXECUTABLE))
}
