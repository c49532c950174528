//! Accessibility and modifier checks that abort a class's classification.

use crate::error::ConfigurationError;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, MethodModel};

/// The executable marker is written on the method itself.
pub(crate) fn is_explicitly_executable(method: &MethodModel) -> bool {
    method.capabilities.has_declared_marker(markers::EXECUTABLE)
}

/// Static lifecycle, injection and adapter methods must opt in explicitly and be
/// reachable without reflection.
pub(crate) fn static_method_check(
    class: &ClassModel,
    method: &MethodModel,
) -> Result<(), ConfigurationError> {
    if !method.is_static {
        return Ok(());
    }
    if !is_explicitly_executable(method) {
        return Err(ConfigurationError::StaticNotExecutable {
            method: method.describe(),
        });
    }
    if !method.is_accessible_from(class) {
        return Err(ConfigurationError::InaccessibleMethod {
            method: method.describe(),
        });
    }
    Ok(())
}

pub(crate) fn check_proxyable(class: &ClassModel) -> Result<(), ConfigurationError> {
    if class.is_final {
        return Err(ConfigurationError::FinalClassProxy {
            class: class.name.clone(),
        });
    }
    Ok(())
}
