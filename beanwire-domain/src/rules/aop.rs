use crate::classifier::ClassificationPass;
use crate::error::ConfigurationError;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, MethodModel};

/// Route the method through the interception proxy when advice applies to it.
///
/// Returns `Ok(false)` when no advice applies, and also for a final method that only
/// inherits advice and is not reached by class-level advice on a method declared here.
pub(crate) fn intercept(
    pass: &mut ClassificationPass<'_>,
    class: &ClassModel,
    method: &MethodModel,
) -> Result<bool, ConfigurationError> {
    let own = &method.capabilities;
    let always_proxy = pass.strategy.always_proxy_enabled();
    let class_advice = always_proxy && (method.is_public() || method.is_package_private());
    let declared_advice = own.has_declared_stereotype(markers::AROUND);

    let advised = class_advice
        || (!always_proxy && own.has_stereotype(markers::AROUND))
        || (declared_advice && !class.is_abstract);
    if !advised {
        return Ok(false);
    }

    // A method declared on a final class cannot be overridden by the proxy either.
    let is_final = method.is_final || (class.is_final && class.is_declared_here(method));
    if is_final {
        if declared_advice {
            return Err(ConfigurationError::FinalAdvisedMethod {
                method: method.describe(),
            });
        }
        if class_advice && class.is_declared_here(method) {
            return Err(ConfigurationError::FinalInheritedAdvice {
                method: method.describe(),
            });
        }
        return Ok(false);
    }
    if method.is_private() {
        return Err(ConfigurationError::PrivateAdvisedMethod {
            method: method.describe(),
        });
    }
    if method.is_static {
        return Err(ConfigurationError::StaticAdvisedMethod {
            method: method.describe(),
        });
    }

    let bindings = interceptor_bindings(pass, class, method);
    let aop = pass.aop;
    let proxy = pass
        .proxy
        .get_or_create(aop, class, &pass.main, always_proxy, Some(method))?;
    aop.visit_around_method(proxy, class, method, bindings);
    Ok(true)
}

/// Advice markers of the method, then of the class, without duplicates.
fn interceptor_bindings(
    pass: &ClassificationPass<'_>,
    class: &ClassModel,
    method: &MethodModel,
) -> Vec<String> {
    let mut bindings: Vec<String> = Vec::new();
    for marker in method
        .capabilities
        .marker_names()
        .chain(class.capabilities.marker_names())
    {
        if pass.registry.carries(marker, markers::AROUND) && !bindings.iter().any(|b| b == marker)
        {
            bindings.push(marker.to_string());
        }
    }
    bindings
}
