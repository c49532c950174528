use crate::classifier::ClassificationPass;
use crate::error::ConfigurationError;
use crate::guard::{is_explicitly_executable, static_method_check};
use crate::rules::{aop, executable};
use beanwire_types::capability::EffectiveCapabilities;
use beanwire_types::markers;
use beanwire_types::model::{ClassModel, Member, MethodModel};
use beanwire_types::plan::Disposition;

pub(crate) fn classify_method(
    pass: &mut ClassificationPass<'_>,
    class: &ClassModel,
    method: &MethodModel,
) -> Result<Disposition, ConfigurationError> {
    let own = &method.capabilities;
    let view = EffectiveCapabilities::new(own, &class.capabilities);

    let post_construct = own.has_declared_marker(markers::POST_CONSTRUCT);
    let pre_destroy = own.has_declared_marker(markers::PRE_DESTROY);
    if post_construct || pre_destroy {
        static_method_check(class, method)?;
        let requires_reflection = method.requires_reflection(class);
        if post_construct {
            pass.main
                .visit_post_construct_method(method, requires_reflection);
        }
        if pre_destroy {
            pass.main.visit_pre_destroy_method(method, requires_reflection);
        }
        return Ok(Disposition::Lifecycle {
            post_construct,
            pre_destroy,
        });
    }

    if !method.is_static && own.has_declared_stereotype(markers::INJECT) {
        static_method_check(class, method)?;
        pass.main
            .visit_method_injection_point(method, method.requires_reflection(class));
        return Ok(Disposition::MethodInjection);
    }

    if method.is_static && !is_explicitly_executable(method) {
        return Ok(Disposition::Unclaimed);
    }

    // Flags the plan only; the method still goes through the remaining rules.
    if view.is_true(markers::EXECUTABLE, markers::PROCESS_ON_STARTUP) {
        pass.main.set_requires_method_processing(true);
    }

    if own.has_stereotype(markers::ADAPTER) {
        static_method_check(class, method)?;
        let aop = pass.aop;
        return Ok(match pass.adapters.synthesize(aop, class, method) {
            Some(index) => {
                pass.main.visit_executable_method(method);
                Disposition::Adapter { index }
            }
            None => Disposition::AdapterDeclined,
        });
    }

    if aop::intercept(pass, class, method)? {
        return Ok(Disposition::Intercepted);
    }

    if executable::expose(pass, class, method)? {
        return Ok(Disposition::Executable);
    }

    Ok(Disposition::Unclaimed)
}
