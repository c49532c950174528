//! Rendering helpers (markdown) for human-readable artifacts.

use beanwire_types::plan::{BeanDefinitionPlan, ConstructorBinding, MethodRef, PlanKind, PlanSet};
use beanwire_types::report::{BeanwireReport, ClassStatus, ReportStatus};
use beanwire_types::wire::PlanDocument;

pub fn render_plans_md(doc: &PlanDocument, report: &BeanwireReport) -> String {
    let counts = &report.verdict.counts;
    let mut out = String::new();
    out.push_str("# beanwire plans\n\n");
    out.push_str(&format!("- Verdict: `{}`\n", status_label(report.verdict.status)));
    out.push_str(&format!(
        "- Classes: {} (planned {}, rejected {}, skipped {})\n",
        counts.classes, counts.planned, counts.rejected, counts.skipped
    ));
    out.push_str(&format!(
        "- Plans: {} (proxies {}, adapters {})\n\n",
        counts.plans, counts.proxies, counts.adapters
    ));

    let rejected: Vec<_> = report
        .classes
        .iter()
        .filter(|c| c.status == ClassStatus::Rejected)
        .collect();
    if !rejected.is_empty() {
        out.push_str("## Rejected\n\n");
        for class in rejected {
            if let Some(r) = &class.rejection {
                out.push_str(&format!(
                    "- `{}` [{}] {}\n",
                    class.class_name, r.rule, r.message
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("## Classes\n\n");
    if doc.plan_sets.is_empty() {
        out.push_str("_No classes planned._\n");
        return out;
    }

    for set in &doc.plan_sets {
        out.push_str(&render_plan_set_md(set));
    }
    out
}

pub fn render_plan_set_md(set: &PlanSet) -> String {
    let mut out = String::new();
    out.push_str(&format!("### {}\n\n", set.class_name));
    for plan in set.plans() {
        render_plan(&mut out, plan);
    }

    let claimed: Vec<_> = set
        .dispositions
        .iter()
        .filter(|d| d.disposition.is_claimed())
        .collect();
    if !claimed.is_empty() {
        out.push_str("**Members**\n\n");
        for d in claimed {
            out.push_str(&format!("- `{}` {:?}\n", d.member, d.disposition));
        }
        out.push('\n');
    }
    out
}

fn render_plan(out: &mut String, plan: &BeanDefinitionPlan) {
    out.push_str(&format!("- `{}` ({})\n", plan.name, kind_label(plan.kind)));
    if let Some(ctor) = &plan.constructor {
        out.push_str(&format!("  - Constructor: {}\n", constructor_label(ctor)));
    }
    if let Some(super_bean) = &plan.super_bean {
        out.push_str(&format!("  - Super bean: `{}`\n", super_bean));
    }
    if let (Some(method), Some(adapted)) = (&plan.adapted_method, &plan.adapted_type) {
        out.push_str(&format!(
            "  - Adapts: `{}` as `{}`\n",
            method.signature, adapted
        ));
    }
    if plan.requires_method_processing {
        out.push_str("  - Requires method processing\n");
    }
    push_methods(out, "Post-construct", &plan.post_construct_methods);
    push_methods(out, "Pre-destroy", &plan.pre_destroy_methods);
    push_methods(out, "Method injection", &plan.method_injection_points);
    if !plan.field_injection_points.is_empty() {
        let names: Vec<_> = plan
            .field_injection_points
            .iter()
            .map(|f| format!("`{}`", f.name))
            .collect();
        out.push_str(&format!("  - Field injection: {}\n", names.join(", ")));
    }
    if !plan.field_values.is_empty() {
        let names: Vec<_> = plan
            .field_values
            .iter()
            .map(|v| format!("`{}`", v.field.name))
            .collect();
        out.push_str(&format!("  - Field values: {}\n", names.join(", ")));
    }
    if !plan.setter_values.is_empty() {
        let names: Vec<_> = plan
            .setter_values
            .iter()
            .map(|v| format!("`{}`", v.property))
            .collect();
        out.push_str(&format!("  - Setter values: {}\n", names.join(", ")));
    }
    push_methods(out, "Executable", &plan.executable_methods);
    if !plan.around_methods.is_empty() {
        out.push_str("  - Intercepted:\n");
        for m in &plan.around_methods {
            out.push_str(&format!(
                "    - `{}` [{}]\n",
                m.method.signature,
                m.interceptor_bindings.join(", ")
            ));
        }
    }
    if !plan.originating_elements.is_empty() {
        let names: Vec<_> = plan
            .originating_elements
            .iter()
            .map(|n| format!("`{}`", n))
            .collect();
        out.push_str(&format!("  - Originating: {}\n", names.join(", ")));
    }
    out.push('\n');
}

fn push_methods(out: &mut String, label: &str, methods: &[MethodRef]) {
    if methods.is_empty() {
        return;
    }
    let names: Vec<_> = methods
        .iter()
        .map(|m| {
            if m.requires_reflection {
                format!("`{}` (reflective)", m.signature)
            } else {
                format!("`{}`", m.signature)
            }
        })
        .collect();
    out.push_str(&format!("  - {}: {}\n", label, names.join(", ")));
}

fn constructor_label(ctor: &ConstructorBinding) -> String {
    match ctor {
        ConstructorBinding::Default => "default".to_string(),
        ConstructorBinding::Declared {
            parameters,
            requires_reflection,
        } => {
            let params: Vec<_> = parameters
                .iter()
                .map(|p| format!("{} {}", p.type_name, p.name))
                .collect();
            let mut label = format!("({})", params.join(", "));
            if *requires_reflection {
                label.push_str(" (reflective)");
            }
            label
        }
    }
}

fn kind_label(kind: PlanKind) -> String {
    match kind {
        PlanKind::Bean => "bean".to_string(),
        PlanKind::Proxy => "proxy".to_string(),
        PlanKind::Adapter { index } => format!("adapter #{}", index),
    }
}

fn status_label(s: ReportStatus) -> &'static str {
    match s {
        ReportStatus::Pass => "pass",
        ReportStatus::Fail => "fail",
        ReportStatus::Skip => "skip",
    }
}
