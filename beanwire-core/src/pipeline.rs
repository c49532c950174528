//! Core plan pipeline, extracted from the CLI.
//!
//! The entry points are I/O-agnostic: all filesystem operations are performed
//! through the port traits.

use crate::ports::{ClassSource, WritePort};
use crate::settings::PlanSettings;
use anyhow::Context;
use beanwire_domain::{ClassificationStrategy, Classifier, ProcessingMode};
use beanwire_render::render_plans_md;
use beanwire_types::capability::StereotypeRegistry;
use beanwire_types::model::ClassModel;
use beanwire_types::plan::PlanSet;
use beanwire_types::report::{
    BeanwireReport, ClassReport, ClassStatus, Rejection, ReportCounts, ReportRunInfo, ReportStatus,
    ReportVerdict, ToolInfo,
};
use beanwire_types::wire::{PlanDocument, PlansV1, ReportV1};
use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Error type for pipeline results. Exit code 2 = rejected classes, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{count} class(es) rejected")]
    Rejected { count: u64 },
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_plan`.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub document: PlanDocument,
    pub report: BeanwireReport,
    pub rejected: bool,
}

/// Run the plan pipeline over every class of every batch.
///
/// Rejected classes contribute no plans; they are recorded in the report only. The
/// caller is responsible for writing artifacts (via `WritePort`) or the convenience
/// `write_plan_artifacts` helper.
pub fn run_plan(
    settings: &PlanSettings,
    source: &dyn ClassSource,
    tool: ToolInfo,
) -> Result<PlanOutcome, ToolError> {
    let started = Utc::now();
    let batches = source.load_batches().context("load class batches")?;

    let mut plan_sets: Vec<PlanSet> = Vec::new();
    let mut classes: Vec<ClassReport> = Vec::new();
    let mut counts = ReportCounts::default();
    let mut halted = false;

    for loaded in batches {
        let mut registry = StereotypeRegistry::new(&loaded.batch.stereotypes);
        registry.extend(&settings.stereotypes);
        debug!(path = %loaded.path, classes = loaded.batch.classes.len(), "classifying batch");

        for mut class in loaded.batch.classes {
            counts.classes += 1;
            let input_sha256 = fingerprint(&class)?;

            if halted {
                counts.skipped += 1;
                classes.push(ClassReport {
                    class_name: class.name,
                    status: ClassStatus::Skipped,
                    input_sha256,
                    plans: vec![],
                    rejection: None,
                });
                continue;
            }

            let classifier = classifier_for(settings, &class, &registry);
            match classifier.build(&mut class) {
                Ok(set) => {
                    counts.planned += 1;
                    counts.plans += set.plan_count() as u64;
                    counts.proxies += u64::from(set.proxy.is_some());
                    counts.adapters += set.adapters.len() as u64;
                    debug!(
                        class = %class.name,
                        mode = %classifier.strategy().mode(),
                        plans = set.plan_count(),
                        "planned class"
                    );
                    classes.push(ClassReport {
                        class_name: class.name,
                        status: ClassStatus::Planned,
                        input_sha256,
                        plans: set.plans().map(|p| p.name.clone()).collect(),
                        rejection: None,
                    });
                    plan_sets.push(set);
                }
                Err(err) => {
                    warn!(class = %class.name, rule = err.rule_key(), "{}", err);
                    counts.rejected += 1;
                    classes.push(ClassReport {
                        class_name: class.name,
                        status: ClassStatus::Rejected,
                        input_sha256,
                        plans: vec![],
                        rejection: Some(Rejection {
                            rule: err.rule_key().to_string(),
                            element: err.element().to_string(),
                            message: err.to_string(),
                        }),
                    });
                    halted = settings.fail_fast;
                }
            }
        }
    }

    let ended = Utc::now();
    let rejected = counts.rejected > 0;
    let status = if rejected {
        ReportStatus::Fail
    } else if counts.classes == 0 {
        ReportStatus::Skip
    } else {
        ReportStatus::Pass
    };
    let mut reasons = Vec::new();
    if rejected {
        reasons.push("rejected_classes".to_string());
    }
    if halted && counts.skipped > 0 {
        reasons.push("fail_fast".to_string());
    }
    if counts.classes == 0 {
        reasons.push("no_inputs".to_string());
    }

    info!(
        classes = counts.classes,
        planned = counts.planned,
        rejected = counts.rejected,
        "classification finished"
    );

    let report = BeanwireReport {
        schema: beanwire_types::schema::BEANWIRE_REPORT_V1.to_string(),
        tool: tool.clone(),
        run: ReportRunInfo {
            started_at: started.to_rfc3339(),
            ended_at: Some(ended.to_rfc3339()),
            duration_ms: Some((ended - started).num_milliseconds().max(0) as u64),
        },
        verdict: ReportVerdict {
            status,
            counts,
            reasons,
        },
        classes,
    };

    Ok(PlanOutcome {
        document: PlanDocument::new(tool, plan_sets),
        report,
        rejected,
    })
}

fn classifier_for(
    settings: &PlanSettings,
    class: &ClassModel,
    registry: &StereotypeRegistry,
) -> Classifier {
    let mode = settings
        .mode
        .unwrap_or_else(|| ProcessingMode::detect(class, registry));
    let mut strategy = ClassificationStrategy::for_mode(mode)
        .with_legacy_dialect_access(settings.legacy_dialect_access);
    if settings.optional_field_values {
        strategy = strategy.with_optional_field_values(true);
    }
    Classifier::new(strategy, registry.clone())
}

/// sha256 of the class model as read, before any derived markers are added.
fn fingerprint(class: &ClassModel) -> anyhow::Result<String> {
    let bytes = serde_json::to_vec(class).context("serialize class model")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Write all plan artifacts to the output directory.
pub fn write_plan_artifacts(
    outcome: &PlanOutcome,
    out_dir: &camino::Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let plans_wire = PlansV1::try_from(&outcome.document).context("convert plans to wire")?;
    let plans_json = serde_json::to_string_pretty(&plans_wire).context("serialize plans")?;
    writer.write_file(&out_dir.join("plans.json"), plans_json.as_bytes())?;

    let plans_md = render_plans_md(&outcome.document, &outcome.report);
    writer.write_file(&out_dir.join("plans.md"), plans_md.as_bytes())?;

    let report_wire = ReportV1::try_from(&outcome.report).context("convert report to wire")?;
    let report_json = serde_json::to_string_pretty(&report_wire).context("serialize report")?;
    writer.write_file(&out_dir.join("report.json"), report_json.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let class = ClassModel::new("app.Service");
        let a = fingerprint(&class).expect("hash");
        let b = fingerprint(&class).expect("hash");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, fingerprint(&ClassModel::new("app.Other")).expect("hash"));
    }

    #[test]
    fn mode_override_wins_over_detection() {
        let registry = StereotypeRegistry::default();
        let class = ClassModel::new("app.Service");
        let settings = PlanSettings {
            mode: Some(ProcessingMode::AlwaysProxy),
            ..PlanSettings::default()
        };
        let classifier = classifier_for(&settings, &class, &registry);
        assert_eq!(classifier.strategy().mode(), ProcessingMode::AlwaysProxy);

        let classifier = classifier_for(&PlanSettings::default(), &class, &registry);
        assert_eq!(classifier.strategy().mode(), ProcessingMode::Simple);
    }
}
