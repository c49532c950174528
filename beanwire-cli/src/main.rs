mod config;
mod explain;

use anyhow::Context;
use beanwire_core::adapters::{FsClassSource, FsWritePort};
use beanwire_core::pipeline::{run_plan, write_plan_artifacts, ToolError};
use beanwire_core::settings::PlanSettings;
use beanwire_domain::ProcessingMode;
use beanwire_types::report::ToolInfo;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{ConfigMerger, PlanOverrides};
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "beanwire",
    version,
    about = "Deterministic bean wiring plans from declarative class models."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify class models and write bean definition plans.
    Plan(PlanArgs),
    /// Explain a rule that can reject a class, and how to fix it.
    Explain(ExplainArgs),
    /// List all rules that can reject a class.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct PlanArgs {
    /// Working root; beanwire.toml is read from here (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Batch file, or directory of `*.json` batches (default: <root>/classes). Repeatable.
    #[arg(long = "input")]
    inputs: Vec<Utf8PathBuf>,

    /// Output directory for beanwire artifacts (default: <root>/artifacts/beanwire).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Force one processing mode for every class: simple, properties or always-proxy.
    #[arg(long)]
    mode: Option<ProcessingMode>,

    /// Register value fields as optional.
    #[arg(long, default_value_t = false)]
    optional_field_values: bool,

    /// Let dynamic-dialect classes expose non-private executable methods.
    #[arg(long, default_value_t = false)]
    legacy_dialect_access: bool,

    /// Stop at the first rejected class; later classes are reported as skipped.
    #[arg(long, default_value_t = false)]
    fail_fast: bool,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule key to explain (e.g., "final-class-proxy").
    rule_key: String,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::Rejected { count }) => {
            error!("{} class(es) rejected; see report.json", count);
            ExitCode::from(2)
        }
        Err(ToolError::Internal(e)) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Explain(args) => cmd_explain(args).map_err(ToolError::from),
        Command::ListRules(args) => cmd_list_rules(args).map_err(ToolError::from),
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "beanwire".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        commit: None,
    }
}

fn cmd_plan(args: PlanArgs) -> Result<(), ToolError> {
    let root = args.root;
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| root.join("artifacts").join("beanwire"));
    let inputs = if args.inputs.is_empty() {
        vec![root.join("classes")]
    } else {
        args.inputs
    };

    let file_config = config::load_or_default(&root).context("load beanwire.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_plan_args(PlanOverrides {
        mode: args.mode,
        optional_field_values: args.optional_field_values,
        legacy_dialect_access: args.legacy_dialect_access,
        fail_fast: args.fail_fast,
    });

    let settings = PlanSettings {
        inputs: inputs.clone(),
        out_dir: out_dir.clone(),
        mode: merged.mode,
        optional_field_values: merged.optional_field_values,
        legacy_dialect_access: merged.legacy_dialect_access,
        stereotypes: merged.stereotypes,
        fail_fast: merged.fail_fast,
    };
    debug!(
        inputs = ?settings.inputs,
        out_dir = %settings.out_dir,
        mode = ?settings.mode,
        "plan settings"
    );

    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let source = FsClassSource::new(inputs);
    let outcome = run_plan(&settings, &source, tool_info())?;
    write_plan_artifacts(&outcome, &out_dir, &FsWritePort).context("write plan artifacts")?;

    let counts = &outcome.report.verdict.counts;
    info!(out_dir = %out_dir, "wrote plans.json, plans.md and report.json");
    println!(
        "classes: {}  planned: {}  rejected: {}  skipped: {}  plans: {}",
        counts.classes, counts.planned, counts.rejected, counts.skipped, counts.plans
    );

    if outcome.rejected {
        return Err(ToolError::Rejected {
            count: counts.rejected,
        });
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_rule_keys, lookup_rule};

    let Some(rule) = lookup_rule(&args.rule_key) else {
        let available = list_rule_keys().join(", ");
        anyhow::bail!(
            "Unknown rule key: '{}'\n\nAvailable rules: {}",
            args.rule_key,
            available
        );
    };

    println!("================================================================================");
    println!("RULE: {}", rule.title);
    println!("================================================================================");
    println!();
    println!("Key:     {}", rule.key);
    println!("Stage:   {}", rule.stage);
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.description);
    println!();

    println!("REMEDIATION GUIDANCE");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.remediation);
    println!();

    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    use explain::RULE_REGISTRY;

    match args.format {
        OutputFormat::Text => {
            println!("Available rules:\n");
            println!("  {:<26} {:<14} TITLE", "KEY", "STAGE");
            println!("  {:<26} {:<14} -----", "---", "-----");
            for rule in RULE_REGISTRY {
                println!("  {:<26} {:<14} {}", rule.key, rule.stage, rule.title);
            }
            println!();
            println!("Use 'beanwire explain <key>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = RULE_REGISTRY
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "key": r.key,
                        "title": r.title,
                        "stage": r.stage,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
