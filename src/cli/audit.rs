//! Audit command - reconcile a record export across tools.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;

use crate::audit::{AuditConfig, ComparisonResult, ReconciliationEngine};
use crate::cli::OutputFormat;
use crate::core::types::Severity;
use crate::matching::ClusterStrategy;
use crate::parsing::records::{load_records_file, RecordSet};
use crate::utils::validation::validate_threshold;

#[derive(Args)]
pub struct AuditArgs {
    /// JSON export: an array of records or an object with a "records" array
    #[arg(required = true)]
    pub input: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Similarity threshold for name matching (0.0-1.0), overrides the config file
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Cluster transitively: A~B and B~C puts A, B and C together
    #[arg(long)]
    pub transitive: bool,

    /// Exit with an error when an inconsistency at or above this severity is found
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FailOn {
    Low,
    Medium,
    High,
}

impl From<FailOn> for Severity {
    fn from(level: FailOn) -> Self {
        match level {
            FailOn::Low => Severity::Low,
            FailOn::Medium => Severity::Medium,
            FailOn::High => Severity::High,
        }
    }
}

/// Execute the audit command
///
/// # Errors
///
/// Returns an error if the configuration or records cannot be loaded, or if
/// `--fail-on` is set and a finding reaches that severity.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: AuditArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::load_from_file(path)?,
        None => AuditConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.similarity_threshold = validate_threshold(threshold)?;
    }
    if args.transitive {
        config.cluster_strategy = ClusterStrategy::Transitive;
    }

    let record_set = load_records_file(&args.input)?;
    if verbose {
        eprintln!(
            "Loaded {} records from {}",
            record_set.records.len(),
            args.input.display()
        );
        eprintln!(
            "Threshold: {:.2}, clustering: {:?}",
            config.similarity_threshold, config.cluster_strategy
        );
    }

    let engine = ReconciliationEngine::with_config(config)?;
    let result = engine.compare(&record_set.records);

    match format {
        OutputFormat::Text => print_text_result(&args, &result),
        OutputFormat::Json => print_json_result(&args, &record_set, &result)?,
    }

    if let Some(level) = args.fail_on {
        let threshold = Severity::from(level);
        if let Some(worst) = result.worst_severity().filter(|s| *s >= threshold) {
            anyhow::bail!("Found {worst} severity inconsistencies (--fail-on {threshold})");
        }
    }

    Ok(())
}

fn print_text_result(args: &AuditArgs, result: &ComparisonResult) {
    println!("Audit Results");
    println!("{}", "=".repeat(60));

    println!("\nInput: {}", args.input.display());
    println!("  Records: {}", result.total_items);
    println!(
        "  Clusters: {} ({} orphaned)",
        result.clusters.len(),
        result.orphans.len()
    );
    println!("  Consistent records: {}", result.consistent_items);
    println!(
        "  Consistency score: {:.1}%",
        result.consistency_score() * 100.0
    );

    if result.inconsistencies.is_empty() {
        println!("\nNo inconsistencies found.");
        return;
    }

    println!(
        "\nInconsistencies: {} ({} high, {} medium, {} low)",
        result.inconsistencies.len(),
        result.high_severity_count(),
        result.medium_severity_count(),
        result.low_severity_count()
    );
    for inconsistency in &result.inconsistencies {
        println!(
            "\n  [{}] {}: {}",
            inconsistency.severity.to_string().to_uppercase(),
            inconsistency.kind,
            inconsistency.description
        );
        println!("    -> {}", inconsistency.suggested_action);
    }
}

fn print_json_result(
    args: &AuditArgs,
    record_set: &RecordSet,
    result: &ComparisonResult,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": {
            "path": args.input.display().to_string(),
            "version": record_set.version,
            "exported_at": record_set.exported_at,
        },
        "audited_at": Utc::now(),
        "consistency_score": result.consistency_score(),
        "summary": result.summary(),
        "result": result,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
