//! Score command - show how the name matcher sees two labels.

use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::normalize::normalize;
use crate::matching::{NameMatcher, DEFAULT_SIMILARITY_THRESHOLD};
use crate::utils::validation::validate_threshold;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// First label
    #[arg(required = true)]
    pub label_a: String,

    /// Second label
    #[arg(required = true)]
    pub label_b: String,

    /// Similarity threshold for reporting a match (0.0-1.0)
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the threshold is outside `[0, 1]`.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let threshold = validate_threshold(args.threshold)?;
    let matcher = NameMatcher::new(threshold);

    let normalized_a = normalize(&args.label_a);
    let normalized_b = normalize(&args.label_b);
    let breakdown = matcher.similarity_breakdown(&args.label_a, &args.label_b);
    let similarity = matcher.similarity(&args.label_a, &args.label_b);
    let is_match = similarity >= threshold;

    if verbose {
        eprintln!("Metrics: {matcher:?}");
    }

    match format {
        OutputFormat::Text => {
            println!("Label A: {}", args.label_a);
            println!("  Normalized: {normalized_a}");
            println!("Label B: {}", args.label_b);
            println!("  Normalized: {normalized_b}");

            println!("\nMetric Scores:");
            for entry in &breakdown {
                println!("  {:<26} {:.4}", entry.metric, entry.score);
            }
            println!("\nSimilarity: {similarity:.4}");
            println!(
                "Match at {threshold:.2}: {}",
                if is_match { "yes" } else { "no" }
            );
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "label_a": { "raw": args.label_a, "normalized": normalized_a },
                "label_b": { "raw": args.label_b, "normalized": normalized_b },
                "metrics": breakdown,
                "similarity": similarity,
                "threshold": threshold,
                "is_match": is_match,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
