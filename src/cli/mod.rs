//! Command-line interface for para-audit.
//!
//! Available commands:
//!
//! - **audit**: Reconcile a record export and report inconsistencies
//! - **score**: Show how two labels compare under the name matcher
//!
//! ## Usage
//!
//! ```text
//! # Audit an export
//! para-audit audit records.json
//!
//! # Full JSON result for scripting
//! para-audit audit records.json --format json
//!
//! # Fail a scheduled job when anything high severity turns up
//! para-audit audit records.json --fail-on high
//!
//! # Inspect why two labels do or do not match
//! para-audit score "Team Mgmt" "Team Management"
//! ```

use clap::{Parser, Subcommand};

pub mod audit;
pub mod score;

#[derive(Parser)]
#[command(name = "para-audit")]
#[command(version)]
#[command(about = "Reconcile projects and areas across task manager, cloud storage and notes")]
#[command(
    long_about = "para-audit compares the projects and areas recorded in several tools and reports where they disagree.\n\nRecords are clustered by fuzzy name matching, then every cluster is checked for:\n- Active/inactive and project/area disagreements\n- Work/personal category disagreements and folders in the wrong account\n- Name spelling variations and missing leading markers\n- Items present in only one tool"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a JSON export of records from every tool
    Audit(audit::AuditArgs),

    /// Score the similarity of two labels
    Score(score::ScoreArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
