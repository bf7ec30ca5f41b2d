//! Formatting functions for UI output.
//!
//! `format_*` functions are pure and return the text; `display_*` functions
//! print it with `console` styling.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::cli::{ReleaseOutcome, ReleasePlan};
use crate::domain::{ChangeSet, SemanticVersion};
use crate::error::ChangelogError;
use crate::resolver::ChangeSource;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a failed run, naming the phase that failed.
pub fn display_failure(err: &ChangelogError) {
    display_error(&format!("{} failed: {}", err.phase(), err));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal release warning.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// `1.0.0 -> 1.0.1`, or `(none) -> 0.0.1` on the first release.
pub fn format_version_change(previous: Option<&SemanticVersion>, version: &SemanticVersion) -> String {
    match previous {
        Some(previous) => format!("{} -> {}", previous, version),
        None => format!("(none) -> {}", version),
    }
}

fn format_changes(changes: &ChangeSet) -> String {
    changes
        .iter()
        .map(|change| format!("  - {}", change))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_source(source: &ChangeSource) -> String {
    match source {
        ChangeSource::MergeRequest { iid } => format!("merge request !{}", iid),
        ChangeSource::CommitTitle => "commit title".to_string(),
    }
}

/// Display what a run would do, without doing it.
pub fn display_plan(plan: &ReleasePlan) {
    for warning in &plan.warnings {
        display_warning(warning);
    }

    println!("\n{}", style("Release plan (dry run)").bold());
    println!("  Branch:  {} ({})", plan.branch.name, plan.policy);
    println!(
        "  Version: {}",
        style(format_version_change(plan.previous.as_ref(), &plan.version)).green()
    );
    println!("  Tag:     {}", plan.tag);
    println!("  Changes from {}:", format_source(&plan.change_source));
    println!("{}", format_changes(&plan.changes));

    println!("\n{}", style("Changelog entry:").underlined());
    print!("{}", plan.preview_entry().render());

    if plan.propagates_merge {
        display_status("The release would be merged back into the development branch");
    }
}

/// Display the summary of a completed run.
pub fn display_outcome(outcome: &ReleaseOutcome) {
    for warning in &outcome.warnings {
        display_warning(warning);
    }

    display_success(&format!(
        "Released {}",
        format_version_change(outcome.previous.as_ref(), &outcome.version)
    ));
    display_success(&format!("Committed changelog as {}", outcome.commit_id));
    display_success(&format!("Created tag {}", outcome.tag));
    if let Some(iid) = outcome.merge_request {
        display_success(&format!("Merged release back through merge request !{}", iid));
    }
    println!("{}", format_changes(&outcome.changes));
}
