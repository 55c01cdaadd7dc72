//! Console output helpers.
//!
//! All user-facing progress and result reporting lives here, separated
//! from the extraction and rendering logic.

use std::path::PathBuf;

use console::style;

use crate::domain::ReleaseFacts;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a summary of the extracted release facts.
///
/// Shows the boundary, up to 10 commits, and the deployment file count.
pub fn display_release_summary(facts: &ReleaseFacts) {
    println!(
        "\n{}",
        style(format!(
            "Release since tag '{}' ({})",
            facts.boundary.name,
            &facts.boundary.target_commit_id[..facts.boundary.target_commit_id.len().min(7)]
        ))
        .bold()
    );

    if facts.is_empty_release() {
        println!("  No commits since the last release");
    } else {
        println!("  {} commit(s), newest first:", facts.commits.len());
        for commit in facts.commits.iter().take(10) {
            println!("  - {} {}", commit.short_id(), commit.truncated_summary(60));
        }
        if facts.commits.len() > 10 {
            println!("  ... and {} more commits", facts.commits.len() - 10);
        }
    }

    println!(
        "  {} deployment file(s) changed",
        facts.deployment_files.len()
    );
}

/// Display the paths of the written documents.
pub fn display_written_documents(paths: &[PathBuf]) {
    for path in paths {
        display_success(&format!("Created: {}", path.display()));
    }
}
