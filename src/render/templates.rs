//! Pure document-building functions.
//!
//! Each function turns extracted facts into one Markdown document.
//! No I/O happens here; the renderer writes the results.

use std::fmt::Write;

use crate::domain::ReleaseFacts;
use crate::render::DocumentRenderer;

const MESSAGE_COLUMN_LIMIT: usize = 100;

/// Implementation plan: narrative plus the deployment-file table
pub(crate) fn implementation_plan(
    renderer: &DocumentRenderer,
    facts: &ReleaseFacts,
    generated: &str,
) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# Implementation Plan - Change Request\n");
    let _ = writeln!(doc, "Generated: {}", generated);
    let _ = writeln!(
        doc,
        "Project: {} | Repository: {}\n",
        renderer.project_key(),
        renderer.repo_slug()
    );

    let _ = writeln!(doc, "## Implementation Overview\n");
    if renderer.implementation_notes().is_empty() {
        let _ = writeln!(doc, "Please provide implementation details\n");
    } else {
        let _ = writeln!(doc, "{}\n", renderer.implementation_notes().trim());
    }

    let _ = writeln!(doc, "## Files Changed in Deployment Folder\n");
    if facts.deployment_files.is_empty() {
        let _ = writeln!(doc, "No deployment files changed in this release\n");
    } else {
        let _ = writeln!(doc, "| File Path | Type | Commit |");
        let _ = writeln!(doc, "| --- | --- | --- |");
        for file in &facts.deployment_files {
            let short = short_id(&file.commit_id);
            let _ = writeln!(
                doc,
                "| {} | {} | [{}]({}) |",
                file.path,
                file.change_type,
                short,
                renderer.commit_url(&file.commit_id)
            );
        }
        doc.push('\n');
    }

    let _ = writeln!(doc, "---\n");
    let _ = writeln!(doc, "Change Type: Release Deployment");
    let _ = writeln!(doc, "Status: Pending Review");

    doc
}

/// PRE test plan: static pre-deployment checklist
pub(crate) fn pre_test_plan(generated: &str) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# PRE Test Plan - Change Request\n");
    let _ = writeln!(doc, "Generated: {}\n", generated);

    let _ = writeln!(doc, "## Pre-Deployment Testing\n");
    let _ = writeln!(doc, "Test Scope:\n");
    for item in [
        "Code quality checks",
        "Unit tests verification",
        "Integration tests",
        "Security scanning",
    ] {
        let _ = writeln!(doc, "- {}", item);
    }

    let _ = writeln!(doc, "\n## Test Results\n");
    let _ = writeln!(doc, "All tests must pass before proceeding to deployment.\n");
    let _ = writeln!(doc, "| Test Type | Status | Notes |");
    let _ = writeln!(doc, "| --- | --- | --- |");
    for test_type in [
        "Code Quality",
        "Unit Tests",
        "Integration Tests",
        "Security Scan",
    ] {
        let _ = writeln!(doc, "| {} | [ ] Pass  [ ] Fail |  |", test_type);
    }

    doc
}

/// POST test plan: static post-deployment validation checklist
pub(crate) fn post_test_plan(generated: &str) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# POST Test Plan - Change Request\n");
    let _ = writeln!(doc, "Generated: {}\n", generated);

    let _ = writeln!(doc, "## Post-Deployment Validation\n");
    let _ = writeln!(doc, "Validation Steps:\n");
    for item in [
        "System health check",
        "Service availability verification",
        "Database consistency check",
        "Application logs review",
        "User acceptance testing",
    ] {
        let _ = writeln!(doc, "- {}", item);
    }

    let _ = writeln!(doc, "\n## Success Criteria\n");
    let _ = writeln!(
        doc,
        "All deployment targets must be operational with no critical errors in logs.\n"
    );
    let _ = writeln!(doc, "| Validation Item | Status |");
    let _ = writeln!(doc, "| --- | --- |");
    for item in [
        "Health Check",
        "Services Running",
        "Database Sync",
        "Error Log Check",
        "UAT Approval",
    ] {
        let _ = writeln!(doc, "| {} | [ ] OK  [ ] Failed |", item);
    }

    doc
}

/// Rollback plan: release tags plus the rollback procedure
pub(crate) fn rollback_plan(
    renderer: &DocumentRenderer,
    facts: &ReleaseFacts,
    generated: &str,
) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# Rollback Plan - Change Request\n");
    let _ = writeln!(doc, "Generated: {}\n", generated);

    let _ = writeln!(doc, "## Release Information\n");
    if facts.release_tags.is_empty() {
        let _ = writeln!(doc, "Release Tags: Not available\n");
    } else {
        let _ = writeln!(doc, "Release Tags: {}\n", facts.release_tags.join(", "));
    }
    let _ = writeln!(
        doc,
        "Boundary: '{}' at commit {}\n",
        facts.boundary.name,
        short_id(&facts.boundary.target_commit_id)
    );

    let _ = writeln!(doc, "## Rollback Strategy\n");
    if renderer.rollback_notes().is_empty() {
        let _ = writeln!(doc, "[Insert rollback strategy details here]\n");
    } else {
        let _ = writeln!(doc, "{}\n", renderer.rollback_notes().trim());
    }

    let _ = writeln!(doc, "## Rollback Procedures\n");
    for (step, text) in [
        "Notify stakeholders of rollback decision",
        "Take application offline for maintenance",
        "Restore database from backup",
        "Revert application code to previous release",
        "Verify system functionality",
        "Bring application back online",
    ]
    .iter()
    .enumerate()
    {
        let _ = writeln!(doc, "{}. {}", step + 1, text);
    }

    let _ = writeln!(doc, "\n## Rollback Triggers\n");
    let _ = writeln!(doc, "Rollback should be initiated if:\n");
    for trigger in [
        "Critical application error occurs",
        "Database corruption is detected",
        "Service availability drops below SLA",
        "Data integrity issues are found",
    ] {
        let _ = writeln!(doc, "- {}", trigger);
    }

    doc
}

/// Code change review: commit table, linked commit list, checklist
pub(crate) fn code_change_review(
    renderer: &DocumentRenderer,
    facts: &ReleaseFacts,
    generated: &str,
) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# Code Change Review - Change Request\n");
    let _ = writeln!(doc, "Generated: {}", generated);
    let _ = writeln!(
        doc,
        "Repository: {}/{}\n",
        renderer.project_key(),
        renderer.repo_slug()
    );

    let _ = writeln!(doc, "## Commits Included in Release\n");
    if facts.commits.is_empty() {
        let _ = writeln!(doc, "No commits found in this release\n");
    } else {
        let _ = writeln!(doc, "| Commit ID | Author | Date | Message |");
        let _ = writeln!(doc, "| --- | --- | --- | --- |");
        for commit in &facts.commits {
            let _ = writeln!(
                doc,
                "| {} | {} | {} | {} |",
                commit.short_id(),
                commit.author_name,
                commit.timestamp.format("%Y-%m-%d %H:%M"),
                commit.truncated_summary(MESSAGE_COLUMN_LIMIT)
            );
        }
        doc.push('\n');
    }

    let _ = writeln!(doc, "## Commit Details with Links\n");
    for commit in &facts.commits {
        let _ = writeln!(
            doc,
            "- [{}]({}): {}",
            commit.short_id(),
            renderer.commit_url(&commit.id),
            commit.summary()
        );
    }
    if !facts.commits.is_empty() {
        doc.push('\n');
    }

    let _ = writeln!(doc, "## Code Review Checklist\n");
    for item in [
        "All changes have been reviewed",
        "Code follows standards and best practices",
        "No security vulnerabilities identified",
        "Tests are included and passing",
        "Documentation is updated",
        "Performance impact is acceptable",
    ] {
        let _ = writeln!(doc, "- [ ] {}", item);
    }

    doc
}

fn short_id(commit_id: &str) -> &str {
    if commit_id.len() > 7 {
        &commit_id[..7]
    } else {
        commit_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundaryTag, ChangeType, ChangedFile, Commit, ReleaseFacts};
    use chrono::{TimeZone, Utc};

    fn renderer() -> DocumentRenderer {
        DocumentRenderer::new("https://bitbucket.example.com", "PROJ", "repo-name")
    }

    fn facts() -> ReleaseFacts {
        ReleaseFacts {
            boundary: BoundaryTag::new("prod-server", "abc123def456"),
            commits: vec![Commit {
                id: "def456abc789".to_string(),
                author_name: "Jane Doe".to_string(),
                author_email: "jane@example.com".to_string(),
                message: "fix: correct manifest\n\nbody".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap(),
                parent_ids: vec!["abc123def456".to_string()],
            }],
            deployment_files: vec![ChangedFile::new(
                "deployment/app.yaml",
                "def456abc789",
                ChangeType::Modify,
            )],
            release_tags: vec!["prod-server-2024-02".to_string()],
        }
    }

    #[test]
    fn test_implementation_plan_lists_deployment_files() {
        let doc = implementation_plan(&renderer(), &facts(), "2024-03-01 12:00:00");
        assert!(doc.contains("deployment/app.yaml"));
        assert!(doc.contains("MODIFY"));
        assert!(doc.contains(
            "https://bitbucket.example.com/projects/PROJ/repos/repo-name/commits/def456abc789"
        ));
    }

    #[test]
    fn test_implementation_plan_empty_fallback() {
        let mut empty = facts();
        empty.deployment_files.clear();
        let doc = implementation_plan(&renderer(), &empty, "2024-03-01 12:00:00");
        assert!(doc.contains("No deployment files changed in this release"));
    }

    #[test]
    fn test_implementation_plan_placeholder_without_narrative() {
        let doc = implementation_plan(&renderer(), &facts(), "2024-03-01 12:00:00");
        assert!(doc.contains("Please provide implementation details"));

        let with_notes = renderer().with_implementation_notes("Ship the new manifest");
        let doc = implementation_plan(&with_notes, &facts(), "2024-03-01 12:00:00");
        assert!(doc.contains("Ship the new manifest"));
        assert!(!doc.contains("Please provide implementation details"));
    }

    #[test]
    fn test_code_change_review_links_commits() {
        let doc = code_change_review(&renderer(), &facts(), "2024-03-01 12:00:00");
        assert!(doc.contains("| def456a | Jane Doe | 2024-03-01 11:00 | fix: correct manifest |"));
        assert!(doc.contains("- [def456a]("));
        assert!(doc.contains("- [ ] All changes have been reviewed"));
    }

    #[test]
    fn test_code_change_review_empty_fallback() {
        let mut empty = facts();
        empty.commits.clear();
        let doc = code_change_review(&renderer(), &empty, "2024-03-01 12:00:00");
        assert!(doc.contains("No commits found in this release"));
    }

    #[test]
    fn test_rollback_plan_shows_release_tags() {
        let doc = rollback_plan(&renderer(), &facts(), "2024-03-01 12:00:00");
        assert!(doc.contains("Release Tags: prod-server-2024-02"));
        assert!(doc.contains("1. Notify stakeholders of rollback decision"));

        let mut untagged = facts();
        untagged.release_tags.clear();
        let doc = rollback_plan(&renderer(), &untagged, "2024-03-01 12:00:00");
        assert!(doc.contains("Release Tags: Not available"));
    }

    #[test]
    fn test_static_plans_carry_checklists() {
        let pre = pre_test_plan("2024-03-01 12:00:00");
        assert!(pre.contains("| Unit Tests | [ ] Pass  [ ] Fail |"));

        let post = post_test_plan("2024-03-01 12:00:00");
        assert!(post.contains("| Health Check | [ ] OK  [ ] Failed |"));
    }

    #[test]
    fn test_review_table_truncates_long_multibyte_messages() {
        let mut long_message = facts();
        long_message.commits[0].message = format!("{}é tail beyond the column", "a".repeat(99));

        let doc = code_change_review(&renderer(), &long_message, "2024-03-01 12:00:00");
        let row = doc
            .lines()
            .find(|line| line.starts_with("| def456a |"))
            .unwrap();
        assert!(row.contains('é'));
        assert!(!row.contains("tail beyond the column"));
    }
}
