//! Release-facts extraction pipeline
//!
//! Turns raw repository history into the structured facts the document
//! renderer consumes: the boundary commit, the commits newer than it on
//! the target branch, and the deployment-relevant changed files. Any
//! failure aborts the whole extraction; a document rendered from
//! partial facts would misrepresent the release.

use std::collections::HashMap;

use crate::client::RepositoryClient;
use crate::domain::{BoundaryTag, ChangedFile, Commit, ReleaseFacts};
use crate::error::{ReleaseDocsError, Result};

/// Extracts a [ReleaseFacts] snapshot from a repository.
///
/// Holds the repository coordinates and a [RepositoryClient]; each call
/// to [extract](ReleaseFactsExtractor::extract) builds a fresh snapshot
/// from live responses. Nothing is cached across invocations.
pub struct ReleaseFactsExtractor<C: RepositoryClient> {
    client: C,
    project_key: String,
    repo_slug: String,
}

impl<C: RepositoryClient> ReleaseFactsExtractor<C> {
    /// Create an extractor for one repository
    pub fn new(client: C, project_key: impl Into<String>, repo_slug: impl Into<String>) -> Self {
        ReleaseFactsExtractor {
            client,
            project_key: project_key.into(),
            repo_slug: repo_slug.into(),
        }
    }

    /// Resolve the boundary tag marking the last released state.
    ///
    /// A missing tag is a hard stop; there is no fallback boundary.
    pub fn resolve_boundary_tag(&self, tag_name: &str) -> Result<BoundaryTag> {
        self.client
            .get_tag(&self.project_key, &self.repo_slug, tag_name)?
            .ok_or_else(|| ReleaseDocsError::tag_not_found(tag_name))
    }

    /// List the commits on `branch` strictly newer than the boundary.
    ///
    /// The cut is positional: the branch history (newest first) is
    /// scanned until the boundary commit id is met, and everything
    /// before it is returned in history order. Timestamps are never
    /// compared; clocks are not guaranteed monotonic. If the boundary
    /// commit does not appear in the retrieved history at all, this is
    /// a configuration or branch-divergence problem and fails rather
    /// than returning the full history.
    ///
    /// Zero qualifying commits is a valid outcome, not an error.
    pub fn list_commits_after(&self, boundary: &BoundaryTag, branch: &str) -> Result<Vec<Commit>> {
        let history = self
            .client
            .list_commits(&self.project_key, &self.repo_slug, branch)?;

        let mut newer = Vec::new();
        let mut boundary_seen = false;
        for commit in history {
            if commit.id == boundary.target_commit_id {
                boundary_seen = true;
                break;
            }
            newer.push(commit);
        }

        if !boundary_seen {
            return Err(ReleaseDocsError::boundary_not_in_history(
                &boundary.target_commit_id,
                branch,
            ));
        }

        Ok(newer)
    }

    /// Collect the changed files under `folder_prefix` across `commits`.
    ///
    /// When several commits touch the same path, the most recent commit
    /// owns it. Input is newest first, so the first occurrence of a
    /// path wins regardless of how the API orders each change list.
    /// A failed per-commit change lookup aborts the collection naming
    /// the offending commit; silently skipping it would corrupt the
    /// file list the documents rely on.
    ///
    /// The result is sorted by path for deterministic output.
    pub fn collect_deployment_changes(
        &self,
        commits: &[Commit],
        folder_prefix: &str,
    ) -> Result<Vec<ChangedFile>> {
        let mut by_path: HashMap<String, ChangedFile> = HashMap::new();

        for commit in commits {
            let changes = self
                .client
                .get_commit_changes(&self.project_key, &self.repo_slug, &commit.id)
                .map_err(|e| ReleaseDocsError::diff_retrieval(&commit.id, e))?;

            for change in changes {
                if !change.path.starts_with(folder_prefix) {
                    continue;
                }
                by_path
                    .entry(change.path.clone())
                    .or_insert_with(|| ChangedFile::new(change.path, &commit.id, change.change_type));
            }
        }

        let mut files: Vec<ChangedFile> = by_path.into_values().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    /// Collect the release tags attached to the boundary commit.
    ///
    /// Only tags whose name contains the boundary tag name qualify;
    /// these identify the release lineage for the rollback plan.
    pub fn collect_release_tags(&self, boundary: &BoundaryTag) -> Result<Vec<String>> {
        let tags = self.client.get_commit_tags(
            &self.project_key,
            &self.repo_slug,
            &boundary.target_commit_id,
        )?;

        Ok(tags
            .into_iter()
            .filter(|tag| tag.contains(&boundary.name))
            .collect())
    }

    /// Run the full extraction pipeline.
    ///
    /// Composes tag resolution, the history cut, release-tag lookup,
    /// and deployment-change collection in order, failing fast on the
    /// first error and propagating its specific kind.
    pub fn extract(
        &self,
        tag_name: &str,
        branch: &str,
        folder_prefix: &str,
    ) -> Result<ReleaseFacts> {
        let boundary = self.resolve_boundary_tag(tag_name)?;
        let commits = self.list_commits_after(&boundary, branch)?;
        let release_tags = self.collect_release_tags(&boundary)?;
        let deployment_files = self.collect_deployment_changes(&commits, folder_prefix)?;

        Ok(ReleaseFacts {
            boundary,
            commits,
            deployment_files,
            release_tags,
        })
    }
}
