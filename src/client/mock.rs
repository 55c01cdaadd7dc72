use std::collections::{HashMap, HashSet};

use crate::client::RepositoryClient;
use crate::domain::{BoundaryTag, ChangedFile, Commit};
use crate::error::{ReleaseDocsError, Result};

/// Fixture-backed repository client for testing without a live server
#[derive(Default)]
pub struct MockClient {
    tags: HashMap<String, String>,
    branches: HashMap<String, Vec<Commit>>,
    changes: HashMap<String, Vec<ChangedFile>>,
    commit_tags: HashMap<String, Vec<String>>,
    failing_diffs: HashSet<String>,
}

impl MockClient {
    /// Create a new empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag pointing at a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.insert(name.into(), commit_id.into());
    }

    /// Set the history of a branch, newest first
    pub fn set_branch_history(&mut self, branch: impl Into<String>, commits: Vec<Commit>) {
        self.branches.insert(branch.into(), commits);
    }

    /// Set the changed files reported for a commit
    pub fn set_commit_changes(&mut self, commit_id: impl Into<String>, changes: Vec<ChangedFile>) {
        self.changes.insert(commit_id.into(), changes);
    }

    /// Set the tag names attached to a commit
    pub fn set_commit_tags(&mut self, commit_id: impl Into<String>, tags: Vec<String>) {
        self.commit_tags.insert(commit_id.into(), tags);
    }

    /// Make change retrieval fail for a commit, simulating a transient
    /// API failure mid-extraction
    pub fn fail_changes_for(&mut self, commit_id: impl Into<String>) {
        self.failing_diffs.insert(commit_id.into());
    }
}

impl RepositoryClient for MockClient {
    fn get_tag(
        &self,
        _project_key: &str,
        _repo_slug: &str,
        tag_name: &str,
    ) -> Result<Option<BoundaryTag>> {
        Ok(self
            .tags
            .get(tag_name)
            .map(|commit_id| BoundaryTag::new(tag_name, commit_id.clone())))
    }

    fn list_commits(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch: &str,
    ) -> Result<Vec<Commit>> {
        self.branches.get(branch).cloned().ok_or_else(|| {
            ReleaseDocsError::api(
                "list_commits",
                project_key,
                repo_slug,
                format!("branch not found: {}", branch),
            )
        })
    }

    fn get_commit_changes(
        &self,
        project_key: &str,
        repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<ChangedFile>> {
        if self.failing_diffs.contains(commit_id) {
            return Err(ReleaseDocsError::api(
                "get_commit_changes",
                project_key,
                repo_slug,
                "injected failure",
            ));
        }
        Ok(self.changes.get(commit_id).cloned().unwrap_or_default())
    }

    fn get_commit_tags(
        &self,
        _project_key: &str,
        _repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<String>> {
        Ok(self.commit_tags.get(commit_id).cloned().unwrap_or_default())
    }
}
