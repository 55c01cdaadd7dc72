//! Repository access abstraction layer
//!
//! This module provides a trait-based abstraction over the repository
//! operations the extractor needs, allowing for multiple implementations
//! including a real Bitbucket Server REST client and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [RepositoryClient] trait. The concrete
//! implementations include:
//!
//! - [bitbucket::BitbucketClient]: a real implementation over the
//!   Bitbucket Server REST API using blocking `reqwest`
//! - [mock::MockClient]: a fixture-backed implementation for testing
//!
//! Most code should depend on the [RepositoryClient] trait rather than a
//! concrete implementation so the extraction pipeline stays testable
//! without a live server.

pub mod bitbucket;
pub mod mock;

pub use bitbucket::BitbucketClient;
pub use mock::MockClient;

use crate::domain::{BoundaryTag, ChangedFile, Commit};
use crate::error::Result;

/// Repository operations the extraction pipeline depends on.
///
/// All calls are blocking; the pipeline is single-threaded and
/// synchronous, so timeouts and retries are the transport's concern.
/// Implementors must be `Send + Sync`.
pub trait RepositoryClient: Send + Sync {
    /// Look up a tag by name.
    ///
    /// Returns `Ok(None)` when the tag does not exist, so callers can
    /// distinguish "no such tag" from transport failures.
    fn get_tag(
        &self,
        project_key: &str,
        repo_slug: &str,
        tag_name: &str,
    ) -> Result<Option<BoundaryTag>>;

    /// Retrieve the commit history of a branch, newest first.
    fn list_commits(&self, project_key: &str, repo_slug: &str, branch: &str)
        -> Result<Vec<Commit>>;

    /// Retrieve the files changed by a single commit.
    fn get_commit_changes(
        &self,
        project_key: &str,
        repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<ChangedFile>>;

    /// Retrieve the names of all tags attached to a commit.
    fn get_commit_tags(
        &self,
        project_key: &str,
        repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<String>>;
}
