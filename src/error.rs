use thiserror::Error;

/// Unified error type for release-docs operations
#[derive(Error, Debug)]
pub enum ReleaseDocsError {
    #[error("Boundary tag '{tag}' not found in repository")]
    TagNotFound { tag: String },

    #[error("Boundary commit {commit} not found in history of branch '{branch}'")]
    BoundaryNotInHistory { commit: String, branch: String },

    #[error("Failed to retrieve changes for commit {commit}: {reason}")]
    DiffRetrieval { commit: String, reason: String },

    #[error("Bitbucket API error during {operation} on {project}/{repo}: {reason}")]
    Api {
        operation: String,
        project: String,
        repo: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-docs
pub type Result<T> = std::result::Result<T, ReleaseDocsError>;

impl ReleaseDocsError {
    /// Create a tag-not-found error for a boundary tag name
    pub fn tag_not_found(tag: impl Into<String>) -> Self {
        ReleaseDocsError::TagNotFound { tag: tag.into() }
    }

    /// Create a boundary-not-in-history error for a commit/branch pair
    pub fn boundary_not_in_history(commit: impl Into<String>, branch: impl Into<String>) -> Self {
        ReleaseDocsError::BoundaryNotInHistory {
            commit: commit.into(),
            branch: branch.into(),
        }
    }

    /// Create a diff-retrieval error naming the offending commit
    pub fn diff_retrieval(commit: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ReleaseDocsError::DiffRetrieval {
            commit: commit.into(),
            reason: reason.to_string(),
        }
    }

    /// Wrap a transport or HTTP-status failure with its operation context
    pub fn api(
        operation: impl Into<String>,
        project: impl Into<String>,
        repo: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        ReleaseDocsError::Api {
            operation: operation.into(),
            project: project.into(),
            repo: repo.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseDocsError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_not_found_display() {
        let err = ReleaseDocsError::tag_not_found("prod-server");
        assert_eq!(
            err.to_string(),
            "Boundary tag 'prod-server' not found in repository"
        );
    }

    #[test]
    fn test_boundary_not_in_history_display() {
        let err = ReleaseDocsError::boundary_not_in_history("abc123", "master");
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("master"));
    }

    #[test]
    fn test_diff_retrieval_display() {
        let err = ReleaseDocsError::diff_retrieval("def456", "connection reset");
        let msg = err.to_string();
        assert!(msg.contains("def456"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_api_error_carries_context() {
        let err = ReleaseDocsError::api("list_commits", "PROJ", "repo-name", "503 unavailable");
        let msg = err.to_string();
        assert!(msg.contains("list_commits"));
        assert!(msg.contains("PROJ/repo-name"));
        assert!(msg.contains("503 unavailable"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseDocsError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseDocsError::tag_not_found("x"), "Boundary tag"),
            (
                ReleaseDocsError::boundary_not_in_history("x", "y"),
                "Boundary commit",
            ),
            (
                ReleaseDocsError::diff_retrieval("x", "y"),
                "Failed to retrieve changes",
            ),
            (ReleaseDocsError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
