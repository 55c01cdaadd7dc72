use crate::domain::{BoundaryTag, ChangedFile, Commit};

/// Read-only snapshot of everything the document renderer needs.
///
/// Produced once per invocation by the extractor and never mutated
/// afterward. `commits` is ordered newest-first, matching the branch
/// history order of the Bitbucket API. `deployment_files` is sorted by
/// path, each path appearing once with its most recent owning commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFacts {
    pub boundary: BoundaryTag,
    pub commits: Vec<Commit>,
    pub deployment_files: Vec<ChangedFile>,
    pub release_tags: Vec<String>,
}

impl ReleaseFacts {
    /// True when no commits landed since the boundary tag.
    ///
    /// A valid outcome, not an error: the documents still get rendered
    /// with explicit "no changes" sections.
    pub fn is_empty_release(&self) -> bool {
        self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_release_detection() {
        let facts = ReleaseFacts {
            boundary: BoundaryTag::new("prod-server", "abc123"),
            commits: vec![],
            deployment_files: vec![],
            release_tags: vec![],
        };
        assert!(facts.is_empty_release());
    }
}
