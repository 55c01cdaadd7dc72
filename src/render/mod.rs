//! Document rendering
//!
//! Maps a [ReleaseFacts](crate::domain::ReleaseFacts) snapshot plus
//! free-text narratives onto the five release documents. Document
//! building is pure string work in [templates]; this module owns the
//! renderer context (server coordinates, narratives) and the file I/O.

mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::ReleaseFacts;
use crate::error::Result;

/// A rendered document ready to be written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: &'static str,
    pub contents: String,
}

/// Renders the five release documents from extracted facts.
///
/// Holds the server coordinates needed to build commit hyperlinks and
/// the free-text narratives supplied by the operator.
pub struct DocumentRenderer {
    server_url: String,
    project_key: String,
    repo_slug: String,
    implementation_notes: String,
    rollback_notes: String,
}

impl DocumentRenderer {
    /// Create a renderer for one repository
    pub fn new(
        server_url: impl Into<String>,
        project_key: impl Into<String>,
        repo_slug: impl Into<String>,
    ) -> Self {
        DocumentRenderer {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            project_key: project_key.into(),
            repo_slug: repo_slug.into(),
            implementation_notes: String::new(),
            rollback_notes: String::new(),
        }
    }

    /// Set the implementation-overview narrative
    pub fn with_implementation_notes(mut self, notes: impl Into<String>) -> Self {
        self.implementation_notes = notes.into();
        self
    }

    /// Set the rollback-strategy narrative
    pub fn with_rollback_notes(mut self, notes: impl Into<String>) -> Self {
        self.rollback_notes = notes.into();
        self
    }

    /// Browser URL for a commit on the Bitbucket server
    pub fn commit_url(&self, commit_id: &str) -> String {
        format!(
            "{}/projects/{}/repos/{}/commits/{}",
            self.server_url, self.project_key, self.repo_slug, commit_id
        )
    }

    /// Build all five documents from the extracted facts
    pub fn render_all(&self, facts: &ReleaseFacts) -> Vec<RenderedDocument> {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        vec![
            RenderedDocument {
                file_name: "Implementation_plan_CHG.md",
                contents: templates::implementation_plan(self, facts, &generated),
            },
            RenderedDocument {
                file_name: "PRE_test_plan_CHG.md",
                contents: templates::pre_test_plan(&generated),
            },
            RenderedDocument {
                file_name: "POST_test_plan_CHG.md",
                contents: templates::post_test_plan(&generated),
            },
            RenderedDocument {
                file_name: "Rollback_plan_CHG.md",
                contents: templates::rollback_plan(self, facts, &generated),
            },
            RenderedDocument {
                file_name: "Code_change_Review_CHG.md",
                contents: templates::code_change_review(self, facts, &generated),
            },
        ]
    }

    /// Render all documents and write them into `output_dir`.
    ///
    /// Creates the directory if needed and returns the written paths in
    /// document order.
    pub fn save_all(&self, facts: &ReleaseFacts, output_dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;

        let mut written = Vec::new();
        for document in self.render_all(facts) {
            let path = output_dir.join(document.file_name);
            fs::write(&path, document.contents)?;
            written.push(path);
        }
        Ok(written)
    }

    pub(crate) fn project_key(&self) -> &str {
        &self.project_key
    }

    pub(crate) fn repo_slug(&self) -> &str {
        &self.repo_slug
    }

    pub(crate) fn implementation_notes(&self) -> &str {
        &self.implementation_notes
    }

    pub(crate) fn rollback_notes(&self) -> &str {
        &self.rollback_notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_url_shape() {
        let renderer =
            DocumentRenderer::new("https://bitbucket.example.com/", "PROJ", "repo-name");
        assert_eq!(
            renderer.commit_url("abc123"),
            "https://bitbucket.example.com/projects/PROJ/repos/repo-name/commits/abc123"
        );
    }

    #[test]
    fn test_renderer_narrative_builders() {
        let renderer = DocumentRenderer::new("https://b.example.com", "PROJ", "repo")
            .with_implementation_notes("impl notes")
            .with_rollback_notes("rollback notes");
        assert_eq!(renderer.implementation_notes(), "impl notes");
        assert_eq!(renderer.rollback_notes(), "rollback notes");
    }
}
