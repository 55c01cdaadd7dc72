/// The tag marking the last released state of the repository.
///
/// Looked up once per run; immutable afterward. Its target commit is
/// the cut point for "what changed since the last release".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryTag {
    pub name: String,
    pub target_commit_id: String,
}

impl BoundaryTag {
    /// Create a new boundary tag
    pub fn new(name: impl Into<String>, target_commit_id: impl Into<String>) -> Self {
        BoundaryTag {
            name: name.into(),
            target_commit_id: target_commit_id.into(),
        }
    }
}
