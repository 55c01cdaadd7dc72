use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of change a commit applied to a file.
///
/// Bitbucket reports MOVE and COPY in addition to the basic three;
/// anything unrecognized deserializes to [ChangeType::Unknown] rather
/// than failing the whole change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeType {
    Add,
    Modify,
    Delete,
    Move,
    Copy,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeType::Add => "ADD",
            ChangeType::Modify => "MODIFY",
            ChangeType::Delete => "DELETE",
            ChangeType::Move => "MOVE",
            ChangeType::Copy => "COPY",
            ChangeType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", label)
    }
}

/// A file path together with the commit that changed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub commit_id: String,
    pub change_type: ChangeType,
}

impl ChangedFile {
    /// Create a new changed-file record
    pub fn new(
        path: impl Into<String>,
        commit_id: impl Into<String>,
        change_type: ChangeType,
    ) -> Self {
        ChangedFile {
            path: path.into(),
            commit_id: commit_id.into(),
            change_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_type_deserializes_bitbucket_values() {
        let parsed: ChangeType = serde_json::from_str("\"MODIFY\"").unwrap();
        assert_eq!(parsed, ChangeType::Modify);

        let parsed: ChangeType = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(parsed, ChangeType::Delete);
    }

    #[test]
    fn test_change_type_unrecognized_falls_back_to_unknown() {
        let parsed: ChangeType = serde_json::from_str("\"RENAMED_SOMEHOW\"").unwrap();
        assert_eq!(parsed, ChangeType::Unknown);
    }

    #[test]
    fn test_change_type_display() {
        assert_eq!(ChangeType::Add.to_string(), "ADD");
        assert_eq!(ChangeType::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_changed_file_new() {
        let file = ChangedFile::new("deployment/app.yaml", "abc123", ChangeType::Modify);
        assert_eq!(file.path, "deployment/app.yaml");
        assert_eq!(file.commit_id, "abc123");
        assert_eq!(file.change_type, ChangeType::Modify);
    }
}
