use chrono::{DateTime, Utc};

/// A single repository revision as reported by the branch history.
///
/// Commits form a DAG via `parent_ids`; only the linear ancestry
/// reachable from the branch head matters to this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub parent_ids: Vec<String>,
}

impl Commit {
    /// The abbreviated commit id used in documents (first 7 characters)
    pub fn short_id(&self) -> &str {
        if self.id.len() > 7 {
            &self.id[..7]
        } else {
            &self.id
        }
    }

    /// The first line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// The summary cut to at most `limit` characters.
    ///
    /// Cuts on character boundaries, never bytes, so multibyte
    /// summaries stay valid at any limit.
    pub fn truncated_summary(&self, limit: usize) -> &str {
        let summary = self.summary();
        match summary.char_indices().nth(limit) {
            Some((index, _)) => &summary[..index],
            None => summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_commit(id: &str, message: &str) -> Commit {
        Commit {
            id: id.to_string(),
            author_name: "Test Author".to_string(),
            author_email: "author@example.com".to_string(),
            message: message.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            parent_ids: vec![],
        }
    }

    #[test]
    fn test_short_id_truncates_long_ids() {
        let commit = sample_commit("abc1234def5678", "fix: something");
        assert_eq!(commit.short_id(), "abc1234");
    }

    #[test]
    fn test_short_id_keeps_short_ids() {
        let commit = sample_commit("abc12", "fix: something");
        assert_eq!(commit.short_id(), "abc12");
    }

    #[test]
    fn test_summary_is_first_line() {
        let commit = sample_commit("abc1234", "fix: header\n\nlonger body text");
        assert_eq!(commit.summary(), "fix: header");
    }

    #[test]
    fn test_summary_of_empty_message() {
        let commit = sample_commit("abc1234", "");
        assert_eq!(commit.summary(), "");
    }

    #[test]
    fn test_truncated_summary_respects_char_boundaries() {
        let commit = sample_commit("abc1234", "héllo wörld");
        assert_eq!(commit.truncated_summary(5), "héllo");
        assert_eq!(commit.truncated_summary(100), "héllo wörld");
    }

    #[test]
    fn test_truncated_summary_multibyte_at_the_cut() {
        // 59 ASCII characters followed by a two-byte character, so a
        // byte-based cut at 60 would land mid-character
        let message = format!("{}é and more text", "a".repeat(59));
        let commit = sample_commit("abc1234", &message);

        let truncated = commit.truncated_summary(60);
        assert_eq!(truncated.chars().count(), 60);
        assert!(truncated.ends_with('é'));
    }
}
