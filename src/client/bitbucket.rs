//! Bitbucket Server REST API client
//!
//! Implements [RepositoryClient] over the Bitbucket Server 1.0 REST API
//! with basic authentication. Paged endpoints are drained by following
//! the `isLastPage`/`nextPageStart` markers; failures are wrapped with
//! the operation name and repository coordinates so they are actionable.

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::RepositoryClient;
use crate::domain::{BoundaryTag, ChangeType, ChangedFile, Commit};
use crate::error::{ReleaseDocsError, Result};

const PAGE_LIMIT: &str = "100";

/// Blocking HTTP client for a Bitbucket Server instance
pub struct BitbucketClient {
    base_url: String,
    http: Client,
    username: String,
    password: String,
}

impl BitbucketClient {
    /// Create a client for a Bitbucket Server instance.
    ///
    /// # Arguments
    /// * `server_url` - Base server URL, e.g. `https://bitbucket.company.com`
    /// * `username` - Account used for basic auth
    /// * `password` - Password or HTTP access token
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("release-docs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReleaseDocsError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(BitbucketClient {
            base_url: server_url.into().trim_end_matches('/').to_string(),
            http,
            username: username.into(),
            password: password.into(),
        })
    }

    fn repo_url(&self, project_key: &str, repo_slug: &str) -> String {
        format!(
            "{}/rest/api/1.0/projects/{}/repos/{}",
            self.base_url, project_key, repo_slug
        )
    }

    /// Drain a paged endpoint into a single vector.
    fn get_paged<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        operation: &str,
        project_key: &str,
        repo_slug: &str,
    ) -> Result<Vec<T>> {
        let mut values = Vec::new();
        let mut start: u64 = 0;

        loop {
            let start_param = start.to_string();
            let response = self
                .http
                .get(url)
                .basic_auth(&self.username, Some(&self.password))
                .query(query)
                .query(&[("limit", PAGE_LIMIT), ("start", start_param.as_str())])
                .send()
                .map_err(|e| ReleaseDocsError::api(operation, project_key, repo_slug, e))?;

            if !response.status().is_success() {
                return Err(ReleaseDocsError::api(
                    operation,
                    project_key,
                    repo_slug,
                    format!("HTTP {} from {}", response.status(), url),
                ));
            }

            let page: Page<T> = response
                .json()
                .map_err(|e| ReleaseDocsError::api(operation, project_key, repo_slug, e))?;

            values.extend(page.values);

            if page.is_last_page {
                break;
            }
            match page.next_page_start {
                Some(next) => start = next,
                None => break,
            }
        }

        Ok(values)
    }
}

impl RepositoryClient for BitbucketClient {
    fn get_tag(
        &self,
        project_key: &str,
        repo_slug: &str,
        tag_name: &str,
    ) -> Result<Option<BoundaryTag>> {
        let url = format!("{}/tags/{}", self.repo_url(project_key, repo_slug), tag_name);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|e| ReleaseDocsError::api("get_tag", project_key, repo_slug, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReleaseDocsError::api(
                "get_tag",
                project_key,
                repo_slug,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }

        let tag: TagDto = response
            .json()
            .map_err(|e| ReleaseDocsError::api("get_tag", project_key, repo_slug, e))?;

        Ok(Some(BoundaryTag::new(tag.display_id, tag.latest_commit)))
    }

    fn list_commits(
        &self,
        project_key: &str,
        repo_slug: &str,
        branch: &str,
    ) -> Result<Vec<Commit>> {
        let url = format!("{}/commits", self.repo_url(project_key, repo_slug));
        let commits: Vec<CommitDto> = self.get_paged(
            &url,
            &[("until", branch)],
            "list_commits",
            project_key,
            repo_slug,
        )?;

        Ok(commits.into_iter().map(CommitDto::into_commit).collect())
    }

    fn get_commit_changes(
        &self,
        project_key: &str,
        repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<ChangedFile>> {
        let url = format!(
            "{}/commits/{}/changes",
            self.repo_url(project_key, repo_slug),
            commit_id
        );
        let changes: Vec<ChangeDto> =
            self.get_paged(&url, &[], "get_commit_changes", project_key, repo_slug)?;

        Ok(changes
            .into_iter()
            .map(|change| {
                ChangedFile::new(change.path.to_string, commit_id, change.change_type)
            })
            .collect())
    }

    fn get_commit_tags(
        &self,
        project_key: &str,
        repo_slug: &str,
        commit_id: &str,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/commits/{}/tags",
            self.repo_url(project_key, repo_slug),
            commit_id
        );
        let tags: Vec<TagDto> =
            self.get_paged(&url, &[], "get_commit_tags", project_key, repo_slug)?;

        Ok(tags.into_iter().map(|tag| tag.display_id).collect())
    }
}

// ===== Wire representations =====

#[derive(Debug, Deserialize)]
struct Page<T> {
    values: Vec<T>,
    #[serde(rename = "isLastPage")]
    is_last_page: bool,
    #[serde(rename = "nextPageStart")]
    next_page_start: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TagDto {
    #[serde(rename = "displayId")]
    display_id: String,
    #[serde(rename = "latestCommit")]
    latest_commit: String,
}

#[derive(Debug, Deserialize)]
struct CommitDto {
    id: String,
    author: AuthorDto,
    #[serde(rename = "authorTimestamp")]
    author_timestamp: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    parents: Vec<ParentDto>,
}

impl CommitDto {
    fn into_commit(self) -> Commit {
        Commit {
            id: self.id,
            author_name: self.author.name,
            author_email: self.author.email_address,
            message: self.message,
            // authorTimestamp is milliseconds since the epoch
            timestamp: DateTime::from_timestamp_millis(self.author_timestamp)
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            parent_ids: self.parents.into_iter().map(|parent| parent.id).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthorDto {
    name: String,
    #[serde(rename = "emailAddress", default)]
    email_address: String,
}

#[derive(Debug, Deserialize)]
struct ParentDto {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChangeDto {
    path: PathDto,
    #[serde(rename = "type")]
    change_type: ChangeType,
}

#[derive(Debug, Deserialize)]
struct PathDto {
    #[serde(rename = "toString")]
    to_string: String,
}
