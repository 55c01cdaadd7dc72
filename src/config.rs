use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseDocsError, Result};

/// Represents the complete configuration for release-docs.
///
/// Covers the server coordinates, the repository to inspect, the
/// release boundary settings, the output location, and the free-text
/// narratives fed into the documents. Credentials never live here;
/// they come from the environment (see [Credentials]).
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub narratives: NarrativesConfig,
}

/// Bitbucket server coordinates
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub url: String,
}

/// Repository to inspect
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub project_key: String,

    #[serde(default)]
    pub repo_slug: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "master".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            project_key: String::new(),
            repo_slug: String::new(),
            branch: default_branch(),
        }
    }
}

/// Release boundary settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseConfig {
    #[serde(default = "default_boundary_tag")]
    pub boundary_tag: String,

    #[serde(default = "default_deployment_prefix")]
    pub deployment_prefix: String,
}

fn default_boundary_tag() -> String {
    "prod-server".to_string()
}

fn default_deployment_prefix() -> String {
    "deployment/".to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            boundary_tag: default_boundary_tag(),
            deployment_prefix: default_deployment_prefix(),
        }
    }
}

/// Output location for the generated documents
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

fn default_output_directory() -> String {
    "./release_documents".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            directory: default_output_directory(),
        }
    }
}

/// Free-text narratives rendered into the documents
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NarrativesConfig {
    #[serde(default)]
    pub implementation: String,

    #[serde(default)]
    pub rollback: String,
}

impl Config {
    /// Check that the fields without sensible defaults are present
    pub fn validate(&self) -> Result<()> {
        if self.server.url.is_empty() {
            return Err(ReleaseDocsError::config("server.url must be set"));
        }
        if self.repository.project_key.is_empty() {
            return Err(ReleaseDocsError::config("repository.project_key must be set"));
        }
        if self.repository.repo_slug.is_empty() {
            return Err(ReleaseDocsError::config("repository.repo_slug must be set"));
        }
        Ok(())
    }
}

/// Basic-auth credentials for the Bitbucket server.
///
/// Sourced from the environment only, so config files stay free of
/// secrets. An HTTP access token works as the password.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from `BITBUCKET_USERNAME` and `BITBUCKET_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("BITBUCKET_USERNAME")
            .map_err(|_| ReleaseDocsError::config("BITBUCKET_USERNAME is not set"))?;
        let password = std::env::var("BITBUCKET_PASSWORD")
            .map_err(|_| ReleaseDocsError::config("BITBUCKET_PASSWORD is not set"))?;
        Ok(Credentials { username, password })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasedocs.toml` in current directory
/// 3. `.releasedocs.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasedocs.toml").exists() {
        fs::read_to_string("./releasedocs.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasedocs.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseDocsError::config(format!("invalid config file: {}", e)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.repository.branch, "master");
        assert_eq!(config.release.boundary_tag, "prod-server");
        assert_eq!(config.release.deployment_prefix, "deployment/");
        assert_eq!(config.output.directory, "./release_documents");
        assert!(config.narratives.implementation.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            url = "https://bitbucket.example.com"

            [repository]
            project_key = "PROJ"
            repo_slug = "repo-name"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.url, "https://bitbucket.example.com");
        assert_eq!(config.repository.branch, "master");
        assert_eq!(config.release.boundary_tag, "prod-server");
    }

    #[test]
    fn test_validate_requires_coordinates() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.server.url = "https://bitbucket.example.com".to_string();
        assert!(config.validate().is_err());

        config.repository.project_key = "PROJ".to_string();
        config.repository.repo_slug = "repo-name".to_string();
        assert!(config.validate().is_ok());
    }
}
