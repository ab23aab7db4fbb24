use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Name of the cached token file, relative to the home directory.
pub const TOKEN_FILE_NAME: &str = ".postcommit-github-access-token";

/// Remote that PR branches are pushed to.
pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone)]
pub struct Config {
    /// Local user name; PR branches live under `<user>/PR/`.
    pub user: String,
    /// Where the GitHub access token is cached between runs.
    pub token_path: PathBuf,
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// Remote to push to and look for existing PR branches on.
    pub remote: String,
}

impl Config {
    /// Load config from the environment and .git/config
    pub fn load() -> Result<Self> {
        let user = std::env::var("USER").context("USER is not set")?;
        let home = std::env::var_os("HOME").context("HOME is not set")?;
        let token_path = PathBuf::from(home).join(TOKEN_FILE_NAME);

        // `git config --get` exits with 1 when the key is unset
        let output = std::process::Command::new("git")
            .args(["config", "--get", "pcpr.apiUrl"])
            .output()
            .context("Failed to execute git command")?;
        let api_url = if output.status.success() {
            String::from_utf8(output.stdout)?.trim().to_string()
        } else {
            DEFAULT_API_URL.to_string()
        };

        Ok(Self::new(user, token_path, api_url))
    }

    /// Create a new config with explicit values (useful for tests)
    pub fn new(user: String, token_path: PathBuf, api_url: String) -> Self {
        Self {
            user,
            token_path,
            api_url,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Namespace holding this user's PR branches, e.g. `alice/PR`.
    pub fn branch_namespace(&self) -> String {
        format!("{}/PR", self.user)
    }

    /// Full PR branch name for a sanitized name, e.g. `alice/PR/fix-the-thing`.
    pub fn branch_for(&self, name: &str) -> String {
        format!("{}/{}", self.branch_namespace(), name)
    }
}
