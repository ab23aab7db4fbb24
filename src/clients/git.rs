use std::path;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::debug;
use tracing::instrument;

use crate::error::GitCommandError;

// -----------------------------------------------------------------------------
// GitOps trait

/// Operations for interacting with Git
#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait GitOps {
    /// Format a single revision with a `git show` format string, e.g. `%s`.
    async fn show(&self, format: &str, revision: &str) -> Result<String>;

    /// The configured URL of a remote.
    async fn remote_url(&self, remote: &str) -> Result<String>;

    /// List refs matching `pattern` as `<objectname> <refname>` lines.
    /// Each call runs git afresh.
    async fn for_each_ref(&self, pattern: &str) -> Result<Vec<String>>;

    /// Force-push `revision` to `refs/heads/<branch>` on `remote`.
    async fn force_push(&self, remote: &str, revision: &str, branch: &str) -> Result<()>;

    /// Replace the message of the HEAD commit, leaving its tree and parents alone.
    async fn amend_message(&self, message: &str) -> Result<()>;
}

// -----------------------------------------------------------------------------
// RealGit

/// Real implementation that calls the git CLI
pub struct RealGit {
    path: path::PathBuf,
}

impl RealGit {
    pub fn new(path: path::PathBuf) -> Self {
        Self { path }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");
        let output = Command::new("git")
            .current_dir(&self.path)
            .args(args)
            .output()
            .await
            .context("Failed to execute git command")?;

        if !output.status.success() {
            return Err(GitCommandError {
                args: args.iter().map(|arg| arg.to_string()).collect(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }
}

#[async_trait(?Send)]
impl GitOps for RealGit {
    #[instrument(skip(self))]
    async fn show(&self, format: &str, revision: &str) -> Result<String> {
        self.run(&["show", "-s", &format!("--format={}", format), revision])
            .await
    }

    #[instrument(skip(self))]
    async fn remote_url(&self, remote: &str) -> Result<String> {
        self.run(&["config", "--get", &format!("remote.{}.url", remote)])
            .await
            .context(format!("No git remote '{}' configured", remote))
    }

    #[instrument(skip(self))]
    async fn for_each_ref(&self, pattern: &str) -> Result<Vec<String>> {
        let output = self
            .run(&[
                "for-each-ref",
                "--format=%(objectname) %(refname)",
                pattern,
            ])
            .await?;

        Ok(output
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    #[instrument(skip(self))]
    async fn force_push(&self, remote: &str, revision: &str, branch: &str) -> Result<()> {
        let refspec = format!("{}:refs/heads/{}", revision, branch);
        self.run(&["push", "-f", remote, &refspec]).await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn amend_message(&self, message: &str) -> Result<()> {
        // --only keeps anything already staged out of the amended commit
        self.run(&[
            "commit",
            "--amend",
            "--only",
            "--allow-empty",
            "-m",
            message,
        ])
        .await?;
        Ok(())
    }
}
