use anyhow::Result;
use tracing::debug;

use crate::clients::git::GitOps;
use crate::clients::github::GithubOps;
use crate::config::Config;
use crate::naming;

pub struct App<G: GitOps, H: GithubOps> {
    pub config: Config,
    pub git: G,
    pub gh: H,
}

impl<G: GitOps, H: GithubOps> App<G, H> {
    pub fn new(config: Config, git: G, gh: H) -> Self {
        Self { config, git, gh }
    }
}

/// Shared helper methods for App
impl<G: GitOps, H: GithubOps> App<G, H> {
    /// The `owner/repo` slug of the configured remote
    pub(crate) async fn repository_slug(&self) -> Result<String> {
        let url = self.git.remote_url(&self.config.remote).await?;
        naming::repository_slug(&url)
    }

    /// Branch name derived from a revision's subject line
    pub(crate) async fn branch_name_for(&self, revision: &str) -> Result<String> {
        let subject = self.git.show("%s", revision).await?;
        Ok(naming::branch_name(&subject))
    }

    /// Find this user's remote PR branch whose tip is `revision`, if any
    pub(crate) async fn owner_branch_for(&self, revision: &str) -> Result<Option<String>> {
        let commit_hash = self.git.show("%H", revision).await?;
        let remote_prefix = format!("refs/remotes/{}/", self.config.remote);
        let pattern = format!("{}{}", remote_prefix, self.config.branch_namespace());

        let refs = self.git.for_each_ref(&pattern).await?;
        let branch = naming::owner_branch(
            refs.iter().map(String::as_str),
            &commit_hash,
            &remote_prefix,
        );
        debug!(revision, ?branch, "owner branch lookup");

        Ok(branch)
    }
}
