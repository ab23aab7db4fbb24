use anyhow::Result;
use colored::Colorize;

use crate::App;
use crate::clients::git::GitOps;
use crate::clients::github::GithubOps;

impl<G: GitOps, H: GithubOps> App<G, H> {
    /// Update an existing pull request.
    ///
    /// The PR's base branch is moved to HEAD~1 and its head branch to HEAD.
    /// The commit message already links the PR, so it is left alone.
    pub(crate) async fn update_pull_request(
        &self,
        pr_id: &str,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let repo = self.repository_slug().await?;
        let pr = self.gh.get_pull_request(&repo, pr_id).await?;
        let head_branch = &pr.head.ref_name;
        let base_branch = &pr.base.ref_name;

        writeln!(stdout, "PR #{}", pr.number)?;
        writeln!(stdout, "Base branch: {}", base_branch)?;
        writeln!(stdout, "PR branch: {}", head_branch)?;

        self.git
            .force_push(&self.config.remote, "HEAD~1", base_branch)
            .await?;
        writeln!(stdout, "Pushed HEAD~1 to {}", base_branch)?;

        self.git
            .force_push(&self.config.remote, "HEAD", head_branch)
            .await?;
        writeln!(stdout, "Pushed HEAD to {}", head_branch)?;

        writeln!(stdout, "{} {}", "PR updated:".green(), pr.html_url)?;

        Ok(())
    }
}
