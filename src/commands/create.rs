use anyhow::Result;
use anyhow::bail;
use colored::Colorize;

use crate::App;
use crate::clients::git::GitOps;
use crate::clients::github::GithubOps;
use crate::clients::github::NewPullRequest;
use crate::naming;

impl<G: GitOps, H: GithubOps> App<G, H> {
    /// Create a new pull request.
    ///
    /// 1. Find or push a PR branch for HEAD~1 (the base branch).
    /// 2. Find or push a PR branch for HEAD (the PR branch).
    /// 3. Open a PR merging the PR branch into the base branch.
    /// 4. Amend HEAD's message with a link to the new PR.
    pub(crate) async fn create_pull_request(
        &self,
        subject: &str,
        body: &str,
        stdout: &mut impl std::io::Write,
    ) -> Result<()> {
        let base_branch = self.ensure_pr_branch("HEAD~1", stdout).await?;
        writeln!(stdout, "Base branch: {}", base_branch)?;
        let head_branch = self.ensure_pr_branch("HEAD", stdout).await?;
        writeln!(stdout, "PR branch: {}", head_branch)?;

        let repo = self.repository_slug().await?;
        let pr = self
            .gh
            .create_pull_request(
                &repo,
                &NewPullRequest {
                    title: subject.to_string(),
                    head: head_branch,
                    base: base_branch,
                    body: body.to_string(),
                },
            )
            .await?;

        self.git
            .amend_message(&naming::amended_message(subject, body, &pr.html_url))
            .await?;
        writeln!(stdout, "Amended HEAD with link to PR #{}", pr.number)?;

        writeln!(stdout, "{} {}", "New PR created:".green(), pr.html_url)?;

        Ok(())
    }

    /// Return the existing PR branch for `revision`, or push a new one named
    /// after its subject.
    async fn ensure_pr_branch(
        &self,
        revision: &str,
        stdout: &mut impl std::io::Write,
    ) -> Result<String> {
        if let Some(branch) = self.owner_branch_for(revision).await? {
            return Ok(branch);
        }

        let name = self.branch_name_for(revision).await?;
        if name.is_empty() {
            bail!(
                "Cannot derive a branch name for {}: its subject has no letters",
                revision
            );
        }

        let branch = self.config.branch_for(&name);
        self.git
            .force_push(&self.config.remote, revision, &branch)
            .await?;
        writeln!(stdout, "Pushed {} to {}", revision, branch)?;

        Ok(branch)
    }
}
