use anyhow::Result;
use tracing::info;

use crate::App;
use crate::clients::git::GitOps;
use crate::clients::github::GithubOps;
use crate::naming;

impl<G: GitOps, H: GithubOps> App<G, H> {
    /// Push HEAD as a pull request.
    ///
    /// A HEAD commit whose message already links a PR updates that PR's
    /// branches; any other HEAD gets a new PR and a link to it appended to
    /// its message.
    pub async fn cmd_submit(&self, stdout: &mut impl std::io::Write) -> Result<()> {
        let subject = self.git.show("%s", "HEAD").await?;
        let body = self.git.show("%b", "HEAD").await?;

        match naming::pull_request_id(&body) {
            Some(pr_id) => {
                info!(%pr_id, "HEAD already links a PR");
                self.update_pull_request(&pr_id, stdout).await
            }
            None => self.create_pull_request(&subject, &body, stdout).await,
        }
    }
}
