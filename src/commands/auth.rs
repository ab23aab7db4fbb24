use anyhow::Result;
use rand::Rng;
use tracing::info;

use crate::App;
use crate::clients::git::GitOps;
use crate::clients::github::GithubOps;
use crate::clients::github::NewAuthorization;
use crate::clients::github_http::Credentials;
use crate::credentials::Prompt;
use crate::credentials::TokenFile;

/// Prefix of the note attached to tokens issued by this tool.
pub const AUTHORIZATION_NOTE_PREFIX: &str = "post-commit-pr-";

impl<G: GitOps, H: GithubOps> App<G, H> {
    /// Set up GitHub credentials for the rest of the run.
    ///
    /// Uses the cached token when there is one. Otherwise asks for a username
    /// and password, trades them for a new token and caches it.
    pub async fn authenticate(&mut self, prompt: &impl Prompt) -> Result<()> {
        let token_file = TokenFile::new(self.config.token_path.clone());
        if let Some(token) = token_file.read().await? {
            self.gh.set_credentials(Credentials::Token(token));
            return Ok(());
        }

        let username = prompt.username()?;
        let password = prompt.password()?;
        self.gh
            .set_credentials(Credentials::Basic { username, password });

        let note = format!(
            "{}{}",
            AUTHORIZATION_NOTE_PREFIX,
            rand::thread_rng().gen_range(0..=10000)
        );
        let authorization = self
            .gh
            .create_authorization(&NewAuthorization::new(note))
            .await?;
        let token = authorization.token.trim().to_string();

        token_file.write(&token).await?;
        info!(path = %self.config.token_path.display(), "cached new GitHub token");

        self.gh.set_credentials(Credentials::Token(token));
        Ok(())
    }
}
