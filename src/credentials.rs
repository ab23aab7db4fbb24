use std::io::BufRead;
use std::io::ErrorKind;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use dialoguer::Input;
use dialoguer::Password;
use dialoguer::console::Term;
#[cfg(test)]
use mockall::automock;
use tokio::io::AsyncWriteExt;
use tracing::debug;

const USERNAME_PROMPT: &str = "GitHub username";

// -----------------------------------------------------------------------------
// TokenFile

/// The cached GitHub access token.
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the cached token.
    ///
    /// Returns `None` when the file is missing, unreadable for lack of
    /// permission, not UTF-8, or blank. Other I/O failures are errors.
    pub async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    debug!(path = %self.path.display(), "token file is empty");
                    return Ok(None);
                }
                Ok(Some(token.to_string()))
            }
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::InvalidData
                ) =>
            {
                debug!(path = %self.path.display(), %err, "no usable token file");
                Ok(None)
            }
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read token file {}", self.path.display())),
        }
    }

    /// Store `token`, replacing any previous contents.
    ///
    /// On Unix the file is owner-only (0600) from the moment it is created.
    pub async fn write(&self, token: &str) -> Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open token file {}", self.path.display()))?;
        file.write_all(token.trim().as_bytes())
            .await
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to write token file {}", self.path.display()))?;

        // `mode` only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .with_context(|| {
                    format!("Failed to restrict token file {}", self.path.display())
                })?;
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Prompt

/// Interactive input of GitHub login details
#[cfg_attr(test, automock)]
pub trait Prompt {
    fn username(&self) -> Result<String>;

    /// Read a password without echoing it.
    fn password(&self) -> Result<String>;
}

/// Prompts on standard output
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn username(&self) -> Result<String> {
        let term = Term::stdout();
        if !term.is_term() {
            return read_username(&mut std::io::stdout(), &mut std::io::stdin().lock());
        }

        let username: String = Input::new()
            .with_prompt(USERNAME_PROMPT)
            .interact_text_on(&term)?;
        Ok(username.trim().to_string())
    }

    fn password(&self) -> Result<String> {
        Ok(Password::new().with_prompt("Password").interact()?)
    }
}

/// Plain line-based username prompt for when stdout is not a terminal.
fn read_username(output: &mut impl Write, input: &mut impl BufRead) -> Result<String> {
    write!(output, "{}: ", USERNAME_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("No GitHub username given: standard input is closed");
    }
    Ok(line.trim().to_string())
}
