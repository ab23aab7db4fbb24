use thiserror::Error;

/// A `git` invocation exited unsuccessfully.
#[derive(Debug, Error)]
#[error("git {} failed ({status}): {stderr}", .args.join(" "))]
pub struct GitCommandError {
    pub args: Vec<String>,
    pub status: std::process::ExitStatus,
    pub stderr: String,
}

/// The GitHub API answered with a non-2xx status.
///
/// `body` holds the parsed JSON error payload, or the raw response text as a
/// JSON string when the payload is not valid JSON.
#[derive(Debug, Error)]
#[error("GitHub API error ({status}): {body}")]
pub struct GithubApiError {
    pub status: u16,
    pub body: serde_json::Value,
}
