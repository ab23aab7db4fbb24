//! Pure string helpers deriving names from commit metadata.
//!
//! Nothing in here touches git or the network; the [`App`](crate::App)
//! helpers feed these functions with data read through the clients.

use std::sync::LazyLock;

use anyhow::Result;
use anyhow::bail;
use regex::Regex;

/// Marker introducing the PR link in a commit message.
pub const PR_MARKER: &str = "PR:";

static INVALID_BRANCH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z_-]").unwrap());

/// Derive a branch name from a commit subject.
///
/// The subject is lowercased, spaces and tabs become hyphens, and anything
/// other than ASCII letters, `-` and `_` is dropped. Runs of hyphens are kept
/// as they are and the result may be empty.
pub fn branch_name(subject: &str) -> String {
    let name = subject.to_lowercase().replace([' ', '\t'], "-");
    INVALID_BRANCH_CHARS.replace_all(&name, "").into_owned()
}

/// Extract the `owner/repo` slug from a remote URL.
///
/// Handles scp-like syntax (`git@github.com:owner/repo.git`) by taking what
/// follows the last colon, and URLs with a scheme
/// (`https://github.com/owner/repo.git`) by taking the path after the host.
pub fn repository_slug(url: &str) -> Result<String> {
    let url = url.trim();
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => url.rsplit(':').next().unwrap_or(url),
    };

    let path = path.trim_end_matches('/');
    let slug = path.strip_suffix(".git").unwrap_or(path);
    if slug.is_empty() {
        bail!("Could not parse repository from remote URL: {}", url);
    }

    Ok(slug.to_string())
}

/// Find the PR id in a commit body.
///
/// The first line containing `PR:` wins; the id is whatever follows its last
/// `/`.
pub fn pull_request_id(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.contains(PR_MARKER))
        .and_then(|line| line.rsplit('/').next())
        .map(|id| id.trim().to_string())
}

/// Commit message with a trailing link to the pull request.
pub fn amended_message(subject: &str, body: &str, pr_url: &str) -> String {
    format!("{}\n\n{}\n\n{} {}", subject, body, PR_MARKER, pr_url)
}

/// Pick the branch whose tip is `commit_hash` from `for-each-ref` output.
///
/// Lines are `<objectname> <refname>`. Symbolic `HEAD` refs are skipped and
/// `ref_prefix` (e.g. `refs/remotes/origin/`) is stripped from the match.
pub fn owner_branch<'a>(
    refs: impl IntoIterator<Item = &'a str>,
    commit_hash: &str,
    ref_prefix: &str,
) -> Option<String> {
    refs.into_iter()
        .filter(|line| !line.contains("HEAD"))
        .filter_map(|line| line.split_once(' '))
        .find(|(object_name, _)| *object_name == commit_hash)
        .map(|(_, ref_name)| {
            let ref_name = ref_name.trim();
            ref_name
                .strip_prefix(ref_prefix)
                .unwrap_or(ref_name)
                .to_string()
        })
}
