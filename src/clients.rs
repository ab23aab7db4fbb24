//! Clients for the external systems that `pcpr` coordinates:
//!
//! - [`git`]: the local repository (commit metadata, remote refs, pushes, amends)
//! - [`github`]: GitHub pull requests and token issuance
//! - [`github_http`]: JSON-over-HTTPS client underneath [`github`]
//!
//! The `git` and `github` clients are traits with real implementations and
//! mocks for testing.

pub mod git;
pub mod github;
pub mod github_http;
