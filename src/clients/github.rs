use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde::Serialize;
use tracing::instrument;

use super::github_http::Credentials;
use super::github_http::GithubHttpClient;

// -----------------------------------------------------------------------------
// Types

/// Scopes requested for a newly issued personal access token.
pub const TOKEN_SCOPES: [&str; 2] = ["repo", "public_repo"];

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub head: BranchRef,
    pub base: BranchRef,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewAuthorization {
    pub scopes: Vec<String>,
    pub note: String,
}

impl NewAuthorization {
    pub fn new(note: String) -> Self {
        Self {
            scopes: TOKEN_SCOPES.iter().map(|s| s.to_string()).collect(),
            note,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct Authorization {
    pub token: String,
}

// -----------------------------------------------------------------------------
// GithubOps trait

/// Operations for interacting with GitHub
#[cfg_attr(test, automock)]
#[async_trait(?Send)]
pub trait GithubOps {
    /// Authenticate subsequent requests with `credentials`.
    fn set_credentials(&mut self, credentials: Credentials);

    /// Issue a personal access token (requires basic credentials).
    async fn create_authorization(&self, request: &NewAuthorization) -> Result<Authorization>;

    /// Fetch a pull request of `repo` (`owner/name`) by id.
    async fn get_pull_request(&self, repo: &str, id: &str) -> Result<PullRequest>;

    /// Open a new pull request on `repo`.
    async fn create_pull_request(&self, repo: &str, request: &NewPullRequest)
    -> Result<PullRequest>;
}

// -----------------------------------------------------------------------------
// RealGithub

/// Real implementation that talks to the GitHub REST API
pub struct RealGithub {
    http_client: GithubHttpClient,
}

impl RealGithub {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            http_client: GithubHttpClient::new(api_url)?,
        })
    }
}

#[async_trait(?Send)]
impl GithubOps for RealGithub {
    fn set_credentials(&mut self, credentials: Credentials) {
        self.http_client.set_credentials(credentials);
    }

    #[instrument(skip_all)]
    async fn create_authorization(&self, request: &NewAuthorization) -> Result<Authorization> {
        self.http_client.post("/authorizations", request).await
    }

    #[instrument(skip(self))]
    async fn get_pull_request(&self, repo: &str, id: &str) -> Result<PullRequest> {
        self.http_client
            .get(&format!("/repos/{}/pulls/{}", repo, id))
            .await
    }

    #[instrument(skip(self, request))]
    async fn create_pull_request(
        &self,
        repo: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.http_client
            .post(&format!("/repos/{}/pulls", repo), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::error::GithubApiError;

    fn pull_request_json(number: u64, head: &str, base: &str) -> serde_json::Value {
        json!({
            "number": number,
            "html_url": format!("https://github.com/org/repo/pull/{}", number),
            "state": "open",
            "head": {"ref": head, "sha": "abc"},
            "base": {"ref": base, "sha": "def"},
        })
    }

    #[tokio::test]
    async fn test_get_pull_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/org/repo/pulls/42")
                    .header("authorization", "token t0ken");
                then.status(200)
                    .json_body(pull_request_json(42, "alice/PR/head", "alice/PR/base"));
            })
            .await;

        let mut gh = RealGithub::new(&server.base_url()).unwrap();
        gh.set_credentials(Credentials::Token("t0ken".to_string()));
        let pr = gh.get_pull_request("org/repo", "42").await.unwrap();

        assert_eq!(pr.number, 42);
        assert_eq!(pr.head.ref_name, "alice/PR/head");
        assert_eq!(pr.base.ref_name, "alice/PR/base");
        assert_eq!(pr.html_url, "https://github.com/org/repo/pull/42");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_pull_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/org/repo/pulls").json_body(json!({
                    "title": "Fix the thing",
                    "head": "alice/PR/fix-the-thing",
                    "base": "alice/PR/prep",
                    "body": "Details.",
                }));
                then.status(201).json_body(pull_request_json(
                    7,
                    "alice/PR/fix-the-thing",
                    "alice/PR/prep",
                ));
            })
            .await;

        let gh = RealGithub::new(&server.base_url()).unwrap();
        let pr = gh
            .create_pull_request(
                "org/repo",
                &NewPullRequest {
                    title: "Fix the thing".to_string(),
                    head: "alice/PR/fix-the-thing".to_string(),
                    base: "alice/PR/prep".to_string(),
                    body: "Details.".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(pr.number, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_authorization() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/authorizations").json_body(json!({
                    "scopes": ["repo", "public_repo"],
                    "note": "post-commit-pr-17",
                }));
                then.status(201)
                    .json_body(json!({"id": 1, "token": " fresh-token \n"}));
            })
            .await;

        let gh = RealGithub::new(&server.base_url()).unwrap();
        let auth = gh
            .create_authorization(&NewAuthorization::new("post-commit-pr-17".to_string()))
            .await
            .unwrap();

        assert_eq!(auth.token, " fresh-token \n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unprocessable_pull_request() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/repos/org/repo/pulls");
                then.status(422)
                    .json_body(json!({"message": "Validation Failed"}));
            })
            .await;

        let gh = RealGithub::new(&server.base_url()).unwrap();
        let err = gh
            .create_pull_request(
                "org/repo",
                &NewPullRequest {
                    title: "t".to_string(),
                    head: "h".to_string(),
                    base: "b".to_string(),
                    body: String::new(),
                },
            )
            .await
            .unwrap_err();

        let err = err.downcast_ref::<GithubApiError>().unwrap();
        assert_eq!(err.status, 422);
        assert_eq!(err.body["message"], "Validation Failed");
    }
}
