use std::fmt;

use anyhow::Context;
use anyhow::Result;
use reqwest::header;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::instrument;

use crate::error::GithubApiError;

const USER_AGENT: &str = concat!("pcpr/", env!("CARGO_PKG_VERSION"));

/// How requests authenticate against the API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token, sent as `Authorization: token <token>`.
    Token(String),
    /// Username and password, sent as HTTP basic auth.
    Basic { username: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Token(..)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// JSON-over-HTTPS client bound to a single API host
pub struct GithubHttpClient {
    base_url: String,
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl GithubHttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        // One idle connection, reused for every request of the run
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .pool_max_idle_per_host(1)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
        })
    }

    /// Replace the credentials used by all subsequent requests.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Make a GET request
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.client.get(self.url(path));
        self.send(request).await
    }

    /// Make a POST request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_vec(body)?;
        let request = self.client.post(self.url(path)).body(body);
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let request = match &self.credentials {
            Some(Credentials::Token(token)) => {
                request.header(header::AUTHORIZATION, format!("token {}", token))
            }
            Some(Credentials::Basic { username, password }) => {
                request.basic_auth(username, Some(password))
            }
            None => request,
        };

        let response = request
            .send()
            .await
            .context("Failed to send GitHub API request")?;
        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read GitHub API response")?;
        debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            return Err(GithubApiError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&text).context("Failed to parse GitHub API response")
    }
}
