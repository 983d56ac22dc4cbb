//! GitHub API client.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::error::{BackupError, Result};

/// Default public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Username and password (or personal access token) for basic auth.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client for interacting with the GitHub API.
///
/// Without credentials every request is anonymous, which limits repository
/// listings to public repositories.
#[derive(Clone)]
pub struct GitHubClient {
    pub(crate) credentials: Option<Credentials>,
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl GitHubClient {
    /// Create an anonymous client for api.github.com.
    pub fn anonymous() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_API_URL.into(),
            client: Client::new(),
        }
    }

    /// Create a client that authenticates every request.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::anonymous()
        }
    }

    /// Point the client at a GitHub Enterprise API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }

    /// Whether requests are sent with credentials.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the default headers for API requests.
    pub(crate) fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("github-backup"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    /// Make a GET request to the GitHub API.
    pub(crate) fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self.client.get(&url).headers(self.headers());
        let response = self.authorize(request).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(BackupError::GitHub {
                message: format!("API request failed ({}): {}", status, body),
            });
        }

        response.json().map_err(|e| BackupError::GitHub {
            message: format!("Failed to parse response: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GitHubClient::anonymous().with_base_url("https://ghe.example.com/api/v3//");
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_authentication_state() {
        assert!(!GitHubClient::anonymous().is_authenticated());
        let client = GitHubClient::with_credentials(Credentials::new("octocat", "secret"));
        assert!(client.is_authenticated());
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("octocat", "hunter2");
        let shown = format!("{:?}", creds);
        assert!(shown.contains("octocat"));
        assert!(!shown.contains("hunter2"));
    }
}
