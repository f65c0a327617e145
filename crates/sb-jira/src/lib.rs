//! Jira integration for the time log.
//!
//! Entries whose comment references a ticket get the ticket's summary
//! attached. Lookups never fail a parse: any HTTP or decoding problem is
//! logged and the entry simply keeps no summary.

mod enrich;
mod matcher;

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

pub use enrich::enrich_days;
pub use matcher::TicketMatcher;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Jira client errors.
#[derive(Debug, Error)]
pub enum JiraError {
    /// A configured ticket pattern is not a valid regex.
    #[error("invalid ticket pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// The REST endpoint is missing.
    #[error("missing Jira REST URI")]
    MissingRestUri,
    /// The REST endpoint is not an absolute http(s) URL.
    #[error("invalid Jira REST URI {uri:?}: {reason}")]
    InvalidRestUri { uri: String, reason: String },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned an error response.
    #[error("API error: {message}")]
    Api { message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Ticket integration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Base REST URI, e.g. `https://jira.example.com/rest/api/2`.
    pub rest_uri: String,
    #[serde(default)]
    pub credentials: Credentials,
    /// Regexes locating ticket keys in entry comments.
    #[serde(default)]
    pub ticket_patterns: Vec<String>,
}

/// Basic-auth credentials for the Jira REST API.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Jira REST client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    rest_uri: Url,
    credentials: Credentials,
    matcher: TicketMatcher,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("rest_uri", &self.rest_uri.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client from the ticket integration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the REST URI is blank or not a base URL, a ticket
    /// pattern does not compile, or the HTTP client fails to build.
    pub fn new(config: &JiraConfig) -> Result<Self, JiraError> {
        let raw = config.rest_uri.trim();
        if raw.is_empty() {
            return Err(JiraError::MissingRestUri);
        }
        let rest_uri = Url::parse(raw).map_err(|err| JiraError::InvalidRestUri {
            uri: raw.to_string(),
            reason: err.to_string(),
        })?;
        if rest_uri.cannot_be_a_base() {
            return Err(JiraError::InvalidRestUri {
                uri: raw.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let matcher = TicketMatcher::new(config.ticket_patterns.as_slice())?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(JiraError::ClientBuild)?;

        Ok(Self {
            http,
            rest_uri,
            credentials: config.credentials.clone(),
            matcher,
        })
    }

    /// Ticket key referenced by `comment`, if any pattern matches.
    pub fn ticket_key(&self, comment: &str) -> Option<String> {
        self.matcher.ticket_key(comment)
    }

    /// Summary of the ticket referenced by `comment`.
    ///
    /// Returns `None` without any request when no pattern matches, and
    /// `None` after logging a warning when the lookup fails.
    pub async fn ticket_summary(&self, comment: &str) -> Option<String> {
        let key = self.ticket_key(comment)?;
        self.summary_for_key(&key).await
    }

    /// Summary of the ticket `key`, or `None` if the lookup fails.
    pub async fn summary_for_key(&self, key: &str) -> Option<String> {
        match self.fetch_summary(key).await {
            Ok(summary) => Some(summary),
            Err(err) => {
                tracing::warn!(key, error = %err, "ticket lookup failed");
                None
            }
        }
    }

    /// `{rest_uri}/issue/{key}` with `key` percent-encoded as one segment.
    fn issue_url(&self, key: &str) -> Url {
        let mut url = self.rest_uri.clone();
        // `new` rejects URLs that cannot be a base, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["issue", key]);
        }
        url
    }

    async fn fetch_summary(&self, key: &str) -> Result<String, JiraError> {
        let url = self.issue_url(key);
        tracing::debug!(%url, "fetching ticket summary");

        let response = self
            .http
            .get(url)
            .query(&[("fields", "summary")])
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&body).unwrap_or_else(|| JiraError::Api {
                message: format!("status {status}: {body}"),
            }));
        }

        parse_summary(&body)
    }
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: Option<String>,
}

fn parse_summary(body: &str) -> Result<String, JiraError> {
    let issue: IssueResponse =
        serde_json::from_str(body).map_err(|err| JiraError::InvalidResponse(err.to_string()))?;
    issue
        .fields
        .summary
        .map(|summary| summary.trim().to_string())
        .filter(|summary| !summary.is_empty())
        .ok_or_else(|| JiraError::InvalidResponse("missing summary".to_string()))
}

fn parse_api_error(body: &str) -> Option<JiraError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        #[serde(default, rename = "errorMessages")]
        error_messages: Vec<String>,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .filter(|payload| !payload.error_messages.is_empty())
        .map(|payload| JiraError::Api {
            message: payload.error_messages.join("; "),
        })
}
