//! Client for the upstream activities service.
//!
//! The upstream owns all activity state; this module only speaks its REST
//! contract: `GET /activities`, `POST /activities/{name}/signup` and
//! `POST /activities/{name}/unregister` (email as a query parameter).

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// One activity as the upstream reports it. Participant order is the
/// upstream order; duplicates are kept as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

/// The full activity listing, replaced wholesale on every fetch.
pub type ActivityCatalog = BTreeMap<String, Activity>;

/// Success body of a signup or unregister call.
#[derive(Debug, Clone, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Network unreachable, or the body was not the JSON we expected.
    Transport(reqwest::Error),
    /// The upstream answered with a non-OK status. `detail` is the
    /// human-readable explanation from the body, when one was present.
    Rejected { status: u16, detail: Option<String> },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Upstream request failed: {e}"),
            ApiError::Rejected { status, detail: Some(detail) } => {
                write!(f, "Upstream rejected request ({status}): {detail}")
            }
            ApiError::Rejected { status, detail: None } => {
                write!(f, "Upstream rejected request ({status})")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from `ACTIVITIES_API_URL`, falling back to the
    /// default local upstream. Called once at startup.
    pub fn from_env() -> Self {
        let raw = std::env::var("ACTIVITIES_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base = Url::parse(&raw).expect("ACTIVITIES_API_URL must be a valid URL");
        Self::new(base)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/activities/{activity}/{action}` with the activity name
    /// percent-encoded as a single path segment.
    fn action_url(&self, activity: &str, action: &str) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL is http(s)")
            .pop_if_empty()
            .push("activities")
            .push(activity)
            .push(action);
        url
    }

    pub async fn fetch_activities(&self) -> Result<ActivityCatalog, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base URL is http(s)")
            .pop_if_empty()
            .push("activities");

        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(resp.json::<ActivityCatalog>().await?)
    }

    pub async fn signup(&self, activity: &str, email: &str) -> Result<Confirmation, ApiError> {
        self.post_action(activity, "signup", email).await
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<Confirmation, ApiError> {
        self.post_action(activity, "unregister", email).await
    }

    async fn post_action(
        &self,
        activity: &str,
        action: &str,
        email: &str,
    ) -> Result<Confirmation, ApiError> {
        let url = self.action_url(activity, action);
        let resp = self.http.post(url).query(&[("email", email)]).send().await?;
        if !resp.status().is_success() {
            return Err(Self::rejection(resp).await);
        }
        Ok(resp.json::<Confirmation>().await?)
    }

    async fn rejection(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            });
        ApiError::Rejected { status, detail }
    }
}
