//! Toggl Track reports API client
//!
//! Issues a single totals search per call. No retry or pagination: the
//! totals endpoint answers with one aggregate for the whole range.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::period::DateRange;
use super::selector::Selector;
use crate::core::config::TogglConfig;
use crate::core::constants::{TOGGL_API_TOKEN_PASSWORD, USER_AGENT};

/// Maximum number of upstream body bytes kept in error messages
const MAX_ERROR_BODY: usize = 512;

#[derive(Error, Debug)]
pub enum TogglError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Toggl request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Toggl returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode Toggl response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Per-selector search criteria, flattened into the query body as
/// `project_ids` or `task_ids`
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum SearchCriteria {
    ProjectIds(Vec<u64>),
    TaskIds(Vec<u64>),
}

impl From<Selector> for SearchCriteria {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Project(id) => Self::ProjectIds(vec![id]),
            Selector::Task(id) => Self::TaskIds(vec![id]),
        }
    }
}

#[derive(Debug, Serialize)]
struct TotalsQuery {
    start_date: String,
    end_date: String,
    grouping: &'static str,
    sub_grouping: &'static str,
    with_graph: bool,
    #[serde(flatten)]
    criteria: SearchCriteria,
}

impl TotalsQuery {
    fn new(selector: Selector, range: &DateRange) -> Self {
        Self {
            start_date: range.start_iso(),
            end_date: range.end_iso(),
            grouping: "projects",
            sub_grouping: "tasks",
            with_graph: false,
            criteria: selector.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TotalsResponse {
    seconds: Option<f64>,
}

/// Client for the Toggl reports API, bound to one workspace and token
#[derive(Debug, Clone)]
pub struct TogglClient {
    http: reqwest::Client,
    api_base_url: String,
    api_token: String,
    workspace_id: u64,
}

impl TogglClient {
    pub fn new(config: &TogglConfig) -> Result<Self, TogglError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(TogglError::Client)?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            workspace_id: config.workspace_id,
        })
    }

    pub fn workspace_id(&self) -> u64 {
        self.workspace_id
    }

    fn totals_url(&self) -> String {
        format!(
            "{}/reports/api/v3/workspace/{}/search/time_entries/totals",
            self.api_base_url, self.workspace_id
        )
    }

    /// Total tracked seconds for `selector` within `range`.
    ///
    /// `Ok(None)` when Toggl answers without a `seconds` field.
    pub async fn get_seconds(
        &self,
        selector: Selector,
        range: &DateRange,
    ) -> Result<Option<f64>, TogglError> {
        let query = TotalsQuery::new(selector, range);
        tracing::debug!(
            workspace_id = self.workspace_id,
            %selector,
            start = %query.start_date,
            end = %query.end_date,
            "Querying Toggl totals"
        );

        let resp = self
            .http
            .post(self.totals_url())
            .basic_auth(&self.api_token, Some(TOGGL_API_TOKEN_PASSWORD))
            .json(&query)
            .send()
            .await
            .map_err(TogglError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TogglError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let totals: TotalsResponse = resp.json().await.map_err(TogglError::Decode)?;
        tracing::trace!(seconds = ?totals.seconds, "Toggl totals received");
        Ok(totals.seconds)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    // base64("secret-token:api_token")
    const EXPECTED_AUTH: &str = "Basic c2VjcmV0LXRva2VuOmFwaV90b2tlbg==";

    const TOTALS_PATH: &str = "/reports/api/v3/workspace/42/search/time_entries/totals";

    fn config(base_url: &str) -> TogglConfig {
        TogglConfig {
            api_token: "secret-token".to_string(),
            workspace_id: 42,
            api_base_url: base_url.to_string(),
            ui_base_url: "https://track.toggl.com".to_string(),
            timeout_secs: 5,
        }
    }

    fn december_2020() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_totals_query_project_body() {
        let query = TotalsQuery::new(Selector::Project(1001), &december_2020());
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({
                "start_date": "2020-12-01",
                "end_date": "2020-12-31",
                "grouping": "projects",
                "sub_grouping": "tasks",
                "with_graph": false,
                "project_ids": [1001]
            })
        );
    }

    #[test]
    fn test_totals_query_task_body() {
        let query = TotalsQuery::new(Selector::Task(7), &december_2020());
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["task_ids"], json!([7]));
        assert!(value.get("project_ids").is_none());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééé", 3), "é...");
    }

    #[tokio::test]
    async fn test_get_seconds_project() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOTALS_PATH)
                    .header("authorization", EXPECTED_AUTH)
                    .json_body(json!({
                        "start_date": "2020-12-01",
                        "end_date": "2020-12-31",
                        "grouping": "projects",
                        "sub_grouping": "tasks",
                        "with_graph": false,
                        "project_ids": [1001]
                    }));
                then.status(200).json_body(json!({ "seconds": 28800 }));
            })
            .await;

        let client = TogglClient::new(&config(&server.base_url())).unwrap();
        let seconds = client
            .get_seconds(Selector::Project(1001), &december_2020())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(seconds, Some(28800.0));
    }

    #[tokio::test]
    async fn test_get_seconds_task() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TOTALS_PATH).json_body(json!({
                    "start_date": "2020-12-01",
                    "end_date": "2020-12-31",
                    "grouping": "projects",
                    "sub_grouping": "tasks",
                    "with_graph": false,
                    "task_ids": [7]
                }));
                then.status(200).json_body(json!({ "seconds": 5400 }));
            })
            .await;

        let client = TogglClient::new(&config(&server.base_url())).unwrap();
        let seconds = client
            .get_seconds(Selector::Task(7), &december_2020())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(seconds, Some(5400.0));
    }

    #[tokio::test]
    async fn test_get_seconds_missing_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOTALS_PATH);
                then.status(200).json_body(json!({ "resolution": "day" }));
            })
            .await;

        let client = TogglClient::new(&config(&server.base_url())).unwrap();
        let seconds = client
            .get_seconds(Selector::Project(1), &december_2020())
            .await
            .unwrap();

        assert_eq!(seconds, None);
    }

    #[tokio::test]
    async fn test_get_seconds_auth_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOTALS_PATH);
                then.status(403).body("Incorrect username and/or password");
            })
            .await;

        let client = TogglClient::new(&config(&server.base_url())).unwrap();
        let err = client
            .get_seconds(Selector::Project(1), &december_2020())
            .await
            .unwrap_err();

        match err {
            TogglError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("Incorrect"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_seconds_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOTALS_PATH);
                then.status(200).body("not json");
            })
            .await;

        let client = TogglClient::new(&config(&server.base_url())).unwrap();
        let err = client
            .get_seconds(Selector::Project(1), &december_2020())
            .await
            .unwrap_err();

        assert!(matches!(err, TogglError::Decode(_)));
    }
}
