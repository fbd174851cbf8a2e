//! Effort endpoint
//!
//! `GET /effort?month=|sprint=&project=|task=&units=` answers with the tracked
//! effort for one project or task. Google Sheets (`IMPORTDATA`) gets a bare
//! number; everyone else gets an HTML link into Toggl's detailed report.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::api::types::ApiError;
use crate::core::constants::SPREADSHEET_USER_AGENT_MARKER;
use crate::domain::{Effort, EffortQuery, EffortService};

#[derive(Clone)]
pub struct EffortApiState {
    pub effort: Arc<EffortService>,
}

/// Raw query parameters; validated by [`EffortQuery::from_params`]
#[derive(Debug, Default, Deserialize)]
pub struct EffortParams {
    pub month: Option<String>,
    pub sprint: Option<String>,
    pub project: Option<String>,
    pub task: Option<String>,
    pub units: Option<String>,
}

impl EffortParams {
    fn to_query(&self) -> Result<EffortQuery, ApiError> {
        EffortQuery::from_params(
            non_empty(&self.month),
            non_empty(&self.sprint),
            non_empty(&self.project),
            non_empty(&self.task),
            non_empty(&self.units),
        )
        .map_err(ApiError::from)
    }
}

/// `?task=` and no `task` at all mean the same thing
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn is_spreadsheet(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains(SPREADSHEET_USER_AGENT_MARKER))
}

/// Render a converted value the way spreadsheets parse it (`1`, `2.5`)
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

fn render(effort: &Effort, spreadsheet: bool) -> Response {
    let value = format_value(effort.value);
    if spreadsheet {
        value.into_response()
    } else {
        Html(format!(
            "<a href=\"{}\">{} {}</a>",
            effort.link, value, effort.units
        ))
        .into_response()
    }
}

pub async fn get_effort(
    State(state): State<EffortApiState>,
    headers: HeaderMap,
    Query(params): Query<EffortParams>,
) -> Result<Response, ApiError> {
    let query = params.to_query()?;
    let spreadsheet = is_spreadsheet(&headers);
    tracing::debug!(
        period = ?query.period,
        selector = %query.selector,
        units = %query.units,
        spreadsheet,
        "Effort request"
    );

    let effort = state.effort.effort(&query).await?;
    tracing::debug!(
        seconds = effort.seconds,
        value = effort.value,
        start = %effort.range.start_iso(),
        end = %effort.range.end_iso(),
        "Effort resolved"
    );

    Ok(render(&effort, spreadsheet))
}
