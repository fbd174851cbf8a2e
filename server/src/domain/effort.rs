//! Effort lookup: period + selector + units in, converted total and report link out

use thiserror::Error;

use super::link::make_toggl_link;
use super::period::{DateRange, Period, PeriodError};
use super::selector::{Selector, SelectorError};
use super::toggl::{TogglClient, TogglError};
use super::units::{Units, UnitsError};
use crate::core::config::TogglConfig;

#[derive(Error, Debug)]
pub enum EffortError {
    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error(transparent)]
    Toggl(#[from] TogglError),

    #[error("Toggl response did not contain a seconds total")]
    MissingSeconds,
}

impl EffortError {
    /// True when the caller sent an unusable request (as opposed to an
    /// upstream failure)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Period(_) | Self::Selector(_) | Self::Units(_))
    }
}

/// A validated effort query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffortQuery {
    pub period: Period,
    pub selector: Selector,
    pub units: Units,
}

impl EffortQuery {
    /// Validate raw parameters. Period is checked first, then selector, then
    /// units; a missing `units` means days.
    pub fn from_params(
        month: Option<&str>,
        sprint: Option<&str>,
        project: Option<&str>,
        task: Option<&str>,
        units: Option<&str>,
    ) -> Result<Self, EffortError> {
        let period = Period::from_params(month, sprint)?;
        let selector = Selector::from_params(project, task)?;
        let units = match units {
            Some(units) => units.parse::<Units>()?,
            None => Units::default(),
        };
        Ok(Self {
            period,
            selector,
            units,
        })
    }
}

/// Converted total plus the report link for the same query
#[derive(Debug, Clone, PartialEq)]
pub struct Effort {
    pub seconds: f64,
    pub value: f64,
    pub units: Units,
    pub range: DateRange,
    pub link: String,
}

/// Runs effort queries against one Toggl workspace
#[derive(Debug, Clone)]
pub struct EffortService {
    client: TogglClient,
    ui_base_url: String,
}

impl EffortService {
    pub fn new(config: &TogglConfig) -> Result<Self, TogglError> {
        Ok(Self {
            client: TogglClient::new(config)?,
            ui_base_url: config.ui_base_url.clone(),
        })
    }

    pub async fn effort(&self, query: &EffortQuery) -> Result<Effort, EffortError> {
        let range = query.period.date_range()?;
        let link = make_toggl_link(
            &self.ui_base_url,
            self.client.workspace_id(),
            &range,
            query.selector,
        );

        let seconds = self
            .client
            .get_seconds(query.selector, &range)
            .await?
            .ok_or(EffortError::MissingSeconds)?;

        Ok(Effort {
            seconds,
            value: query.units.convert(seconds),
            units: query.units,
            range,
            link,
        })
    }
}
