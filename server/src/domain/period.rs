//! Period tokens and their calendar date ranges
//!
//! Two token shapes are accepted:
//!
//! | Kind   | Format         | Range                                   |
//! |--------|----------------|-----------------------------------------|
//! | Month  | `YYYY-MM[...]` | 1st .. last day of the month            |
//! | Sprint | `YYYY.MM.1`    | 1st .. 16th                             |
//! | Sprint | `YYYY.MM.2`    | 17th .. last day of the month           |

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Number of significant characters in a month token (`YYYY-MM`)
const MONTH_TOKEN_LEN: usize = 7;

/// Last day of the first sprint half
const FIRST_HALF_END_DAY: u32 = 16;

/// First day of the second sprint half
const SECOND_HALF_START_DAY: u32 = 17;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("no month or sprint specified")]
    Missing,

    #[error("month and sprint both specified")]
    Ambiguous,

    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("invalid sprint '{0}', expected YYYY.MM.HALF")]
    InvalidSprint(String),

    #[error("invalid sprint half {half} in '{token}', expected 1 or 2")]
    InvalidSprintHalf { token: String, half: i64 },
}

/// Calendar date pair sent to Toggl and embedded in report links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// ISO `YYYY-MM-DD` start date
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// ISO `YYYY-MM-DD` end date
    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// A reporting period requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Period {
    Month(String),
    Sprint(String),
}

impl Period {
    /// Pick the period from the optional `month` and `sprint` parameters.
    /// Exactly one of them must be present.
    pub fn from_params(month: Option<&str>, sprint: Option<&str>) -> Result<Self, PeriodError> {
        match (month, sprint) {
            (Some(month), None) => Ok(Self::Month(month.to_string())),
            (None, Some(sprint)) => Ok(Self::Sprint(sprint.to_string())),
            (Some(_), Some(_)) => Err(PeriodError::Ambiguous),
            (None, None) => Err(PeriodError::Missing),
        }
    }

    pub fn date_range(&self) -> Result<DateRange, PeriodError> {
        match self {
            Self::Month(token) => month_to_date_range(token),
            Self::Sprint(token) => sprint_to_date_range(token),
        }
    }
}

/// Last calendar day of the month containing `date`.
///
/// Day 28 exists in every month and adding four days always lands in the
/// following month, so snapping to its 1st and stepping back one day is
/// leap-year safe.
///
/// `None` when the following month lies outside chrono's supported range.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(28)?
        .checked_add_days(Days::new(4))?
        .with_day(1)?
        .pred_opt()
}

/// Resolve a month token (`YYYY-MM`, extra characters ignored) to the
/// first and last day of that month.
pub fn month_to_date_range(month: &str) -> Result<DateRange, PeriodError> {
    let prefix = month
        .get(..MONTH_TOKEN_LEN)
        .ok_or_else(|| PeriodError::InvalidMonth(month.to_string()))?;

    let start = NaiveDate::parse_from_str(&format!("{prefix}-01"), "%Y-%m-%d")
        .map_err(|_| PeriodError::InvalidMonth(month.to_string()))?;

    let end =
        last_day_of_month(start).ok_or_else(|| PeriodError::InvalidMonth(month.to_string()))?;

    Ok(DateRange::new(start, end))
}

/// Resolve a sprint token (`YYYY.MM.HALF`) to its half-month range.
pub fn sprint_to_date_range(sprint: &str) -> Result<DateRange, PeriodError> {
    let invalid = || PeriodError::InvalidSprint(sprint.to_string());

    let parts = sprint
        .split('.')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let [year, month, half] = parts.as_slice() else {
        return Err(invalid());
    };

    let year = i32::try_from(*year).map_err(|_| invalid())?;
    let month = u32::try_from(*month).map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

    match half {
        1 => {
            let end = first.with_day(FIRST_HALF_END_DAY).ok_or_else(invalid)?;
            Ok(DateRange::new(first, end))
        }
        2 => {
            let start = first.with_day(SECOND_HALF_START_DAY).ok_or_else(invalid)?;
            let end = last_day_of_month(first).ok_or_else(invalid)?;
            Ok(DateRange::new(start, end))
        }
        other => Err(PeriodError::InvalidSprintHalf {
            token: sprint.to_string(),
            half: *other,
        }),
    }
}
