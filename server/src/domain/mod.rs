//! Effort domain: periods, units, selectors, Toggl totals and report links

pub mod effort;
pub mod link;
pub mod period;
pub mod selector;
pub mod toggl;
pub mod units;

pub use effort::{Effort, EffortError, EffortQuery, EffortService};
pub use link::make_toggl_link;
pub use period::{DateRange, Period, PeriodError, month_to_date_range, sprint_to_date_range};
pub use selector::{Selector, SelectorError};
pub use toggl::{TogglClient, TogglError};
pub use units::{SECONDS_PER_WORKDAY, Units, UnitsError, to_units};
