//! Display units for tracked time

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One workday, used for the `days` unit (8 hours)
pub const SECONDS_PER_WORKDAY: f64 = 8.0 * 60.0 * 60.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("unknown units '{0}', valid options: seconds, minutes, hours, days")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Units {
    Seconds,
    Minutes,
    Hours,
    #[default]
    Days,
}

impl Units {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    fn seconds_per_unit(&self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 60.0 * 60.0,
            Self::Days => SECONDS_PER_WORKDAY,
        }
    }

    pub fn convert(&self, seconds: f64) -> f64 {
        seconds / self.seconds_per_unit()
    }
}

impl FromStr for Units {
    type Err = UnitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seconds" => Ok(Self::Seconds),
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            "days" => Ok(Self::Days),
            _ => Err(UnitsError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a seconds total into the named unit.
///
/// Returns the converted value together with the canonical unit.
pub fn to_units(seconds: f64, units: &str) -> Result<(f64, Units), UnitsError> {
    let units: Units = units.parse()?;
    Ok((units.convert(seconds), units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_units_identity_values() {
        assert_eq!(to_units(28800.0, "days").unwrap(), (1.0, Units::Days));
        assert_eq!(to_units(3600.0, "hours").unwrap(), (1.0, Units::Hours));
        assert_eq!(to_units(60.0, "minutes").unwrap(), (1.0, Units::Minutes));
        assert_eq!(to_units(42.0, "seconds").unwrap(), (42.0, Units::Seconds));
    }

    #[test]
    fn test_to_units_case_insensitive() {
        assert_eq!(to_units(7200.0, "HOURS").unwrap(), (2.0, Units::Hours));
        assert_eq!(to_units(14400.0, "Days").unwrap(), (0.5, Units::Days));
    }

    #[test]
    fn test_to_units_unknown() {
        assert_eq!(
            to_units(60.0, "weeks"),
            Err(UnitsError::Unknown("weeks".to_string()))
        );
        assert!(to_units(60.0, "").is_err());
    }

    #[test]
    fn test_units_default_is_days() {
        assert_eq!(Units::default(), Units::Days);
    }

    #[test]
    fn test_units_display() {
        assert_eq!(Units::Seconds.to_string(), "seconds");
        assert_eq!(Units::Minutes.to_string(), "minutes");
        assert_eq!(Units::Hours.to_string(), "hours");
        assert_eq!(Units::Days.to_string(), "days");
    }

    #[test]
    fn test_days_use_eight_hour_workday() {
        assert_eq!(Units::Days.convert(3.0 * 28800.0), 3.0);
        assert_eq!(Units::Days.convert(3600.0), 0.125);
    }
}
