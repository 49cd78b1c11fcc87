//! Duration units used to select an arithmetic, boundary or diff operation.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::TimeKitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Century,
}

impl DurationUnit {
    /// The fixed length of this unit, or `None` for calendar units whose
    /// length depends on where they are applied.
    pub fn fixed_length(self) -> Option<Duration> {
        match self {
            DurationUnit::Second => Some(Duration::seconds(1)),
            DurationUnit::Minute => Some(Duration::minutes(1)),
            DurationUnit::Hour => Some(Duration::hours(1)),
            DurationUnit::Day => Some(Duration::days(1)),
            DurationUnit::Week => Some(Duration::weeks(1)),
            DurationUnit::Month | DurationUnit::Quarter | DurationUnit::Year | DurationUnit::Century => {
                None
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            DurationUnit::Second => "second",
            DurationUnit::Minute => "minute",
            DurationUnit::Hour => "hour",
            DurationUnit::Day => "day",
            DurationUnit::Week => "week",
            DurationUnit::Month => "month",
            DurationUnit::Quarter => "quarter",
            DurationUnit::Year => "year",
            DurationUnit::Century => "century",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DurationUnit {
    type Err = TimeKitError;

    /// Accepts singular or plural names in any case (`"day"`, `"Days"`,
    /// `"centuries"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_lowercase().as_str() {
            "second" | "seconds" => DurationUnit::Second,
            "minute" | "minutes" => DurationUnit::Minute,
            "hour" | "hours" => DurationUnit::Hour,
            "day" | "days" => DurationUnit::Day,
            "week" | "weeks" => DurationUnit::Week,
            "month" | "months" => DurationUnit::Month,
            "quarter" | "quarters" => DurationUnit::Quarter,
            "year" | "years" => DurationUnit::Year,
            "century" | "centuries" => DurationUnit::Century,
            _ => return Err(TimeKitError::InvalidUnit(format!("'{}'", s))),
        };
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!("day".parse::<DurationUnit>().unwrap(), DurationUnit::Day);
        assert_eq!("Months".parse::<DurationUnit>().unwrap(), DurationUnit::Month);
        assert_eq!(
            " centuries ".parse::<DurationUnit>().unwrap(),
            DurationUnit::Century
        );
        assert!(matches!(
            "fortnight".parse::<DurationUnit>(),
            Err(TimeKitError::InvalidUnit(_))
        ));
    }

    #[test]
    fn display_is_singular_lowercase() {
        assert_eq!(DurationUnit::Quarter.to_string(), "quarter");
    }

    #[test]
    fn only_clock_units_have_fixed_length() {
        assert_eq!(DurationUnit::Hour.fixed_length(), Some(Duration::hours(1)));
        assert_eq!(DurationUnit::Week.fixed_length(), Some(Duration::days(7)));
        assert_eq!(DurationUnit::Month.fixed_length(), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DurationUnit::Century).unwrap();
        assert_eq!(json, "\"century\"");
        let back: DurationUnit = serde_json::from_str("\"minute\"").unwrap();
        assert_eq!(back, DurationUnit::Minute);
    }
}
