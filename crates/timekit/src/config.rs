//! Per-instance configuration and calendar constants.
//!
//! A [`TimeKitConfig`] carries everything about a [`TimeKit`](crate::TimeKit)
//! that is not the instant itself: the display format, which days count as
//! weekend, and which weekdays open and close a week. It can be built in code
//! or loaded from JSON:
//!
//! ```
//! use chrono::Weekday;
//! use timekit::TimeKitConfig;
//!
//! let config = TimeKitConfig::from_json(r#"{"week_start": "Sun", "week_end": "Sat"}"#).unwrap();
//! assert_eq!(config.week_start, Weekday::Sun);
//! assert_eq!(config.format, timekit::config::DEFAULT_FORMAT);
//! ```

use chrono::format::{Item, StrftimeItems};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeKitError};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const MINUTES_PER_HOUR: i64 = 60;
pub const HOURS_PER_DAY: i64 = 24;
pub const DAYS_PER_WEEK: i64 = 7;
pub const MONTHS_PER_QUARTER: i64 = 3;
pub const MONTHS_PER_YEAR: i64 = 12;
pub const YEARS_PER_CENTURY: i64 = 100;

/// Date and time, e.g. `2021-01-02 15:04:05`.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date only, e.g. `2021-01-02`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Time of day only, e.g. `15:04:05`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Display and week settings of a [`TimeKit`](crate::TimeKit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeKitConfig {
    /// strftime-style format used by `Display`.
    pub format: String,
    /// Days classified as weekend by `is_weekend`.
    pub weekend_days: Vec<Weekday>,
    /// Target weekday of `start_of_week`.
    pub week_start: Weekday,
    /// Target weekday of `end_of_week`.
    pub week_end: Weekday,
}

impl Default for TimeKitConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            week_start: Weekday::Mon,
            week_end: Weekday::Sun,
        }
    }
}

impl TimeKitConfig {
    /// Parse a JSON document into a validated config. Missing fields keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TimeKitError::InvalidConfig`] for malformed JSON or unknown
    /// weekday names, and [`TimeKitError::InvalidFormat`] if the format string
    /// contains an unsupported specifier.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TimeKitConfig =
            serde_json::from_str(json).map_err(|e| TimeKitError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the format string can be rendered.
    pub fn validate(&self) -> Result<()> {
        validate_format(&self.format)
    }

    pub(crate) fn is_weekend(&self, day: Weekday) -> bool {
        self.weekend_days.contains(&day)
    }

    /// Whether at least one day of the week is not a weekend day.
    pub(crate) fn has_weekdays(&self) -> bool {
        ALL_WEEKDAYS.iter().any(|d| !self.is_weekend(*d))
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Reject format strings chrono would fail to render.
pub fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(TimeKitError::InvalidFormat(format!("'{}'", format)));
    }
    Ok(())
}

/// Parse a weekday name such as `"mon"`, `"Monday"` or `"SUN"`.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| TimeKitError::InvalidWeekday(format!("'{}'", s)))
}
