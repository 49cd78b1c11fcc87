//! # timekit
//!
//! Calendar arithmetic on timezone-aware instants.
//!
//! A [`TimeKit`] wraps a `chrono::DateTime<chrono_tz::Tz>` together with a
//! display format and week settings, and provides:
//!
//! - shifts by years, quarters, months (with or without overflow), weeks,
//!   days, weekdays, hours, minutes and seconds
//! - start/end of day, week, month, quarter, year and century
//! - differences in seconds through months, and filtered counts such as
//!   "weekdays between these two dates"
//!
//! ```
//! use timekit::TimeKit;
//!
//! let mut tk = TimeKit::parse("%Y-%m-%d", "2021-01-31", "UTC").unwrap();
//! tk.add_months_no_overflow(1);
//! assert_eq!(tk.date_string(), "2021-02-28");
//!
//! let end = TimeKit::parse("%Y-%m-%d", "2021-03-07", "UTC").unwrap();
//! let weekdays = tk.diff_in_days_filtered(Some(&end), |t| t.is_weekday(), true);
//! assert_eq!(weekdays, 5);
//! ```
//!
//! ## Modules
//!
//! - [`kit`] — the `TimeKit` value, construction and rendering
//! - [`arithmetic`] — `add_*` / `sub_*` shifts
//! - [`boundary`] — `start_of_*` / `end_of_*`
//! - [`diff`] — differences and filtered counts
//! - [`calendar`] — the calendar-add primitive
//! - [`dst`] — resolving wall-clock times on DST transitions
//! - [`config`] — per-instance settings and constants
//! - [`unit`] — `DurationUnit`
//! - [`error`] — Error types

pub mod arithmetic;
pub mod boundary;
pub mod calendar;
pub mod config;
pub mod diff;
pub mod dst;
pub mod error;
pub mod kit;
pub mod unit;

pub use config::TimeKitConfig;
pub use error::TimeKitError;
pub use kit::TimeKit;
pub use unit::DurationUnit;
