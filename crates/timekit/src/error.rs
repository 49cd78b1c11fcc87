//! Error types for timekit construction and configuration.
//!
//! Arithmetic, boundary and diff operations never fail; only building a
//! [`TimeKit`](crate::TimeKit) from outside input or configuring one can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeKitError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timestamp: {0} is outside the representable range")]
    InvalidTimestamp(i64),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TimeKitError>;
