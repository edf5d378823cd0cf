//! Error types for timeshift-core.
//!
//! The arithmetic engine raises a single kind of error, an invalid calendar
//! date. Timezone failures only originate in [`TimezoneResolver`]
//! implementations and are passed through unchanged.
//!
//! [`TimezoneResolver`]: crate::tz::TimezoneResolver

use thiserror::Error;

/// The main error type for timeshift operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeshiftError {
    /// The field combination does not denote a real calendar date/time.
    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    /// Invalid or unresolvable timezone identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Result type alias for timeshift operations.
pub type Result<T> = std::result::Result<T, TimeshiftError>;
