// Error module
// Domain errors shared by the calendar core, the lookup client and the server

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Start date {start} must not be after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Date range of {days} days exceeds the limit of {max} days")]
    RangeTooLong { days: i64, max: i64 },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Day position {position} is outside the grid ({count} days)")]
    PositionOutOfRange { position: usize, count: usize },

    #[error("Hebrew date lookup failed: {0}")]
    Lookup(String),

    #[error("Calendar generation {0} was superseded by a newer request")]
    StaleGeneration(u64),
}

impl CalendarError {
    /// Errors caused by the caller's input rather than by a collaborator
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CalendarError::InvalidRange { .. }
                | CalendarError::RangeTooLong { .. }
                | CalendarError::InvalidDate(_)
                | CalendarError::PositionOutOfRange { .. }
        )
    }
}

impl From<reqwest::Error> for CalendarError {
    fn from(err: reqwest::Error) -> Self {
        CalendarError::Lookup(err.to_string())
    }
}
