// Calendar state module
// Date range and the persisted calendar configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::models::mark::MarkState;
use crate::utils::date::{first_of_month, last_of_month};

/// Inclusive Gregorian date range shown by the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole Gregorian month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date),
            end: last_of_month(date),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days, both ends included
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Reject ranges longer than `max_days`
    pub fn ensure_max_days(&self, max_days: i64) -> Result<(), CalendarError> {
        let days = self.day_count() as i64;
        if days > max_days {
            return Err(CalendarError::RangeTooLong {
                days,
                max: max_days,
            });
        }
        Ok(())
    }
}

/// Everything needed to reproduce a calendar view.
///
/// Rebuilt from the address bar on every read and written back whole on
/// every mutation; `marks` is addressed by day position, never by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    pub range: DateRange,
    pub marks: Vec<MarkState>,
    pub split_enabled: bool,
}

impl CalendarState {
    /// Unmarked state covering `range`
    pub fn blank(range: DateRange) -> Self {
        Self {
            range,
            marks: vec![MarkState::None; range.day_count()],
            split_enabled: false,
        }
    }
}
