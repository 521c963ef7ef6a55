// Test fixtures - reusable test data
// Provides consistent dates, ranges and converters across test files

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;

use dual_calendar::models::calendar_state::DateRange;
use dual_calendar::models::day_cell::{HebrewCalendar, HebrewInfo};
use dual_calendar::services::hebcal::DateConverter;
use dual_calendar::CalendarError;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 1, 2025
    pub fn jan_1_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// Friday, Jan 3, 2025
    pub fn jan_3_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    }

    /// Saturday, Jan 4, 2025 (Parashat Vayigash)
    pub fn jan_4_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample ranges for testing
pub mod ranges {
    use super::*;

    /// The three days of the positional decoding example
    pub fn first_three_days_2025() -> DateRange {
        DateRange::new(dates::jan_1_2025(), dates::jan_3_2025()).unwrap()
    }

    /// Jan 1 - Jan 4, 2025: Wednesday through the sabbath
    pub fn first_week_2025() -> DateRange {
        DateRange::new(dates::jan_1_2025(), dates::jan_4_2025()).unwrap()
    }
}

/// Hebrew data matching hebcal.com for the first days of 2025
pub fn tevet_5785() -> HebrewCalendar {
    let day = |gd: u32, hd: u32, label: &str, events: &[&str]| {
        (
            NaiveDate::from_ymd_opt(2025, 1, gd).unwrap(),
            HebrewInfo {
                hebrew: format!("{} טֵבֵת תשפ״ה", label),
                year: 5785,
                month_name: "Tevet".to_string(),
                day: hd,
                month_label: "טבת".to_string(),
                day_label: label.to_string(),
                events: events.iter().map(|e| e.to_string()).collect(),
            },
        )
    };

    [
        day(1, 1, "א׳", &["Chanukah: 8th Day", "Rosh Chodesh Tevet"]),
        day(2, 2, "ב׳", &[]),
        day(3, 3, "ג׳", &["Parashat Vayigash"]),
        day(4, 4, "ד׳", &["Parashat Vayigash"]),
    ]
    .into_iter()
    .collect()
}

/// Converter answering from a fixed table
pub struct FixedConverter(pub HebrewCalendar);

#[async_trait]
impl DateConverter for FixedConverter {
    async fn convert(&self, range: &DateRange) -> Result<HebrewCalendar, CalendarError> {
        Ok(self
            .0
            .range(range.start()..=range.end())
            .map(|(date, info)| (*date, info.clone()))
            .collect())
    }
}

/// Converter whose remote service is always down
pub struct FailingConverter;

#[async_trait]
impl DateConverter for FailingConverter {
    async fn convert(&self, _range: &DateRange) -> Result<HebrewCalendar, CalendarError> {
        Err(CalendarError::Lookup("HTTP error! status: 503".to_string()))
    }
}
