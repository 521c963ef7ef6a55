// Hebcal converter response mapping

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::CalendarError;
use crate::models::day_cell::{HebrewCalendar, HebrewInfo};
use crate::utils::date::parse_iso_date;

#[derive(Debug, Deserialize)]
pub(crate) struct ConverterResponse {
    #[serde(default)]
    pub hdates: BTreeMap<String, ConvertedDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConvertedDate {
    #[serde(default)]
    pub hebrew: String,
    pub hy: i32,
    pub hm: String,
    pub hd: u32,
    #[serde(rename = "heDateParts")]
    pub he_date_parts: HebrewDateParts,
    #[serde(default)]
    pub events: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HebrewDateParts {
    pub m: String,
    pub d: String,
}

impl ConverterResponse {
    pub fn into_calendar(self) -> Result<HebrewCalendar, CalendarError> {
        self.hdates
            .into_iter()
            .map(|(date, converted)| {
                let date = parse_iso_date(&date)
                    .map_err(|_| CalendarError::Lookup(format!("Unexpected date key '{}'", date)))?;
                Ok((date, converted.into_info()))
            })
            .collect()
    }
}

impl ConvertedDate {
    fn into_info(self) -> HebrewInfo {
        HebrewInfo {
            hebrew: self.hebrew,
            year: self.hy,
            month_name: self.hm,
            day: self.hd,
            month_label: self.he_date_parts.m,
            day_label: self.he_date_parts.d,
            events: self.events,
        }
    }
}
