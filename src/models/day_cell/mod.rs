// Day cell module
// Grid slots, day cells and the Hebrew calendar data attached to them

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::mark::{CellOverlay, MarkState};

/// Event names with this prefix are weekly Torah portions
pub const TORAH_PORTION_PREFIX: &str = "Parashat";

/// Hebrew date and events for one Gregorian day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HebrewInfo {
    /// Full Hebrew rendering of the date
    pub hebrew: String,
    pub year: i32,
    /// Transliterated month name, e.g. "Tevet"
    pub month_name: String,
    /// Day of the Hebrew month, 1-based
    pub day: u32,
    /// Month as displayed in the cell, in Hebrew
    pub month_label: String,
    /// Day as displayed in the cell, in Hebrew numerals
    pub day_label: String,
    /// Holidays and Torah portions, in display order
    pub events: Vec<String>,
}

impl HebrewInfo {
    pub fn is_first_of_month(&self) -> bool {
        self.day == 1
    }

    /// Events to show on a day; Torah portions only appear on the sabbath
    pub fn visible_events(&self, is_sabbath: bool) -> Vec<String> {
        self.events
            .iter()
            .filter(|event| is_sabbath || !event.starts_with(TORAH_PORTION_PREFIX))
            .cloned()
            .collect()
    }
}

/// Hebrew information keyed by Gregorian date
pub type HebrewCalendar = BTreeMap<NaiveDate, HebrewInfo>;

/// Text shown inside a cell besides the Gregorian day number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLabels {
    pub gregorian_month: Option<String>,
    pub hebrew_month: Option<String>,
    pub hebrew_day: Option<String>,
    pub events: Vec<String>,
}

/// One calendar day in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Index among day cells in generation order; the codec's address
    pub position: usize,
    /// Sunday-first column, 0..=6
    pub weekday: usize,
    pub mark: MarkState,
    pub is_weekend: bool,
    pub hebrew: Option<HebrewInfo>,
    pub labels: DayLabels,
}

impl DayCell {
    pub fn overlay(&self) -> CellOverlay {
        self.mark.overlay()
    }
}

/// A grid position: padding before the first weekday, or a real day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridSlot {
    Blank,
    Day(DayCell),
}

impl GridSlot {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            GridSlot::Day(cell) => Some(cell),
            GridSlot::Blank => None,
        }
    }

    pub fn as_day_mut(&mut self) -> Option<&mut DayCell> {
        match self {
            GridSlot::Day(cell) => Some(cell),
            GridSlot::Blank => None,
        }
    }
}
