// Calendar grid builder
// Lays a date range out in Sunday-first, row-major order

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::calendar_state::DateRange;
use crate::models::day_cell::{DayCell, DayLabels, GridSlot, HebrewCalendar};
use crate::models::mark::MarkState;
use crate::utils::date::{gregorian_month_name, is_sabbath, is_weekend, weekday_column};

pub const DAYS_PER_WEEK: usize = 7;

/// Rendered grid: leading blanks followed by one cell per day.
///
/// The order of day cells is the positional contract of the marks
/// encoding; changing it invalidates every shared URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    slots: Vec<GridSlot>,
}

impl CalendarGrid {
    pub fn slots(&self) -> &[GridSlot] {
        &self.slots
    }

    pub fn leading_blanks(&self) -> usize {
        self.slots
            .iter()
            .take_while(|slot| matches!(slot, GridSlot::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.slots.iter().filter_map(GridSlot::as_day)
    }

    pub fn days_mut(&mut self) -> impl Iterator<Item = &mut DayCell> {
        self.slots.iter_mut().filter_map(GridSlot::as_day_mut)
    }

    pub fn day_count(&self) -> usize {
        self.slots.len() - self.leading_blanks()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn cell(&self, position: usize) -> Option<&DayCell> {
        self.slots.get(self.leading_blanks() + position)?.as_day()
    }

    pub fn cell_mut(&mut self, position: usize) -> Option<&mut DayCell> {
        let index = self.leading_blanks() + position;
        self.slots.get_mut(index)?.as_day_mut()
    }

    /// Current marks in position order
    pub fn marks(&self) -> Vec<MarkState> {
        self.days().map(|cell| cell.mark).collect()
    }

    /// Assign marks by position; cells past the end of `marks` are cleared
    pub fn apply_marks(&mut self, marks: &[MarkState]) {
        for cell in self.days_mut() {
            cell.mark = marks.get(cell.position).copied().unwrap_or_default();
        }
    }

    /// Rows of seven slots, the last row possibly shorter
    pub fn weeks(&self) -> impl Iterator<Item = &[GridSlot]> {
        self.slots.chunks(DAYS_PER_WEEK)
    }
}

pub struct GridBuilder;

impl GridBuilder {
    /// Build the grid for `range`, attaching whatever Hebrew data is known
    pub fn build(range: &DateRange, hebrew: &HebrewCalendar) -> CalendarGrid {
        let blanks = weekday_column(range.start());
        let mut slots = Vec::with_capacity(blanks + range.day_count());
        slots.resize(blanks, GridSlot::Blank);

        let mut previous_month: Option<u32> = None;
        for (position, date) in range.days().enumerate() {
            let is_first_day = position == 0;
            let info = hebrew.get(&date).cloned();

            let mut labels = DayLabels::default();
            if previous_month != Some(date.month()) {
                labels.gregorian_month = Some(gregorian_month_name(date));
            }
            previous_month = Some(date.month());

            if let Some(info) = &info {
                if is_first_day || info.is_first_of_month() {
                    labels.hebrew_month = Some(info.month_label.clone());
                }
                labels.hebrew_day = Some(info.day_label.clone());
                labels.events = info.visible_events(is_sabbath(date));
            }

            slots.push(GridSlot::Day(DayCell {
                date,
                position,
                weekday: weekday_column(date),
                mark: MarkState::None,
                is_weekend: is_weekend(date),
                hebrew: info,
                labels,
            }));
        }

        log::debug!(
            "Built grid for {} to {}: {} days, {} leading blanks",
            range.start(),
            range.end(),
            range.day_count(),
            blanks
        );

        CalendarGrid { slots }
    }
}
