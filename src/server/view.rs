// JSON views returned to the browser

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::day_cell::DayLabels;
use crate::models::mark::{CellOverlay, MarkCounts, MarkState};
use crate::services::codec::MarkCodec;
use crate::services::session::CalendarSession;
use crate::services::split::SplitBoundary;
use crate::services::url_state::Location;

/// Everything the page needs after a mark mutation
#[derive(Debug, Serialize)]
pub struct MarksView {
    /// New query string for `history.replaceState`
    pub query: String,
    pub marks: Vec<MarkState>,
    pub encoded: String,
    pub split_enabled: bool,
    pub counts: MarkCounts,
    pub boundaries: Vec<SplitBoundary>,
}

#[derive(Debug, Serialize)]
pub struct CellView {
    pub position: usize,
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: usize,
    pub is_weekend: bool,
    pub mark: MarkState,
    pub overlay: CellOverlay,
    pub hebrew: Option<String>,
    pub labels: DayLabels,
}

/// A freshly generated calendar
#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leading_blanks: usize,
    /// Number of Sunday-first rows the grid occupies
    pub weeks: usize,
    pub cells: Vec<CellView>,
    pub state: MarksView,
}

impl MarksView {
    pub fn from_session<L: Location>(session: &CalendarSession<L>) -> Self {
        let state = session.state();
        Self {
            query: session.location().search().to_string(),
            encoded: MarkCodec::encode(&state.marks),
            marks: state.marks,
            split_enabled: state.split_enabled,
            counts: session.counts(),
            boundaries: session.boundaries().to_vec(),
        }
    }
}

impl CalendarView {
    pub fn from_session<L: Location>(session: &CalendarSession<L>) -> Self {
        let grid = session.grid();
        let cells = grid
            .days()
            .map(|cell| CellView {
                position: cell.position,
                date: cell.date,
                day: cell.date.day(),
                weekday: cell.weekday,
                is_weekend: cell.is_weekend,
                mark: cell.mark,
                overlay: cell.overlay(),
                hebrew: cell.hebrew.as_ref().map(|info| info.hebrew.clone()),
                labels: cell.labels.clone(),
            })
            .collect();

        Self {
            start_date: session.range().start(),
            end_date: session.range().end(),
            leading_blanks: grid.leading_blanks(),
            weeks: grid.weeks().count(),
            cells,
            state: MarksView::from_session(session),
        }
    }
}
