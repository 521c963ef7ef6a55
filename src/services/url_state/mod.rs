// URL state store
// Reads and writes the calendar configuration to the page's query string

use url::form_urlencoded;

use crate::error::CalendarError;
use crate::models::calendar_state::{CalendarState, DateRange};
use crate::models::mark::MarkState;
use crate::services::codec::MarkCodec;
use crate::utils::date::{format_iso_date, parse_iso_date};

pub const START_DATE_KEY: &str = "startDate";
pub const END_DATE_KEY: &str = "endDate";
pub const MARKS_KEY: &str = "marks";
pub const SPLIT_KEY: &str = "split";

/// The page's addressable location (the address bar).
///
/// `search` is the query string without its leading `?`.
pub trait Location {
    fn search(&self) -> &str;

    /// Rewrite the current history entry in place
    fn replace_search(&mut self, search: String);

    /// Navigate to a new history entry
    fn push_search(&mut self, search: String);
}

/// In-memory location, used by the server adapter and in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    search: String,
    history_len: usize,
}

impl MemoryLocation {
    pub fn new(search: impl Into<String>) -> Self {
        let search = search.into();
        Self {
            search: search.trim_start_matches('?').to_string(),
            history_len: 1,
        }
    }

    /// Number of navigable history entries
    pub fn history_len(&self) -> usize {
        self.history_len
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl Location for MemoryLocation {
    fn search(&self) -> &str {
        &self.search
    }

    fn replace_search(&mut self, search: String) {
        self.search = search;
    }

    fn push_search(&mut self, search: String) {
        self.search = search;
        self.history_len += 1;
    }
}

pub struct UrlStateStore;

impl UrlStateStore {
    /// Serialize the complete state as a query string.
    ///
    /// Keys are written in a fixed order; `split` is a bare flag that is
    /// only present when the split view is on.
    pub fn write(state: &CalendarState) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new())
            .append_pair(START_DATE_KEY, &format_iso_date(state.range.start()))
            .append_pair(END_DATE_KEY, &format_iso_date(state.range.end()))
            .append_pair(MARKS_KEY, &MarkCodec::encode(&state.marks))
            .finish();
        if state.split_enabled {
            query.push('&');
            query.push_str(SPLIT_KEY);
        }
        query
    }

    /// Parse a query string back into a state.
    ///
    /// Returns `Ok(None)` unless both dates are present. A missing `marks`
    /// value reads as an unmarked grid, and a `marks` value of the wrong
    /// length is decoded tolerantly against the range's day count.
    pub fn read(query: &str) -> Result<Option<CalendarState>, CalendarError> {
        Ok(Self::read_header(query)?.map(|header| header.into_state(query)))
    }

    /// Like [`UrlStateStore::read`], but rejects ranges longer than
    /// `max_days` before any marks are decoded
    pub fn read_within(query: &str, max_days: i64) -> Result<Option<CalendarState>, CalendarError> {
        match Self::read_header(query)? {
            Some(header) => {
                header.range.ensure_max_days(max_days)?;
                Ok(Some(header.into_state(query)))
            }
            None => Ok(None),
        }
    }

    /// Parse the range and split flag, leaving `marks` untouched
    pub fn read_header(query: &str) -> Result<Option<StateHeader>, CalendarError> {
        let mut start = None;
        let mut end = None;
        let mut split_enabled = false;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                START_DATE_KEY => start = Some(value.into_owned()),
                END_DATE_KEY => end = Some(value.into_owned()),
                SPLIT_KEY => split_enabled = true,
                _ => {}
            }
        }

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => (start, end),
            _ => return Ok(None),
        };

        let range = DateRange::new(parse_iso_date(&start)?, parse_iso_date(&end)?)?;
        Ok(Some(StateHeader {
            range,
            split_enabled,
        }))
    }

    /// Decode only the `marks` value against a freshly generated grid,
    /// whatever range the query names
    pub fn read_marks(query: &str, count: usize) -> Vec<MarkState> {
        let marks = form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == MARKS_KEY)
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        MarkCodec::decode(&marks, count)
    }

    /// Write `state` into `location` without adding a history entry
    pub fn persist<L: Location + ?Sized>(location: &mut L, state: &CalendarState) {
        let search = Self::write(state);
        log::debug!("Persisting calendar state: ?{}", search);
        location.replace_search(search);
    }

    /// Read the state currently held by `location`
    pub fn load<L: Location + ?Sized>(location: &L) -> Result<Option<CalendarState>, CalendarError> {
        Self::read(location.search())
    }
}

/// Range and split flag named by a query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHeader {
    pub range: DateRange,
    pub split_enabled: bool,
}

impl StateHeader {
    fn into_state(self, query: &str) -> CalendarState {
        CalendarState {
            range: self.range,
            marks: UrlStateStore::read_marks(query, self.range.day_count()),
            split_enabled: self.split_enabled,
        }
    }
}
