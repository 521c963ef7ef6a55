// Calendar session
// Applies mark mutations and resynchronizes counters, URL and split overlay

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::models::calendar_state::{CalendarState, DateRange};
use crate::models::day_cell::{DayCell, HebrewCalendar};
use crate::models::mark::{self, MarkCounts};
use crate::services::grid::{CalendarGrid, GridBuilder};
use crate::services::hebcal::DateConverter;
use crate::services::split::{SplitBoundary, SplitBoundaryDeriver};
use crate::services::url_state::{Location, UrlStateStore};

/// Identifies one calendar generation request.
///
/// Only the most recently issued token may install a grid; completions
/// carrying an older token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationToken {
    id: u64,
    range: DateRange,
}

impl GenerationToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn range(&self) -> DateRange {
        self.range
    }
}

/// One open calendar: the rendered grid plus everything derived from it.
///
/// Every mutation runs to completion and then resynchronizes: counters are
/// recounted, the URL is rewritten in place and split boundaries are
/// recomputed over the whole grid.
pub struct CalendarSession<L: Location> {
    location: L,
    range: DateRange,
    grid: CalendarGrid,
    split_enabled: bool,
    counts: MarkCounts,
    boundaries: Vec<SplitBoundary>,
    generation: u64,
    max_range_days: i64,
}

impl<L: Location> CalendarSession<L> {
    /// Open a session from the state in `location`.
    ///
    /// Without dates in the URL the current month of `today` is shown. The
    /// grid stays empty until a generation completes, so marks are only
    /// decoded then.
    pub fn load(location: L, max_range_days: i64, today: NaiveDate) -> Result<Self, CalendarError> {
        let (range, split_enabled) = match UrlStateStore::read_header(location.search())? {
            Some(header) => {
                header.range.ensure_max_days(max_range_days)?;
                (header.range, header.split_enabled)
            }
            None => (DateRange::month_of(today), false),
        };

        Ok(Self {
            location,
            range,
            grid: CalendarGrid::default(),
            split_enabled,
            counts: MarkCounts::default(),
            boundaries: Vec::new(),
            generation: 0,
            max_range_days,
        })
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn counts(&self) -> MarkCounts {
        self.counts
    }

    pub fn boundaries(&self) -> &[SplitBoundary] {
        &self.boundaries
    }

    pub fn split_enabled(&self) -> bool {
        self.split_enabled
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    pub fn cell(&self, position: usize) -> Option<&DayCell> {
        self.grid.cell(position)
    }

    /// Snapshot of the persisted configuration
    pub fn state(&self) -> CalendarState {
        CalendarState {
            range: self.range,
            marks: self.grid.marks(),
            split_enabled: self.split_enabled,
        }
    }

    /// Validate `range` and issue a token for its generation.
    ///
    /// Rejected ranges leave the session untouched and never reach the
    /// lookup.
    pub fn begin_generation(&mut self, range: DateRange) -> Result<GenerationToken, CalendarError> {
        range.ensure_max_days(self.max_range_days)?;
        self.generation += 1;
        log::debug!(
            "Starting generation {} for {} to {}",
            self.generation,
            range.start(),
            range.end()
        );
        Ok(GenerationToken {
            id: self.generation,
            range,
        })
    }

    /// Install the result of a lookup started with `token`.
    ///
    /// On lookup failure the grid is cleared and the URL is left as it was.
    /// On success the marks currently in the URL are re-applied by position.
    pub fn complete_generation(
        &mut self,
        token: GenerationToken,
        lookup: Result<HebrewCalendar, CalendarError>,
    ) -> Result<(), CalendarError> {
        if token.id != self.generation {
            log::debug!(
                "Discarding generation {} (current is {})",
                token.id,
                self.generation
            );
            return Err(CalendarError::StaleGeneration(token.id));
        }

        let hebrew = match lookup {
            Ok(hebrew) => hebrew,
            Err(err) => {
                log::error!("Error fetching Hebrew dates: {}", err);
                self.grid = CalendarGrid::default();
                self.counts = MarkCounts::default();
                self.boundaries.clear();
                return Err(err);
            }
        };

        self.range = token.range;
        self.grid = GridBuilder::build(&self.range, &hebrew);
        let marks = UrlStateStore::read_marks(self.location.search(), self.grid.day_count());
        self.grid.apply_marks(&marks);
        self.resync();
        Ok(())
    }

    /// Begin, look up and complete a generation in one call
    pub async fn generate<C>(&mut self, range: DateRange, converter: &C) -> Result<(), CalendarError>
    where
        C: DateConverter + ?Sized,
    {
        let token = self.begin_generation(range)?;
        let lookup = converter.convert(&range).await;
        self.complete_generation(token, lookup)
    }

    /// Direct click on the day at `position`
    pub fn cycle(&mut self, position: usize) -> Result<(), CalendarError> {
        let count = self.grid.day_count();
        let cell = self
            .grid
            .cell_mut(position)
            .ok_or(CalendarError::PositionOutOfRange { position, count })?;
        cell.mark = cell.mark.cycled();
        log::debug!("Day {} ({}) is now {:?}", position, cell.date, cell.mark);
        self.resync();
        Ok(())
    }

    /// Turn every dot into the matching background fill
    pub fn fill_all(&mut self) {
        self.update_marks(mark::fill_all);
    }

    /// Clear every mark
    pub fn reset_all(&mut self) {
        self.update_marks(mark::reset_all);
    }

    pub fn set_split(&mut self, enabled: bool) {
        self.split_enabled = enabled;
        self.resync();
    }

    pub fn toggle_split(&mut self) {
        self.set_split(!self.split_enabled);
    }

    fn update_marks(&mut self, operation: impl FnOnce(&mut [mark::MarkState])) {
        let mut marks = self.grid.marks();
        operation(&mut marks);
        self.grid.apply_marks(&marks);
        self.resync();
    }

    fn resync(&mut self) {
        if self.grid.is_empty() {
            // Nothing rendered yet; keep whatever the URL already holds
            return;
        }

        let state = self.state();
        self.counts = MarkCounts::tally(&state.marks);
        UrlStateStore::persist(&mut self.location, &state);
        self.boundaries = SplitBoundaryDeriver::compute(&state.marks, state.split_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mark::MarkState;
    use crate::services::url_state::MemoryLocation;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2025, 6, 15)
    }

    fn generated(search: &str) -> CalendarSession<MemoryLocation> {
        let mut session = CalendarSession::load(MemoryLocation::new(search), 400, today()).unwrap();
        let token = session.begin_generation(session.range()).unwrap();
        session
            .complete_generation(token, Ok(HebrewCalendar::new()))
            .unwrap();
        session
    }

    #[test]
    fn test_load_defaults_to_current_month() {
        let session = CalendarSession::load(MemoryLocation::default(), 400, today()).unwrap();
        assert_eq!(session.range(), DateRange::month_of(today()));
        assert!(session.grid().is_empty());
        assert_eq!(session.location().search(), "");
    }

    #[test]
    fn test_generation_restores_marks_by_position() {
        let session = generated("startDate=2025-01-01&endDate=2025-01-03&marks=120");
        assert_eq!(
            session.state().marks,
            vec![MarkState::Blue, MarkState::Pink, MarkState::None]
        );
        assert_eq!(session.counts(), MarkCounts { blue: 1, pink: 1 });
    }

    #[test]
    fn test_cycle_persists_and_recounts() {
        let mut session = generated("startDate=2025-01-01&endDate=2025-01-03");
        session.cycle(2).unwrap();
        session.cycle(2).unwrap();
        session.cycle(0).unwrap();

        assert_eq!(session.counts(), MarkCounts { blue: 1, pink: 1 });
        assert_eq!(
            session.location().search(),
            "startDate=2025-01-01&endDate=2025-01-03&marks=102"
        );
        assert_eq!(session.location().history_len(), 1);
    }

    #[test]
    fn test_cycle_out_of_range() {
        let mut session = generated("startDate=2025-01-01&endDate=2025-01-03&marks=111");
        let err = session.cycle(3).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::PositionOutOfRange { position: 3, count: 3 }
        ));
        assert_eq!(session.counts().blue, 3);
    }

    #[test]
    fn test_fill_then_split() {
        let mut session = generated("startDate=2025-01-01&endDate=2025-01-04&marks=1220");
        session.fill_all();
        assert!(session.boundaries().is_empty());

        session.toggle_split();
        let positions = SplitBoundaryDeriver::positions(session.boundaries());
        assert_eq!(positions.into_iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            session.location().search(),
            "startDate=2025-01-01&endDate=2025-01-04&marks=3440&split"
        );

        session.cycle(0).unwrap();
        assert!(session.boundaries().is_empty());
    }

    #[test]
    fn test_reset_all() {
        let mut session = generated("startDate=2025-01-01&endDate=2025-01-03&marks=341&split");
        session.reset_all();
        assert_eq!(session.state().marks, vec![MarkState::None; 3]);
        assert_eq!(session.counts(), MarkCounts::default());
        assert!(session.boundaries().is_empty());
        assert!(session.split_enabled());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut session = generated("startDate=2025-01-01&endDate=2025-01-03&marks=12");
        let first = session
            .begin_generation(DateRange::new(ymd(2025, 2, 1), ymd(2025, 2, 28)).unwrap())
            .unwrap();
        let second = session
            .begin_generation(DateRange::new(ymd(2025, 3, 1), ymd(2025, 3, 5)).unwrap())
            .unwrap();

        let stale = session.complete_generation(first, Ok(HebrewCalendar::new()));
        assert!(matches!(stale, Err(CalendarError::StaleGeneration(id)) if id == first.id()));
        assert_eq!(session.grid().day_count(), 3);

        session
            .complete_generation(second, Ok(HebrewCalendar::new()))
            .unwrap();
        assert_eq!(session.grid().day_count(), 5);
        assert_eq!(
            session.location().search(),
            "startDate=2025-03-01&endDate=2025-03-05&marks=12000"
        );
    }

    #[test]
    fn test_lookup_failure_leaves_url_untouched() {
        let search = "startDate=2025-01-01&endDate=2025-01-03&marks=120";
        let mut session = generated(search);
        let token = session.begin_generation(session.range()).unwrap();
        let result = session.complete_generation(token, Err(CalendarError::Lookup("HTTP 503".into())));

        assert!(matches!(result, Err(CalendarError::Lookup(_))));
        assert!(session.grid().is_empty());
        assert_eq!(session.location().search(), search);

        // Mutations on an empty grid do not touch the URL either
        session.fill_all();
        assert_eq!(session.location().search(), search);
    }

    #[test]
    fn test_load_rejects_oversized_url_ranges() {
        let signed = MemoryLocation::new("startDate=-262000-01-01&endDate=%2B262000-12-31&marks=1");
        assert!(matches!(
            CalendarSession::load(signed, 1096, today()),
            Err(CalendarError::InvalidDate(_))
        ));

        let wide = MemoryLocation::new("startDate=0001-01-01&endDate=9999-12-31&marks=1");
        assert!(matches!(
            CalendarSession::load(wide, 1096, today()),
            Err(CalendarError::RangeTooLong { max: 1096, .. })
        ));
    }

    #[test]
    fn test_range_limit_rejected_before_lookup() {
        let mut session = CalendarSession::load(MemoryLocation::default(), 31, today()).unwrap();
        let long = DateRange::new(ymd(2025, 1, 1), ymd(2025, 3, 1)).unwrap();
        assert!(matches!(
            session.begin_generation(long),
            Err(CalendarError::RangeTooLong { .. })
        ));
    }
}
