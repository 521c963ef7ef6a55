// Mark module
// Per-day mark states and the transitions driven by user interaction

use serde::{Deserialize, Serialize};

/// Annotation attached to a single day cell.
///
/// `Blue` and `Pink` render as dots; `BlueFill` and `PinkFill` render as a
/// solid cell background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkState {
    #[default]
    None,
    Blue,
    Pink,
    BlueFill,
    PinkFill,
}

/// Colour family of a mark, shared by the dot and fill variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkColor {
    Blue,
    Pink,
}

/// Visual overlay a renderer applies to a cell for its mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "snake_case")]
pub enum CellOverlay {
    Empty,
    Dot(MarkColor),
    Background(MarkColor),
}

impl MarkState {
    pub const ALL: [MarkState; 5] = [
        MarkState::None,
        MarkState::Blue,
        MarkState::Pink,
        MarkState::BlueFill,
        MarkState::PinkFill,
    ];

    /// Single-character code used in the URL encoding
    pub fn code(self) -> char {
        match self {
            MarkState::None => '0',
            MarkState::Blue => '1',
            MarkState::Pink => '2',
            MarkState::BlueFill => '3',
            MarkState::PinkFill => '4',
        }
    }

    /// Inverse of [`MarkState::code`]; `None` for characters outside the alphabet
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(MarkState::None),
            '1' => Some(MarkState::Blue),
            '2' => Some(MarkState::Pink),
            '3' => Some(MarkState::BlueFill),
            '4' => Some(MarkState::PinkFill),
            _ => None,
        }
    }

    /// State after a direct click on the cell.
    ///
    /// Dots cycle `None -> Blue -> Pink -> None`. A filled cell moves on to
    /// the state after its own dot colour, so `BlueFill -> Pink` and
    /// `PinkFill -> None`.
    pub fn cycled(self) -> Self {
        match self {
            MarkState::None => MarkState::Blue,
            MarkState::Blue | MarkState::BlueFill => MarkState::Pink,
            MarkState::Pink | MarkState::PinkFill => MarkState::None,
        }
    }

    /// State after the "fill squares" bulk operation
    pub fn filled(self) -> Self {
        match self {
            MarkState::Blue => MarkState::BlueFill,
            MarkState::Pink => MarkState::PinkFill,
            other => other,
        }
    }

    pub fn is_fill(self) -> bool {
        matches!(self, MarkState::BlueFill | MarkState::PinkFill)
    }

    pub fn is_marked(self) -> bool {
        self != MarkState::None
    }

    pub fn color(self) -> Option<MarkColor> {
        match self {
            MarkState::None => None,
            MarkState::Blue | MarkState::BlueFill => Some(MarkColor::Blue),
            MarkState::Pink | MarkState::PinkFill => Some(MarkColor::Pink),
        }
    }

    pub fn overlay(self) -> CellOverlay {
        match (self.color(), self.is_fill()) {
            (None, _) => CellOverlay::Empty,
            (Some(color), false) => CellOverlay::Dot(color),
            (Some(color), true) => CellOverlay::Background(color),
        }
    }
}

/// Apply the "fill squares" operation to every cell
pub fn fill_all(marks: &mut [MarkState]) {
    for mark in marks.iter_mut() {
        *mark = mark.filled();
    }
}

/// Clear every cell unconditionally
pub fn reset_all(marks: &mut [MarkState]) {
    marks.fill(MarkState::None);
}

/// Aggregate counters shown next to the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkCounts {
    pub blue: usize,
    pub pink: usize,
}

impl MarkCounts {
    /// Recount from scratch; dots and fills of the same colour count together
    pub fn tally(marks: &[MarkState]) -> Self {
        marks
            .iter()
            .fold(MarkCounts::default(), |mut counts, mark| {
                match mark.color() {
                    Some(MarkColor::Blue) => counts.blue += 1,
                    Some(MarkColor::Pink) => counts.pink += 1,
                    None => {}
                }
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(MarkState::None, MarkState::Blue ; "none becomes blue")]
    #[test_case(MarkState::Blue, MarkState::Pink ; "blue becomes pink")]
    #[test_case(MarkState::Pink, MarkState::None ; "pink becomes none")]
    #[test_case(MarkState::BlueFill, MarkState::Pink ; "blue fill skips to pink")]
    #[test_case(MarkState::PinkFill, MarkState::None ; "pink fill skips to none")]
    fn test_cycle_transition(from: MarkState, to: MarkState) {
        assert_eq!(from.cycled(), to);
    }

    #[test]
    fn test_three_cycles_return_to_none() {
        let state = MarkState::None.cycled().cycled().cycled();
        assert_eq!(state, MarkState::None);
    }

    #[test]
    fn test_cycling_never_reaches_a_fill_state() {
        for start in MarkState::ALL {
            assert!(!start.cycled().is_fill(), "{:?} cycled into a fill", start);
        }
    }

    #[test]
    fn test_fill_all() {
        let mut marks = vec![
            MarkState::Blue,
            MarkState::Pink,
            MarkState::None,
            MarkState::BlueFill,
        ];
        fill_all(&mut marks);
        assert_eq!(
            marks,
            vec![
                MarkState::BlueFill,
                MarkState::PinkFill,
                MarkState::None,
                MarkState::BlueFill,
            ]
        );
    }

    #[test]
    fn test_reset_all() {
        let mut marks = vec![MarkState::PinkFill, MarkState::Blue, MarkState::None];
        reset_all(&mut marks);
        assert_eq!(marks, vec![MarkState::None; 3]);
    }

    #[test]
    fn test_counts_include_fills() {
        let marks = [
            MarkState::Blue,
            MarkState::BlueFill,
            MarkState::Pink,
            MarkState::None,
            MarkState::PinkFill,
        ];
        assert_eq!(MarkCounts::tally(&marks), MarkCounts { blue: 2, pink: 2 });
    }

    #[test]
    fn test_code_round_trip() {
        for state in MarkState::ALL {
            assert_eq!(MarkState::from_code(state.code()), Some(state));
        }
        assert_eq!(MarkState::from_code('5'), None);
        assert_eq!(MarkState::from_code('x'), None);
    }

    #[test]
    fn test_overlay() {
        assert_eq!(MarkState::None.overlay(), CellOverlay::Empty);
        assert_eq!(MarkState::Pink.overlay(), CellOverlay::Dot(MarkColor::Pink));
        assert_eq!(
            MarkState::BlueFill.overlay(),
            CellOverlay::Background(MarkColor::Blue)
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&MarkState::BlueFill).unwrap();
        assert_eq!(json, "\"blue_fill\"");
        let parsed: MarkState = serde_json::from_str("\"pink\"").unwrap();
        assert_eq!(parsed, MarkState::Pink);
    }
}
