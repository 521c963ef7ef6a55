// Split-boundary deriver
// Flags days where two different background fills meet

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::mark::{MarkColor, MarkState};

/// A day drawn half in the previous day's fill and half in its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBoundary {
    pub position: usize,
    pub previous: MarkColor,
    pub current: MarkColor,
}

pub struct SplitBoundaryDeriver;

impl SplitBoundaryDeriver {
    /// Recompute every boundary over the ordered marks.
    ///
    /// Position `i` is flagged iff days `i - 1` and `i` are both fills and
    /// differ. Nothing is flagged while the split view is disabled.
    pub fn compute(marks: &[MarkState], enabled: bool) -> Vec<SplitBoundary> {
        if !enabled {
            return Vec::new();
        }

        marks
            .windows(2)
            .enumerate()
            .filter_map(|(index, pair)| {
                let (previous, current) = (pair[0], pair[1]);
                if !(previous.is_fill() && current.is_fill()) || previous == current {
                    return None;
                }
                Some(SplitBoundary {
                    position: index + 1,
                    previous: previous.color()?,
                    current: current.color()?,
                })
            })
            .collect()
    }

    pub fn positions(boundaries: &[SplitBoundary]) -> BTreeSet<usize> {
        boundaries.iter().map(|boundary| boundary.position).collect()
    }
}
