// Mark codec
// Positional one-character-per-day encoding of mark states

use crate::models::mark::MarkState;

/// Converts mark sequences to and from the `marks` query value.
///
/// The string carries no dates: character `i` is the mark of day position
/// `i`, so it only means something against the same regenerated range.
pub struct MarkCodec;

impl MarkCodec {
    /// One character per cell, in position order
    pub fn encode(marks: &[MarkState]) -> String {
        marks.iter().map(|mark| mark.code()).collect()
    }

    /// Decode exactly `count` marks.
    ///
    /// Never fails: characters past `count` are ignored, missing positions
    /// and characters outside the alphabet decode as `MarkState::None`.
    pub fn decode(encoded: &str, count: usize) -> Vec<MarkState> {
        let mut marks: Vec<MarkState> = encoded
            .chars()
            .take(count)
            .map(|code| MarkState::from_code(code).unwrap_or_default())
            .collect();
        marks.resize(count, MarkState::None);
        marks
    }
}
