// Property-based tests for the mark codec, state machine and split deriver
// Exercises the positional contract with random mark sequences

use proptest::prelude::*;

use dual_calendar::models::mark::{fill_all, reset_all, MarkCounts, MarkState};
use dual_calendar::services::codec::MarkCodec;
use dual_calendar::services::split::SplitBoundaryDeriver;

fn mark_state() -> impl Strategy<Value = MarkState> {
    prop::sample::select(MarkState::ALL.to_vec())
}

fn marks(max_len: usize) -> impl Strategy<Value = Vec<MarkState>> {
    prop::collection::vec(mark_state(), 0..max_len)
}

proptest! {
    /// Property: decoding an encoding gives back the original sequence
    #[test]
    fn prop_round_trip(seq in marks(400)) {
        let encoded = MarkCodec::encode(&seq);
        prop_assert_eq!(encoded.chars().count(), seq.len());
        prop_assert_eq!(MarkCodec::decode(&encoded, seq.len()), seq);
    }

    /// Property: decode always yields `count` marks, whatever the input
    #[test]
    fn prop_decode_is_total(input in ".{0,64}", count in 0usize..128) {
        let decoded = MarkCodec::decode(&input, count);
        prop_assert_eq!(decoded.len(), count);
    }

    /// Property: a truncated encoding decodes to the prefix padded with None
    #[test]
    fn prop_truncated_encoding_pads(seq in marks(100), cut in 0usize..100) {
        let cut = cut.min(seq.len());
        let encoded = MarkCodec::encode(&seq[..cut]);
        let decoded = MarkCodec::decode(&encoded, seq.len());
        prop_assert_eq!(&decoded[..cut], &seq[..cut]);
        prop_assert!(decoded[cut..].iter().all(|mark| *mark == MarkState::None));
    }

    /// Property: every state returns to None within three clicks
    #[test]
    fn prop_cycle_reaches_none(state in mark_state()) {
        let mut current = state;
        let mut clicks = 0;
        while current != MarkState::None {
            current = current.cycled();
            clicks += 1;
            prop_assert!(clicks <= 2);
        }
    }

    /// Property: fill-all keeps colour counts and leaves no dots
    #[test]
    fn prop_fill_all_preserves_counts(seq in marks(200)) {
        let mut filled = seq.clone();
        fill_all(&mut filled);
        prop_assert_eq!(MarkCounts::tally(&filled), MarkCounts::tally(&seq));
        prop_assert!(filled.iter().all(|mark| !mark.is_marked() || mark.is_fill()));
    }

    /// Property: reset-all clears everything and keeps the length
    #[test]
    fn prop_reset_all(seq in marks(200)) {
        let mut reset = seq.clone();
        reset_all(&mut reset);
        prop_assert_eq!(reset.len(), seq.len());
        prop_assert_eq!(MarkCounts::tally(&reset), MarkCounts::default());
    }

    /// Property: every flagged position sits between two different fills
    #[test]
    fn prop_split_positions_are_fill_changes(seq in marks(200)) {
        let boundaries = SplitBoundaryDeriver::compute(&seq, true);
        for boundary in &boundaries {
            let (previous, current) = (seq[boundary.position - 1], seq[boundary.position]);
            prop_assert!(previous.is_fill() && current.is_fill());
            prop_assert_ne!(previous, current);
        }
        let expected = seq
            .windows(2)
            .filter(|pair| pair[0].is_fill() && pair[1].is_fill() && pair[0] != pair[1])
            .count();
        prop_assert_eq!(boundaries.len(), expected);
        prop_assert!(SplitBoundaryDeriver::compute(&seq, false).is_empty());
    }
}
