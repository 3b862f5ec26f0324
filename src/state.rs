//! Tab state construction
//!
//! Turns one event and its resolved fret assignments into a [`TabState`].

use crate::error::TabError;
use crate::model::{Event, EventKind, FretAssignment, TabState};
use std::collections::BTreeMap;

/// Build the tab state for the event at `index`.
///
/// Fails with [`TabError::Internal`] if the assignments are empty or reuse a
/// string; the solver never produces either.
pub fn build_state(
    index: usize,
    event: &Event,
    assignments: &[FretAssignment],
) -> Result<TabState, TabError> {
    let mut frets = BTreeMap::new();
    for assignment in assignments {
        if frets.insert(assignment.string_index, assignment.fret).is_some() {
            return Err(TabError::Internal(format!(
                "event {} assigns string {} more than once",
                index, assignment.string_index
            )));
        }
    }

    let (min_fret, max_fret) = match (frets.values().min(), frets.values().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => {
            return Err(TabError::Internal(format!(
                "event {} has no fret assignments",
                index
            )))
        }
    };
    let total: u32 = frets.values().map(|&f| f as u32).sum();
    let mean_fret = total as f64 / frets.len() as f64;

    let kind = event.kind();
    let chord_id = match kind {
        EventKind::Chord => Some(format!("chord-{}", index)),
        EventKind::Note => None,
    };

    Ok(TabState {
        index,
        start: event.start(),
        duration: event.duration(),
        kind,
        strings: frets.keys().copied().collect(),
        requires_barre: requires_barre(&frets),
        frets,
        mean_fret,
        min_fret,
        max_fret,
        chord_id,
    })
}

/// True when some fret above the nut is held on two or more strings.
pub fn requires_barre(frets: &BTreeMap<usize, u8>) -> bool {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for &fret in frets.values().filter(|&&f| f > 0) {
        *counts.entry(fret).or_default() += 1;
    }
    counts.values().any(|&count| count >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(string_index: usize, fret: u8) -> FretAssignment {
        FretAssignment {
            string_index,
            fret,
            cents_error: 0.0,
        }
    }

    #[test]
    fn test_note_state() {
        let event = Event::note(110.0, 1.5, 0.25);
        let state = build_state(7, &event, &[at(1, 0)]).unwrap();
        assert_eq!(state.index, 7);
        assert_eq!(state.start, 1.5);
        assert_eq!(state.duration, 0.25);
        assert_eq!(state.kind, EventKind::Note);
        assert_eq!(state.strings, vec![1]);
        assert_eq!(state.mean_fret, 0.0);
        assert!(!state.requires_barre);
        assert_eq!(state.chord_id, None);
    }

    #[test]
    fn test_chord_statistics_and_sorted_strings() {
        let event = Event::chord(vec![0.0; 3], 0.0, 1.0);
        let state = build_state(2, &event, &[at(4, 0), at(2, 2), at(3, 1)]).unwrap();
        assert_eq!(state.strings, vec![2, 3, 4]);
        assert_eq!(state.min_fret, 0);
        assert_eq!(state.max_fret, 2);
        assert_eq!(state.mean_fret, 1.0);
        assert_eq!(state.chord_id.as_deref(), Some("chord-2"));
    }

    #[test]
    fn test_barre_detection() {
        let mut frets = BTreeMap::new();
        frets.insert(0, 3);
        frets.insert(5, 3);
        assert!(requires_barre(&frets));

        // Shared open strings never need a barre
        let mut open = BTreeMap::new();
        open.insert(3, 0);
        open.insert(4, 0);
        open.insert(1, 2);
        assert!(!requires_barre(&open));

        let mut single = BTreeMap::new();
        single.insert(2, 7);
        assert!(!requires_barre(&single));
    }

    #[test]
    fn test_reused_string_is_internal_error() {
        let event = Event::chord(vec![0.0; 2], 0.0, 1.0);
        let err = build_state(0, &event, &[at(1, 2), at(1, 4)]).unwrap_err();
        assert!(matches!(err, TabError::Internal(_)));
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_empty_assignment_is_internal_error() {
        let event = Event::note(110.0, 0.0, 1.0);
        assert!(matches!(
            build_state(0, &event, &[]),
            Err(TabError::Internal(_))
        ));
    }
}
