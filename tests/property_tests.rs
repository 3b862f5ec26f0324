//! Property-based tests for the synthesis engine using proptest.
//!
//! Events are generated around the fretboard of a standard-tuned guitar, some
//! of them detuned far enough to fall outside the tolerance, so every property
//! sees both playable and unplayable input.

use proptest::prelude::*;
use std::cmp::Ordering;
use tabsynth::matcher::{candidates, cents_between, fretted_frequency, Candidate};
use tabsynth::solver::assign;
use tabsynth::tuning::STANDARD_TUNING_HZ;
use tabsynth::{synthesize, Event, EventKind, SynthesisOptions, TabError, TabState};

fn standard_frequencies() -> Vec<f64> {
    STANDARD_TUNING_HZ.iter().map(|(_, f)| *f).collect()
}

// ============================================================================
// Strategies
// ============================================================================

/// A pitch near some fret of some string, up to 80 cents off.
fn fretboard_pitch() -> impl Strategy<Value = f64> {
    (0usize..6, 0u8..=20, -80.0f64..80.0).prop_map(|(string, fret, detune)| {
        let open = STANDARD_TUNING_HZ[string].1;
        open * 2.0_f64.powf((fret as f64 + detune / 100.0) / 12.0)
    })
}

fn chord_pitches() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(fretboard_pitch(), 1..=6)
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (fretboard_pitch(), 0.0f64..10.0, 0.05f64..2.0)
            .prop_map(|(pitch, start, duration)| Event::note(pitch, start, duration)),
        (chord_pitches(), 0.0f64..10.0, 0.05f64..2.0)
            .prop_map(|(pitches, start, duration)| Event::chord(pitches, start, duration)),
    ]
}

fn events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(event(), 1..8)
}

fn options() -> impl Strategy<Value = SynthesisOptions> {
    (0u8..=24, 0.0f64..=100.0, 0u8..=12).prop_map(|(max_fret, tolerance, capo)| {
        SynthesisOptions::default()
            .with_max_fret(max_fret)
            .with_tolerance(tolerance)
            .with_capo(capo)
    })
}

/// Two tolerances, lower first.
fn tolerance_pair() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..=100.0, 0.0f64..=100.0).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

// ============================================================================
// Exhaustive reference search
// ============================================================================

fn approx_cmp(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= 1e-9 {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

fn cost_cmp(a: &[Candidate], b: &[Candidate]) -> Ordering {
    let span = |c: &[Candidate]| {
        let max = c.iter().map(|x| x.fret).max().unwrap_or(0);
        let min = c.iter().map(|x| x.fret).min().unwrap_or(0);
        max - min
    };
    let cents = |c: &[Candidate]| c.iter().map(|x| x.cents_error.abs()).sum::<f64>();
    let mean = |c: &[Candidate]| c.iter().map(|x| x.fret as f64).sum::<f64>() / c.len() as f64;
    let strings = |c: &[Candidate]| c.iter().map(|x| x.string_index).collect::<Vec<_>>();

    span(a)
        .cmp(&span(b))
        .then_with(|| approx_cmp(cents(a), cents(b)))
        .then_with(|| approx_cmp(mean(a), mean(b)))
        .then_with(|| strings(a).cmp(&strings(b)))
}

/// Every assignment of pitches to distinct strings, no pruning.
fn enumerate(
    per_pitch: &[Vec<Candidate>],
    current: &mut Vec<Candidate>,
    best: &mut Option<Vec<Candidate>>,
) {
    if current.len() == per_pitch.len() {
        let better = match best {
            Some(best) => cost_cmp(current, best) == Ordering::Less,
            None => true,
        };
        if better {
            *best = Some(current.clone());
        }
        return;
    }
    for candidate in &per_pitch[current.len()] {
        if current.iter().any(|c| c.string_index == candidate.string_index) {
            continue;
        }
        current.push(*candidate);
        enumerate(per_pitch, current, best);
        current.pop();
    }
}

fn exhaustive_best(
    pitches: &[f64],
    strings: &[f64],
    max_fret: u8,
    tolerance: f64,
) -> Option<Vec<(usize, u8)>> {
    let per_pitch: Vec<Vec<Candidate>> = pitches
        .iter()
        .map(|&p| candidates(p, strings, max_fret, tolerance))
        .collect();
    let mut best = None;
    enumerate(&per_pitch, &mut Vec::new(), &mut best);
    best.map(|chosen| chosen.iter().map(|c| (c.string_index, c.fret)).collect())
}

fn check_state(
    state: &TabState,
    index: usize,
    event: &Event,
    options: &SynthesisOptions,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.index, index);
    prop_assert_eq!(state.kind, event.kind());
    prop_assert_eq!(state.start, event.start());
    prop_assert_eq!(state.duration, event.duration());
    prop_assert_eq!(state.strings.len(), event.pitches().len());

    let keys: Vec<usize> = state.frets.keys().copied().collect();
    prop_assert_eq!(&keys, &state.strings);
    prop_assert!(state.strings.windows(2).all(|w| w[0] < w[1]));
    prop_assert!(state.strings.iter().all(|&s| s < 6));

    let values: Vec<u8> = state.frets.values().copied().collect();
    prop_assert!(values.iter().all(|&f| f <= options.max_fret));
    prop_assert_eq!(Some(state.min_fret), values.iter().copied().min());
    prop_assert_eq!(Some(state.max_fret), values.iter().copied().max());
    prop_assert!(state.min_fret as f64 <= state.mean_fret + 1e-9);
    prop_assert!(state.mean_fret <= state.max_fret as f64 + 1e-9);

    let shared_nonzero = values
        .iter()
        .any(|&f| f > 0 && values.iter().filter(|&&g| g == f).count() >= 2);
    prop_assert_eq!(state.requires_barre, shared_nonzero);
    prop_assert_eq!(state.chord_id.is_some(), state.kind == EventKind::Chord);
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The pruned solver returns the same assignment as a full search.
    #[test]
    fn solver_matches_exhaustive_search(
        pitches in chord_pitches(),
        max_fret in 0u8..=24,
        tolerance in 0.0f64..=100.0,
    ) {
        let strings = standard_frequencies();
        let expected = exhaustive_best(&pitches, &strings, max_fret, tolerance);
        let actual = assign(0, &pitches, &strings, max_fret, tolerance)
            .ok()
            .map(|a| a.iter().map(|x| (x.string_index, x.fret)).collect::<Vec<_>>());
        prop_assert_eq!(actual, expected);
    }

    /// Every assignment the solver makes is within the tolerance.
    #[test]
    fn assignments_within_tolerance(pitches in chord_pitches(), tolerance in 0.0f64..=100.0) {
        let strings = standard_frequencies();
        if let Ok(assignments) = assign(0, &pitches, &strings, 15, tolerance) {
            for (pitch, a) in pitches.iter().zip(&assignments) {
                let cents = cents_between(*pitch, fretted_frequency(strings[a.string_index], a.fret));
                prop_assert!(cents.abs() <= tolerance + 1e-9);
                prop_assert!((cents - a.cents_error).abs() < 1e-9);
            }
        }
    }

    /// Successful synthesis yields one well-formed state per event.
    #[test]
    fn states_are_well_formed(events in events(), options in options()) {
        if let Ok(states) = synthesize(&events, &options) {
            prop_assert_eq!(states.len(), events.len());
            for (index, (state, event)) in states.iter().zip(&events).enumerate() {
                check_state(state, index, event, &options)?;
            }
        }
    }

    /// Failures are always caller errors, never internal ones.
    #[test]
    fn failures_are_caller_errors(events in events(), options in options()) {
        if let Err(e) = synthesize(&events, &options) {
            prop_assert!(e.is_caller_error(), "{:?}", e);
            let is_unplayable_in_range = matches!(e, TabError::UnplayableEvent { index, .. } if index < events.len());
            prop_assert!(is_unplayable_in_range);
        }
    }

    /// Identical input gives identical output.
    #[test]
    fn synthesis_is_deterministic(events in events(), options in options()) {
        let first = synthesize(&events, &options);
        let second = synthesize(&events, &options);
        prop_assert_eq!(first, second);
    }

    /// Raising the tolerance never makes a playable sequence unplayable.
    #[test]
    fn tolerance_is_monotonic(events in events(), (low, high) in tolerance_pair()) {
        let at_low = synthesize(&events, &SynthesisOptions::default().with_tolerance(low));
        let at_high = synthesize(&events, &SynthesisOptions::default().with_tolerance(high));
        prop_assert!(at_low.is_err() || at_high.is_ok(), "{} -> {} cents", low, high);
    }
}
