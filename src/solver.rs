//! # Chord Assignment Solver
//!
//! Places the simultaneous pitches of one event on distinct strings.
//!
//! ## Cost
//! Every complete assignment is ranked by, in strict priority order:
//! 1. fret span (`max fret - min fret`)
//! 2. total absolute cents error
//! 3. mean fret
//! 4. the string index used by each pitch, in input order, compared lexicographically
//!
//! The last key is unique per assignment, so the minimum is always a single
//! assignment and the result never depends on search order.
//!
//! ## Search
//! A chord never has more pitches than strings, so an exhaustive backtracking
//! search over each pitch's candidates is cheap (at most `6!` leaves). Branches
//! whose partial span or partial cents total already exceed the best complete
//! assignment are pruned; both quantities can only grow as pitches are added.

use crate::error::TabError;
use crate::matcher::{candidates, Candidate};
use crate::model::FretAssignment;
use std::cmp::Ordering;

/// Floating-point costs closer than this are treated as equal.
const COST_EPSILON: f64 = 1e-9;

/// Assign every pitch of the event at `event_index` to its own string.
///
/// A single pitch takes its best candidate. Returned assignments follow the
/// order of `pitches`.
pub fn assign(
    event_index: usize,
    pitches: &[f64],
    string_frequencies: &[f64],
    max_fret: u8,
    tolerance_cents: f64,
) -> Result<Vec<FretAssignment>, TabError> {
    if pitches.len() > string_frequencies.len() {
        return Err(TabError::UnplayableEvent {
            index: event_index,
            pitches: pitches.to_vec(),
            reason: format!(
                "{} simultaneous pitches exceed the {} available strings",
                pitches.len(),
                string_frequencies.len()
            ),
        });
    }

    let per_pitch: Vec<Vec<Candidate>> = pitches
        .iter()
        .map(|&pitch| candidates(pitch, string_frequencies, max_fret, tolerance_cents))
        .collect();

    let unmatched: Vec<f64> = pitches
        .iter()
        .zip(&per_pitch)
        .filter(|(_, found)| found.is_empty())
        .map(|(&pitch, _)| pitch)
        .collect();
    if !unmatched.is_empty() {
        return Err(TabError::UnplayableEvent {
            index: event_index,
            pitches: unmatched,
            reason: format!(
                "no string within {} cents and {} frets",
                tolerance_cents, max_fret
            ),
        });
    }

    if let [only] = per_pitch.as_slice() {
        return Ok(vec![to_assignment(&only[0])]);
    }

    let mut search = Search::new(&per_pitch, string_frequencies.len());
    search.run(0);

    match search.best {
        Some((cost, chosen)) => {
            log::trace!(
                "event {}: span {} cents {:.3} mean {:.3} strings {:?}",
                event_index,
                cost.span,
                cost.cents,
                cost.mean,
                cost.strings
            );
            Ok(chosen.iter().map(to_assignment).collect())
        }
        None => Err(TabError::UnplayableEvent {
            index: event_index,
            pitches: pitches.to_vec(),
            reason: "pitches cannot be placed on distinct strings".to_string(),
        }),
    }
}

fn to_assignment(candidate: &Candidate) -> FretAssignment {
    FretAssignment {
        string_index: candidate.string_index,
        fret: candidate.fret,
        cents_error: candidate.cents_error,
    }
}

#[derive(Debug, Clone)]
struct Cost {
    span: u8,
    cents: f64,
    mean: f64,
    strings: Vec<usize>,
}

impl Cost {
    fn of(chosen: &[Candidate]) -> Self {
        let (min, max) = fret_range(chosen);
        let fret_total: u32 = chosen.iter().map(|c| c.fret as u32).sum();
        Cost {
            span: max - min,
            cents: chosen.iter().map(|c| c.cents_error.abs()).sum(),
            mean: fret_total as f64 / chosen.len() as f64,
            strings: chosen.iter().map(|c| c.string_index).collect(),
        }
    }

    fn compare(&self, other: &Cost) -> Ordering {
        self.span
            .cmp(&other.span)
            .then_with(|| compare_approx(self.cents, other.cents))
            .then_with(|| compare_approx(self.mean, other.mean))
            .then_with(|| self.strings.cmp(&other.strings))
    }
}

fn compare_approx(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= COST_EPSILON {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

fn fret_range(chosen: &[Candidate]) -> (u8, u8) {
    chosen.iter().fold((u8::MAX, u8::MIN), |(min, max), c| {
        (min.min(c.fret), max.max(c.fret))
    })
}

struct Search<'a> {
    per_pitch: &'a [Vec<Candidate>],
    used: Vec<bool>,
    current: Vec<Candidate>,
    best: Option<(Cost, Vec<Candidate>)>,
}

impl<'a> Search<'a> {
    fn new(per_pitch: &'a [Vec<Candidate>], string_count: usize) -> Self {
        Search {
            per_pitch,
            used: vec![false; string_count],
            current: Vec::with_capacity(per_pitch.len()),
            best: None,
        }
    }

    fn run(&mut self, depth: usize) {
        if depth == self.per_pitch.len() {
            let cost = Cost::of(&self.current);
            let better = match &self.best {
                Some((best, _)) => cost.compare(best) == Ordering::Less,
                None => true,
            };
            if better {
                self.best = Some((cost, self.current.clone()));
            }
            return;
        }

        let per_pitch = self.per_pitch;
        for candidate in &per_pitch[depth] {
            if self.used[candidate.string_index] {
                continue;
            }
            self.current.push(*candidate);
            if !self.exceeds_best() {
                self.used[candidate.string_index] = true;
                self.run(depth + 1);
                self.used[candidate.string_index] = false;
            }
            self.current.pop();
        }
    }

    /// Whether the partial assignment is already worse than the best complete one.
    fn exceeds_best(&self) -> bool {
        let Some((best, _)) = &self.best else {
            return false;
        };
        let (min, max) = fret_range(&self.current);
        let span = max - min;
        if span != best.span {
            return span > best.span;
        }
        let cents: f64 = self.current.iter().map(|c| c.cents_error.abs()).sum();
        compare_approx(cents, best.cents) == Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn standard() -> Vec<f64> {
        Tuning::standard().string_frequencies(0).unwrap()
    }

    fn placed(assignments: &[FretAssignment]) -> Vec<(usize, u8)> {
        assignments.iter().map(|a| (a.string_index, a.fret)).collect()
    }

    #[test]
    fn test_single_note_takes_first_candidate() {
        let result = assign(0, &[82.41], &standard(), 15, 50.0).unwrap();
        assert_eq!(placed(&result), vec![(0, 0)]);
    }

    #[test]
    fn test_e_minor_triad_prefers_compact_shape() {
        // E3, G3, B3: D string 2nd fret plus open G and B
        let result = assign(0, &[164.81, 196.0, 246.94], &standard(), 15, 50.0).unwrap();
        assert_eq!(placed(&result), vec![(2, 2), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_assignment_follows_pitch_order() {
        let result = assign(0, &[246.94, 164.81, 196.0], &standard(), 15, 50.0).unwrap();
        assert_eq!(placed(&result), vec![(4, 0), (2, 2), (3, 0)]);
    }

    #[test]
    fn test_duplicate_pitches_use_distinct_strings() {
        // Unison E4: G string 9th fret and B string 5th fret (span 4) beat the
        // open high E with the B string (span 5)
        let result = assign(0, &[329.63, 329.63], &standard(), 15, 50.0).unwrap();
        let mut strings: Vec<usize> = result.iter().map(|a| a.string_index).collect();
        strings.sort();
        strings.dedup();
        assert_eq!(strings.len(), 2);
        assert_eq!(placed(&result), vec![(3, 9), (4, 5)]);
    }

    #[test]
    fn test_too_many_pitches() {
        let pitches = [82.41, 110.0, 146.83, 196.0, 246.94, 329.63, 440.0];
        let err = assign(4, &pitches, &standard(), 24, 50.0).unwrap_err();
        match err {
            TabError::UnplayableEvent { index, pitches: reported, .. } => {
                assert_eq!(index, 4);
                assert_eq!(reported.len(), 7);
            }
            other => panic!("expected UnplayableEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_pitch_reported() {
        let err = assign(1, &[196.0, 5000.0], &standard(), 15, 50.0).unwrap_err();
        match err {
            TabError::UnplayableEvent { index, pitches, .. } => {
                assert_eq!(index, 1);
                assert_eq!(pitches, vec![5000.0]);
            }
            other => panic!("expected UnplayableEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_no_bijection() {
        // With only open strings allowed, two low Es share the single low E string
        let err = assign(0, &[82.41, 82.41], &standard(), 0, 50.0).unwrap_err();
        match err {
            TabError::UnplayableEvent { pitches, reason, .. } => {
                assert_eq!(pitches, vec![82.41, 82.41]);
                assert!(reason.contains("distinct strings"));
            }
            other => panic!("expected UnplayableEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_cents_break_span_ties() {
        // Both pitches can only sit at fret 0 (span 0 either way) on detuned
        // strings; the more accurate pairing wins.
        let strings = [100.0, 101.0, 1000.0, 1000.0, 1000.0, 1000.0];
        let result = assign(0, &[100.0, 101.0], &strings, 0, 50.0).unwrap();
        assert_eq!(placed(&result), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_string_tuple_breaks_final_ties() {
        // Two identical strings and two identical pitches: every cost key ties
        // except the string tuple, which prefers pitch 0 on the lower string.
        let strings = [110.0, 110.0, 1000.0, 1000.0, 1000.0, 1000.0];
        let result = assign(0, &[110.0, 110.0], &strings, 0, 50.0).unwrap();
        assert_eq!(placed(&result), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_full_six_string_chord() {
        // Open E major: E2 B2 E3 G#3 B3 E4
        let pitches = [82.41, 123.47, 164.81, 207.65, 246.94, 329.63];
        let result = assign(0, &pitches, &standard(), 15, 50.0).unwrap();
        assert_eq!(
            placed(&result),
            vec![(0, 0), (1, 2), (2, 2), (3, 1), (4, 0), (5, 0)]
        );
    }
}
