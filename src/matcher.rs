//! # Pitch Matcher
//!
//! Finds where a target pitch can be fretted on each string.
//!
//! For one string the unrounded fret position is
//!
//! ```text
//! f = 12 * log2(target / open_string)
//! ```
//!
//! Positions more than half a fret outside `[0, max_fret]` never match. Otherwise the
//! nearest fret is taken and the deviation of the target from that fretted pitch,
//! in cents, must be within the tolerance.
//!
//! [`candidates`] collects the matches across all strings in a fixed order
//! (smallest absolute deviation, then lowest fret, then lowest string index). The
//! solver walks candidates in exactly this order, so the order determines which of
//! several equally good fingerings is reported.

use std::cmp::Ordering;

/// A string on which a target pitch can be fretted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub string_index: usize,
    pub fret: u8,
    pub cents_error: f64,
}

/// Deviation between two frequencies in cents (positive = `freq` is sharp).
pub fn cents_between(freq: f64, reference: f64) -> f64 {
    1200.0 * (freq / reference).log2()
}

/// Frequency of `fret` on a string whose open pitch is `string_frequency`.
pub fn fretted_frequency(string_frequency: f64, fret: u8) -> f64 {
    string_frequency * 2.0_f64.powf(fret as f64 / 12.0)
}

/// Nearest fret for `target` on one string, with its signed cents error.
///
/// # Returns
/// * `Some((fret, cents_error))` - the target is playable on this string
/// * `None` - out of the string's range or outside the tolerance
///
/// # Example
/// ```
/// use tabsynth::matcher::match_on_string;
///
/// // A3 (220 Hz) on the A2 string is the 12th fret
/// let (fret, cents) = match_on_string(220.0, 110.0, 15, 50.0).unwrap();
/// assert_eq!(fret, 12);
/// assert!(cents.abs() < 1e-9);
///
/// // Beyond the 5th fret limit
/// assert_eq!(match_on_string(220.0, 110.0, 5, 50.0), None);
/// ```
pub fn match_on_string(
    target_pitch: f64,
    string_frequency: f64,
    max_fret: u8,
    tolerance_cents: f64,
) -> Option<(u8, f64)> {
    let position = 12.0 * (target_pitch / string_frequency).log2();
    if !position.is_finite() || position < -0.5 || position > max_fret as f64 + 0.5 {
        return None;
    }

    let fret = position.round().clamp(0.0, max_fret as f64) as u8;
    let cents_error = cents_between(target_pitch, fretted_frequency(string_frequency, fret));

    if cents_error.abs() <= tolerance_cents {
        Some((fret, cents_error))
    } else {
        None
    }
}

/// Every string on which `target_pitch` matches, best first.
pub fn candidates(
    target_pitch: f64,
    string_frequencies: &[f64],
    max_fret: u8,
    tolerance_cents: f64,
) -> Vec<Candidate> {
    let mut found: Vec<Candidate> = string_frequencies
        .iter()
        .enumerate()
        .filter_map(|(string_index, &string_frequency)| {
            match_on_string(target_pitch, string_frequency, max_fret, tolerance_cents).map(
                |(fret, cents_error)| Candidate {
                    string_index,
                    fret,
                    cents_error,
                },
            )
        })
        .collect();
    found.sort_by(compare_candidates);
    found
}

/// Absolute cents error in millionths of a cent. Errors that differ only by
/// floating-point noise compare equal and fall through to the fret tie-break.
fn error_key(candidate: &Candidate) -> i64 {
    (candidate.cents_error.abs() * 1e6).round() as i64
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    error_key(a)
        .cmp(&error_key(b))
        .then(a.fret.cmp(&b.fret))
        .then(a.string_index.cmp(&b.string_index))
}
