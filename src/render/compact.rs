//! Compact text form
//!
//! One whitespace-separated token per event, `string:fret` pairs in ascending
//! string order. Chords are bracketed so a one-note chord stays a chord:
//!
//! ```text
//! 0:0 [2:2,3:0,4:0] 5:12
//! ```

use crate::error::TabError;
use crate::model::{EventKind, TabState};
use std::collections::BTreeMap;

/// One event recovered from compact text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactEvent {
    pub kind: EventKind,
    pub frets: BTreeMap<usize, u8>,
}

impl CompactEvent {
    pub fn strings(&self) -> Vec<usize> {
        self.frets.keys().copied().collect()
    }
}

pub fn to_compact(states: &[TabState]) -> String {
    states
        .iter()
        .map(|state| {
            let pairs = state
                .frets
                .iter()
                .map(|(string, fret)| format!("{}:{}", string, fret))
                .collect::<Vec<_>>()
                .join(",");
            match state.kind {
                EventKind::Chord => format!("[{}]", pairs),
                EventKind::Note => pairs,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse text produced by [`to_compact`].
///
/// `position` in a returned [`TabError::ParseError`] is the 0-based token index.
///
/// ```
/// use tabsynth::parse_compact;
///
/// let events = parse_compact("0:0 [2:2,3:0,4:0]").unwrap();
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].strings(), vec![2, 3, 4]);
/// assert_eq!(events[1].frets[&2], 2);
/// ```
pub fn parse_compact(text: &str) -> Result<Vec<CompactEvent>, TabError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| parse_token(position, token))
        .collect()
}

fn parse_token(position: usize, token: &str) -> Result<CompactEvent, TabError> {
    let error = |message: String| TabError::ParseError { position, message };

    let (kind, body) = match token.strip_prefix('[') {
        Some(rest) => {
            let inner = rest
                .strip_suffix(']')
                .ok_or_else(|| error(format!("unterminated chord '{}'", token)))?;
            (EventKind::Chord, inner)
        }
        None => (EventKind::Note, token),
    };

    let mut frets = BTreeMap::new();
    for pair in body.split(',') {
        let (string, fret) = pair
            .split_once(':')
            .ok_or_else(|| error(format!("expected string:fret, got '{}'", pair)))?;
        let string: usize = string
            .parse()
            .map_err(|_| error(format!("invalid string index '{}'", string)))?;
        let fret: u8 = fret
            .parse()
            .map_err(|_| error(format!("invalid fret '{}'", fret)))?;
        if frets.insert(string, fret).is_some() {
            return Err(error(format!("string {} used twice", string)));
        }
    }

    if kind == EventKind::Note && frets.len() != 1 {
        return Err(error(format!("note token '{}' must hold exactly one pair", token)));
    }
    Ok(CompactEvent { kind, frets })
}
