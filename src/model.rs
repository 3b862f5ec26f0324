//! Event and tablature data types
//!
//! Input events (notes and chords with timing) and the per-event
//! [`TabState`] records the engine produces.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single sounding pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch_hz: f64,
    pub start: f64,
    pub duration: f64,
}

/// Several pitches sounding together. Duplicate pitches are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEvent {
    pub pitches_hz: Vec<f64>,
    pub start: f64,
    pub duration: f64,
}

/// A timed musical event, tagged `"note"` or `"chord"` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Note(NoteEvent),
    Chord(ChordEvent),
}

impl Event {
    pub fn note(pitch_hz: f64, start: f64, duration: f64) -> Self {
        Event::Note(NoteEvent {
            pitch_hz,
            start,
            duration,
        })
    }

    pub fn chord(pitches_hz: Vec<f64>, start: f64, duration: f64) -> Self {
        Event::Chord(ChordEvent {
            pitches_hz,
            start,
            duration,
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Note(_) => EventKind::Note,
            Event::Chord(_) => EventKind::Chord,
        }
    }

    /// All pitches of the event, in input order.
    pub fn pitches(&self) -> Vec<f64> {
        match self {
            Event::Note(note) => vec![note.pitch_hz],
            Event::Chord(chord) => chord.pitches_hz.clone(),
        }
    }

    pub fn start(&self) -> f64 {
        match self {
            Event::Note(note) => note.start,
            Event::Chord(chord) => chord.start,
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            Event::Note(note) => note.duration,
            Event::Chord(chord) => chord.duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Note,
    Chord,
}

/// One pitch placed on one string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretAssignment {
    pub string_index: usize,
    pub fret: u8,
    /// Signed deviation of the target pitch from the fretted pitch.
    pub cents_error: f64,
}

/// The fretting decision for one event.
///
/// # Fields
/// - `index`: 0-based position of the event within one synthesis call
/// - `strings`: string indices in use, ascending (0 = lowest string)
/// - `frets`: string index -> fret; serialized with decimal string keys
/// - `mean_fret` / `min_fret` / `max_fret`: computed from `frets`, open strings included
/// - `requires_barre`: some fret above 0 is shared by two or more strings
/// - `chord_id`: present only for chord events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabState {
    pub index: usize,
    pub start: f64,
    pub duration: f64,
    pub kind: EventKind,
    pub strings: Vec<usize>,
    pub frets: BTreeMap<usize, u8>,
    pub mean_fret: f64,
    pub min_fret: u8,
    pub max_fret: u8,
    pub requires_barre: bool,
    pub chord_id: Option<String>,
}
