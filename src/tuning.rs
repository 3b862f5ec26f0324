//! # Tuning Model
//!
//! Open-string frequencies for a 6-string fretted instrument.
//!
//! ## Overview
//! A [`Tuning`] holds one label and one base frequency per string, index 0 being
//! the lowest-pitched string. The frequencies the matcher works with come from
//! [`Tuning::string_frequencies`], which raises every string by the capo offset:
//!
//! ```text
//! frequency[i] = base[i] * 2^(capo / 12)
//! ```
//!
//! ## Overrides
//! A [`TuningOverride`] replaces the base tuning before the capo is applied. It is
//! either a preset name (`"drop-d"`, `"dadgad"`, ...) or a list of six entries, each
//! a frequency in Hz or a note name in scientific pitch notation (`"E2"`, `"C#3"`,
//! `"Bb2"`). Overrides change both the matched frequencies and the labels.
//!
//! ## Example
//! ```rust
//! use tabsynth::Tuning;
//!
//! let tuning = Tuning::preset("drop-d")?;
//! assert_eq!(tuning.labels()[0], "D2");
//!
//! let freqs = Tuning::standard().string_frequencies(12)?;
//! assert!((freqs[0] - 164.82).abs() < 0.01);
//! # Ok::<(), tabsynth::TabError>(())
//! ```

use crate::error::TabError;
use serde::{Deserialize, Serialize};

/// Number of strings the engine models.
pub const STRING_COUNT: usize = 6;

/// Highest capo position accepted.
pub const MAX_CAPO: u8 = 12;

/// Standard concert tuning, lowest string first.
pub const STANDARD_TUNING_HZ: [(&str, f64); STRING_COUNT] = [
    ("E2", 82.41),
    ("A2", 110.00),
    ("D3", 146.83),
    ("G3", 196.00),
    ("B3", 246.94),
    ("E4", 329.63),
];

const PRESETS: [(&str, [&str; STRING_COUNT]); 8] = [
    ("drop-d", ["D2", "A2", "D3", "G3", "B3", "E4"]),
    ("double-drop-d", ["D2", "A2", "D3", "G3", "B3", "D4"]),
    ("open-d", ["D2", "A2", "D3", "F#3", "A3", "D4"]),
    ("open-g", ["D2", "G2", "D3", "G3", "B3", "D4"]),
    ("open-e", ["E2", "B2", "E3", "G#3", "B3", "E4"]),
    ("dadgad", ["D2", "A2", "D3", "G3", "A3", "D4"]),
    ("half-step-down", ["Eb2", "Ab2", "Db3", "Gb3", "Bb3", "Eb4"]),
    ("full-step-down", ["D2", "G2", "C3", "F3", "A3", "D4"]),
];

/// One open string.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenString {
    pub label: String,
    pub frequency: f64,
}

/// Base open-string pitches, lowest string first.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    strings: Vec<OpenString>,
}

/// One entry of a per-string override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringPitch {
    Frequency(f64),
    Name(String),
}

/// Replacement for the base tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TuningOverride {
    Preset(String),
    Strings(Vec<StringPitch>),
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

impl Tuning {
    pub fn standard() -> Self {
        Tuning {
            strings: STANDARD_TUNING_HZ
                .iter()
                .map(|(label, frequency)| OpenString {
                    label: label.to_string(),
                    frequency: *frequency,
                })
                .collect(),
        }
    }

    /// Build a tuning from six open-string frequencies in Hz.
    ///
    /// Labels are the nearest equal-tempered note names.
    pub fn from_frequencies(frequencies: &[f64]) -> Result<Self, TabError> {
        check_string_count(frequencies.len())?;
        let strings = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency)| {
                check_frequency(i, frequency)?;
                Ok(OpenString {
                    label: nearest_note_name(frequency),
                    frequency,
                })
            })
            .collect::<Result<Vec<_>, TabError>>()?;
        Ok(Tuning { strings })
    }

    /// Build a tuning from six note names such as `["D2", "A2", "D3", "G3", "B3", "E4"]`.
    pub fn from_note_names<S: AsRef<str>>(names: &[S]) -> Result<Self, TabError> {
        check_string_count(names.len())?;
        let strings = names
            .iter()
            .enumerate()
            .map(|(i, name)| named_string(i, name.as_ref()))
            .collect::<Result<Vec<_>, TabError>>()?;
        Ok(Tuning { strings })
    }

    /// Look up a named tuning. `"standard"` returns [`Tuning::standard`].
    pub fn preset(name: &str) -> Result<Self, TabError> {
        let key = name.trim().to_ascii_lowercase().replace(|c: char| c == '_' || c == ' ', "-");
        if key == "standard" {
            return Ok(Tuning::standard());
        }
        match PRESETS.iter().find(|(preset, _)| *preset == key) {
            Some((_, names)) => Tuning::from_note_names(names),
            None => Err(TabError::ConfigurationError(format!(
                "unknown tuning preset '{}' (known: standard, {})",
                name,
                preset_names().join(", ")
            ))),
        }
    }

    /// Apply an optional override on top of this tuning.
    pub fn with_override(&self, tuning_override: Option<&TuningOverride>) -> Result<Self, TabError> {
        match tuning_override {
            None => Ok(self.clone()),
            Some(TuningOverride::Preset(name)) => Tuning::preset(name),
            Some(TuningOverride::Strings(entries)) => {
                check_string_count(entries.len())?;
                let strings = entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| match entry {
                        StringPitch::Frequency(frequency) => {
                            check_frequency(i, *frequency)?;
                            Ok(OpenString {
                                label: nearest_note_name(*frequency),
                                frequency: *frequency,
                            })
                        }
                        StringPitch::Name(name) => named_string(i, name),
                    })
                    .collect::<Result<Vec<_>, TabError>>()?;
                Ok(Tuning { strings })
            }
        }
    }

    pub fn strings(&self) -> &[OpenString] {
        &self.strings
    }

    pub fn labels(&self) -> Vec<String> {
        self.strings.iter().map(|s| s.label.clone()).collect()
    }

    /// Open-string frequencies with the capo applied, lowest string first.
    pub fn string_frequencies(&self, capo: u8) -> Result<Vec<f64>, TabError> {
        if capo > MAX_CAPO {
            return Err(TabError::ConfigurationError(format!(
                "capo must be between 0 and {}, got {}",
                MAX_CAPO, capo
            )));
        }
        let factor = 2.0_f64.powf(capo as f64 / 12.0);
        Ok(self.strings.iter().map(|s| s.frequency * factor).collect())
    }
}

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

fn check_string_count(count: usize) -> Result<(), TabError> {
    if count != STRING_COUNT {
        return Err(TabError::ConfigurationError(format!(
            "tuning must list exactly {} strings, got {}",
            STRING_COUNT, count
        )));
    }
    Ok(())
}

fn check_frequency(string_index: usize, frequency: f64) -> Result<(), TabError> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(TabError::ConfigurationError(format!(
            "string {} frequency must be a positive number, got {}",
            string_index, frequency
        )));
    }
    Ok(())
}

fn named_string(string_index: usize, name: &str) -> Result<OpenString, TabError> {
    let name = name.trim();
    let frequency = note_name_to_frequency(name)?;
    check_frequency(string_index, frequency)?;
    Ok(OpenString {
        label: name.to_string(),
        frequency,
    })
}

/// Semitone offset from C for a note letter.
fn letter_to_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Convert a note name in scientific pitch notation to its equal-tempered
/// frequency (A4 = 440 Hz). Octaves run from -1 to 9.
///
/// ```
/// use tabsynth::tuning::note_name_to_frequency;
///
/// assert_eq!(note_name_to_frequency("A4").unwrap(), 440.0);
/// assert!((note_name_to_frequency("E2").unwrap() - 82.41).abs() < 0.01);
/// assert!(note_name_to_frequency("H2").is_err());
/// assert!(note_name_to_frequency("C10").is_err());
/// ```
pub fn note_name_to_frequency(name: &str) -> Result<f64, TabError> {
    let midi = note_name_to_midi(name)?;
    Ok(440.0 * 2.0_f64.powf((midi - 69) as f64 / 12.0))
}

/// Octaves accepted in note names, matching the MIDI note range.
const OCTAVE_RANGE: std::ops::RangeInclusive<i32> = -1..=9;

fn note_name_to_midi(name: &str) -> Result<i32, TabError> {
    let invalid = || {
        TabError::ConfigurationError(format!(
            "invalid note name '{}' (expected e.g. E2, C#3, Bb2)",
            name
        ))
    };
    let name = name.trim();
    let mut chars = name.chars();
    let base = chars.next().and_then(letter_to_semitone).ok_or_else(invalid)?;
    let rest = chars.as_str();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave_str.parse().map_err(|_| invalid())?;
    if !OCTAVE_RANGE.contains(&octave) {
        return Err(TabError::ConfigurationError(format!(
            "note name '{}' is outside octaves {} to {}",
            name,
            OCTAVE_RANGE.start(),
            OCTAVE_RANGE.end()
        )));
    }
    Ok((octave + 1) * 12 + base + accidental)
}

/// Name of the equal-tempered note closest to `frequency`, using sharps.
pub fn nearest_note_name(frequency: f64) -> String {
    const NOTE_NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let midi = (69.0 + 12.0 * (frequency / 440.0).log2()).round() as i32;
    let name = NOTE_NAMES[midi.rem_euclid(12) as usize];
    format!("{}{}", name, midi.div_euclid(12) - 1)
}
