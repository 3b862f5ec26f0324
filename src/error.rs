//! # Error Types
//!
//! This module defines all error types for the tablature engine.
//!
//! Every error except [`TabError::Internal`] stems from the caller's input and is
//! reported unchanged. Event-level errors carry the 0-based event index so the
//! caller can locate the offending event.
//!
//! ## Error Types
//! - `ConfigurationError` - Bad tuning override, capo, fret limit, tolerance or request document
//! - `ValidationError` - Request-level problems (e.g. no events)
//! - `EventError` - Malformed event fields with the event index
//! - `UnplayableEvent` - Pitches that cannot be placed on the fretboard
//! - `ParseError` - Malformed compact or structured tablature text
//! - `Internal` - Invariant violation inside the engine
//!
//! ## Usage
//! ```rust
//! use tabsynth::{synthesize, Event, SynthesisOptions, TabError};
//!
//! let events = vec![Event::note(20_000.0, 0.0, 1.0)];
//! match synthesize(&events, &SynthesisOptions::default()) {
//!     Ok(states) => println!("{} states", states.len()),
//!     Err(TabError::UnplayableEvent { index, .. }) => {
//!         eprintln!("Event {} cannot be fretted", index);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabError {
    /// Invalid engine configuration.
    ///
    /// # Example
    /// ```
    /// # use tabsynth::TabError;
    /// let err = TabError::ConfigurationError("capo must be between 0 and 12, got 15".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: capo must be between 0 and 12, got 15");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    /// Request-level validation failure.
    #[error("Invalid request: {0}")]
    ValidationError(String),

    /// Malformed event fields.
    ///
    /// # Example
    /// ```
    /// # use tabsynth::TabError;
    /// let err = TabError::EventError {
    ///     index: 2,
    ///     message: "duration must be positive, got 0".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid event at index 2: duration must be positive, got 0");
    /// ```
    #[error("Invalid event at index {index}: {message}")]
    EventError { index: usize, message: String },

    /// A structurally valid event that cannot be placed on the fretboard.
    ///
    /// `pitches` holds the pitches that could not be matched, or every pitch of
    /// the event when no complete string assignment exists.
    #[error("Unplayable event at index {index}: {reason} (pitches: {})", format_pitches(.pitches))]
    UnplayableEvent {
        index: usize,
        pitches: Vec<f64>,
        reason: String,
    },

    /// Malformed tablature text handed to one of the parsers.
    #[error("Parse error at position {position}: {message}")]
    ParseError { position: usize, message: String },

    /// Engine invariant violation. Not caller-correctable.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TabError {
    /// Stable machine-readable code for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            TabError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            TabError::ValidationError(_) => "VALIDATION_ERROR",
            TabError::EventError { .. } => "VALIDATION_ERROR",
            TabError::UnplayableEvent { .. } => "UNPLAYABLE_EVENT",
            TabError::ParseError { .. } => "PARSE_ERROR",
            TabError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the failure stems from the input and the caller can fix it.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, TabError::Internal(_))
    }
}

fn format_pitches(pitches: &[f64]) -> String {
    pitches
        .iter()
        .map(|p| format!("{:.2} Hz", p))
        .collect::<Vec<_>>()
        .join(", ")
}
