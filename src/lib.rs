//! Guitar tablature synthesis.
//!
//! Converts timed pitch events (notes and chords, in Hz) into string/fret
//! assignments for a 6-string guitar, then renders them as ASCII tablature, a
//! compact token form or structured JSON.
//!
//! ```rust
//! use tabsynth::{synthesize, Event, SynthesisOptions};
//!
//! let states = synthesize(&[Event::note(82.41, 0.0, 1.0)], &SynthesisOptions::default())?;
//! assert_eq!(states[0].strings, vec![0]);
//! # Ok::<(), tabsynth::TabError>(())
//! ```

pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod render;
pub mod request;
pub mod solver;
pub mod state;
pub mod tuning;

pub use engine::{synthesize, SynthesisOptions};
pub use error::*;
pub use model::*;
pub use render::{
    parse_compact, render, to_ascii, to_compact, CompactEvent, OutputFormat, TablatureDocument,
};
pub use request::{TablatureRequest, TablatureResponse};
pub use tuning::{StringPitch, Tuning, TuningOverride};

/// Synthesize `events` and render them in `format` with the tuning labels and
/// capo from `options`.
pub fn tablature(
    events: &[Event],
    options: &SynthesisOptions,
    format: OutputFormat,
) -> Result<String, TabError> {
    let states = synthesize(events, options)?;
    let document = TablatureDocument::new(states, &options.effective_tuning()?, options.capo);
    render(&document, format)
}
