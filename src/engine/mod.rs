//! # Synthesis Engine
//!
//! Turns an ordered list of pitch events into one [`TabState`](crate::TabState)
//! per event.
//!
//! ## Pipeline
//! 1. Validate the configuration (capo, fret limit, tolerance, tuning override)
//! 2. Compute the open-string frequencies once for the call
//! 3. For each event, in input order:
//!    - validate its fields
//!    - place its pitches on strings (`solver`, using `matcher`)
//!    - build its tab state (`state`)
//!
//! The first failure aborts the call and is returned unchanged.
//!
//! ## Sub-modules
//! - `options` - [`SynthesisOptions`] and its range checks
//! - `synthesize` - the [`synthesize()`] entry point and event validation
//!
//! ## Statelessness
//! Each call is a pure function of its arguments. Event indices come from the
//! call's own enumeration, so concurrent calls never observe each other.
//!
//! ## Example
//! ```rust
//! use tabsynth::{synthesize, Event, SynthesisOptions};
//!
//! let events = vec![
//!     Event::note(82.41, 0.0, 0.5),
//!     Event::chord(vec![164.81, 196.00, 246.94], 0.5, 1.0),
//! ];
//! let states = synthesize(&events, &SynthesisOptions::default())?;
//!
//! assert_eq!(states[0].strings, vec![0]);
//! assert_eq!(states[1].strings, vec![2, 3, 4]);
//! assert_eq!(states[1].max_fret, 2);
//! # Ok::<(), tabsynth::TabError>(())
//! ```

mod options;
mod synthesize;


pub use options::{
    SynthesisOptions, DEFAULT_MAX_FRET, DEFAULT_TOLERANCE_CENTS, MAX_FRET_LIMIT,
    MAX_TOLERANCE_CENTS,
};
pub use synthesize::synthesize;
