//! Synthesis configuration

use crate::error::TabError;
use crate::tuning::{Tuning, TuningOverride, MAX_CAPO};

/// Highest fret the engine will consider.
pub const MAX_FRET_LIMIT: u8 = 24;

/// Widest pitch-matching tolerance accepted, in cents.
pub const MAX_TOLERANCE_CENTS: f64 = 100.0;

pub const DEFAULT_MAX_FRET: u8 = 15;
pub const DEFAULT_TOLERANCE_CENTS: f64 = 50.0;

/// Tuning and constraints for one synthesis call.
///
/// # Fields
/// - `tuning`: base open-string pitches
/// - `tuning_override`: replaces `tuning` (frequencies and labels) when present
/// - `capo`: semitones added to every string (0 to 12)
/// - `max_fret`: highest usable fret (0 to 24)
/// - `tolerance_cents`: largest accepted deviation between a target pitch and
///   its fretted pitch (0 to 100)
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    pub tuning: Tuning,
    pub tuning_override: Option<TuningOverride>,
    pub capo: u8,
    pub max_fret: u8,
    pub tolerance_cents: f64,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            tuning: Tuning::standard(),
            tuning_override: None,
            capo: 0,
            max_fret: DEFAULT_MAX_FRET,
            tolerance_cents: DEFAULT_TOLERANCE_CENTS,
        }
    }
}

impl SynthesisOptions {
    pub fn with_capo(mut self, capo: u8) -> Self {
        self.capo = capo;
        self
    }

    pub fn with_max_fret(mut self, max_fret: u8) -> Self {
        self.max_fret = max_fret;
        self
    }

    pub fn with_tolerance(mut self, tolerance_cents: f64) -> Self {
        self.tolerance_cents = tolerance_cents;
        self
    }

    pub fn with_tuning_override(mut self, tuning_override: TuningOverride) -> Self {
        self.tuning_override = Some(tuning_override);
        self
    }

    /// Check the numeric ranges.
    pub fn validate(&self) -> Result<(), TabError> {
        if self.capo > MAX_CAPO {
            return Err(TabError::ConfigurationError(format!(
                "capo must be between 0 and {}, got {}",
                MAX_CAPO, self.capo
            )));
        }
        if self.max_fret > MAX_FRET_LIMIT {
            return Err(TabError::ConfigurationError(format!(
                "max_fret must be between 0 and {}, got {}",
                MAX_FRET_LIMIT, self.max_fret
            )));
        }
        if !(0.0..=MAX_TOLERANCE_CENTS).contains(&self.tolerance_cents) {
            return Err(TabError::ConfigurationError(format!(
                "tolerance_cents must be between 0 and {}, got {}",
                MAX_TOLERANCE_CENTS, self.tolerance_cents
            )));
        }
        Ok(())
    }

    /// The tuning actually used for matching, override applied.
    pub fn effective_tuning(&self) -> Result<Tuning, TabError> {
        self.tuning.with_override(self.tuning_override.as_ref())
    }
}
