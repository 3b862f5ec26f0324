//! # Tablature Requests
//!
//! Decodes a request document (JSON or YAML) into events and configuration,
//! runs the engine and renders the result in the requested format.
//!
//! ## Document Fields
//! | field             | type                                  | default |
//! |-------------------|---------------------------------------|---------|
//! | `events`          | list of note/chord events (required)  |         |
//! | `output_format`   | `ascii`, `json` or `compact`          | `ascii` |
//! | `max_fret`        | 0 to 24                               | 15      |
//! | `tolerance_cents` | 0 to 100                              | 50      |
//! | `tuning`          | preset name or 6 note names / Hz      | standard|
//! | `capo`            | 0 to 12                               | 0       |
//!
//! ## Example
//! ```rust
//! use tabsynth::TablatureRequest;
//!
//! let request = TablatureRequest::from_yaml_str(r#"
//! output_format: compact
//! events:
//!   - type: chord
//!     pitches_hz: [164.81, 196.0, 246.94]
//!     start: 0.0
//!     duration: 1.0
//! "#)?;
//! let response = request.run()?;
//! assert_eq!(response.tablature, "[2:2,3:0,4:0]");
//! # Ok::<(), tabsynth::TabError>(())
//! ```

use crate::engine::{synthesize, SynthesisOptions, DEFAULT_MAX_FRET, DEFAULT_TOLERANCE_CENTS};
use crate::error::TabError;
use crate::model::Event;
use crate::render::{render, OutputFormat, TablatureDocument};
use crate::tuning::{Tuning, TuningOverride};
use serde::{Deserialize, Serialize};

fn default_max_fret() -> u8 {
    DEFAULT_MAX_FRET
}

fn default_tolerance_cents() -> f64 {
    DEFAULT_TOLERANCE_CENTS
}

/// A request for tablature, as decoded from a request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablatureRequest {
    pub events: Vec<Event>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_max_fret")]
    pub max_fret: u8,
    #[serde(default = "default_tolerance_cents")]
    pub tolerance_cents: f64,
    #[serde(default)]
    pub tuning: Option<TuningOverride>,
    #[serde(default)]
    pub capo: u8,
}

/// Rendered tablature plus the tuning labels and capo it was produced with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablatureResponse {
    pub tablature: String,
    pub format: OutputFormat,
    pub tuning: Vec<String>,
    pub capo: u8,
}

impl TablatureRequest {
    pub fn new(events: Vec<Event>) -> Self {
        TablatureRequest {
            events,
            output_format: OutputFormat::default(),
            max_fret: DEFAULT_MAX_FRET,
            tolerance_cents: DEFAULT_TOLERANCE_CENTS,
            tuning: None,
            capo: 0,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, TabError> {
        serde_json::from_str(text)
            .map_err(|e| TabError::ConfigurationError(format!("invalid JSON request: {}", e)))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, TabError> {
        serde_yaml::from_str(text)
            .map_err(|e| TabError::ConfigurationError(format!("invalid YAML request: {}", e)))
    }

    pub fn options(&self) -> SynthesisOptions {
        SynthesisOptions {
            tuning: Tuning::standard(),
            tuning_override: self.tuning.clone(),
            capo: self.capo,
            max_fret: self.max_fret,
            tolerance_cents: self.tolerance_cents,
        }
    }

    /// Synthesize the structured document for this request.
    pub fn document(&self) -> Result<TablatureDocument, TabError> {
        let options = self.options();
        let states = synthesize(&self.events, &options)?;
        let tuning = options.effective_tuning()?;
        Ok(TablatureDocument::new(states, &tuning, self.capo))
    }

    /// Synthesize and render in `output_format`.
    pub fn run(&self) -> Result<TablatureResponse, TabError> {
        let document = self.document()?;
        Ok(TablatureResponse {
            tablature: render(&document, self.output_format)?,
            format: self.output_format,
            tuning: document.tuning,
            capo: document.capo,
        })
    }
}
