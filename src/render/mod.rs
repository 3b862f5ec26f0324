//! # Serializers
//!
//! Render a synthesized [`TablatureDocument`] in one of three forms.
//!
//! ## Formats
//! - [`OutputFormat::Ascii`] - classic six-line guitar tablature for people
//! - [`OutputFormat::Compact`] - one token per event, e.g. `0:0 [2:2,3:0,4:0]`
//! - [`OutputFormat::Json`] - the full document as JSON, lossless
//!
//! The compact and JSON forms have inverse parsers ([`parse_compact`],
//! [`TablatureDocument::from_json`]). All renderers are pure: the same document
//! always produces the same text.
//!
//! ## Example
//! ```rust
//! use tabsynth::{render, synthesize, Event, OutputFormat, SynthesisOptions, TablatureDocument, Tuning};
//!
//! let states = synthesize(&[Event::note(82.41, 0.0, 1.0)], &SynthesisOptions::default())?;
//! let document = TablatureDocument::new(states, &Tuning::standard(), 0);
//!
//! assert_eq!(render(&document, OutputFormat::Compact)?, "0:0");
//! assert!(render(&document, OutputFormat::Ascii)?.starts_with("Guitar Tablature"));
//! # Ok::<(), tabsynth::TabError>(())
//! ```

mod ascii;
mod compact;
mod structured;

pub use ascii::to_ascii;
pub use compact::{parse_compact, to_compact, CompactEvent};
pub use structured::TablatureDocument;

use crate::error::TabError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output form selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ascii,
    Json,
    Compact,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Ascii => "ascii",
            OutputFormat::Json => "json",
            OutputFormat::Compact => "compact",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(OutputFormat::Ascii),
            "json" => Ok(OutputFormat::Json),
            "compact" => Ok(OutputFormat::Compact),
            other => Err(TabError::ConfigurationError(format!(
                "unknown output format '{}' (expected ascii, json or compact)",
                other
            ))),
        }
    }
}

/// Render `document` in the requested format.
pub fn render(document: &TablatureDocument, format: OutputFormat) -> Result<String, TabError> {
    match format {
        OutputFormat::Ascii => Ok(to_ascii(document)),
        OutputFormat::Json => document.to_json(),
        OutputFormat::Compact => Ok(to_compact(&document.states)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("ascii".parse::<OutputFormat>().unwrap(), OutputFormat::Ascii);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" compact ".parse::<OutputFormat>().unwrap(), OutputFormat::Compact);
        assert!("midi".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Ascii);
        assert_eq!(OutputFormat::Compact.to_string(), "compact");
    }
}
