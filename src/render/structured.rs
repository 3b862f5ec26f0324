//! Structured (JSON) form

use crate::error::TabError;
use crate::model::TabState;
use crate::tuning::Tuning;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Synthesized tab states together with the tuning labels and capo they were
/// produced with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablatureDocument {
    pub states: Vec<TabState>,
    /// String labels, lowest string first.
    pub tuning: Vec<String>,
    pub capo: u8,
}

impl TablatureDocument {
    pub fn new(states: Vec<TabState>, tuning: &Tuning, capo: u8) -> Self {
        TablatureDocument {
            states,
            tuning: tuning.labels(),
            capo,
        }
    }

    pub fn to_json(&self) -> Result<String, TabError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TabError::Internal(format!("failed to serialize tablature: {}", e)))
    }

    /// Parse a document produced by [`TablatureDocument::to_json`].
    ///
    /// `position` in a returned [`TabError::ParseError`] is the JSON line number.
    pub fn from_json(text: &str) -> Result<Self, TabError> {
        serde_json::from_str(text).map_err(|e| TabError::ParseError {
            position: e.line(),
            message: e.to_string(),
        })
    }

    /// The per-event fret maps.
    pub fn assignments(&self) -> Vec<BTreeMap<usize, u8>> {
        self.states.iter().map(|s| s.frets.clone()).collect()
    }
}
