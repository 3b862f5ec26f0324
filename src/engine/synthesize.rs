//! Synthesis entry point

use super::options::SynthesisOptions;
use crate::error::TabError;
use crate::model::{Event, TabState};
use crate::solver::assign;
use crate::state::build_state;

/// Synthesize tablature for `events`.
///
/// Returns one [`TabState`] per event, in input order, with `index` equal to
/// the event's position.
///
/// # Errors
/// - [`TabError::ValidationError`] if `events` is empty
/// - [`TabError::ConfigurationError`] for an out-of-range capo, fret limit or
///   tolerance, or an invalid tuning override
/// - [`TabError::EventError`] for a non-positive pitch or duration, or a negative start
/// - [`TabError::UnplayableEvent`] if an event's pitches cannot be placed on
///   distinct strings within the tolerance and fret limit
pub fn synthesize(events: &[Event], options: &SynthesisOptions) -> Result<Vec<TabState>, TabError> {
    if events.is_empty() {
        return Err(TabError::ValidationError(
            "events must contain at least one event".to_string(),
        ));
    }
    options.validate()?;

    let tuning = options.effective_tuning()?;
    let string_frequencies = tuning.string_frequencies(options.capo)?;
    log::debug!(
        "synthesizing {} events (tuning {:?}, capo {}, max fret {}, tolerance {} cents)",
        events.len(),
        tuning.labels(),
        options.capo,
        options.max_fret,
        options.tolerance_cents
    );

    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            validate_event(index, event)?;
            let pitches = event.pitches();
            let assignments = assign(
                index,
                &pitches,
                &string_frequencies,
                options.max_fret,
                options.tolerance_cents,
            )
            .map_err(|e| {
                log::warn!("{}", e);
                e
            })?;
            let state = build_state(index, event, &assignments)?;
            log::debug!("event {}: frets {:?}", index, state.frets);
            Ok(state)
        })
        .collect()
}

/// Check the fields of one event.
fn validate_event(index: usize, event: &Event) -> Result<(), TabError> {
    let invalid = |message: String| TabError::EventError { index, message };

    if let Event::Chord(chord) = event {
        if chord.pitches_hz.is_empty() {
            return Err(invalid("chord must contain at least one pitch".to_string()));
        }
    }
    for pitch in event.pitches() {
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(invalid(format!("pitch must be positive, got {}", pitch)));
        }
    }
    let start = event.start();
    if !start.is_finite() || start < 0.0 {
        return Err(invalid(format!("start must be non-negative, got {}", start)));
    }
    let duration = event.duration();
    if !duration.is_finite() || duration <= 0.0 {
        return Err(invalid(format!("duration must be positive, got {}", duration)));
    }
    Ok(())
}
