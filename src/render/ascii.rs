//! ASCII tablature
//!
//! Layout, highest string on top:
//!
//! ```text
//! Guitar Tablature
//! Tuning: E2 A2 D3 G3 B3 E4 | Capo: 0
//! E4|-----|
//! B3|---0-|
//! G3|---0-|
//! D3|---2-|
//! A2|-----|
//! E2|-0---|
//! ```
//!
//! Each event is one column as wide as its widest fret number, followed by a
//! single `-`. Unused strings are filled with `-`.

use super::structured::TablatureDocument;
use crate::model::TabState;

pub const HEADER: &str = "Guitar Tablature";

const FILLER: char = '-';

pub fn to_ascii(document: &TablatureDocument) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&format!(
        "Tuning: {} | Capo: {}\n",
        document.tuning.join(" "),
        document.capo
    ));

    let string_count = document
        .states
        .iter()
        .flat_map(|s| s.strings.iter().map(|&i| i + 1))
        .max()
        .unwrap_or(0)
        .max(document.tuning.len());
    let labels: Vec<String> = (0..string_count)
        .map(|i| document.tuning.get(i).cloned().unwrap_or_else(|| i.to_string()))
        .collect();
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = document.states.iter().map(column_width).collect();

    for string_index in (0..string_count).rev() {
        out.push_str(&format!(
            "{:<width$}|{}",
            labels[string_index],
            FILLER,
            width = label_width
        ));
        for (state, &width) in document.states.iter().zip(&widths) {
            let cell = state
                .frets
                .get(&string_index)
                .map(|fret| fret.to_string())
                .unwrap_or_default();
            out.push_str(&cell);
            for _ in cell.len()..=width {
                out.push(FILLER);
            }
        }
        out.push_str("|\n");
    }

    out
}

fn column_width(state: &TabState) -> usize {
    state
        .frets
        .values()
        .map(|fret| fret.to_string().len())
        .max()
        .unwrap_or(1)
}
