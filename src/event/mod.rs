//! The event mini-grammar: the trailing field of a play record, decoded
//! into a description, its qualifiers, and the resulting base advances.

pub mod advance;
pub mod description;
pub mod modifier;

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::error::GrammarError;
pub use advance::{Advance, decode_advance};
pub use description::{BatterEvent, Description, RunnerEvent, decode_description};
pub use modifier::{Modifier, ModifierKind, decode_modifier};

/// Fielder position (0 = unknown fielder) to number of credits.
pub type PositionCounts = BTreeMap<u8, u32>;

pub(crate) type Positions = SmallVec<[u8; 8]>;

// A handful of events in the published corpus are corrupt in ways the
// grammar cannot absorb; they are rewritten verbatim before decoding.
const EVENT_CORRECTIONS: [(&str, &str); 1] = [("S8/L.3-H.1-3", "S8/L.3-H;1-3")];

/// One fully decoded event field.
///
/// Outs and safe advances share the one ordered `advances` list; each
/// entry tells them apart via its `is_out` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub description: Description,
    pub modifiers: Vec<Modifier>,
    pub advances: Vec<Advance>,
    pub raw: String,
}

/// Decode the event field of a play record.
pub fn decode_event(raw: &str) -> Result<Event, GrammarError> {
    // Trailing sentiment characters (uncertainty, hard/soft hit) carry no
    // structure and are dropped before anything else.
    let mut field = match raw.strip_suffix(['#', '!', '?', '+', '-']) {
        Some(rest) => rest,
        None => raw,
    };

    for (corrupt, corrected) in EVENT_CORRECTIONS {
        if field == corrupt {
            field = corrected;
        }
    }

    let (description_and_modifiers, advances_raw) = match field.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (field, None),
    };

    // Doubled separators and a trailing separator are inert in the source
    // notation.
    let mut cleaned = description_and_modifiers.replace("//", "/");
    if cleaned.ends_with('/') {
        cleaned.pop();
    }

    let mut parts = split_outside_parens(&cleaned, '/');
    let description_token = parts.remove(0);

    let description = decode_description(description_token);
    let modifiers = parts
        .into_iter()
        .map(decode_modifier)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.with_line(raw))?;

    let advances = match advances_raw {
        Some(tail) => tail
            .split(';')
            .map(decode_advance)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_line(raw))?,
        None => Vec::new(),
    };

    Ok(Event {
        description,
        modifiers,
        advances,
        raw: raw.to_string(),
    })
}

// A `/` inside a parenthesized segment is part of that segment, not a
// separator (e.g. `PO1(E1/TH)`).
fn split_outside_parens(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

pub(crate) fn non_error_positions(group: &str) -> Positions {
    let mut positions = Positions::new();
    let mut after_error = false;
    for c in group.chars() {
        if c == 'E' {
            after_error = true;
            continue;
        }
        if let Some(digit) = c.to_digit(10) {
            if !after_error {
                positions.push(digit as u8);
            }
            after_error = false;
        }
    }
    positions
}

pub(crate) fn error_positions(group: &str) -> Positions {
    let mut positions = Positions::new();
    let mut after_error = false;
    for c in group.chars() {
        if c == 'E' {
            after_error = true;
            continue;
        }
        if let Some(digit) = c.to_digit(10) {
            if after_error {
                positions.push(digit as u8);
            }
            after_error = false;
        }
    }
    positions
}
