use std::sync::LazyLock;

use regex::Regex;

use super::{PositionCounts, Positions, error_positions, non_error_positions};
use crate::error::GrammarError;
use crate::types::Base;

/// One `;`-delimited base transition after the event's primary outcome.
///
/// Safe advances (`-`) and attempted outs (`X`) decode to the same type;
/// `is_out` is true only when the syntax encodes an out and no annotation
/// carries an error marker. The error indicator negates the out.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub from_base: Base,
    pub to_base: Base,
    pub additional_info: Vec<String>,
    pub is_out: bool,
    pub fielder_assists: PositionCounts,
    pub fielder_put_outs: PositionCounts,
    pub fielder_handlers: PositionCounts,
    pub fielder_errors: PositionCounts,
    pub is_unearned_run: bool,
    pub is_rbi_credited: bool,
    pub is_rbi_not_credited: bool,
    pub is_team_unearned_run: bool,
    pub raw: String,
}

static BASES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([B123H])([-X])([B123H]).*$").expect("valid advance pattern"));
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("valid parenthesis pattern"));

// Annotation sub-parts that carry no fielding information: play-type tags
// repeated from elsewhere in the event, plus a few digit shapes of unknown
// meaning seen in historical files.
const IGNORED_INFO_LITERALS: [&str; 8] = ["WP", "PB", "BR", "OBS", "BINT", "RINT", "AP", "INT"];
static IGNORED_INFO_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^TH[123H]?$", r"^\d-\d$", r"^\dX$", r"^\d+H$"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("valid ignored info pattern"))
        .collect()
});

/// Decode one advance token, e.g. `B-1`, `2XH`, `3XH(1E2)`, `2-H(WP)(TH1)`.
pub fn decode_advance(token: &str) -> Result<Advance, GrammarError> {
    let caps = BASES_RE
        .captures(token)
        .ok_or_else(|| GrammarError::new("advance", token))?;

    let from_base = Base::from_char(caps[1].chars().next().unwrap_or_default())
        .ok_or_else(|| GrammarError::new("advance", token))?;
    let to_base = Base::from_char(caps[3].chars().next().unwrap_or_default())
        .ok_or_else(|| GrammarError::new("advance", token))?;

    let additional_info: Vec<String> = PAREN_RE
        .captures_iter(token)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let is_out = &caps[2] == "X" && !additional_info.iter().any(|info| info.contains('E'));

    let fielding_parts = fielding_info_parts(&additional_info);

    let mut fielder_assists = PositionCounts::new();
    let mut fielder_put_outs = PositionCounts::new();
    let mut fielder_handlers = PositionCounts::new();
    let mut fielder_errors = PositionCounts::new();

    if is_out {
        let positions: Positions = fielding_parts
            .iter()
            .flat_map(|part| non_error_positions(part))
            .collect();
        if let Some((&put_out, assists)) = positions.split_last() {
            for &position in assists {
                *fielder_assists.entry(position).or_insert(0) += 1;
            }
            *fielder_put_outs.entry(put_out).or_insert(0) += 1;
        }
    } else {
        for part in &fielding_parts {
            for position in non_error_positions(part) {
                *fielder_handlers.entry(position).or_insert(0) += 1;
            }
            for position in error_positions(part) {
                *fielder_errors.entry(position).or_insert(0) += 1;
            }
        }
    }

    let has_info = |literal: &str| additional_info.iter().any(|info| info == literal);

    Ok(Advance {
        from_base,
        to_base,
        is_out,
        fielder_assists,
        fielder_put_outs,
        fielder_handlers,
        fielder_errors,
        is_unearned_run: has_info("UR"),
        is_rbi_credited: has_info("RBI"),
        is_rbi_not_credited: has_info("NORBI") || has_info("NR"),
        is_team_unearned_run: has_info("TUR"),
        additional_info,
        raw: token.to_string(),
    })
}

// Annotations can bundle unrelated facts (`(1E2/TH)`): split on `/`, drop
// the non-fielding sub-parts, and reduce the rest to digits and `E`.
fn fielding_info_parts(additional_info: &[String]) -> Vec<String> {
    let mut parts = Vec::new();
    for info in additional_info {
        for sub_part in info.split('/') {
            if IGNORED_INFO_LITERALS.contains(&sub_part)
                || IGNORED_INFO_RES.iter().any(|re| re.is_match(sub_part))
            {
                continue;
            }

            let cleaned: String = sub_part
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == 'E')
                .collect();
            if !cleaned.is_empty() {
                parts.push(cleaned);
            }
        }
    }
    parts
}
