use std::sync::LazyLock;

use regex::Regex;

use super::{PositionCounts, Positions, error_positions, non_error_positions};
use crate::types::Base;

/// What happened to the batter, when the leading event token names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatterEvent {
    UnassistedFieldedOut,
    AssistedFieldedOut,
    GroundedIntoDoublePlay,
    GroundedIntoTriplePlay,
    LinedIntoDoublePlay,
    LinedIntoTriplePlay,
    Single,
    Double,
    GroundRuleDouble,
    Triple,
    HomeRunLeavingPark,
    HomeRunInsidePark,
    Error,
    ErrorOnFoulFlyBall,
    FieldersChoice,
    CatcherInterference,
    HitByPitch,
    Strikeout,
    Walk,
    IntentionalWalk,
    NoPlay,
}

/// What happened to a runner, when the leading event token names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    Balk,
    CaughtStealing,
    DefensiveIndifference,
    OtherAdvance,
    PassedBall,
    WildPitch,
    PickedOff,
    PickedOffCaughtStealing,
    StolenBase,
}

/// The decoded leading token of an event field: named outcomes plus the
/// fielder roles derived from its fielding groups.
///
/// A token may legitimately name neither outcome (pure fielding detail),
/// or both (a strikeout or walk joined to a runner event with `+`).
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub batter_event: Option<BatterEvent>,
    pub runner_event: Option<RunnerEvent>,
    pub fielder_assists: PositionCounts,
    pub fielder_put_outs: PositionCounts,
    pub fielder_handlers: PositionCounts,
    pub fielder_errors: PositionCounts,
    pub put_out_at_base: Option<Base>,
    pub stolen_base: Option<Base>,
    pub raw: String,
}

static BATTER_RULES: LazyLock<Vec<(Regex, BatterEvent)>> = LazyLock::new(|| {
    use BatterEvent::*;
    [
        (r"^\d$", UnassistedFieldedOut),
        (r"^\d{2,}(\([B123]\))?$", AssistedFieldedOut),
        (r"^\d+\([B123]\)\d+$", GroundedIntoDoublePlay),
        (r"^\d+\([B123]\)\d+\([B123]\)\d+$", GroundedIntoTriplePlay),
        (r"^\d+\([B123]\)\d+\([B123]\)$", LinedIntoDoublePlay),
        (
            r"^\d+\([B123]\)\d+\([B123]\)\d+\([B123]\)$",
            LinedIntoTriplePlay,
        ),
        (r"^S\d*$", Single),
        (r"^DGR\d*$", GroundRuleDouble),
        (r"^D\d*$", Double),
        (r"^T\d*$", Triple),
        (r"^HR?\d+$", HomeRunInsidePark),
        (r"^HR?$", HomeRunLeavingPark),
        (r"^\d*E\d+$", Error),
        (r"^FLE\d$", ErrorOnFoulFlyBall),
        (r"^FC\d*$", FieldersChoice),
        (r"^C$", CatcherInterference),
        (r"^HP$", HitByPitch),
        (r"^K\d*(\+.*)?$", Strikeout),
        (r"^W(\+.*)?$", Walk),
        (r"^IW?(\+.*)?$", IntentionalWalk),
        (r"^NP$", NoPlay),
    ]
    .into_iter()
    .map(|(pattern, event)| (Regex::new(pattern).expect("valid batter pattern"), event))
    .collect()
});

// POCS before PO: the table is ordered and first match wins.
static RUNNER_RULES: LazyLock<Vec<(Regex, RunnerEvent)>> = LazyLock::new(|| {
    use RunnerEvent::*;
    [
        (r"^BK$", Balk),
        (r"^CS[23H].*$", CaughtStealing),
        (r"^DI$", DefensiveIndifference),
        (r"^OA$", OtherAdvance),
        (r"^PB$", PassedBall),
        (r"^WP$", WildPitch),
        (r"^POCS.*$", PickedOffCaughtStealing),
        (r"^PO.*$", PickedOff),
        (r"^SB[23H].*$", StolenBase),
    ]
    .into_iter()
    .map(|(pattern, event)| (Regex::new(pattern).expect("valid runner pattern"), event))
    .collect()
});

// Only these batter outcomes are stripped before runner-event lookup;
// whether others can precede `+` is unverified against the full corpus.
static RUNNER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:K|W|IW)\+(.*)$").expect("valid runner prefix pattern"));

static TRAILING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("valid trailing digits pattern"));
static GROUP_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([B123]\)").expect("valid group boundary pattern"));
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("valid parenthesis pattern"));
static PUT_OUT_BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,}\(([B123])\)$").expect("valid put-out base pattern"));

/// Decode the leading (pre-modifier, pre-advance) token of an event field.
/// Total: shapes the grammar does not name simply carry no outcome.
pub fn decode_description(token: &str) -> Description {
    let batter_event = batter_event(token);
    let runner_token = RUNNER_PREFIX_RE
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map_or(token, |m| m.as_str());
    let runner_event = runner_event(runner_token);

    let out_groups = fielding_out_groups(token, batter_event, runner_event);
    let handler_groups = fielding_handler_groups(token, batter_event, runner_event);

    let mut fielder_assists = PositionCounts::new();
    let mut fielder_put_outs = PositionCounts::new();
    for group in &out_groups {
        if let Some((&put_out, assists)) = group.split_last() {
            for &position in assists {
                *fielder_assists.entry(position).or_insert(0) += 1;
            }
            *fielder_put_outs.entry(put_out).or_insert(0) += 1;
        }
    }

    let mut fielder_handlers = PositionCounts::new();
    for group in &handler_groups {
        for &position in group {
            *fielder_handlers.entry(position).or_insert(0) += 1;
        }
    }

    Description {
        batter_event,
        runner_event,
        fielder_assists,
        fielder_put_outs,
        fielder_handlers,
        fielder_errors: fielder_errors(token, batter_event, runner_event),
        put_out_at_base: put_out_at_base(token, batter_event),
        stolen_base: stolen_base(runner_token, runner_event),
        raw: token.to_string(),
    }
}

fn batter_event(token: &str) -> Option<BatterEvent> {
    BATTER_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(token))
        .map(|&(_, event)| event)
}

fn runner_event(runner_token: &str) -> Option<RunnerEvent> {
    RUNNER_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(runner_token))
        .map(|&(_, event)| event)
}

fn is_out_shape(batter_event: Option<BatterEvent>) -> bool {
    matches!(
        batter_event,
        Some(
            BatterEvent::UnassistedFieldedOut
                | BatterEvent::AssistedFieldedOut
                | BatterEvent::GroundedIntoDoublePlay
                | BatterEvent::GroundedIntoTriplePlay
                | BatterEvent::LinedIntoDoublePlay
                | BatterEvent::LinedIntoTriplePlay
        )
    )
}

fn is_steal_out_shape(runner_event: Option<RunnerEvent>) -> bool {
    matches!(
        runner_event,
        Some(
            RunnerEvent::CaughtStealing
                | RunnerEvent::PickedOff
                | RunnerEvent::PickedOffCaughtStealing
        )
    )
}

fn digits(s: &str) -> Positions {
    s.chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}

// One group per out: a lead fielding sequence, then one sequence per
// parenthesized base boundary for the multi-out shapes. For the steal-out
// runner shapes the parenthesized fielder sequence itself is the group,
// unless an error marker turns it into a handler group instead.
fn fielding_out_groups(
    token: &str,
    batter_event: Option<BatterEvent>,
    runner_event: Option<RunnerEvent>,
) -> Vec<Positions> {
    if is_out_shape(batter_event) {
        return GROUP_BOUNDARY_RE
            .split(token)
            .filter(|part| !part.is_empty())
            .map(digits)
            .collect();
    }

    if is_steal_out_shape(runner_event) {
        return PAREN_RE
            .captures_iter(token)
            .filter_map(|caps| caps.get(1))
            .filter(|group| !group.as_str().contains('E'))
            .map(|group| digits(group.as_str()))
            .filter(|positions| !positions.is_empty())
            .collect();
    }

    Vec::new()
}

// Ball touched but no out resulted: the trailing fielder run on hits,
// fielder's choices and inside-park home runs, and the non-error positions
// of an error-bearing steal-out sequence.
fn fielding_handler_groups(
    token: &str,
    batter_event: Option<BatterEvent>,
    runner_event: Option<RunnerEvent>,
) -> Vec<Positions> {
    if matches!(
        batter_event,
        Some(
            BatterEvent::Single
                | BatterEvent::Double
                | BatterEvent::Triple
                | BatterEvent::HomeRunInsidePark
                | BatterEvent::FieldersChoice
        )
    ) {
        return TRAILING_DIGITS_RE
            .captures(token)
            .and_then(|caps| caps.get(1))
            .map(|m| vec![digits(m.as_str())])
            .unwrap_or_default();
    }

    if is_steal_out_shape(runner_event) {
        return PAREN_RE
            .captures_iter(token)
            .filter_map(|caps| caps.get(1))
            .filter(|group| group.as_str().contains('E'))
            .map(|group| non_error_positions(group.as_str()))
            .filter(|positions| !positions.is_empty())
            .collect();
    }

    Vec::new()
}

fn fielder_errors(
    token: &str,
    batter_event: Option<BatterEvent>,
    runner_event: Option<RunnerEvent>,
) -> PositionCounts {
    let mut errors = PositionCounts::new();

    if matches!(
        batter_event,
        Some(BatterEvent::Error | BatterEvent::ErrorOnFoulFlyBall)
    ) {
        if let Some(after) = token.split_once('E').map(|(_, after)| after) {
            for position in digits(after) {
                *errors.entry(position).or_insert(0) += 1;
            }
        }
        return errors;
    }

    if is_steal_out_shape(runner_event) {
        for caps in PAREN_RE.captures_iter(token) {
            if let Some(group) = caps.get(1) {
                for position in error_positions(group.as_str()) {
                    *errors.entry(position).or_insert(0) += 1;
                }
            }
        }
    }

    errors
}

fn put_out_at_base(token: &str, batter_event: Option<BatterEvent>) -> Option<Base> {
    if batter_event != Some(BatterEvent::AssistedFieldedOut) {
        return None;
    }

    PUT_OUT_BASE_RE
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(Base::from_char)
}

fn stolen_base(runner_token: &str, runner_event: Option<RunnerEvent>) -> Option<Base> {
    if runner_event != Some(RunnerEvent::StolenBase) {
        return None;
    }

    runner_token.chars().next_back().and_then(Base::from_char)
}
