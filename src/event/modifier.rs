use std::sync::LazyLock;

use regex::Regex;

use crate::error::GrammarError;
use crate::types::Base;

/// How a play happened, from one `/`-delimited qualifier of the event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    AppealPlay,
    BatterInterference,
    BattingOutOfTurn,
    BuntGroundedIntoDoublePlay,
    BuntPoppedIntoDoublePlay,
    CalledThirdStrike,
    CourtesyBatter,
    CourtesyFielder,
    CourtesyRunner,
    Error,
    FanInterference,
    Fly,
    FlyBallDoublePlay,
    ForceOut,
    Foul,
    GroundBall,
    GroundBallBunt,
    GroundBallDoublePlay,
    GroundBallTriplePlay,
    HitLocation,
    InfieldFlyRule,
    InsideTheParkHomeRun,
    Interference,
    LineDrive,
    LineDriveBunt,
    LinedIntoDoublePlay,
    LinedIntoTriplePlay,
    ManagerChallenge,
    NoDoublePlayCredited,
    Obstruction,
    PopFly,
    PopUpBunt,
    RelayThrow,
    RunnerHitByBattedBall,
    RunnerInterference,
    RunnerPassed,
    SacrificeFly,
    SacrificeHit,
    Throw,
    UmpireInterference,
    UmpireReview,
    UnspecifiedDoublePlay,
    UnspecifiedTriplePlay,
    /// Known low-frequency residue the grammar does not classify further
    /// (`B…`, `BF`, `BFDP`, `U…`, `RR…`, `p`, `l`). The raw token is kept
    /// on the `Modifier` so nothing is lost.
    Unrecognized,
}

/// One decoded qualifier of an event field.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub hit_location: Option<String>,
    pub fielder_positions: Vec<u8>,
    pub base: Option<Base>,
    pub raw: String,
}

// Matched verbatim before the generic rules: their `!` is mid-token, not a
// trailing sentiment character, and would otherwise misclassify.
const LITERAL_RULES: [(&str, ModifierKind); 2] =
    [("!F", ModifierKind::Fly), ("P!5F", ModifierKind::PopFly)];

// Ordered: several patterns are prefixes of others (`BPDP` before `BP`,
// `GDP` before `G`, `RR` before `R`, …) and the bare digit-run hit
// location is the final fallback.
static MODIFIER_RULES: LazyLock<Vec<(Regex, ModifierKind)>> = LazyLock::new(|| {
    use ModifierKind::*;
    [
        (r"^AP$", AppealPlay),
        (r"^BGDP$", BuntGroundedIntoDoublePlay),
        (r"^BG.*$", GroundBallBunt),
        (r"^BINT$", BatterInterference),
        (r"^BL.*$", LineDriveBunt),
        (r"^BOOT$", BattingOutOfTurn),
        (r"^BPDP$", BuntPoppedIntoDoublePlay),
        (r"^BP.*$", PopUpBunt),
        (r"^BR$", RunnerHitByBattedBall),
        (r"^COUB$", CourtesyBatter),
        (r"^COUF$", CourtesyFielder),
        (r"^COUR$", CourtesyRunner),
        (r"^C$", CalledThirdStrike),
        (r"^DP$", UnspecifiedDoublePlay),
        (r"^E\d.*$", Error),
        (r"^FDP.*$", FlyBallDoublePlay),
        (r"^FINT$", FanInterference),
        (r"^FL$", Foul),
        (r"^FO.*$", ForceOut),
        (r"^F.*$", Fly),
        (r"^GDP.*$", GroundBallDoublePlay),
        (r"^GTP.*$", GroundBallTriplePlay),
        (r"^G.*$", GroundBall),
        (r"^IF$", InfieldFlyRule),
        (r"^INT$", Interference),
        (r"^IPHR$", InsideTheParkHomeRun),
        (r"^LDP.*$", LinedIntoDoublePlay),
        (r"^LTP.*$", LinedIntoTriplePlay),
        (r"^L.*$", LineDrive),
        (r"^MREV$", ManagerChallenge),
        (r"^NDP$", NoDoublePlayCredited),
        (r"^OBS$", Obstruction),
        (r"^PASS$", RunnerPassed),
        (r"^P.*$", PopFly),
        (r"^RINT$", RunnerInterference),
        (r"^RR\d*$", Unrecognized),
        (r"^R.*$", RelayThrow),
        (r"^SF$", SacrificeFly),
        (r"^SH$", SacrificeHit),
        (r"^TH.*$", Throw),
        (r"^TP$", UnspecifiedTriplePlay),
        (r"^UINT$", UmpireInterference),
        (r"^UREV$", UmpireReview),
        (r"^U.*$", Unrecognized),
        (r"^BFDP$", Unrecognized),
        (r"^BF$", Unrecognized),
        (r"^B.*$", Unrecognized),
        (r"^p$", Unrecognized),
        (r"^l$", Unrecognized),
        (r"^\d.*$", HitLocation),
    ]
    .into_iter()
    .map(|(pattern, kind)| {
        (
            Regex::new(pattern).expect("valid modifier pattern"),
            kind,
        )
    })
    .collect()
});

static ERROR_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^E\d(.+)$").expect("valid error location pattern"));
static RELAY_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\d(.+)$").expect("valid relay location pattern"));
static THROW_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TH.(.+)$").expect("valid throw location pattern"));
static THROW_BASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TH([123H])").expect("valid throw base pattern"));

/// Decode one `/`-delimited qualifier token.
pub fn decode_modifier(token: &str) -> Result<Modifier, GrammarError> {
    let trimmed = trim_sentiment(token);

    let kind = classify(trimmed).ok_or_else(|| GrammarError::new("modifier", token))?;

    Ok(Modifier {
        kind,
        hit_location: hit_location(trimmed, kind),
        fielder_positions: fielder_positions(trimmed, kind),
        base: destination_base(trimmed, kind),
        raw: token.to_string(),
    })
}

fn trim_sentiment(token: &str) -> &str {
    match token.strip_suffix(['#', '!', '?', '+', '-']) {
        Some(rest) if !rest.is_empty() => rest,
        _ => token,
    }
}

fn classify(trimmed: &str) -> Option<ModifierKind> {
    for (literal, kind) in LITERAL_RULES {
        if trimmed == literal {
            return Some(kind);
        }
    }

    MODIFIER_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(trimmed))
        .map(|&(_, kind)| kind)
}

fn hit_location(trimmed: &str, kind: ModifierKind) -> Option<String> {
    if LITERAL_RULES.iter().any(|&(literal, _)| trimmed == literal) {
        return None;
    }

    let location = match kind {
        ModifierKind::HitLocation => Some(trimmed),
        ModifierKind::Fly
        | ModifierKind::GroundBall
        | ModifierKind::LineDrive
        | ModifierKind::PopFly => Some(&trimmed[1..]),
        ModifierKind::GroundBallBunt | ModifierKind::LineDriveBunt | ModifierKind::PopUpBunt => {
            Some(&trimmed[2..])
        }
        ModifierKind::Error => ERROR_LOCATION_RE
            .captures(trimmed)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str())),
        ModifierKind::RelayThrow => RELAY_LOCATION_RE
            .captures(trimmed)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str())),
        ModifierKind::Throw => THROW_LOCATION_RE
            .captures(trimmed)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str())),
        _ => None,
    };

    location
        .filter(|loc| !loc.is_empty())
        .map(|loc| loc.to_string())
}

// Positions follow the category letter as a digit run. `U` is an unknown
// fielder (position 0); characters that are not position codes are residue
// from historical data and are skipped; a `(` ends the run.
fn fielder_positions(trimmed: &str, kind: ModifierKind) -> Vec<u8> {
    if !matches!(kind, ModifierKind::Error | ModifierKind::RelayThrow) {
        return Vec::new();
    }

    let mut positions = Vec::new();
    for c in trimmed.chars().skip(1) {
        match c {
            '(' => break,
            'U' => positions.push(0),
            _ => {
                if let Some(digit) = c.to_digit(10)
                    && digit >= 1
                {
                    positions.push(digit as u8);
                }
            }
        }
    }
    positions
}

fn destination_base(trimmed: &str, kind: ModifierKind) -> Option<Base> {
    if kind != ModifierKind::Throw {
        return None;
    }

    THROW_BASE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(Base::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_category_classification() {
        use ModifierKind::*;
        let cases = [
            ("AP", AppealPlay),
            ("BP", PopUpBunt),
            ("BG", GroundBallBunt),
            ("BGDP", BuntGroundedIntoDoublePlay),
            ("BINT", BatterInterference),
            ("BL", LineDriveBunt),
            ("BOOT", BattingOutOfTurn),
            ("BPDP", BuntPoppedIntoDoublePlay),
            ("BR", RunnerHitByBattedBall),
            ("C", CalledThirdStrike),
            ("COUB", CourtesyBatter),
            ("COUF", CourtesyFielder),
            ("COUR", CourtesyRunner),
            ("DP", UnspecifiedDoublePlay),
            ("E1", Error),
            ("F", Fly),
            ("!F", Fly),
            ("FDP", FlyBallDoublePlay),
            ("FINT", FanInterference),
            ("FL", Foul),
            ("FO", ForceOut),
            ("G", GroundBall),
            ("GDP", GroundBallDoublePlay),
            ("GTP", GroundBallTriplePlay),
            ("IF", InfieldFlyRule),
            ("INT", Interference),
            ("IPHR", InsideTheParkHomeRun),
            ("L", LineDrive),
            ("LDP", LinedIntoDoublePlay),
            ("LTP", LinedIntoTriplePlay),
            ("MREV", ManagerChallenge),
            ("NDP", NoDoublePlayCredited),
            ("OBS", Obstruction),
            ("P", PopFly),
            ("P!5F", PopFly),
            ("PASS", RunnerPassed),
            ("R1", RelayThrow),
            ("R", RelayThrow),
            ("R4U8R5", RelayThrow),
            ("R3BU4", RelayThrow),
            ("RINT", RunnerInterference),
            ("SF", SacrificeFly),
            ("SH", SacrificeHit),
            ("TH", Throw),
            ("TH1", Throw),
            ("THH", Throw),
            ("TP", UnspecifiedTriplePlay),
            ("UINT", UmpireInterference),
            ("UREV", UmpireReview),
            ("78", HitLocation),
        ];

        for (raw, expected) in cases {
            let modifier = decode_modifier(raw).unwrap();
            assert_eq!(modifier.kind, expected, "token {raw:?}");
            assert_eq!(modifier.raw, raw);
        }
    }

    // Residue shapes seen in historical data at low frequency. Pinned here
    // so a grammar change that starts rejecting (or misfiling) them shows
    // up as a regression.
    #[test]
    fn test_residue_tokens_are_unrecognized() {
        let cases = [
            "BF", "B", "BFDP", "B4S", "B34S", "B2R", "B25", "B2L", "B23F", "B2RF", "B6MS", "p",
            "U", "U1", "l", "U9R4", "U4R6", "U7R64", "U6R5U1", "RR6",
        ];

        for raw in cases {
            let modifier = decode_modifier(raw).unwrap();
            assert_eq!(modifier.kind, ModifierKind::Unrecognized, "token {raw:?}");
            assert_eq!(modifier.raw, raw);
        }
    }

    #[test]
    fn test_unknown_token_is_a_grammar_error() {
        let err = decode_modifier("zzz").unwrap_err();
        assert_eq!(err.field, "modifier");
        assert_eq!(err.raw_value, "zzz");
    }

    #[test]
    fn test_hit_location_by_category() {
        let cases = [
            ("AP", None),
            ("L89S", Some("89S")),
            ("E1", None),
            ("E12", Some("2")),
            ("R1", None),
            ("R12", Some("2")),
            ("TH1", None),
            ("TH12", Some("2")),
            ("89", Some("89")),
            ("7L", Some("7L")),
            ("G6M", Some("6M")),
            ("BG5", Some("5")),
        ];

        for (raw, expected) in cases {
            let modifier = decode_modifier(raw).unwrap();
            assert_eq!(
                modifier.hit_location.as_deref(),
                expected,
                "token {raw:?}"
            );
        }
    }

    #[test]
    fn test_fielder_positions_for_error_and_relay() {
        assert_eq!(decode_modifier("E1").unwrap().fielder_positions, vec![1]);
        assert_eq!(decode_modifier("R1").unwrap().fielder_positions, vec![1]);
        assert_eq!(decode_modifier("R25").unwrap().fielder_positions, vec![2, 5]);
        // U is an unknown fielder; other letters are residue and skipped.
        assert_eq!(
            decode_modifier("R4U8R5").unwrap().fielder_positions,
            vec![4, 0, 8, 5]
        );
        assert_eq!(
            decode_modifier("R3BU4").unwrap().fielder_positions,
            vec![3, 0, 4]
        );
        assert!(decode_modifier("SF").unwrap().fielder_positions.is_empty());
    }

    #[test]
    fn test_throw_destination_base() {
        assert_eq!(decode_modifier("TH").unwrap().base, None);
        assert_eq!(decode_modifier("TH1").unwrap().base, Some(Base::First));
        assert_eq!(decode_modifier("THH").unwrap().base, Some(Base::Home));
        assert_eq!(decode_modifier("E2").unwrap().base, None);
    }

    #[test]
    fn test_trailing_sentiment_character_is_ignored() {
        assert_eq!(decode_modifier("G#").unwrap().kind, ModifierKind::GroundBall);
        assert_eq!(decode_modifier("F?").unwrap().kind, ModifierKind::Fly);
        assert_eq!(decode_modifier("SH!").unwrap().kind, ModifierKind::SacrificeHit);
    }
}
