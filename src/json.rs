//! Hand-assembled JSON views of decoded structures, for handing results to
//! tooling that speaks JSON without pulling a serializer into the model
//! types. `serde_json` is used only for string escaping.

use std::fmt::Write;

use crate::event::{Advance, BatterEvent, Event, RunnerEvent};
use crate::game::Game;
use crate::views;

fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn json_opt_string(s: Option<&str>) -> String {
    s.map(json_string).unwrap_or_else(|| "null".to_string())
}

fn batter_event_name(event: BatterEvent) -> &'static str {
    use BatterEvent::*;
    match event {
        UnassistedFieldedOut => "unassisted_fielded_out",
        AssistedFieldedOut => "assisted_fielded_out",
        GroundedIntoDoublePlay => "grounded_into_double_play",
        GroundedIntoTriplePlay => "grounded_into_triple_play",
        LinedIntoDoublePlay => "lined_into_double_play",
        LinedIntoTriplePlay => "lined_into_triple_play",
        Single => "single",
        Double => "double",
        GroundRuleDouble => "ground_rule_double",
        Triple => "triple",
        HomeRunLeavingPark => "home_run_leaving_park",
        HomeRunInsidePark => "home_run_inside_park",
        Error => "error",
        ErrorOnFoulFlyBall => "error_on_foul_fly_ball",
        FieldersChoice => "fielders_choice",
        CatcherInterference => "catcher_interference",
        HitByPitch => "hit_by_pitch",
        Strikeout => "strikeout",
        Walk => "walk",
        IntentionalWalk => "intentional_walk",
        NoPlay => "no_play",
    }
}

fn runner_event_name(event: RunnerEvent) -> &'static str {
    use RunnerEvent::*;
    match event {
        Balk => "balk",
        CaughtStealing => "caught_stealing",
        DefensiveIndifference => "defensive_indifference",
        OtherAdvance => "other_advance",
        PassedBall => "passed_ball",
        WildPitch => "wild_pitch",
        PickedOff => "picked_off",
        PickedOffCaughtStealing => "picked_off_caught_stealing",
        StolenBase => "stolen_base",
    }
}

fn advance_to_json(advance: &Advance) -> String {
    format!(
        r#"{{"from":"{}","to":"{}","out":{},"unearned_run":{},"rbi":{},"no_rbi":{},"team_unearned_run":{}}}"#,
        advance.from_base.as_char(),
        advance.to_base.as_char(),
        advance.is_out,
        advance.is_unearned_run,
        advance.is_rbi_credited,
        advance.is_rbi_not_credited,
        advance.is_team_unearned_run,
    )
}

/// Render one decoded event. The raw field is always included; absent
/// outcomes render as `null`.
pub fn event_to_json(event: &Event) -> String {
    let batter = event
        .description
        .batter_event
        .map(|e| json_string(batter_event_name(e)))
        .unwrap_or_else(|| "null".to_string());
    let runner = event
        .description
        .runner_event
        .map(|e| json_string(runner_event_name(e)))
        .unwrap_or_else(|| "null".to_string());

    let modifiers: Vec<String> = event
        .modifiers
        .iter()
        .map(|modifier| {
            format!(
                r#"{{"raw":{},"hit_location":{}}}"#,
                json_string(&modifier.raw),
                json_opt_string(modifier.hit_location.as_deref()),
            )
        })
        .collect();

    let advances: Vec<String> = event.advances.iter().map(advance_to_json).collect();

    format!(
        r#"{{"raw":{},"batter_event":{},"runner_event":{},"modifiers":[{}],"advances":[{}]}}"#,
        json_string(&event.raw),
        batter,
        runner,
        modifiers.join(","),
        advances.join(","),
    )
}

/// Render a game summary: identity, sides, info map, counts, earned runs.
pub fn game_to_json(game: &Game) -> String {
    let mut info = String::new();
    for (i, (key, value)) in game.info.iter().enumerate() {
        if i > 0 {
            info.push(',');
        }
        let _ = write!(info, "{}:{}", json_string(key), json_string(value));
    }

    let mut earned_runs = String::new();
    for (i, (player_id, runs)) in game.earned_runs.iter().enumerate() {
        if i > 0 {
            earned_runs.push(',');
        }
        let _ = write!(earned_runs, "{}:{}", json_string(player_id), runs);
    }

    format!(
        r#"{{"game_id":{{"home_team":{},"date":"{}","number":{}}},"home_team":{},"visiting_team":{},"info":{{{}}},"players":{},"plays":{},"earned_runs":{{{}}}}}"#,
        json_string(&game.game_id.home_team_id),
        game.game_id.date,
        game.game_id.game_number,
        json_opt_string(game.home_team_id()),
        json_opt_string(game.visiting_team_id()),
        info,
        views::get_players(game, true, true).len(),
        views::get_plays(game, true, true).len(),
        earned_runs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::decode_event;
    use crate::game::GAME_LINES;

    #[test]
    fn test_event_json_output() {
        let event = decode_event("S9/L9S.2-H").unwrap();
        let json = event_to_json(&event);

        assert!(json.contains(r#""raw":"S9/L9S.2-H""#));
        assert!(json.contains(r#""batter_event":"single""#));
        assert!(json.contains(r#""runner_event":null"#));
        assert!(json.contains(r#""hit_location":"9S""#));
        assert!(json.contains(r#""from":"2","to":"H","out":false"#));
    }

    #[test]
    fn test_event_json_accreditation_flags() {
        let event = decode_event("WP.3-H(UR);1-2").unwrap();
        let json = event_to_json(&event);

        assert!(json.contains(r#""runner_event":"wild_pitch""#));
        assert!(json.contains(r#""unearned_run":true"#));
    }

    #[test]
    fn test_game_json_output() {
        let game = Game::from_game_lines(GAME_LINES, false).unwrap();
        let json = game_to_json(&game);

        assert!(json.contains(r#""home_team":"WAS""#));
        assert!(json.contains(r#""visiting_team":"NYN""#));
        assert!(json.contains(r#""date":"2022-04-07""#));
        assert!(json.contains(r#""players":5"#));
        assert!(json.contains(r#""plays":5"#));
        assert!(json.contains(r#""corbp001":2"#));
    }

    #[test]
    fn test_json_escapes_quoted_values() {
        let mut lines: Vec<String> = GAME_LINES.iter().map(|s| s.to_string()).collect();
        lines.push(r#"info,oscorer,"Smith, \"Scorer\"""#.to_string());
        let game = Game::from_game_lines(&lines, false).unwrap();

        let json = game_to_json(&game);
        assert!(json.contains(r#""oscorer""#));
        // The embedded quotes must be re-escaped, not passed through.
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }
}
