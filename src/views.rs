//! Read-only filters over a decoded game.

use std::collections::BTreeMap;

use crate::game::{ChronologicalEvent, Game};
use crate::play::Play;
use crate::player::Player;
use crate::types::Side;

fn include_side(side: Side, include_home_team: bool, include_visiting_team: bool) -> bool {
    match side {
        Side::Home => include_home_team,
        Side::Visiting => include_visiting_team,
    }
}

/// Plays in a game, in order, optionally restricted to one side.
pub fn get_plays(game: &Game, include_home_team: bool, include_visiting_team: bool) -> Vec<&Play> {
    game.chronological_events
        .iter()
        .filter_map(|event| match event {
            ChronologicalEvent::Play(play)
                if include_side(play.side, include_home_team, include_visiting_team) =>
            {
                Some(play)
            }
            _ => None,
        })
        .collect()
}

/// Lineup entries in a game, in order, optionally restricted to one side.
pub fn get_players(
    game: &Game,
    include_home_team: bool,
    include_visiting_team: bool,
) -> Vec<&Player> {
    game.chronological_events
        .iter()
        .filter_map(|event| match event {
            ChronologicalEvent::Player(player)
                if include_side(player.side, include_home_team, include_visiting_team) =>
            {
                Some(player)
            }
            _ => None,
        })
        .collect()
}

/// Batter id to that batter's plays, in order.
pub fn get_batter_plays<'a>(
    game: &'a Game,
    include_home_team: bool,
    include_visiting_team: bool,
) -> BTreeMap<&'a str, Vec<&'a Play>> {
    let mut batter_plays: BTreeMap<&str, Vec<&Play>> = BTreeMap::new();
    for play in get_plays(game, include_home_team, include_visiting_team) {
        batter_plays
            .entry(play.batter_id.as_str())
            .or_default()
            .push(play);
    }
    batter_plays
}

/// Inning number to the plays of that inning, in order.
pub fn get_inning_plays<'a>(
    game: &'a Game,
    include_home_team: bool,
    include_visiting_team: bool,
) -> BTreeMap<u32, Vec<&'a Play>> {
    let mut inning_plays: BTreeMap<u32, Vec<&Play>> = BTreeMap::new();
    for play in get_plays(game, include_home_team, include_visiting_team) {
        inning_plays.entry(play.inning).or_default().push(play);
    }
    inning_plays
}
