use std::collections::BTreeMap;

use crate::error::{DecodeError, GrammarError, MissingIdError};
use crate::play::Play;
use crate::player::Player;
use crate::types::GameId;

/// The record types a game line group is made of. The tag set is fixed;
/// anything else (`version`, batting adjustments, box-score records) is
/// carried by files but not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Id,
    Info,
    Start,
    Sub,
    Play,
    Data,
    Comment,
    Other,
}

impl RecordKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "id" => Self::Id,
            "info" => Self::Info,
            "start" => Self::Start,
            "sub" => Self::Sub,
            "play" => Self::Play,
            "data" => Self::Data,
            "com" => Self::Comment,
            _ => Self::Other,
        }
    }
}

/// Lineup changes and plays in file order, so plate appearances and
/// substitutions interleave the way they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ChronologicalEvent {
    Player(Player),
    Play(Play),
}

/// One fully decoded game.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub game_id: GameId,
    pub info: BTreeMap<String, String>,
    pub chronological_events: Vec<ChronologicalEvent>,
    pub earned_runs: BTreeMap<String, i32>,
}

impl Game {
    /// Decode one game's line group.
    ///
    /// With `basic_info_only` the pass stops at the first `start` record:
    /// identity and info are already gathered by then, and callers that
    /// only need those skip the whole event stream.
    pub fn from_game_lines(
        lines: &[impl AsRef<str>],
        basic_info_only: bool,
    ) -> Result<Self, DecodeError> {
        let mut game_id = None;
        let mut info = BTreeMap::new();
        let mut chronological_events = Vec::new();
        let mut earned_runs = BTreeMap::new();

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let tag = line.split(',').next().unwrap_or_default();
            match RecordKind::from_tag(tag) {
                RecordKind::Id => {
                    game_id = Some(GameId::from_id_line(line).map_err(|e| e.with_line(line))?);
                }
                RecordKind::Info => {
                    let mut fields = line.splitn(3, ',');
                    fields.next();
                    match (fields.next(), fields.next()) {
                        (Some(key), Some(value)) => {
                            info.insert(key.to_string(), value.to_string());
                        }
                        _ => return Err(GrammarError::new("info", line).into()),
                    }
                }
                RecordKind::Start => {
                    if basic_info_only {
                        break;
                    }
                    chronological_events.push(ChronologicalEvent::Player(
                        Player::from_start_or_sub_line(line, false)?,
                    ));
                }
                RecordKind::Sub => {
                    chronological_events.push(ChronologicalEvent::Player(
                        Player::from_start_or_sub_line(line, true)?,
                    ));
                }
                RecordKind::Play => {
                    let comment_lines = comment_lines_following_play(i, lines);
                    chronological_events.push(ChronologicalEvent::Play(Play::from_play_line(
                        line,
                        &comment_lines,
                    )?));
                }
                RecordKind::Data => {
                    let parts: Vec<&str> = line.split(',').collect();
                    match parts[..] {
                        [_, "er", player_id, runs] => {
                            let runs = runs.parse::<i32>().map_err(|_| {
                                GrammarError::new("earned_runs", runs).with_line(line)
                            })?;
                            earned_runs.insert(player_id.to_string(), runs);
                        }
                        [_, "er", ..] => {
                            return Err(GrammarError::new("earned_runs", line).into());
                        }
                        // No other data record type appears in the
                        // published corpus.
                        _ => {}
                    }
                }
                // Comment lines are consumed by the play they follow.
                RecordKind::Comment | RecordKind::Other => {}
            }
        }

        let game_id = game_id.ok_or_else(|| {
            MissingIdError::new(lines.first().map(AsRef::as_ref).unwrap_or_default())
        })?;

        Ok(Self {
            game_id,
            info,
            chronological_events,
            earned_runs,
        })
    }

    pub fn home_team_id(&self) -> Option<&str> {
        self.info.get("hometeam").map(String::as_str)
    }

    pub fn visiting_team_id(&self) -> Option<&str> {
        self.info.get("visteam").map(String::as_str)
    }
}

fn comment_lines_following_play<'a>(
    play_line_number: usize,
    lines: &'a [impl AsRef<str>],
) -> Vec<&'a str> {
    lines[play_line_number + 1..]
        .iter()
        .map(AsRef::as_ref)
        .take_while(|line| RecordKind::from_tag(line.split(',').next().unwrap_or_default()) == RecordKind::Comment)
        .collect()
}

#[cfg(test)]
pub(crate) const GAME_LINES: &[&str] = &[
    "id,WAS202204070",
    "version,2",
    "info,visteam,NYN",
    "info,hometeam,WAS",
    "info,date,2022/04/07",
    "info,number,0",
    "start,marts002,\"Starling Marte\",0,2,9",
    "start,linds001,\"Francisco Lindor\",0,3,6",
    "start,sotoj001,\"Juan Soto\",1,2,9",
    "start,corbp001,\"Patrick Corbin\",1,0,1",
    "play,1,0,marts002,22,CBCBX,S9/L89S-",
    "play,1,0,linds001,01,CX,8/F78",
    "com,\"deep drive, caught at the track\"",
    "com,no doubt off the bat",
    "play,1,1,sotoj001,32,BBCBFX,W",
    "sub,grayj003,\"Josiah Gray\",1,0,1",
    "play,2,0,canhm001,12,BCCX,K",
    "play,2,1,bells002,10,BX,S7/G56.B-1",
    "data,er,corbp001,2",
    "data,er,grayj003,1",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_game_lines() {
        let game = Game::from_game_lines(GAME_LINES, false).unwrap();

        assert_eq!(game.game_id.raw, "id,WAS202204070");
        assert_eq!(game.home_team_id(), Some("WAS"));
        assert_eq!(game.visiting_team_id(), Some("NYN"));
        assert_eq!(game.info.get("date").map(String::as_str), Some("2022/04/07"));
        // 4 starters, 1 sub, 5 plays, in file order.
        assert_eq!(game.chronological_events.len(), 10);
        assert_eq!(
            game.earned_runs,
            BTreeMap::from([("corbp001".to_string(), 2), ("grayj003".to_string(), 1)])
        );
    }

    #[test]
    fn test_events_preserve_file_order() {
        let game = Game::from_game_lines(GAME_LINES, false).unwrap();

        let kinds: Vec<&str> = game
            .chronological_events
            .iter()
            .map(|event| match event {
                ChronologicalEvent::Player(_) => "player",
                ChronologicalEvent::Play(_) => "play",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "player", "player", "player", "player", "play", "play", "play", "player", "play",
                "play"
            ]
        );
    }

    #[test]
    fn test_comments_attach_to_the_preceding_play() {
        let game = Game::from_game_lines(GAME_LINES, false).unwrap();

        let plays: Vec<&Play> = game
            .chronological_events
            .iter()
            .filter_map(|event| match event {
                ChronologicalEvent::Play(play) => Some(play),
                _ => None,
            })
            .collect();

        assert!(plays[0].comments.is_empty());
        assert_eq!(
            plays[1].comments,
            vec!["\"deep drive, caught at the track\"", "no doubt off the bat"]
        );
        assert!(plays[2].comments.is_empty());
    }

    #[test]
    fn test_basic_info_only_stops_at_the_lineup() {
        let game = Game::from_game_lines(GAME_LINES, true).unwrap();

        assert!(game.chronological_events.is_empty());
        assert!(game.earned_runs.is_empty());
        assert_eq!(game.info.len(), 4);
        assert_eq!(game.home_team_id(), Some("WAS"));
    }

    #[test]
    fn test_missing_id_record() {
        let lines = ["info,visteam,NYN", "info,hometeam,WAS"];
        let err = Game::from_game_lines(&lines, false).unwrap_err();

        assert_eq!(
            err,
            DecodeError::MissingId(MissingIdError::new("info,visteam,NYN"))
        );
    }

    #[test]
    fn test_decode_failure_carries_the_offending_line() {
        let lines = ["id,WAS202204070", "play,1,0,abc,00,X,S8.?X?"];
        let err = Game::from_game_lines(&lines, false).unwrap_err();

        match err {
            DecodeError::Grammar(e) => {
                assert_eq!(e.field, "advance");
                assert_eq!(e.line.as_deref(), Some("play,1,0,abc,00,X,S8.?X?"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_record_types_are_ignored() {
        let lines = ["id,WAS202204070", "version,2", "badj,sotoj001,L", "line,0,1"];
        let game = Game::from_game_lines(&lines, false).unwrap();

        assert!(game.chronological_events.is_empty());
    }
}
