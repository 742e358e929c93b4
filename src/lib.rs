//! Decoder for Retrosheet play-by-play event files.
//!
//! Each play record's trailing field is a compact notation for what
//! happened on a play: who fielded the ball, which outs were made, how
//! runners advanced. This crate turns those fields, together with the
//! surrounding lineup, info, and earned-run records, into typed games
//! suitable for statistical querying.
//!
//! Decoding is purely functional: each game's line group decodes
//! independently, so callers can shard a season across threads at game
//! boundaries with no coordination.

pub mod error;
pub mod event;
pub mod game;
pub mod json;
mod log;
pub mod play;
pub mod player;
pub mod reader;
pub mod types;
pub mod views;

pub use error::{DecodeError, GrammarError, MissingIdError};
pub use event::{
    Advance, BatterEvent, Description, Event, Modifier, ModifierKind, PositionCounts,
    RunnerEvent, decode_advance, decode_description, decode_event, decode_modifier,
};
pub use game::{ChronologicalEvent, Game};
pub use play::Play;
pub use player::Player;
pub use reader::{
    CompressionMode, discover_year_files, read_games_in_file, read_games_in_year,
    split_game_lines,
};
pub use types::{Base, GameId, Side};

/// Decode one game's line group.
///
/// `basic_info_only` stops after the identity and info records, for
/// callers that only need a game's identity and metadata.
pub fn decode_game(
    lines: &[impl AsRef<str>],
    basic_info_only: bool,
) -> Result<Game, DecodeError> {
    Game::from_game_lines(lines, basic_info_only)
}
