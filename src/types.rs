use chrono::NaiveDate;

use crate::error::GrammarError;

/// A base as encoded in event notation.
///
/// `Batter` is the batter's origin (the `B` token); it is distinct from
/// `Home` even though both are physically home plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Batter,
    First,
    Second,
    Third,
    Home,
}

impl Base {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::Batter),
            '1' => Some(Self::First),
            '2' => Some(Self::Second),
            '3' => Some(Self::Third),
            'H' => Some(Self::Home),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Batter => 'B',
            Self::First => '1',
            Self::Second => '2',
            Self::Third => '3',
            Self::Home => 'H',
        }
    }
}

/// Which team is at bat, in the source's 0/1 encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Visiting,
    Home,
}

impl Side {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Visiting),
            1 => Some(Self::Home),
            _ => None,
        }
    }

    pub(crate) fn from_field(field: &str, line: &str) -> Result<Self, GrammarError> {
        field
            .parse::<u8>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| GrammarError::new("team_side", field).with_line(line))
    }
}

/// The identity of a game, from its `id` record.
///
/// Example: `id,ATL198304080` is the only game at Atlanta on 1983-04-08.
/// A trailing 1 or 2 marks the games of a doubleheader.
#[derive(Debug, Clone, PartialEq)]
pub struct GameId {
    pub home_team_id: String,
    pub date: NaiveDate,
    pub game_number: u8,
    pub raw: String,
}

impl GameId {
    pub fn from_id_line(id_line: &str) -> Result<Self, GrammarError> {
        let err = || GrammarError::new("game_id", id_line);

        let token = id_line.split(',').nth(1).ok_or_else(err)?;
        let home_team_id: String = token.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        let digits: Vec<char> = token.chars().filter(|c| c.is_ascii_digit()).collect();
        if home_team_id.is_empty() || digits.len() != 9 {
            return Err(err());
        }

        let date_digits: String = digits[..8].iter().collect();
        let year = date_digits[0..4].parse::<i32>().map_err(|_| err())?;
        let month = date_digits[4..6].parse::<u32>().map_err(|_| err())?;
        let day = date_digits[6..8].parse::<u32>().map_err(|_| err())?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)?;

        let game_number = digits[8].to_digit(10).ok_or_else(err)? as u8;

        Ok(Self {
            home_team_id,
            date,
            game_number,
            raw: id_line.to_string(),
        })
    }
}
