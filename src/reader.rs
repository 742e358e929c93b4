use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use zstd::stream::read::Decoder as ZstdDecoder;

use crate::game::Game;
use crate::log;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn parse(raw: &str) -> Result<Self, Box<dyn Error>> {
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(
                "Invalid compression value ''. Supported values: 'zstd' or omitted."
                    .to_string()
                    .into(),
            );
        }

        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(format!(
                "Invalid compression value '{}'. Supported values: 'zstd' or omitted.",
                normalized
            )
            .into())
        }
    }

    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// Find a year's event files in a data directory, in deterministic order.
///
/// One file per home team per year: `.EVN` National League, `.EVA`
/// American League, `.EVF` Federal League, `.EVR` Negro Leagues.
pub fn discover_year_files(data_dir: &Path, year: u16) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut paths = Vec::new();
    for suffix in ["EVN", "EVA", "EVF", "EVR"] {
        let pattern = format!("{}/{}*.{}", data_dir.display(), year, suffix);
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => paths.push(path),
                Err(error) => log::warn(format!("skipping unreadable path: {}", error)),
            }
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read one event file into lines, decompressing if needed. Source files
/// use CRLF line endings; the carriage return is not part of any record.
pub fn read_file_lines(
    path: &Path,
    compression: CompressionMode,
) -> Result<Vec<String>, std::io::Error> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = match compression {
        CompressionMode::Plain => Box::new(file),
        CompressionMode::Zstd => Box::new(ZstdDecoder::new(file)?),
    };

    let mut lines = Vec::new();
    for line in BufReader::new(reader).lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Split a file's lines into per-game groups: a new group begins at every
/// `id` record.
pub fn split_game_lines<'a>(lines: &'a [impl AsRef<str>]) -> Vec<Vec<&'a str>> {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if line.starts_with("id,") && !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Decode every game in one event file.
///
/// Fails on the first undecodable game, with the file attached to the
/// error; callers that prefer skip-and-continue can run
/// `split_game_lines` + `Game::from_game_lines` per group themselves.
pub fn read_games_in_file(path: &Path) -> Result<Vec<Game>, Box<dyn Error>> {
    let lines = read_file_lines(path, CompressionMode::from_path(path))?;

    let mut games = Vec::new();
    for group in split_game_lines(&lines) {
        match Game::from_game_lines(&group, false) {
            Ok(game) => games.push(game),
            Err(error) => {
                let error = error.with_file(path);
                log::error(error.to_string());
                return Err(Box::new(error));
            }
        }
    }
    Ok(games)
}

/// Decode every game of a year found under a data directory.
pub fn read_games_in_year(data_dir: &Path, year: u16) -> Result<Vec<Game>, Box<dyn Error>> {
    let mut games = Vec::new();
    for path in discover_year_files(data_dir, year)? {
        games.extend(read_games_in_file(&path)?);
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GAME_LINES;
    use std::fs;

    #[test]
    fn test_compression_mode_parse() {
        assert_eq!(
            CompressionMode::parse("zstd").unwrap(),
            CompressionMode::Zstd
        );
        assert_eq!(
            CompressionMode::parse(" ZSTD ").unwrap(),
            CompressionMode::Zstd
        );
        assert!(CompressionMode::parse("").is_err());
        assert!(CompressionMode::parse("gzip").is_err());
    }

    #[test]
    fn test_compression_mode_from_path() {
        assert_eq!(
            CompressionMode::from_path(Path::new("1983ATL.EVN")),
            CompressionMode::Plain
        );
        assert_eq!(
            CompressionMode::from_path(Path::new("1983ATL.EVN.zst")),
            CompressionMode::Zstd
        );
    }

    #[test]
    fn test_split_game_lines_at_id_boundaries() {
        let lines = [
            "id,WAS202204070",
            "info,visteam,NYN",
            "data,er,murpp001,0",
            "id,WAS202204080",
            "info,visteam,NYN",
            "data,er,murpp001,0",
        ];

        let groups = split_game_lines(&lines);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0], "id,WAS202204070");
        assert_eq!(groups[0].last().copied(), Some("data,er,murpp001,0"));
        assert_eq!(groups[1][0], "id,WAS202204080");
        assert_eq!(groups[1].len(), 3);
    }

    #[test]
    fn test_split_game_lines_without_id_keeps_one_group() {
        let lines = ["info,visteam,NYN", "info,hometeam,WAS"];
        let groups = split_game_lines(&lines);
        assert_eq!(groups.len(), 1);
    }

    fn second_game_lines() -> Vec<String> {
        GAME_LINES
            .iter()
            .map(|line| line.replace("id,WAS202204070", "id,WAS202204080"))
            .collect()
    }

    #[test]
    fn test_read_games_in_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "retrosheet_reader_test_{}.EVN",
            std::process::id()
        ));
        let mut contents = GAME_LINES.join("\r\n");
        contents.push_str("\r\n");
        contents.push_str(&second_game_lines().join("\r\n"));
        contents.push('\n');
        fs::write(&path, contents).unwrap();

        let games = read_games_in_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id.game_number, 0);
        assert_eq!(games[1].game_id.raw, "id,WAS202204080");
        assert_eq!(games[0].chronological_events.len(), 10);
    }

    #[test]
    fn test_read_games_in_zstd_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "retrosheet_reader_test_{}.EVN.zst",
            std::process::id()
        ));
        let contents = GAME_LINES.join("\r\n");
        let compressed = zstd::stream::encode_all(contents.as_bytes(), 0).unwrap();
        fs::write(&path, compressed).unwrap();

        let games = read_games_in_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].home_team_id(), Some("WAS"));
    }

    #[test]
    fn test_decode_failure_names_the_file() {
        let path = std::env::temp_dir().join(format!(
            "retrosheet_reader_bad_{}.EVN",
            std::process::id()
        ));
        fs::write(&path, "id,WAS202204070\nplay,1,0,abc,00,X,S8.?X?\n").unwrap();

        let error = read_games_in_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(error.to_string().contains("retrosheet_reader_bad"));
    }
}
