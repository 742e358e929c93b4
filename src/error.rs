use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// A token whose syntax matches no known rule for the field being decoded.
///
/// Carries the surrounding game line and source file when they are known,
/// so a failure deep inside an event field still points at its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarError {
    pub field: &'static str,
    pub raw_value: String,
    pub line: Option<String>,
    pub file: Option<PathBuf>,
}

impl GrammarError {
    pub fn new(field: &'static str, raw_value: impl Into<String>) -> Self {
        Self {
            field,
            raw_value: raw_value.into(),
            line: None,
            file: None,
        }
    }

    // Context is applied inside-out as an error propagates; the outermost
    // caller knows the true enclosing line, so later context wins.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to decode '{}' from '{}'",
            self.field, self.raw_value
        )?;
        if let Some(line) = &self.line {
            write!(f, " in line '{}'", line)?;
        }
        if let Some(file) = &self.file {
            write!(f, " from '{}'", file.display())?;
        }
        Ok(())
    }
}

impl Error for GrammarError {}

/// A game line group that contains no `id` record.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingIdError {
    pub first_line: String,
}

impl MissingIdError {
    pub fn new(first_line: impl Into<String>) -> Self {
        Self {
            first_line: first_line.into(),
        }
    }
}

impl fmt::Display for MissingIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no id record found for game starting at '{}'",
            self.first_line
        )
    }
}

impl Error for MissingIdError {}

/// Any failure while decoding a full game.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    Grammar(GrammarError),
    MissingId(MissingIdError),
}

impl DecodeError {
    pub fn with_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::Grammar(e) => Self::Grammar(e.with_file(file)),
            other => other,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grammar(e) => e.fmt(f),
            Self::MissingId(e) => e.fmt(f),
        }
    }
}

impl Error for DecodeError {}

impl From<GrammarError> for DecodeError {
    fn from(e: GrammarError) -> Self {
        Self::Grammar(e)
    }
}

impl From<MissingIdError> for DecodeError {
    fn from(e: MissingIdError) -> Self {
        Self::MissingId(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_error_message_includes_context() {
        let err = GrammarError::new("modifier", "ZZZ")
            .with_line("play,1,0,abc,00,,S8/ZZZ")
            .with_file("1983ATL.EVN");

        let msg = err.to_string();
        assert!(msg.contains("'modifier'"));
        assert!(msg.contains("'ZZZ'"));
        assert!(msg.contains("play,1,0,abc,00,,S8/ZZZ"));
        assert!(msg.contains("1983ATL.EVN"));
    }

    #[test]
    fn test_outer_context_replaces_inner() {
        let err = GrammarError::new("advance", "?X?")
            .with_line("S8.?X?")
            .with_line("play,1,0,abc,00,X,S8.?X?");

        assert_eq!(err.line.as_deref(), Some("play,1,0,abc,00,X,S8.?X?"));
    }

    #[test]
    fn test_decode_error_with_file_ignores_missing_id() {
        let err = DecodeError::from(MissingIdError::new("info,visteam,NYN")).with_file("x.EVA");

        assert_eq!(
            err,
            DecodeError::MissingId(MissingIdError::new("info,visteam,NYN"))
        );
    }
}
