//! Reader policy toggles

use serde::Deserialize;

use crate::error::SimCsvError;

pub const DEFAULT_COMMENT_CHAR: char = '#';
pub const DEFAULT_DELIMITER: char = ',';
pub const QUOTE: char = '"';

/// Knobs that shape how a [CsvReader](super::CsvReader) splits lines.
///
/// `comment_char` and `delimiter` apply to every read. `skip_empty` and `trim` are the defaults
/// used by [CsvReader::records](super::CsvReader::records); the explicit `read_line*` calls take
/// their own `skip_empty` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub comment_char: char,
    pub delimiter: char,
    pub skip_empty: bool,
    pub trim: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            comment_char: DEFAULT_COMMENT_CHAR,
            delimiter: DEFAULT_DELIMITER,
            skip_empty: true,
            trim: false,
        }
    }
}

impl ReaderOptions {
    /// Reject combinations the scanner cannot tell apart.
    pub fn validate(&self) -> Result<(), SimCsvError> {
        let reserved = |ch: char| ch == QUOTE || ch == '\n' || ch == '\r';

        if reserved(self.delimiter) {
            return Err(SimCsvError::InvalidOption(format!(
                "delimiter {:?} is reserved",
                self.delimiter
            )));
        }
        if reserved(self.comment_char) {
            return Err(SimCsvError::InvalidOption(format!(
                "comment character {:?} is reserved",
                self.comment_char
            )));
        }
        if self.comment_char == self.delimiter {
            return Err(SimCsvError::InvalidOption(format!(
                "comment character and delimiter are both {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = ReaderOptions::default();
        assert_eq!(options.comment_char, '#');
        assert_eq!(options.delimiter, ',');
        assert!(options.skip_empty);
        assert!(!options.trim);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_quote_delimiter() {
        let options = ReaderOptions {
            delimiter: '"',
            ..ReaderOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(SimCsvError::InvalidOption(_))
        ));
    }

    #[test]
    fn rejects_comment_equal_to_delimiter() {
        let options = ReaderOptions {
            comment_char: ';',
            delimiter: ';',
            ..ReaderOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
