//! The line reader
//!
//!     [CsvReader] pulls one logical line at a time out of a [CharSource] and splits it into
//!     tokens. Before a physical line is handed to the [Scanner] its first character decides
//!     what kind of line it is:
//!
//!     - the comment character: the whole physical line is dropped.
//!     - a newline (or `\r\n`): the line is empty, skipped or reported depending on `skip_empty`.
//!     - anything else: the line holds data and is scanned.
//!
//!     Every physical line consumed, whichever kind it is, bumps the line counter. That includes
//!     the continuation lines of a quoted field spanning several lines.

use super::options::ReaderOptions;
use super::record::{ReadStatus, Record};
use super::scanner::{skip_rest_of_line, Field, Scanner};
use super::source::CharSource;
use crate::error::SimCsvError;

/// Streaming reader of comma separated lines.
#[derive(Debug)]
pub struct CsvReader<S> {
    source: S,
    options: ReaderOptions,
    line_number: usize,
    fields: Vec<Field>,
}

impl<S: CharSource> CsvReader<S> {
    /// Bind a reader with default options to `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: ReaderOptions::default(),
            line_number: 0,
            fields: Vec::new(),
        }
    }

    pub fn with_options(source: S, options: ReaderOptions) -> Result<Self, SimCsvError> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new(source)
        })
    }

    /// Read the next logical line into `tokens`, which is cleared first.
    ///
    /// With `skip_empty` set, empty physical lines are passed over; otherwise an empty line is
    /// returned as a [ReadStatus::Line] with no tokens.
    pub fn read_line(&mut self, tokens: &mut Vec<String>, skip_empty: bool) -> ReadStatus {
        self.read_tokens(tokens, skip_empty, false)
    }

    /// Same as [CsvReader::read_line], with whitespace trimmed off both ends of every token
    /// that was not quoted.
    pub fn read_line_trimmed(&mut self, tokens: &mut Vec<String>, skip_empty: bool) -> ReadStatus {
        self.read_tokens(tokens, skip_empty, true)
    }

    /// Physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Change the comment character for all following reads.
    ///
    /// The change always applies, even to characters [CsvReader::with_options] would refuse.
    /// Such a choice is logged as a warning and behaves as follows:
    ///
    /// - equal to the delimiter: a line starting with it is a comment line, but later in a line
    ///   the character still splits fields, so trailing comments are no longer recognized.
    /// - `"`: a line starting with a quoted field is dropped as a comment.
    /// - `\n`: empty lines become comment lines and are skipped even when `skip_empty` is
    ///   false.
    /// - `\r`: the same for `\r\n` empty lines, and any line starting with `\r` is dropped.
    pub fn set_comment_char(&mut self, comment_char: char) {
        let candidate = ReaderOptions {
            comment_char,
            ..self.options
        };
        if let Err(err) = candidate.validate() {
            tracing::warn!(%err, "comment character conflicts with the reader options");
        }
        self.options.comment_char = comment_char;
    }

    pub fn comment_char(&self) -> char {
        self.options.comment_char
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Iterate over the remaining logical lines, using the `skip_empty` and `trim` options.
    pub fn records(&mut self) -> Records<'_, S> {
        Records { reader: self }
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read_tokens(&mut self, tokens: &mut Vec<String>, skip_empty: bool, trim: bool) -> ReadStatus {
        tokens.clear();
        let status = self.read_fields(skip_empty);
        tokens.extend(self.fields.drain(..).map(|field| field.into_token(trim)));
        status
    }

    fn read_fields(&mut self, skip_empty: bool) -> ReadStatus {
        self.fields.clear();

        loop {
            let Some(first) = self.source.next_char() else {
                tracing::debug!(line = self.line_number, "end of stream");
                return ReadStatus::EndOfStream;
            };
            self.line_number += 1;

            if first == self.options.comment_char {
                tracing::trace!(line = self.line_number, "skipping comment line");
                if first != '\n' {
                    skip_rest_of_line(&mut self.source);
                }
                continue;
            }

            if self.at_empty_line_end(first) {
                if skip_empty {
                    tracing::trace!(line = self.line_number, "skipping empty line");
                    continue;
                }
                return ReadStatus::Line;
            }

            let scanner = Scanner {
                delimiter: self.options.delimiter,
                comment_char: self.options.comment_char,
            };
            let start_line = self.line_number;
            self.line_number += scanner.scan_line(first, &mut self.source, &mut self.fields);
            tracing::trace!(
                line = start_line,
                last_line = self.line_number,
                fields = self.fields.len(),
                "read logical line"
            );
            return ReadStatus::Line;
        }
    }

    /// Whether `first` ends the physical line on its own, consuming the `\n` of a `\r\n` pair.
    fn at_empty_line_end(&mut self, first: char) -> bool {
        match first {
            '\n' => true,
            '\r' if self.source.peek_char() == Some('\n') => {
                self.source.next_char();
                true
            }
            _ => false,
        }
    }
}

/// Iterator over the records of a [CsvReader].
#[derive(Debug)]
pub struct Records<'r, S> {
    reader: &'r mut CsvReader<S>,
}

impl<S: CharSource> Iterator for Records<'_, S> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let ReaderOptions {
            skip_empty, trim, ..
        } = self.reader.options;
        let mut fields = Vec::new();
        match self.reader.read_tokens(&mut fields, skip_empty, trim) {
            ReadStatus::Line => Some(Record {
                line: self.reader.line_number,
                fields,
            }),
            ReadStatus::EndOfStream => None,
        }
    }
}
