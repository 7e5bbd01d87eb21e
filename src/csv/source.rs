//! Character sources
//!
//!     The reader never owns the text it tokenizes. It pulls characters one at a time from a
//!     [CharSource], which is anything that can hand out the next character and look one
//!     character ahead. Two sources ship with the crate:
//!
//!     - [StrSource]: an in-memory string slice.
//!     - [ReaderSource]: any [BufRead] (files, stdin, sockets), decoded one physical line at a
//!       time.
//!
//!     `&mut S` is itself a source, so a caller can lend a stream to a reader and get it back
//!     untouched (apart from its position) once the reader is dropped.

use std::io::{self, BufRead};
use std::str::Chars;

/// A sequential source of characters.
pub trait CharSource {
    /// Consume and return the next character, or `None` once the source is exhausted.
    fn next_char(&mut self) -> Option<char>;

    /// Return the next character without consuming it.
    fn peek_char(&mut self) -> Option<char>;

    fn is_at_end(&mut self) -> bool {
        self.peek_char().is_none()
    }
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> Option<char> {
        (**self).next_char()
    }

    fn peek_char(&mut self) -> Option<char> {
        (**self).peek_char()
    }

    fn is_at_end(&mut self) -> bool {
        (**self).is_at_end()
    }
}

/// Characters of a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
    original_length: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        let chars = text.chars();
        let original_length = chars.as_str().len();

        Self {
            chars,
            original_length,
        }
    }

    /// Byte offset of the next character.
    pub fn position(&self) -> usize {
        self.original_length - self.chars.as_str().len()
    }

    /// The text not consumed yet.
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.clone().next()
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

/// Characters of a buffered byte stream, decoded as UTF-8.
///
/// The stream is read one physical line at a time. A failed read (an I/O error or bytes that
/// are not UTF-8) ends the source: the error is kept and can be collected with
/// [ReaderSource::take_error], and no further reads are attempted.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    line: String,
    cursor: usize,
    finished: bool,
    error: Option<io::Error>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
            cursor: 0,
            finished: false,
            error: None,
        }
    }

    /// Take the error that ended the stream early, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Make sure the line buffer holds at least one unread character, unless the stream is done.
    fn fill(&mut self) {
        if self.cursor < self.line.len() || self.finished {
            return;
        }

        self.line.clear();
        self.cursor = 0;
        match self.inner.read_line(&mut self.line) {
            Ok(0) => self.finished = true,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "character stream failed, treating as end of input");
                self.line.clear();
                self.finished = true;
                self.error = Some(err);
            }
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Option<char> {
        self.fill();
        let ch = self.line[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.fill();
        self.line[self.cursor..].chars().next()
    }
}
