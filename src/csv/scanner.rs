//! Field Scanner
//!
//!     The scanner is the state machine that splits one logical line into fields. It is handed
//!     the first character of a physical line that the reader already knows is neither a comment
//!     line nor an empty line, and it keeps pulling characters until the logical line ends:
//!
//!     - FieldStart: nothing accumulated for the current field yet. A quote here opens a quoted
//!       field.
//!     - Unquoted: plain text. Delimiter closes the field, newline closes the line, the comment
//!       character closes the line and drops the rest of it.
//!     - Quoted: everything is literal except the quote. A doubled quote is one literal quote, a
//!       single quote closes the field and scanning resumes in Unquoted on the same field.
//!
//!     Newlines met while Quoted belong to the field. Each one followed by more input starts a
//!     physical line the reader has to count, so the scanner reports how many it swallowed.

use super::options::QUOTE;
use super::source::CharSource;

/// A field as captured by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Field {
    pub text: String,
    /// The field opened with a quote; its content must not be trimmed.
    pub quoted: bool,
}

impl Field {
    pub fn into_token(self, trim: bool) -> String {
        if trim && !self.quoted {
            let trimmed = self.text.trim();
            if trimmed.len() == self.text.len() {
                self.text
            } else {
                trimmed.to_string()
            }
        } else {
            self.text
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    FieldStart,
    Unquoted,
    Quoted,
}

/// Splits logical lines on `delimiter`, honoring quotes and trailing comments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanner {
    pub delimiter: char,
    pub comment_char: char,
}

impl Scanner {
    /// Scan one logical line starting with the already consumed character `first`.
    ///
    /// Fields are appended to `fields`; at least one field is always produced. Returns the
    /// number of newlines consumed inside quoted fields.
    pub fn scan_line<S: CharSource + ?Sized>(
        &self,
        first: char,
        source: &mut S,
        fields: &mut Vec<Field>,
    ) -> usize {
        let mut state = ScanState::FieldStart;
        let mut field = Field::default();
        let mut continuation_lines = 0;
        let mut pending = Some(first);

        while let Some(ch) = pending.take().or_else(|| source.next_char()) {
            match state {
                ScanState::Quoted => match ch {
                    QUOTE if source.peek_char() == Some(QUOTE) => {
                        source.next_char();
                        field.text.push(QUOTE);
                    }
                    QUOTE => state = ScanState::Unquoted,
                    '\n' => {
                        // a newline with nothing after it opens no further physical line
                        if source.peek_char().is_some() {
                            continuation_lines += 1;
                        }
                        field.text.push('\n');
                    }
                    _ => field.text.push(ch),
                },
                ScanState::FieldStart | ScanState::Unquoted => {
                    if ch == self.delimiter {
                        fields.push(std::mem::take(&mut field));
                        state = ScanState::FieldStart;
                    } else if ch == '\n' {
                        break;
                    } else if ch == '\r' && source.peek_char() == Some('\n') {
                        source.next_char();
                        break;
                    } else if ch == self.comment_char {
                        skip_rest_of_line(source);
                        break;
                    } else if ch == QUOTE && state == ScanState::FieldStart {
                        field.quoted = true;
                        state = ScanState::Quoted;
                    } else {
                        field.text.push(ch);
                        state = ScanState::Unquoted;
                    }
                }
            }
        }

        fields.push(field);
        continuation_lines
    }
}

/// Consume characters up to and including the next newline.
pub(crate) fn skip_rest_of_line<S: CharSource + ?Sized>(source: &mut S) {
    while let Some(ch) = source.next_char() {
        if ch == '\n' {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::source::StrSource;

    fn scan(text: &str) -> (Vec<Field>, usize, String) {
        let scanner = Scanner {
            delimiter: ',',
            comment_char: '#',
        };
        let mut source = StrSource::new(text);
        let first = source.next_char().expect("non-empty input");
        let mut fields = Vec::new();
        let extra = scanner.scan_line(first, &mut source, &mut fields);
        (fields, extra, source.remaining().to_string())
    }

    fn texts(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn stops_after_the_first_newline() {
        let (fields, extra, rest) = scan("a,b\nc,d");
        assert_eq!(texts(&fields), vec!["a", "b"]);
        assert_eq!(extra, 0);
        assert_eq!(rest, "c,d");
    }

    #[test]
    fn crlf_ends_the_line() {
        let (fields, _, rest) = scan("a,b\r\nc");
        assert_eq!(texts(&fields), vec!["a", "b"]);
        assert_eq!(rest, "c");
    }

    #[test]
    fn lone_carriage_return_is_data() {
        let (fields, _, _) = scan("a\rb");
        assert_eq!(texts(&fields), vec!["a\rb"]);
    }

    #[test]
    fn marks_quoted_fields() {
        let (fields, _, _) = scan(r#"x," y ",z"#);
        assert!(!fields[0].quoted);
        assert!(fields[1].quoted);
        assert_eq!(fields[1].text, " y ");
        assert!(!fields[2].quoted);
    }

    #[test]
    fn counts_newlines_inside_quotes() {
        let (fields, extra, rest) = scan("\"1\n2\n\",3\nnext");
        assert_eq!(texts(&fields), vec!["1\n2\n", "3"]);
        assert_eq!(extra, 2);
        assert_eq!(rest, "next");
    }

    #[test]
    fn text_after_closing_quote_joins_the_field() {
        let (fields, _, _) = scan(r#""a"b,c"#);
        assert_eq!(texts(&fields), vec!["ab", "c"]);
        assert!(fields[0].quoted);
    }

    #[test]
    fn quote_inside_unquoted_text_is_literal() {
        let (fields, _, _) = scan(r#"ab"c,d"#);
        assert_eq!(texts(&fields), vec![r#"ab"c"#, "d"]);
    }

    #[test]
    fn trailing_comment_drops_the_rest_of_the_line() {
        let (fields, _, rest) = scan("a,b # note, more\nnext");
        assert_eq!(texts(&fields), vec!["a", "b "]);
        assert_eq!(rest, "next");
    }

    #[test]
    fn unterminated_quote_keeps_what_was_read() {
        let (fields, extra, rest) = scan("a,\"open\nstill");
        assert_eq!(texts(&fields), vec!["a", "open\nstill"]);
        assert_eq!(extra, 1);
        assert_eq!(rest, "");
    }

    #[test]
    fn final_newline_of_unterminated_quote_opens_no_line() {
        let (fields, extra, rest) = scan("\"a\n");
        assert_eq!(texts(&fields), vec!["a\n"]);
        assert_eq!(extra, 0);
        assert_eq!(rest, "");

        let (fields, extra, _) = scan("\"a\"\"\n\n");
        assert_eq!(texts(&fields), vec!["a\"\n\n"]);
        assert_eq!(extra, 1);
    }

    #[test]
    fn trims_only_unquoted_fields() {
        let plain = Field {
            text: "  a ".into(),
            quoted: false,
        };
        let quoted = Field {
            text: "  a ".into(),
            quoted: true,
        };
        assert_eq!(plain.clone().into_token(true), "a");
        assert_eq!(plain.into_token(false), "  a ");
        assert_eq!(quoted.into_token(true), "  a ");
    }
}
