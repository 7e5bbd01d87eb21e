use serde::Serialize;

/// Outcome of a single read.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// A logical line was consumed. Its tokens may be empty (a blank line read with
    /// `skip_empty == false`).
    Line,
    /// No physical line was left to read.
    EndOfStream,
}

impl ReadStatus {
    pub fn is_line(self) -> bool {
        self == ReadStatus::Line
    }

    pub fn is_end(self) -> bool {
        self == ReadStatus::EndOfStream
    }
}

/// One logical line together with the line counter reached after reading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}
