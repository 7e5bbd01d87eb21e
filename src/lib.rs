//! # simcsv
//!
//! A streaming reader for comma separated text: quoted fields, embedded delimiters and
//! newlines, comment lines and physical line counting.
//!
//! ```text
//! use simcsv::csv::{CsvReader, StrSource};
//!
//! let mut reader = CsvReader::new(StrSource::new("#x,y\n1,2\n"));
//! let mut tokens = Vec::new();
//! while reader.read_line(&mut tokens, true).is_line() {
//!     println!("{}: {:?}", reader.line_number(), tokens);
//! }
//! ```

pub mod csv;
pub mod error;
pub mod output;
pub mod settings;

pub use crate::csv::{CharSource, CsvReader, ReadStatus, ReaderOptions, Record};
pub use crate::error::SimCsvError;
