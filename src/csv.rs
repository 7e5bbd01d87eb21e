//! Comma separated line reading
//!
//!     Text is read as a stream of physical lines (newline delimited) grouped into logical
//!     lines (records). A logical line is usually one physical line, but a quoted field may hold
//!     newlines, in which case the record runs on until the quote closes.
//!
//!     Format summary:
//!
//!     - Fields are separated by a delimiter, `,` unless configured otherwise.
//!     - A field starting with `"` is quoted: delimiters, newlines and the comment character
//!       inside it are literal, and `""` stands for one `"`.
//!     - A physical line starting with the comment character (`#` by default) is ignored. The
//!       comment character outside quotes later in a line ends that line.
//!     - Empty physical lines are skipped unless the caller asks for them.
//!
//!     Malformed input is never an error: unbalanced quotes and stray characters end up in the
//!     tokens as best effort content.
//!
//!     Modules:
//!     - [source]: where characters come from.
//!     - [scanner]: the per-line state machine.
//!     - [reader]: line classification, counting and the public read calls.

pub mod options;
pub mod reader;
pub mod record;
pub(crate) mod scanner;
pub mod source;

pub use options::ReaderOptions;
pub use reader::{CsvReader, Records};
pub use record::{ReadStatus, Record};
pub use source::{CharSource, ReaderSource, StrSource};
