//! Record serialization
//!
//! Renders records read by a [CsvReader](crate::csv::CsvReader) for display. The formats are
//! selected by name from the command line or the `output.format` configuration key.
//!
//! ## Tag format
//!
//! ```text
//! <records>
//!   <record line="2">
//!     <field>one</field>
//!     <field>two</field>
//!   </record>
//!   <record line="4"/>
//! </records>
//! ```
//!
//! Records without fields collapse to a self-closing tag. Field text is escaped but not
//! otherwise altered, newlines included.

use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::csv::Record;
use crate::error::SimCsvError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One pretty printed JSON array.
    Json,
    /// One JSON object per line.
    Jsonl,
    Yaml,
    /// XML-like tags.
    Tag,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Json,
        OutputFormat::Jsonl,
        OutputFormat::Yaml,
        OutputFormat::Tag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Tag => "tag",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = SimCsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| SimCsvError::InvalidOption(format!("unknown output format '{s}'")))
    }
}

/// Write `records` to `out` in the given format.
pub fn write_records<W, I>(format: OutputFormat, records: I, out: &mut W) -> Result<(), SimCsvError>
where
    W: Write,
    I: IntoIterator<Item = Record>,
{
    match format {
        OutputFormat::Json => {
            let records: Vec<Record> = records.into_iter().collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *out, &record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Yaml => {
            let records: Vec<Record> = records.into_iter().collect();
            serde_yaml::to_writer(&mut *out, &records)?;
        }
        OutputFormat::Tag => {
            writeln!(out, "<records>")?;
            for record in records {
                out.write_all(serialize_record_tag(&record).as_bytes())?;
            }
            writeln!(out, "</records>")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Render one record as indented tags.
pub fn serialize_record_tag(record: &Record) -> String {
    let mut output = String::new();
    if record.is_empty() {
        output.push_str(&format!("  <record line=\"{}\"/>\n", record.line));
        return output;
    }

    output.push_str(&format!("  <record line=\"{}\">\n", record.line));
    for field in &record.fields {
        output.push_str(&format!("    <field>{}</field>\n", escape_xml(field)));
    }
    output.push_str("  </record>\n");
    output
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
