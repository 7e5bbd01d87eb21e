//! Command-line interface for simcsv
//! Reads comma separated text from a file or stdin and prints the records it holds.
//!
//! Usage:
//!   simcsv `<path>` [--format `<format>`]        - Print the records of a file
//!   simcsv - --trim --comment '%'              - Read stdin, trimming fields, `%` comments
//!   simcsv `<path>` --config `<file>`            - Layer a TOML configuration over the defaults
//!
//! A `simcsv.toml` in the working directory is picked up automatically; `--config` and the
//! flags above override it.
//!
//! Log output goes to stderr and is controlled by the `SIMCSV_LOG` environment variable
//! (e.g. `SIMCSV_LOG=trace`).

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use simcsv::csv::{CsvReader, ReaderSource};
use simcsv::output::{write_records, OutputFormat};
use simcsv::settings::{Loader, SimCsvConfig};
use simcsv::SimCsvError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("simcsv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the records of comma separated text")
        .arg(
            Arg::new("path")
                .help("Path to the input file, or '-' for stdin")
                .default_value("-")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults and ./simcsv.toml"),
        )
        .arg(
            Arg::new("comment")
                .long("comment")
                .help("Comment character")
                .value_parser(value_parser!(char)),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .short('d')
                .help("Field delimiter")
                .value_parser(value_parser!(char)),
        )
        .arg(
            Arg::new("trim")
                .long("trim")
                .help("Strip whitespace around unquoted fields")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-empty")
                .long("keep-empty")
                .help("Report empty lines as records without fields")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(PossibleValuesParser::new(OutputFormat::ALL.map(OutputFormat::name))),
        )
        .get_matches();

    init_logging();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SIMCSV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), SimCsvError> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");

    let input: Box<dyn BufRead> = if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    tracing::debug!(path, format = %config.output.format, "reading input");

    let mut source = ReaderSource::new(input);
    {
        let mut reader = CsvReader::with_options(&mut source, config.reader)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_records(config.output.format, reader.records(), &mut out)?;
    }

    match source.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Merge the defaults, the project file, an explicit config file and the command-line flags.
fn load_config(matches: &ArgMatches) -> Result<SimCsvConfig, SimCsvError> {
    let mut loader = Loader::default().with_project_file(std::env::current_dir()?);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(comment) = matches.get_one::<char>("comment") {
        loader = loader.set_override("reader.comment_char", comment.to_string())?;
    }
    if let Some(delimiter) = matches.get_one::<char>("delimiter") {
        loader = loader.set_override("reader.delimiter", delimiter.to_string())?;
    }
    if matches.get_flag("trim") {
        loader = loader.set_override("reader.trim", true)?;
    }
    if matches.get_flag("keep-empty") {
        loader = loader.set_override("reader.skip_empty", false)?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    loader.build()
}
