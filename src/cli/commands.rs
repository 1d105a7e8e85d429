//! CLI command implementations
//!
//! Every command reads and validates the database first; a database that
//! fails validation is never listed or sorted. Output goes to the given
//! writer, logs go to stderr.

use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use crate::database::{self, Database};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::table::RowFlow;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments, applies the configuration and dispatches. This is
/// the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = Config::load_or_default(cli.config.as_deref())?;
    Logger::set_min_severity(config.severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("log_level", config.log_level.as_str())],
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_command(cli.command, &config, &mut out)
}

/// Run the appropriate command based on CLI args
pub fn run_command<W: Write>(cmd: Command, config: &Config, out: &mut W) -> CliResult<()> {
    match cmd {
        Command::Check { file } => check(&file, out),
        Command::Tables { file } => tables(&file, out),
        Command::List {
            file,
            table,
            fields,
            bind,
            prefix,
            limit,
        } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            let options = ListOptions {
                fields: &fields,
                bind,
                prefix: prefix.as_deref(),
                limit,
            };
            list(&file, &table, &options, out)
        }
        Command::Sort {
            file,
            table,
            by,
            reverse,
        } => sort(&file, &table, &by, reverse, config, out),
    }
}

/// Validate the database file
pub fn check<W: Write>(file: &Path, out: &mut W) -> CliResult<()> {
    database::read(file)?;
    writeln!(out, "ok")?;
    Ok(())
}

/// Print table names and row counts, tab separated
pub fn tables<W: Write>(file: &Path, out: &mut W) -> CliResult<()> {
    let db = database::read(file)?;
    for (name, table) in db.tables() {
        writeln!(out, "{}\t{}", name, table.len())?;
    }
    Ok(())
}

/// Options for `list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions<'a> {
    /// Projected fields; empty means every field of each row
    pub fields: &'a [&'a str],
    /// Use binding mode: every field required, keys are prefix + field
    pub bind: bool,
    /// Binding prefix override
    pub prefix: Option<&'a str>,
    /// Stop after this many rows
    pub limit: Option<usize>,
}

/// Print one JSON object per row
pub fn list<W: Write>(
    file: &Path,
    table: &str,
    options: &ListOptions<'_>,
    out: &mut W,
) -> CliResult<()> {
    let db = database::read(file)?;
    list_rows(&db, table, options, out)
}

fn list_rows<W: Write>(
    db: &Database,
    table: &str,
    options: &ListOptions<'_>,
    out: &mut W,
) -> CliResult<()> {
    let mut written = 0usize;
    let mut emit = |object: Value| -> CliResult<RowFlow<()>> {
        if options.limit.is_some_and(|limit| written >= limit) {
            return Ok(RowFlow::Stop);
        }
        serde_json::to_writer(&mut *out, &object)?;
        writeln!(out)?;
        written += 1;
        Ok(RowFlow::Continue)
    };

    let mut iter = db.iter_table(table);
    if let Some(prefix) = options.prefix {
        iter = iter.prefix(prefix);
    }

    if options.bind {
        iter.bind(options.fields, |bound| emit(to_object(bound.iter())))?;
    } else {
        if !options.fields.is_empty() {
            iter = iter.select(options.fields);
        }
        iter.records(|record| emit(to_object(record.iter())))?;
    }

    Ok(())
}

fn to_object<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Value {
    let object: Map<String, Value> = pairs
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();
    Value::Object(object)
}

/// Print the database with `table` stably sorted by `by`
pub fn sort<W: Write>(
    file: &Path,
    table: &str,
    by: &str,
    reverse: bool,
    config: &Config,
    out: &mut W,
) -> CliResult<()> {
    let db = database::read(file)?;
    let sorted = sort_by_field(&db, table, by, reverse)?;

    if config.pretty {
        serde_json::to_writer_pretty(&mut *out, &sorted.to_value())?;
    } else {
        serde_json::to_writer(&mut *out, &sorted.to_value())?;
    }
    writeln!(out)?;
    Ok(())
}

fn sort_by_field(db: &Database, table: &str, by: &str, reverse: bool) -> CliResult<Database> {
    db.sort_table(table, |a, b| {
        let ordering = a.get(by).cmp(&b.get(by));
        Ok::<_, CliError>(if reverse { ordering.reverse() } else { ordering })
    })
}
