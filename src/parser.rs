//! Delimited text ingestion.
//!
//! Each entity kind has a fixed comma-separated layout, one record per line:
//!
//! | Kind | Fields |
//! |---|---|
//! | Student | `firstName,lastName,email,YYYY-MM-DD` |
//! | Course | `title,description,credits,YYYY-MM-DD` |
//! | Instructor | `firstName,lastName,expertise` |
//! | Module | `title,content` |
//! | Assignment | `moduleTitle,moduleContent,YYYY-MM-DD,maxPoints,MARK` |
//!
//! Blank lines and lines starting with `#` are ignored, surrounding
//! whitespace is trimmed from every field, and fields may be double-quoted
//! to embed commas. Each record sits on exactly one line. A line that fails
//! to parse or validate is logged and skipped; the rest of the file still
//! loads.
//!
//! ```rust
//! use online_courses::model::Instructor;
//! use online_courses::parser;
//!
//! let outcome = parser::parse_str::<Instructor>("# name,last,expertise\nГалина,Унгурян,26\nAl,X,99\n");
//! assert_eq!(outcome.records.len(), 1);
//! assert_eq!(outcome.rejected.len(), 1);
//! ```

use crate::error::{ParseError, ParseResult};
use crate::model::{Assignment, Course, Entity, Instructor, Mark, Module, Student};
use crate::validation::Validator;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// An entity that can be built from one delimited line.
///
/// The kind label in log lines and errors is [`Entity::KIND`].
pub trait CsvRecord: Entity {
    /// Number of fields per line.
    const FIELD_COUNT: usize;

    /// Build from trimmed fields of line `line`, validating against `validator`.
    fn from_fields(fields: &[&str], line: u64, validator: &Validator) -> ParseResult<Self>;
}

/// Records that loaded and lines that were rejected, in file order.
#[derive(Debug)]
pub struct ParseOutcome<T> {
    pub records: Vec<T>,
    pub rejected: Vec<ParseError>,
}

fn number(field: &'static str, value: &str, line: u64) -> ParseResult<i64> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn date(field: &'static str, value: &str, line: u64) -> ParseResult<NaiveDate> {
    value.parse().map_err(|_| ParseError::InvalidDate {
        line,
        field,
        value: value.to_string(),
    })
}

fn validated<T>(line: u64, result: crate::error::ValidationResult<T>) -> ParseResult<T> {
    result.map_err(|source| ParseError::Validation { line, source })
}

impl CsvRecord for Student {
    const FIELD_COUNT: usize = 4;

    fn from_fields(fields: &[&str], line: u64, validator: &Validator) -> ParseResult<Self> {
        let enrollment_date = date("enrollmentDate", fields[3], line)?;
        validated(
            line,
            Student::new_with(validator, fields[0], fields[1], fields[2], enrollment_date),
        )
    }
}

impl CsvRecord for Course {
    const FIELD_COUNT: usize = 4;

    fn from_fields(fields: &[&str], line: u64, validator: &Validator) -> ParseResult<Self> {
        let credits = number("credits", fields[2], line)?;
        let start_date = date("startDate", fields[3], line)?;
        validated(
            line,
            Course::new_with(validator, fields[0], fields[1], credits, start_date),
        )
    }
}

impl CsvRecord for Instructor {
    const FIELD_COUNT: usize = 3;

    fn from_fields(fields: &[&str], line: u64, _validator: &Validator) -> ParseResult<Self> {
        let expertise = number("expertise", fields[2], line)?;
        validated(line, Instructor::new(fields[0], fields[1], expertise))
    }
}

impl CsvRecord for Module {
    const FIELD_COUNT: usize = 2;

    fn from_fields(fields: &[&str], line: u64, _validator: &Validator) -> ParseResult<Self> {
        validated(line, Module::new(fields[0], fields[1]))
    }
}

impl CsvRecord for Assignment {
    const FIELD_COUNT: usize = 5;

    fn from_fields(fields: &[&str], line: u64, validator: &Validator) -> ParseResult<Self> {
        let module = validated(line, Module::new(fields[0], fields[1]))?;
        let due_date = date("dueDate", fields[2], line)?;
        let max_points = number("maxPoints", fields[3], line)?;
        let mark: Mark = fields[4].parse().map_err(|_| ParseError::InvalidMark {
            line,
            value: fields[4].to_string(),
        })?;
        validated(
            line,
            Assignment::new_with(validator, module, due_date, max_points, mark),
        )
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All);
    builder
}

fn is_skippable(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.starts_with('#')
}

/// Split one physical line into fields; `None` when it holds no data.
fn read_record(text: &str, line: u64) -> ParseResult<Option<StringRecord>> {
    match reader_builder().from_reader(text.as_bytes()).records().next() {
        Some(Ok(record)) if record.iter().all(str::is_empty) => Ok(None),
        Some(Ok(record)) => Ok(Some(record)),
        Some(Err(source)) => Err(ParseError::Csv { line, source }),
        None => Ok(None),
    }
}

fn parse_record<T: CsvRecord>(
    record: &StringRecord,
    line: u64,
    validator: &Validator,
) -> ParseResult<T> {
    if record.len() != T::FIELD_COUNT {
        return Err(ParseError::FieldCount {
            line,
            entity: T::KIND,
            expected: T::FIELD_COUNT,
            found: record.len(),
        });
    }
    let fields: Vec<&str> = record.iter().collect();
    T::from_fields(&fields, line, validator)
}

/// Parse every record from `reader`, collecting rejected lines.
///
/// Records are read one physical line at a time, so line numbers in errors
/// count blank and comment lines too.
pub fn parse_reader<T: CsvRecord, R: Read>(reader: R, validator: &Validator) -> ParseOutcome<T> {
    let mut outcome = ParseOutcome {
        records: Vec::new(),
        rejected: Vec::new(),
    };

    for (index, text) in BufReader::new(reader).lines().enumerate() {
        let line = index as u64 + 1;
        let text = match text {
            Ok(text) => text,
            Err(source) => {
                let error = ParseError::Csv {
                    line,
                    source: source.into(),
                };
                warn!("Stopped reading {} records: {error}", T::KIND);
                outcome.rejected.push(error);
                break;
            }
        };
        if is_skippable(&text) {
            continue;
        }

        let parsed = match read_record(&text, line) {
            Ok(Some(record)) => parse_record::<T>(&record, line, validator),
            Ok(None) => continue,
            Err(error) => Err(error),
        };
        match parsed {
            Ok(entity) => outcome.records.push(entity),
            Err(error) => {
                warn!("Failed to parse {} record: {error}", T::KIND);
                outcome.rejected.push(error);
            }
        }
    }

    debug!(
        "Parsed {} {} records, rejected {}",
        outcome.records.len(),
        T::KIND,
        outcome.rejected.len()
    );
    outcome
}

/// Parse in-memory text, validating dates against today.
pub fn parse_str<T: CsvRecord>(text: &str) -> ParseOutcome<T> {
    parse_reader(text.as_bytes(), &Validator::new())
}

/// Parse exactly one line, returning the precise failure.
pub fn parse_line<T: CsvRecord>(line: &str, validator: &Validator) -> ParseResult<T> {
    let mut outcome = parse_reader::<T, _>(line.as_bytes(), validator);
    if let Some(error) = outcome.rejected.pop() {
        return Err(error);
    }
    outcome.records.pop().ok_or(ParseError::FieldCount {
        line: 1,
        entity: T::KIND,
        expected: T::FIELD_COUNT,
        found: 0,
    })
}

/// Load all valid records from the file at `path`, validating against `validator`.
///
/// A missing file is an error; bad lines are skipped with a warning.
pub fn parse_file_with<T: CsvRecord>(
    path: impl AsRef<Path>,
    validator: &Validator,
) -> ParseResult<Vec<T>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.to_path_buf()));
    }

    info!("Starting to parse {} records from {}", T::KIND, path.display());
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = parse_reader::<T, _>(file, validator);
    info!(
        "Successfully parsed {} {} records from {} ({} skipped)",
        outcome.records.len(),
        T::KIND,
        path.display(),
        outcome.rejected.len()
    );
    Ok(outcome.records)
}

/// Load all valid records from the file at `path`, validating against today.
pub fn parse_file<T: CsvRecord>(path: impl AsRef<Path>) -> ParseResult<Vec<T>> {
    parse_file_with(path, &Validator::new())
}

pub fn parse_students_file(path: impl AsRef<Path>) -> ParseResult<Vec<Student>> {
    parse_file(path)
}

pub fn parse_courses_file(path: impl AsRef<Path>) -> ParseResult<Vec<Course>> {
    parse_file(path)
}

pub fn parse_instructors_file(path: impl AsRef<Path>) -> ParseResult<Vec<Instructor>> {
    parse_file(path)
}

pub fn parse_modules_file(path: impl AsRef<Path>) -> ParseResult<Vec<Module>> {
    parse_file(path)
}

pub fn parse_assignments_file(path: impl AsRef<Path>) -> ParseResult<Vec<Assignment>> {
    parse_file(path)
}
