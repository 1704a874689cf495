//! Book tables in CSV.
//!
//! A table has a header row and the [`COLUMNS`] `ISBN`, `TITLE`, `BMID` and `AVAILABLE`. The last
//! three act as a cache from a previous run and may be blank on input.

use std::io::{Read, Write};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{BookQuery, BookRecord, Error, ErrorKind};

/// Columns every book table must have, in the order they are written.
pub const COLUMNS: [&str; 4] = ["ISBN", "TITLE", "BMID", "AVAILABLE"];

#[derive(Deserialize)]
struct InputRow {
    #[serde(rename = "ISBN")]
    isbn: String,
    #[serde(rename = "TITLE")]
    title: Option<String>,
    #[serde(rename = "BMID")]
    id: Option<String>,
}

#[derive(Serialize)]
struct OutputRow<'a> {
    isbn: &'a str,
    title: &'a str,
    id: &'a str,
    availability: &'a str,
}

impl<'a> From<&'a BookRecord> for OutputRow<'a> {
    fn from(record: &'a BookRecord) -> Self {
        Self {
            isbn: &record.isbn,
            title: &record.title,
            id: &record.id,
            availability: record.availability.as_str(),
        }
    }
}

/// Reads the book queries of a table.
///
/// Columns other than [`COLUMNS`] are ignored and cells are trimmed; a blank `TITLE` or `BMID` is
/// read as absent.
///
/// # Errors
///
/// An `Err` with [`ErrorKind::MissingColumn`] is returned, before any row is read, when the header
/// lacks one of the [`COLUMNS`].
/// An `Err` with [`ErrorKind::Deserialize`] is returned when the table is not valid CSV.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<BookQuery>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| Error::wrap_with(ErrorKind::Deserialize, e, "Cannot read the header row"))?;

    let missing: Vec<_> = COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(Error::new(
            ErrorKind::MissingColumn,
            format!(
                "The following columns are required: {} (missing: {})",
                COLUMNS.join(", "),
                missing.join(", ")
            ),
        ));
    }

    let queries = reader
        .deserialize()
        .map(|row| {
            row.map(|InputRow { isbn, title, id }| BookQuery { isbn, id, title })
                .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!("{} book(s) read from the table", queries.len());
    Ok(queries)
}

/// Writes `records` as a table: the header row followed by one row per record.
///
/// # Errors
///
/// An `Err` with [`ErrorKind::IO`] is returned when writing to `writer` fails.
pub fn write_records<W: Write>(writer: W, records: &[BookRecord]) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(COLUMNS)
        .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

    for record in records {
        writer
            .serialize(OutputRow::from(record))
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;
    }

    writer.flush().map_err(|e| Error::wrap(ErrorKind::IO, e))
}
