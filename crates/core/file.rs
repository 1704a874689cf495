use std::{fs::File, path::Path};

use bml::{BookQuery, BookRecord};

use eyre::{Context, Result};
use log::trace;

pub fn read_queries(path: &Path) -> Result<Vec<BookQuery>> {
    trace!("opening {} as a book table", path.display());
    let file = File::open(path).wrap_err_with(|| {
        format!("Failed to open the '{}' file for reading.", path.display())
    })?;

    bml::table::read_queries(file)
        .wrap_err_with(|| format!("Cannot read the books of '{}'", path.display()))
}

// The file is only created once every record is resolved so a failed run leaves it untouched.
pub fn write_records(path: &Path, records: &[BookRecord]) -> Result<()> {
    trace!("writing {} record(s) to {}", records.len(), path.display());
    let file = File::create(path).wrap_err_with(|| {
        format!("Failed to open the '{}' file for writing.", path.display())
    })?;

    bml::table::write_records(file, records)
        .wrap_err_with(|| format!("Cannot write the books to '{}'", path.display()))
}
