//! Values-only CSV tables.
//!
//! Intermediate tables carry no header row: every line is one row of
//! numbers. Values go through `f64`'s `Display` on the way out, which
//! round-trips exactly when parsed back.

use camino::Utf8Path;
use csv::ReaderBuilder;

use crate::constants::Table;
use crate::satmerge_errors::SatmergeError;

/// Write `table` to `path`, one CSV line per matrix row.
pub fn write_table(path: &Utf8Path, table: &Table) -> Result<(), SatmergeError> {
    let mut writer = csv::Writer::from_path(path)?;
    for i in 0..table.nrows() {
        let record: Vec<String> = table.row(i).iter().map(|v| v.to_string()).collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a headerless CSV file back into a matrix.
///
/// Every line must hold the same number of fields; the CSV reader rejects
/// ragged files on its own.
pub fn read_table(path: &Utf8Path) -> Result<Table, SatmergeError> {
    let mut reader = ReaderBuilder::new().has_headers(false).from_path(path)?;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for record in reader.deserialize::<Vec<f64>>() {
        rows.push(record?);
    }
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    Ok(Table::from_row_iterator(
        nrows,
        ncols,
        rows.into_iter().flatten(),
    ))
}
