//! Flattening of archive entries into CSV tables.
//!
//! Every surviving entry becomes one table per the shape rules: rank-2
//! arrays map straight to a `<name>.csv`, rank-1 arrays become a single
//! column, and higher ranks are cut along their leading dimension into
//! `<name>_slice_<i>.csv` files. System entries and unsupported shapes are
//! announced and left out.

use camino::{Utf8Path, Utf8PathBuf};

use crate::constants::{slice_filename, table_filename, SYSTEM_PREFIX};
use crate::mat::MatFile;
use crate::satmerge_errors::SatmergeError;
use crate::table::write_table;

/// List every exportable entry with its shape.
pub fn print_inventory(mat: &MatFile) {
    println!("\nVariables in the archive:");
    for array in mat.arrays() {
        if array.name().starts_with(SYSTEM_PREFIX) {
            continue;
        }
        println!("- {}: shape {}", array.name(), array.shape_string());
    }
}

/// Convert every exportable entry of `mat` into CSV tables under `out_dir`.
///
/// Returns the paths written, in the order they were produced.
pub fn export_archive(
    mat: &MatFile,
    out_dir: &Utf8Path,
) -> Result<Vec<Utf8PathBuf>, SatmergeError> {
    println!("\nConverting to CSV...");
    let mut written = Vec::new();
    for array in mat.arrays() {
        if array.name().starts_with(SYSTEM_PREFIX) {
            continue;
        }
        match array.rank() {
            1 | 2 => {
                let filename = table_filename(array.name());
                let path = out_dir.join(&filename);
                write_table(&path, &array.as_matrix())?;
                println!("Saved '{}' as '{}'", array.name(), filename);
                written.push(path);
            }
            rank if rank >= 3 => {
                println!(
                    "'{}' is a {}-dimensional array; saving each slice separately.",
                    array.name(),
                    rank
                );
                for i in 0..array.dims()[0] {
                    let filename = slice_filename(array.name(), i);
                    let path = out_dir.join(&filename);
                    write_table(&path, &array.slice_matrix(i))?;
                    println!("  - saved '{filename}'");
                    written.push(path);
                }
            }
            _ => {
                println!(
                    "Skipping '{}' (unsupported shape {})",
                    array.name(),
                    array.shape_string()
                );
            }
        }
    }
    Ok(written)
}
