//! Assembly of the merged satellite dataset.
//!
//! Positions arrive as three per-axis slice tables written timestep-major;
//! they are transposed on read so each row is one satellite and each column
//! one timestep. The time table keeps its stored orientation: its first
//! column is a label column that is skipped, and the value for a timestep
//! comes from the second row. Attitude is not part of the archive, so every
//! satellite carries the identity quaternion.

use camino::{Utf8Path, Utf8PathBuf};

use crate::constants::{
    slice_filename, Table, FIELDS_PER_SATELLITE, IDENTITY_QUATERNION, MERGED_TABLE,
    SATELLITE_POSITIONS_ARRAY, TIME_TABLE,
};
use crate::satmerge_errors::SatmergeError;
use crate::table::read_table;

/// The merged dataset: one labeled row per processed timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    header: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl MergedTable {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_satellites(&self) -> usize {
        (self.header.len() - 1) / FIELDS_PER_SATELLITE
    }

    pub fn num_timesteps(&self) -> usize {
        self.rows.len()
    }

    /// Write the dataset to `path`, header row first.
    pub fn write(&self, path: &Utf8Path) -> Result<(), SatmergeError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.header)?;
        for row in &self.rows {
            let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Column labels for `num_satellites` satellites: a time column followed by
/// seven fields per satellite, numbered from 1.
fn satellite_header(num_satellites: usize) -> Vec<String> {
    let mut header = vec!["Time (s)".to_string()];
    for i in 1..=num_satellites {
        header.push(format!("Sat{i}_X (m)"));
        header.push(format!("Sat{i}_Y (m)"));
        header.push(format!("Sat{i}_Z (m)"));
        header.push(format!("Sat{i}_Qw"));
        header.push(format!("Sat{i}_Qx"));
        header.push(format!("Sat{i}_Qy"));
        header.push(format!("Sat{i}_Qz"));
    }
    header
}

/// Merge per-axis position tables and the raw time table into one dataset.
///
/// The position tables must already be satellite-major (one row per
/// satellite) and all three must share one shape. Timesteps are truncated
/// to what the time table can serve: with its label column skipped, a table
/// of `c` columns covers `c - 1` steps, and the value for step `t` is read
/// from row 1, column `t + 1`.
///
/// Arguments
/// ---------
/// * `sat_x`, `sat_y`, `sat_z`: per-axis positions, satellite x timestep.
/// * `time`: the time table in its stored orientation.
///
/// Return
/// ------
/// * The merged dataset, not yet written anywhere.
pub fn merge_tables(
    sat_x: &Table,
    sat_y: &Table,
    sat_z: &Table,
    time: &Table,
) -> Result<MergedTable, SatmergeError> {
    if sat_x.shape() != sat_y.shape() || sat_x.shape() != sat_z.shape() {
        return Err(SatmergeError::MismatchedSliceShapes(format!(
            "X {:?}, Y {:?}, Z {:?}",
            sat_x.shape(),
            sat_y.shape(),
            sat_z.shape()
        )));
    }

    let num_satellites = sat_x.nrows();
    let num_timesteps = sat_x.ncols();
    let usable = num_timesteps.min(time.ncols().saturating_sub(1));
    if usable > 0 && time.nrows() < 2 {
        return Err(SatmergeError::MalformedTimeTable(time.nrows()));
    }

    let mut rows = Vec::with_capacity(usable);
    for t in 0..usable {
        let mut row = Vec::with_capacity(1 + num_satellites * FIELDS_PER_SATELLITE);
        row.push(time[(1, t + 1)]);
        for sat in 0..num_satellites {
            row.push(sat_x[(sat, t)]);
            row.push(sat_y[(sat, t)]);
            row.push(sat_z[(sat, t)]);
            row.extend_from_slice(&IDENTITY_QUATERNION);
        }
        rows.push(row);
    }

    Ok(MergedTable {
        header: satellite_header(num_satellites),
        rows,
    })
}

/// Merge the slice tables found in `dir` and write the combined dataset.
///
/// The three per-axis position tables and the time table are looked up by
/// their fixed names; the first one missing aborts the merge before
/// anything is written.
pub fn merge_dir(dir: &Utf8Path) -> Result<Utf8PathBuf, SatmergeError> {
    println!("\nMerging CSV tables...");

    let required = [
        slice_filename(SATELLITE_POSITIONS_ARRAY, 0),
        slice_filename(SATELLITE_POSITIONS_ARRAY, 1),
        slice_filename(SATELLITE_POSITIONS_ARRAY, 2),
        TIME_TABLE.to_string(),
    ];
    for name in &required {
        if !dir.join(name).exists() {
            return Err(SatmergeError::MissingTable(name.clone()));
        }
    }

    let sat_x = read_table(&dir.join(&required[0]))?.transpose();
    let sat_y = read_table(&dir.join(&required[1]))?.transpose();
    let sat_z = read_table(&dir.join(&required[2]))?.transpose();
    let time = read_table(&dir.join(&required[3]))?;

    println!("Number of satellites: {}", sat_x.nrows());
    println!("Number of timesteps: {}", sat_x.ncols());

    let merged = merge_tables(&sat_x, &sat_y, &sat_z, &time)?;
    let out_path = dir.join(MERGED_TABLE);
    merged.write(&out_path)?;

    println!("\nSaved merged data as '{MERGED_TABLE}'");
    println!(
        "Data shape: ({}, {})",
        merged.num_timesteps(),
        merged.header().len()
    );
    println!("Number of satellites: {}", merged.num_satellites());
    println!("Processed timesteps: {}", merged.num_timesteps());

    Ok(out_path)
}
