//! # Constants and filename conventions for satmerge
//!
//! This module centralizes the **filename conventions** shared by the exporter
//! and the merger, together with the few fixed values of the merged dataset.
//! The merger locates its inputs purely by these conventions, so they must not
//! drift between the two components (external producers rely on them as well).

use nalgebra::DMatrix;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// A rectangular grid of values, the in-memory form of one flat table.
pub type Table = DMatrix<f64>;

// -------------------------------------------------------------------------------------------------
// Archive and table conventions
// -------------------------------------------------------------------------------------------------

/// Name of the archive array holding the satellite position components
/// (leading axis: 0 = X, 1 = Y, 2 = Z).
pub const SATELLITE_POSITIONS_ARRAY: &str = "satellites_positions";

/// Filename of the time-axis table the merger reads in raw orientation.
pub const TIME_TABLE: &str = "T_anime.csv";

/// Filename of the merged per-timestep dataset (overwritten on every run).
pub const MERGED_TABLE: &str = "merged_satellite_data.csv";

/// Reserved prefix marking the archive format's internal/system entries,
/// which are never exported.
pub const SYSTEM_PREFIX: &str = "__";

// -------------------------------------------------------------------------------------------------
// Merged dataset layout
// -------------------------------------------------------------------------------------------------

/// Orientation placeholder written for every satellite at every timestep,
/// in (w, x, y, z) order. Never derived from any input.
pub const IDENTITY_QUATERNION: [f64; 4] = [1.0, 0.0, 0.0, 0.0];

/// Columns emitted per satellite in the merged table: X, Y, Z and the four
/// quaternion components.
pub const FIELDS_PER_SATELLITE: usize = 7;

/// Table filename for an array exported whole (rank 1 or 2).
pub fn table_filename(name: &str) -> String {
    format!("{name}.csv")
}

/// Table filename for one leading-axis slice of a rank >= 3 array.
pub fn slice_filename(name: &str, index: usize) -> String {
    format!("{name}_slice_{index}.csv")
}
