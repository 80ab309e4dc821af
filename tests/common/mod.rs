use camino::{Utf8Path, Utf8PathBuf};
use satmerge::mat::{writer, NumericArray};

/// Deterministic coordinate for axis `a`, timestep `t`, satellite `s`.
pub fn coordinate(a: usize, t: usize, s: usize) -> f64 {
    ((a + 1) * 1000 + (s + 1) * 100 + t) as f64
}

/// Time value served for timestep `t` by [`time_array`].
pub fn time_value(t: usize) -> f64 {
    ((t + 1) * 10) as f64
}

/// Rank-3 positions array of shape `(3, steps, sats)`, axis leading, with
/// `coordinate(a, t, s)` at every cell.
pub fn positions_array(steps: usize, sats: usize) -> NumericArray {
    let mut data = Vec::with_capacity(3 * steps * sats);
    for s in 0..sats {
        for t in 0..steps {
            for a in 0..3 {
                data.push(coordinate(a, t, s));
            }
        }
    }
    NumericArray::new(
        "satellites_positions".to_string(),
        vec![3, steps, sats],
        data,
    )
}

/// Time table of shape `(2, steps + 1)`: a label column followed by one
/// column per timestep, values in the second row.
pub fn time_array(steps: usize) -> NumericArray {
    let cols = steps + 1;
    let mut data = Vec::with_capacity(2 * cols);
    for c in 0..cols {
        data.push(c as f64);
        data.push((c * 10) as f64);
    }
    NumericArray::new("T_anime".to_string(), vec![2, cols], data)
}

/// Write `arrays` as `results.mat` under `dir`.
pub fn write_archive(dir: &Utf8Path, arrays: &[NumericArray]) -> Utf8PathBuf {
    let path = dir.join("results.mat");
    writer::write_mat(&path, arrays).unwrap();
    path
}

/// Utf8 view of a temporary directory.
pub fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}
