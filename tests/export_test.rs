use nalgebra::DMatrix;
use tempfile::tempdir;

use satmerge::export::export_archive;
use satmerge::mat::{MatFile, NumericArray};
use satmerge::table::read_table;

mod common;
use common::{coordinate, positions_array, time_array, time_value, utf8_dir, write_archive};

#[test]
fn test_export_rank2_and_rank1_entries() {
    let dir = tempdir().unwrap();
    let dir = utf8_dir(&dir);

    let grid = NumericArray::new(
        "grid".to_string(),
        vec![2, 3],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    let elapsed = NumericArray::new("elapsed".to_string(), vec![3], vec![0.5, 1.0, 1.5]);
    let archive = write_archive(&dir, &[grid, elapsed]);

    let mat = MatFile::read(&archive).unwrap();
    let written = export_archive(&mat, &dir).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], dir.join("grid.csv"));
    assert_eq!(written[1], dir.join("elapsed.csv"));

    // Column-major storage: (2, 3) filled down the columns.
    let grid_back = read_table(&dir.join("grid.csv")).unwrap();
    assert_eq!(grid_back, DMatrix::from_column_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));

    // Rank-1 data stands as a single column.
    let elapsed_back = read_table(&dir.join("elapsed.csv")).unwrap();
    assert_eq!(elapsed_back, DMatrix::from_column_slice(3, 1, &[0.5, 1.0, 1.5]));
}

#[test]
fn test_export_cuts_rank3_into_slices() {
    let dir = tempdir().unwrap();
    let dir = utf8_dir(&dir);

    let steps = 4;
    let sats = 2;
    let archive = write_archive(&dir, &[positions_array(steps, sats), time_array(steps)]);

    let mat = MatFile::read(&archive).unwrap();
    let written = export_archive(&mat, &dir).unwrap();

    assert_eq!(written.len(), 4);
    for (axis, path) in written.iter().take(3).enumerate() {
        assert_eq!(
            path,
            &dir.join(format!("satellites_positions_slice_{axis}.csv"))
        );
        let slice = read_table(path).unwrap();
        let expected = DMatrix::from_fn(steps, sats, |t, s| coordinate(axis, t, s));
        assert_eq!(slice, expected);
    }

    let time_back = read_table(&dir.join("T_anime.csv")).unwrap();
    assert_eq!(time_back.shape(), (2, steps + 1));
    assert_eq!(time_back[(1, 1)], time_value(0));
}

#[test]
fn test_system_entries_are_excluded() {
    let dir = tempdir().unwrap();
    let dir = utf8_dir(&dir);

    let system = NumericArray::new("__meta".to_string(), vec![1, 1], vec![7.0]);
    let user = NumericArray::new("data".to_string(), vec![1, 1], vec![8.0]);
    let archive = write_archive(&dir, &[system, user]);

    let mat = MatFile::read(&archive).unwrap();
    let written = export_archive(&mat, &dir).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0], dir.join("data.csv"));
    assert!(!dir.join("__meta.csv").exists());
}

#[test]
fn test_unsupported_rank_is_skipped() {
    let dir = tempdir().unwrap();
    let dir = utf8_dir(&dir);

    let scalar = NumericArray::new("lonely".to_string(), vec![], vec![42.0]);
    let archive = write_archive(&dir, &[scalar]);

    let mat = MatFile::read(&archive).unwrap();
    let written = export_archive(&mat, &dir).unwrap();

    assert!(written.is_empty());
    assert!(!dir.join("lonely.csv").exists());
}
