//! Tests for dataset loading and validation.

use std::fs;
use std::path::PathBuf;

use fluxfit::dataset::DatasetError;
use fluxfit::tabular::load_dataset;
use ndarray::arr1;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_loads_tsv_and_sorts_by_time() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "growth.tsv",
        "time\tX\tGlc\n2\t4\t5\n0\t1\t10\n1\t2\t8\n",
    );

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.species(), ["X".to_string(), "Glc".to_string()]);
    assert_eq!(dataset.time(), &arr1(&[0.0, 1.0, 2.0]));
    assert_eq!(dataset.measurements()[[0, 0]], 1.0);
    assert_eq!(dataset.measurements()[[2, 1]], 5.0);
}

#[test]
fn test_loads_semicolon_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "growth.csv",
        "time;X;Glc;Ace\n0;1.0;10.0;0.1\n1;2.0;8.0;0.3\n",
    );

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.metabolites(), ["Glc".to_string(), "Ace".to_string()]);
    assert_eq!(dataset.shape(), (2, 3));
}

#[test]
fn test_missing_cells_become_nan() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "gaps.tsv", "time\tX\tGlc\n0\t1\t10\n1\t2\t\n2\t4\t5\n");

    let dataset = load_dataset(&path).unwrap();
    assert!(dataset.measurements()[[1, 1]].is_nan());
    assert_eq!(dataset.measurements()[[2, 1]], 5.0);
}

#[test]
fn test_rejects_missing_time_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "no_time.tsv", "t\tX\tGlc\n0\t1\t10\n");

    let res = load_dataset(&path);
    assert!(matches!(
        res,
        Err(DatasetError::MissingColumn(col)) if col == "time"
    ));
}

#[test]
fn test_rejects_missing_biomass_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "no_x.tsv", "time\tbiomass\tGlc\n0\t1\t10\n");

    let res = load_dataset(&path);
    assert!(matches!(
        res,
        Err(DatasetError::MissingColumn(col)) if col == "X"
    ));
}

#[test]
fn test_rejects_dataset_without_metabolites() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "only_biomass.tsv", "time\tX\n0\t1\n1\t2\n");

    let res = load_dataset(&path);
    assert!(matches!(res, Err(DatasetError::NoMetabolites)));
}

#[test]
fn test_rejects_non_numeric_cell() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "bad_cell.tsv",
        "time\tX\tGlc\n0\t1\t10\n1\tabc\t8\n",
    );

    let res = load_dataset(&path);
    assert!(matches!(
        res,
        Err(DatasetError::NonNumericColumn(col)) if col == "X"
    ));
}

#[test]
fn test_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "growth.txt", "time\tX\tGlc\n0\t1\t10\n");

    let res = load_dataset(&path);
    assert!(matches!(res, Err(DatasetError::UnsupportedExtension(_))));
}

#[test]
fn test_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let res = load_dataset(dir.path().join("does_not_exist.tsv"));
    assert!(matches!(res, Err(DatasetError::FileNotFound(_))));
}
