//! Tabular dataset loading.
//!
//! Reads a delimited concentration table into a validated [`Dataset`]. The
//! file extension selects the delimiter convention: `.tsv` is tab-separated
//! and `.csv` is semicolon-separated. The header must contain exactly one
//! column named `time`, one named `X` (biomass) and at least one metabolite
//! column; every data cell must be numeric. Empty cells become NaN and are
//! treated as missing observations downstream.

use std::path::Path;

use ndarray::{Array1, Array2};
use polars::prelude::*;

use crate::dataset::{Dataset, DatasetError};

/// Loads and validates a dataset from a `.tsv` or `.csv` file.
///
/// # Errors
/// * [`DatasetError::FileNotFound`] / [`DatasetError::UnsupportedExtension`]
///   / [`DatasetError::Unreadable`] for format-level failures;
/// * [`DatasetError::MissingColumn`] / [`DatasetError::NoMetabolites`] /
///   [`DatasetError::NonNumericColumn`] for schema-level failures.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DatasetError::FileNotFound(path.display().to_string()));
    }

    let separator = match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") => b'\t',
        Some("csv") => b';',
        _ => {
            return Err(DatasetError::UnsupportedExtension(
                path.display().to_string(),
            ))
        }
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::Unreadable(e.to_string()))?
        .finish()
        .map_err(|e| DatasetError::Unreadable(e.to_string()))?;

    let dataset = dataset_from_dataframe(&df)?;
    log::debug!(
        "loaded dataset from {}: {} timepoints, species {:?}",
        path.display(),
        dataset.n_timepoints(),
        dataset.species(),
    );
    Ok(dataset)
}

/// Validates the parsed table and assembles the dataset, with biomass as
/// column 0 and metabolites in input column order.
fn dataset_from_dataframe(df: &DataFrame) -> Result<Dataset, DatasetError> {
    for required in ["time", "X"] {
        if df.column(required).is_err() {
            return Err(DatasetError::MissingColumn(required.to_string()));
        }
    }
    if df.width() <= 2 {
        return Err(DatasetError::NoMetabolites);
    }

    let time = numeric_column(df, "time")?;
    if time.iter().any(|t| !t.is_finite()) {
        return Err(DatasetError::NonNumericColumn("time".to_string()));
    }

    let mut species = vec!["X".to_string()];
    species.extend(
        df.get_column_names()
            .into_iter()
            .filter(|name| *name != "time" && *name != "X")
            .map(|name| name.to_string()),
    );

    let mut measurements = Array2::from_elem((df.height(), species.len()), f64::NAN);
    for (j, name) in species.iter().enumerate() {
        let values = numeric_column(df, name)?;
        for (i, value) in values.into_iter().enumerate() {
            measurements[[i, j]] = value;
        }
    }

    Dataset::new(Array1::from_vec(time), measurements, species)
}

/// Extracts a column as f64 values; nulls (empty cells) become NaN.
fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, DatasetError> {
    let column = df
        .column(name)
        .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
    if !column.dtype().is_numeric() {
        return Err(DatasetError::NonNumericColumn(name.to_string()));
    }
    let column = column
        .cast(&DataType::Float64)
        .map_err(|_| DatasetError::NonNumericColumn(name.to_string()))?;
    let values = column
        .f64()
        .map_err(|_| DatasetError::NonNumericColumn(name.to_string()))?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}
