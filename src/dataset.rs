//! Core dataset entity holding time-course concentration measurements.
//!
//! A [`Dataset`] is built once (usually by [`crate::tabular::load_dataset`]),
//! validated on construction and treated as read-only afterwards. Every
//! downstream component (initial guesses, bounds, weights, the optimization
//! problem) derives its shape from it.

use std::cmp::Ordering;

use ndarray::{Array1, Array2, Axis};
use thiserror::Error;

/// Errors raised while loading or constructing a dataset.
///
/// The first three variants are format-level failures (unreadable or
/// unsupported input), the remaining ones are schema-level failures
/// (the table parsed but does not describe a valid experiment).
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("{0} is not a valid file")]
    FileNotFound(String),
    #[error("{0} is not a valid format. Accepted formats are .csv or .tsv")]
    UnsupportedExtension(String),
    #[error("Failed to parse tabular data: {0}")]
    Unreadable(String),
    #[error("The column {0} is missing from the dataset")]
    MissingColumn(String),
    #[error("The data does not contain any metabolite columns")]
    NoMetabolites,
    #[error("The column {0} has values that are not of numeric type")]
    NonNumericColumn(String),
    #[error("Species matrix has {found} rows but the time vector has {expected} entries")]
    RowCountMismatch { expected: usize, found: usize },
    #[error("Species matrix has {found} columns but {expected} species names were given")]
    SpeciesCountMismatch { expected: usize, found: usize },
}

/// A validated time-course dataset.
///
/// Rows of the species matrix are timepoints sorted ascending by time
/// (stable, so ties keep their input order). Column 0 is always biomass
/// (`X`), the remaining columns are metabolites in input column order.
/// Missing observations are stored as NaN and are tolerated by the cost
/// function.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    time: Array1<f64>,
    measurements: Array2<f64>,
    species: Vec<String>,
}

impl Dataset {
    /// Builds a dataset from its raw parts and sorts it by time.
    ///
    /// # Errors
    /// Returns a [`DatasetError`] if the row count does not match the time
    /// vector, the species names do not match the matrix columns, there is
    /// no metabolite column beyond `X`, or the time vector contains
    /// non-finite values.
    pub fn new(
        time: Array1<f64>,
        measurements: Array2<f64>,
        species: Vec<String>,
    ) -> Result<Self, DatasetError> {
        if measurements.nrows() != time.len() {
            return Err(DatasetError::RowCountMismatch {
                expected: time.len(),
                found: measurements.nrows(),
            });
        }
        if measurements.ncols() != species.len() {
            return Err(DatasetError::SpeciesCountMismatch {
                expected: species.len(),
                found: measurements.ncols(),
            });
        }
        if measurements.ncols() < 2 {
            return Err(DatasetError::NoMetabolites);
        }
        if time.iter().any(|t| !t.is_finite()) {
            return Err(DatasetError::NonNumericColumn("time".to_string()));
        }

        // Stable ascending sort by time; ties keep original relative order.
        let mut order: Vec<usize> = (0..time.len()).collect();
        order.sort_by(|&a, &b| time[a].partial_cmp(&time[b]).unwrap_or(Ordering::Equal));

        Ok(Self {
            time: time.select(Axis(0), &order),
            measurements: measurements.select(Axis(0), &order),
            species,
        })
    }

    /// Time vector, ascending.
    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// Species matrix: rows = timepoints, column 0 = biomass, then metabolites.
    pub fn measurements(&self) -> &Array2<f64> {
        &self.measurements
    }

    /// Species column names, biomass first.
    pub fn species(&self) -> &[String] {
        &self.species
    }

    /// Metabolite column names in input order (everything after biomass).
    pub fn metabolites(&self) -> &[String] {
        &self.species[1..]
    }

    pub fn n_timepoints(&self) -> usize {
        self.time.len()
    }

    /// Shape of the species matrix, `(timepoints, species)`.
    pub fn shape(&self) -> (usize, usize) {
        self.measurements.dim()
    }
}
