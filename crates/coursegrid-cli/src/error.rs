//! Errors surfaced by the command-line host.

use std::io;

use thiserror::Error;

use coursegrid::GridError;

use crate::catalog::CatalogError;

/// Everything `run` can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Catalog error: {err}")]
    Catalog { err: CatalogError, src: String },

    #[error("Unknown semester `{0}`")]
    UnknownSemester(String),

    #[error("The catalog defines no semesters")]
    NoSemesters,
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Grid(GridError::Io(err))
    }
}

impl CliError {
    /// Create a new `Catalog` error carrying the text it was parsed from.
    pub fn new_catalog_error(err: CatalogError, src: impl Into<String>) -> Self {
        Self::Catalog {
            err,
            src: src.into(),
        }
    }
}
