//! Loading catalog snapshots from TOML files.

use std::{fmt, fs, ops::Range, path::Path};

use log::{debug, info};

use coursegrid::catalog::Catalog;

use crate::error::CliError;

/// A catalog file that could not be deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    message: String,
    span: Option<Range<usize>>,
}

impl CatalogError {
    pub fn new(message: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending TOML, when the parser reported one.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CatalogError {}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        Self::new(err.message().trim_end(), err.span())
    }
}

/// Reads and parses the catalog at `path`.
///
/// # Errors
///
/// Returns [`CliError::Grid`] if the file cannot be read and
/// [`CliError::Catalog`] if it is not a valid catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CliError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let catalog = parse_catalog(source)?;

    info!(
        path = path.display().to_string(),
        semesters = catalog.semesters.len(),
        sections = catalog.sections.len();
        "Loaded catalog"
    );
    Ok(catalog)
}

fn parse_catalog(source: String) -> Result<Catalog, CliError> {
    match toml::from_str::<Catalog>(&source) {
        Ok(catalog) => Ok(catalog),
        Err(err) => {
            debug!(err:% = err; "Catalog TOML rejected");
            Err(CliError::new_catalog_error(err.into(), source))
        }
    }
}
