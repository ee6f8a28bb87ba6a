//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! Catalog parse failures carry the catalog text and the byte span the TOML
//! parser pointed at, so they render with a source snippet. Every other
//! error renders as a plain report with a stable code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use coursegrid::GridError;

use crate::{catalog::CatalogError, error::CliError};

/// Adapter for a catalog parse failure.
pub struct CatalogAdapter<'a> {
    /// The wrapped catalog error
    err: &'a CatalogError,
    /// Catalog text for displaying snippets
    src: &'a str,
}

impl<'a> CatalogAdapter<'a> {
    /// Create a new catalog adapter.
    pub fn new(err: &'a CatalogError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for CatalogAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for CatalogAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid catalog: {}", self.err.message())
    }
}

impl std::error::Error for CatalogAdapter<'_> {}

impl MietteDiagnostic for CatalogAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("coursegrid::catalog"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "days are numbered 1 (Monday) to 6 (Saturday) and times are minutes since midnight",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let label =
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without source information.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Grid(GridError::Io(_)) => "coursegrid::io",
            CliError::Grid(GridError::Source(_)) => "coursegrid::source",
            CliError::Grid(GridError::Config(_)) => "coursegrid::config",
            CliError::Catalog { .. } => "coursegrid::catalog",
            CliError::UnknownSemester(_) | CliError::NoSemesters => "coursegrid::semester",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::UnknownSemester(_) => {
                Some(Box::new("pass one of the catalog's semester ids"))
            }
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A catalog error with source location information.
    Catalog(CatalogAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Catalog(c) => fmt::Display::fmt(c, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Catalog(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Catalog(c) => c.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Catalog(c) => c.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Catalog(c) => c.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: std::ops::Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`CliError`] into something miette can render.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Catalog { err: catalog_err, src } => {
            Reportable::Catalog(CatalogAdapter::new(catalog_err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
