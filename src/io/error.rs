use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },

    #[error(
        "nested loop_ in {path_desc} at line {line_number}",
        path_desc = PathDisplay(path)
    )]
    NestedLoop {
        path: Option<PathBuf>,
        line_number: usize,
    },

    #[error(
        "_atom_site data outside a loop_ in {path_desc} at line {line_number}",
        path_desc = PathDisplay(path)
    )]
    AtomSiteOutsideLoop {
        path: Option<PathBuf>,
        line_number: usize,
    },

    #[error(
        "{category} table lacks required columns: {column_list}",
        column_list = columns.join(", ")
    )]
    MissingColumns {
        category: &'static str,
        columns: Vec<String>,
    },

    #[error(
        "secondary-structure residue list from {path_desc} is empty",
        path_desc = PathDisplay(path)
    )]
    EmptyResidueSource { path: Option<PathBuf> },

    #[error(
        "invalid configuration in {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Config {
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn nested_loop(path: Option<PathBuf>, line_number: usize) -> Self {
        Self::NestedLoop { path, line_number }
    }

    pub fn atom_site_outside_loop(path: Option<PathBuf>, line_number: usize) -> Self {
        Self::AtomSiteOutsideLoop { path, line_number }
    }

    pub fn missing_columns(category: &'static str, columns: Vec<String>) -> Self {
        Self::MissingColumns { category, columns }
    }

    pub fn empty_residue_source(path: Option<PathBuf>) -> Self {
        Self::EmptyResidueSource { path }
    }

    pub fn config(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::Config {
            path,
            details: details.into(),
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
