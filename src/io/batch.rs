//! Multi-file parsing.
//!
//! Every job owns its parser state; only the read-only [`ParseContext`] is shared.

use super::context::ParseContext;
use super::error::Error;
use super::{dssp, mmcif};
use crate::model::structure::Structure;
use crate::utils::parallel::*;
use std::path::PathBuf;

/// One mmCIF entry together with its DSSP residue table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseJob {
    pub cif: PathBuf,
    pub dssp: PathBuf,
}

impl ParseJob {
    pub fn new(cif: impl Into<PathBuf>, dssp: impl Into<PathBuf>) -> Self {
        Self {
            cif: cif.into(),
            dssp: dssp.into(),
        }
    }

    fn run(&self, context: &ParseContext) -> Result<Structure, Error> {
        let secondary = dssp::reader::read_file(&self.dssp)?;
        mmcif::reader::read_file(&self.cif, &secondary, context)
    }
}

/// Parses every job, in parallel when the `parallel` feature is enabled.
///
/// Results are returned in job order; a failing job does not affect the others.
///
/// # Arguments
///
/// * `jobs` - Entries to parse, each with its own DSSP file.
/// * `context` - Shared settings; every job still gets a fresh parser state.
///
/// # Returns
///
/// One result per job, holding either the structure or the first error of that job.
pub fn read_mmcif_batch(jobs: &[ParseJob], context: &ParseContext) -> Vec<Result<Structure, Error>> {
    jobs.par_iter().map(|job| job.run(context)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fail_independently() {
        let jobs = vec![
            ParseJob::new("/nonexistent/a.cif", "/nonexistent/a.dssp"),
            ParseJob::new("/nonexistent/b.cif", "/nonexistent/b.dssp"),
        ];
        let results = read_mmcif_batch(&jobs, &ParseContext::new_default());

        assert_eq!(results.len(), 2);
        for result in results {
            assert!(matches!(result, Err(Error::Io { path: Some(_), .. })));
        }
    }
}
