//! Reader for the residue table of classic DSSP output.
//!
//! Only the fixed-column block following the `  #  RESIDUE` header is read; the summary
//! section above it is skipped.

use crate::io::error::Error;
use crate::model::secondary::{DsspResidue, SecondaryStructure};
use smol_str::SmolStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const FORMAT: &str = "DSSP";
const TABLE_HEADER: &str = "  #  RESIDUE";
const BREAK_MARK: char = '!';

/// Reads the residue table of a DSSP file.
///
/// Chain-break lines (`!` in the amino-acid column) are skipped. Blank secondary-structure
/// codes become `C`; lower-case amino-acid letters, which DSSP uses for bridged cysteines,
/// become `C` as well.
pub fn read<R: BufRead>(reader: R) -> Result<SecondaryStructure, Error> {
    read_from_source(reader, None)
}

/// Reads the residue table of a DSSP file on disk.
///
/// # Arguments
///
/// * `path` - Location of the DSSP output.
///
/// # Returns
///
/// The residues in file order. A file without a residue table yields an empty list,
/// which the mmCIF reader later rejects.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying `path` when the file cannot be opened or read, and
/// [`Error::Parse`] for a residue line whose ordinal or PDB number is not an integer.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<SecondaryStructure, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_from_source(BufReader::new(file), Some(path.to_path_buf()))
}

fn read_from_source<R: BufRead>(reader: R, path: Option<PathBuf>) -> Result<SecondaryStructure, Error> {
    let mut residues = Vec::new();
    let mut in_table = false;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| Error::from_io(e, path.clone()))?;

        if !in_table {
            in_table = line.starts_with(TABLE_HEADER);
            continue;
        }
        if line.trim().is_empty() || char_at(&line, 13) == Some(BREAK_MARK) {
            continue;
        }
        residues.push(parse_residue(&line, line_number, &path)?);
    }

    Ok(SecondaryStructure::from_residues(residues))
}

fn parse_residue(line: &str, line_number: usize, path: &Option<PathBuf>) -> Result<DsspResidue, Error> {
    let number = |range: std::ops::Range<usize>, column: &str| -> Result<i32, Error> {
        let raw = line.get(range).unwrap_or_default().trim();
        raw.parse().map_err(|_| {
            Error::parse(
                FORMAT,
                path.clone(),
                line_number,
                format!("invalid {column} '{raw}'"),
            )
        })
    };

    let dssp_num = number(0..5, "residue ordinal")?;
    let pdb_num = number(5..10, "PDB residue number")?;
    let insertion_code = char_at(line, 10).unwrap_or(' ');
    let chain_id = char_at(line, 11).unwrap_or(' ');
    let amino_acid = match char_at(line, 13) {
        Some(c) if c.is_ascii_lowercase() => 'C',
        Some(c) => c,
        None => 'X',
    };
    let sse = match char_at(line, 16) {
        Some(c) if c != ' ' => c,
        _ => 'C',
    };

    Ok(DsspResidue {
        dssp_num,
        pdb_num,
        chain_id: SmolStr::new(chain_id.to_string()),
        insertion_code,
        amino_acid,
        sse,
    })
}

fn char_at(line: &str, column: usize) -> Option<char> {
    line.as_bytes().get(column).map(|b| *b as char)
}
