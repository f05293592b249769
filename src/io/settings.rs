//! User-tunable parser settings loaded from TOML.

use super::error::Error;
use crate::ops::AltLocPolicy;
use serde::Deserialize;
use std::path::Path;

/// Behavior switches read by the mmCIF reader.
///
/// Every field has a default, so a settings file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Round coordinates to the nearest tenth of an ångström instead of truncating.
    pub round_coordinates: bool,
    /// Keep RNA monomers instead of skipping their atoms.
    pub include_rna: bool,
    /// Keep hydrogens in a per-monomer bucket.
    pub handle_hydrogens: bool,
    pub debug_level: u8,
    pub suppress_parse_warnings: bool,
    pub suppress_warnings: bool,
    pub silent: bool,
    /// Only parse atoms of this author chain.
    pub forced_chain: Option<String>,
    pub ignored_elements: Vec<String>,
    pub ignored_ligands: Vec<String>,
    pub ligand_sse_code: String,
    pub rna_sse_code: String,
    pub altloc_policy: AltLocPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_coordinates: true,
            include_rna: false,
            handle_hydrogens: false,
            debug_level: 0,
            suppress_parse_warnings: false,
            suppress_warnings: false,
            silent: false,
            forced_chain: None,
            ignored_elements: vec!["H".to_string()],
            ignored_ligands: ["HOH", "DOD", "WAT", "H2O", "GOL", "EDO", "PEG", "MPD"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ligand_sse_code: "L".to_string(),
            rna_sse_code: "R".to_string(),
            altloc_policy: AltLocPolicy::FirstEncountered,
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| Error::config(None, e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
        toml::from_str(&content).map_err(|e| Error::config(Some(path.to_path_buf()), e.to_string()))
    }
}
