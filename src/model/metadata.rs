//! Descriptive metadata harvested from the non-coordinate categories of an mmCIF file.

use smol_str::SmolStr;

/// Chain count above which a structure is flagged as large.
pub const LARGE_CHAIN_LIMIT: usize = 62;
/// Atom-row count above which a structure is flagged as large.
pub const LARGE_ATOM_LIMIT: usize = 99_999;

/// Header-level key/value metadata of one structure.
///
/// Fields default to empty strings when the file does not provide them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub keywords: String,
    pub header: String,
    pub experiment: String,
    /// Highest resolution in ångströms as written in the file.
    pub resolution: String,
    pub date: String,
    /// Set when the structure exceeds the limits of the legacy PDB format.
    pub is_large: bool,
}

impl Metadata {
    pub fn is_nmr(&self) -> bool {
        self.experiment.contains("NMR")
    }

    pub fn resolution_angstrom(&self) -> Option<f64> {
        self.resolution.trim().parse().ok()
    }

    /// Metadata as ordered key/value pairs using the conventional PDB header names.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("keywords", self.keywords.clone()),
            ("header", self.header.clone()),
            ("experiment", self.experiment.clone()),
            ("resolution", self.resolution.clone()),
            ("date", self.date.clone()),
            ("isLarge", self.is_large.to_string()),
        ]
    }
}

/// Returns whether a structure with the given counts exceeds the legacy format limits.
pub fn exceeds_legacy_limits(chain_count: usize, atom_rows: usize) -> bool {
    chain_count > LARGE_CHAIN_LIMIT || atom_rows > LARGE_ATOM_LIMIT
}

/// Per-chain descriptive record joined from entity, source-organism and polymer tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainMetadata {
    pub pdb_id: String,
    pub chain_id: SmolStr,
    /// Entity id from `label_entity_id` of the row that created the chain.
    pub macromolecule_id: SmolStr,
    pub molecule_name: String,
    pub ec_number: String,
    pub organism_scientific: String,
    pub organism_common: String,
    /// Every chain of the same polymer entity, own chain last; empty when unknown.
    pub all_molecule_chains: String,
}

impl ChainMetadata {
    pub fn new(pdb_id: &str, chain_id: &str, macromolecule_id: &str) -> Self {
        Self {
            pdb_id: pdb_id.to_string(),
            chain_id: SmolStr::new(chain_id),
            macromolecule_id: SmolStr::new(macromolecule_id),
            ..Self::default()
        }
    }
}

/// Counters collected while parsing one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub atom_rows: usize,
    pub skipped_model_rows: usize,
    pub forced_chain_skips: usize,
    pub dna_atoms_skipped: usize,
    pub rna_atoms_skipped: usize,
    pub ignored_element_atoms: usize,
    pub ignored_ligand_atoms: usize,
    pub ignored_monomers: usize,
    pub synthetic_amino_acids: usize,
    pub nucleotides: usize,
    pub ligands: usize,
    pub altloc_monomers: usize,
    pub altloc_atoms_removed: usize,
    /// Rows whose residue number was a placeholder and fell back to 1.
    pub placeholder_seq_ids: usize,
    pub column_substitution_notices: usize,
}
