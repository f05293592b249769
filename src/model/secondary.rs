//! Residue list taken from a DSSP secondary-structure assignment.
//!
//! The list is the authoritative source of amino-acid monomers: an entry becomes a monomer
//! when the first atom row of its residue is read, and its highest ordinal is the base from
//! which synthetic ordinals for ligands, nucleotides and unlisted residues are counted.

use super::types::ResKey;
use smol_str::SmolStr;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsspResidue {
    /// Sequential DSSP number.
    pub dssp_num: i32,
    pub pdb_num: i32,
    pub chain_id: SmolStr,
    pub insertion_code: char,
    /// One-letter amino-acid code as assigned by DSSP.
    pub amino_acid: char,
    /// Secondary-structure element code; blank assignments are stored as `C`.
    pub sse: char,
}

impl DsspResidue {
    pub fn key(&self) -> ResKey {
        ResKey::new(self.pdb_num, self.chain_id.clone(), self.insertion_code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryStructure {
    residues: Vec<DsspResidue>,
    by_key: HashMap<ResKey, usize>,
    last_used_ordinal: i32,
}

impl SecondaryStructure {
    pub fn from_residues(residues: Vec<DsspResidue>) -> Self {
        let last_used_ordinal = residues.iter().map(|r| r.dssp_num).max().unwrap_or(0);
        let mut by_key = HashMap::with_capacity(residues.len());
        for (position, residue) in residues.iter().enumerate() {
            by_key.entry(residue.key()).or_insert(position);
        }
        Self {
            residues,
            by_key,
            last_used_ordinal,
        }
    }

    pub fn residues(&self) -> &[DsspResidue] {
        &self.residues
    }

    /// Highest ordinal present in the list.
    pub fn last_used_ordinal(&self) -> i32 {
        self.last_used_ordinal
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Looks up the residue listed under `key`; the first entry wins for duplicate keys.
    pub fn find(&self, key: &ResKey) -> Option<&DsspResidue> {
        self.by_key.get(key).map(|&position| &self.residues[position])
    }
}
