//! Chemical component dictionary built from `_chem_comp` rows.

use super::schema::{Row, is_assigned};
use crate::model::monomer::LigandInfo;
use crate::model::types::MoleculeClass;
use smol_str::SmolStr;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ChemComp {
    pub kind: String,
    pub name: String,
    pub formula: String,
    pub synonyms: String,
}

impl ChemComp {
    /// Classifies a component from its `type` text.
    ///
    /// Anything mentioning RNA is a nucleotide, `peptide linking` marks an amino acid,
    /// everything else (plain `peptide`, `non-polymer`, DNA types) is a ligand.
    pub fn class(&self) -> MoleculeClass {
        let kind = self.kind.to_lowercase();
        if kind.contains("rna") {
            MoleculeClass::Nucleotide
        } else if kind.contains("peptide linking") {
            MoleculeClass::AminoAcid
        } else {
            MoleculeClass::Ligand
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ChemCompDictionary {
    components: HashMap<SmolStr, ChemComp>,
}

impl ChemCompDictionary {
    /// Records one `_chem_comp` row; a repeated id replaces the earlier entry.
    pub fn record(&mut self, row: &Row<'_>) {
        let Some(id) = row.get("id").filter(|id| is_assigned(id)) else {
            return;
        };
        let text = |column: &str| row.assigned(column).unwrap_or_default().to_string();
        self.components.insert(
            SmolStr::new(id),
            ChemComp {
                kind: text("type"),
                name: text("name"),
                formula: text("formula"),
                synonyms: text("pdbx_synonyms"),
            },
        );
    }

    pub fn get(&self, name3: &str) -> Option<&ChemComp> {
        self.components.get(name3)
    }

    /// Class of a component; names missing from the dictionary are ligands.
    pub fn classify(&self, name3: &str) -> MoleculeClass {
        self.get(name3)
            .map(ChemComp::class)
            .unwrap_or(MoleculeClass::Ligand)
    }

    pub fn ligand_info(&self, name3: &str) -> LigandInfo {
        self.get(name3)
            .map(|c| LigandInfo {
                name: c.name.clone(),
                formula: c.formula.clone(),
                synonyms: c.synonyms.clone(),
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }
}
