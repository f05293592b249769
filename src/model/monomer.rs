use super::secondary::DsspResidue;
use super::types::{AtomIndex, ChainIndex, MoleculeClass, ResKey, amino_acid_one_letter};
use smol_str::SmolStr;
use std::fmt;

/// Chemical-component details attached to ligand monomers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LigandInfo {
    pub name: String,
    pub formula: String,
    pub synonyms: String,
}

/// Variant of a monomer, fixed when the monomer is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonomerKind {
    AminoAcid,
    Nucleotide,
    Ligand(LigandInfo),
}

impl MonomerKind {
    pub fn class(&self) -> MoleculeClass {
        match self {
            MonomerKind::AminoAcid => MoleculeClass::AminoAcid,
            MonomerKind::Nucleotide => MoleculeClass::Nucleotide,
            MonomerKind::Ligand(_) => MoleculeClass::Ligand,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monomer {
    pub pdb_num: i32,
    pub insertion_code: char,
    pub chain_id: SmolStr,
    pub name3: SmolStr,
    pub name1: SmolStr,
    pub dssp_num: i32,
    pub sse: SmolStr,
    /// Set for monomers that were not part of the DSSP residue list.
    pub synthetic: bool,
    pub model_id: Option<SmolStr>,
    pub chain: Option<ChainIndex>,
    pub entity_id: Option<SmolStr>,
    kind: MonomerKind,
    atoms: Vec<AtomIndex>,
    hydrogens: Vec<AtomIndex>,
}

impl Monomer {
    pub fn from_dssp(residue: &DsspResidue) -> Self {
        Self {
            pdb_num: residue.pdb_num,
            insertion_code: residue.insertion_code,
            chain_id: residue.chain_id.clone(),
            name3: SmolStr::default(),
            name1: SmolStr::new(residue.amino_acid.to_string()),
            dssp_num: residue.dssp_num,
            sse: SmolStr::new(residue.sse.to_string()),
            synthetic: false,
            model_id: None,
            chain: None,
            entity_id: None,
            kind: MonomerKind::AminoAcid,
            atoms: Vec::new(),
            hydrogens: Vec::new(),
        }
    }

    /// Creates a monomer absent from the DSSP list.
    ///
    /// Amino acids get their one-letter code and coil assignment `C`. Nucleotides reuse
    /// the residue name as `name1`, ligands are coded `J`; both take the caller's SSE code.
    pub fn synthetic(key: &ResKey, name3: &str, kind: MonomerKind, dssp_num: i32, sse: &str) -> Self {
        let (name1, sse) = match kind {
            MonomerKind::AminoAcid => (
                SmolStr::new(amino_acid_one_letter(name3).to_string()),
                SmolStr::new_static("C"),
            ),
            MonomerKind::Nucleotide => (SmolStr::new(name3), SmolStr::new(sse)),
            MonomerKind::Ligand(_) => (SmolStr::new_static("J"), SmolStr::new(sse)),
        };
        Self {
            pdb_num: key.pdb_num,
            insertion_code: key.insertion_code,
            chain_id: key.chain_id.clone(),
            name3: SmolStr::new(name3),
            name1,
            dssp_num,
            sse,
            synthetic: true,
            model_id: None,
            chain: None,
            entity_id: None,
            kind,
            atoms: Vec::new(),
            hydrogens: Vec::new(),
        }
    }

    pub fn key(&self) -> ResKey {
        ResKey::new(self.pdb_num, self.chain_id.clone(), self.insertion_code)
    }

    pub fn kind(&self) -> &MonomerKind {
        &self.kind
    }

    pub fn class(&self) -> MoleculeClass {
        self.kind.class()
    }

    pub fn ligand_info(&self) -> Option<&LigandInfo> {
        match &self.kind {
            MonomerKind::Ligand(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_amino_acid(&self) -> bool {
        matches!(self.kind, MonomerKind::AminoAcid)
    }

    pub fn is_ligand(&self) -> bool {
        matches!(self.kind, MonomerKind::Ligand(_))
    }

    pub fn is_nucleotide(&self) -> bool {
        matches!(self.kind, MonomerKind::Nucleotide)
    }

    pub(crate) fn add_atom(&mut self, atom: AtomIndex) {
        self.atoms.push(atom);
    }

    pub(crate) fn add_hydrogen(&mut self, atom: AtomIndex) {
        self.hydrogens.push(atom);
    }

    pub(crate) fn retain_atoms(&mut self, mut keep: impl FnMut(AtomIndex) -> bool) -> usize {
        let before = self.atoms.len();
        self.atoms.retain(|a| keep(*a));
        before - self.atoms.len()
    }

    pub fn atoms(&self) -> &[AtomIndex] {
        &self.atoms
    }

    pub fn hydrogens(&self) -> &[AtomIndex] {
        &self.hydrogens
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl fmt::Display for Monomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monomer {{ key: {}, name: \"{}\", class: {}, dssp: {}, atoms: {} }}",
            self.key(),
            self.name3,
            self.class(),
            self.dssp_num,
            self.atom_count()
        )
    }
}
