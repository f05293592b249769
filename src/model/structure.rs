use super::atom::Atom;
use super::chain::Chain;
use super::metadata::{ChainMetadata, Metadata, ParseStats};
use super::monomer::Monomer;
use super::types::{AtomIndex, ChainIndex, ModelIndex, MonomerIndex, ResKey};
use smol_str::SmolStr;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// One coordinate model; owns the chains created while it was current.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub id: SmolStr,
    chains: Vec<ChainIndex>,
}

impl Model {
    pub fn new(id: &str) -> Self {
        Self {
            id: SmolStr::new(id),
            chains: Vec::new(),
        }
    }

    pub fn chains(&self) -> &[ChainIndex] {
        &self.chains
    }
}

/// Where a newly parsed atom is filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AtomPlacement {
    /// Monomer atom list and the structure-wide atom list.
    Primary,
    /// The monomer's hydrogen bucket only.
    Hydrogen,
}

/// Tally of monomers per variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonomerCounts {
    pub amino_acids: usize,
    pub nucleotides: usize,
    pub ligands: usize,
}

/// Cross-referenced molecular graph of one parsed file.
///
/// Models, chains, monomers and atoms live in flat arenas addressed by index handles;
/// relationships are stored as handle lists so every back-reference resolves through
/// the structure itself.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    pub pdb_id: String,
    pub metadata: Metadata,
    pub stats: ParseStats,
    models: Vec<Model>,
    chains: Vec<Chain>,
    monomers: Vec<Monomer>,
    atom_arena: Vec<Atom>,
    atoms: Vec<AtomIndex>,
    chain_metadata: Vec<ChainMetadata>,
    all_model_ids: Vec<SmolStr>,
    homologues: BTreeMap<SmolStr, Vec<SmolStr>>,
    residue_index: HashMap<ResKey, MonomerIndex>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_model(&mut self, id: &str) -> ModelIndex {
        self.models.push(Model::new(id));
        ModelIndex::from_usize(self.models.len() - 1)
    }

    pub(crate) fn record_model_id(&mut self, id: &str) {
        if !self.all_model_ids.iter().any(|m| m == id) {
            self.all_model_ids.push(SmolStr::new(id));
        }
    }

    pub(crate) fn push_chain(&mut self, chain: Chain) -> ChainIndex {
        debug_assert!(
            self.chain_by_id(&chain.id).is_none(),
            "Attempted to add a duplicate chain ID '{}'",
            chain.id
        );
        let index = ChainIndex::from_usize(self.chains.len());
        self.models[chain.model.index()].chains.push(index);
        self.chains.push(chain);
        index
    }

    /// Adds a monomer to the arena and indexes it by residue key.
    ///
    /// An existing index entry for the same key is kept, so lookups resolve to the first
    /// monomer pushed under that key.
    pub(crate) fn push_monomer(&mut self, monomer: Monomer) -> MonomerIndex {
        let index = MonomerIndex::from_usize(self.monomers.len());
        self.residue_index.entry(monomer.key()).or_insert(index);
        self.monomers.push(monomer);
        index
    }

    /// Links a monomer to a chain, recording the chain's model on the monomer.
    ///
    /// # Arguments
    ///
    /// * `monomer` - Handle returned by [`Structure::push_monomer`].
    /// * `chain` - Owning chain; it gains the monomer once even if attached again.
    pub(crate) fn attach_monomer(&mut self, monomer: MonomerIndex, chain: ChainIndex) {
        let chain_ref = &mut self.chains[chain.index()];
        chain_ref.add_monomer(monomer);
        let model_id = chain_ref.model_id.clone();
        let monomer_ref = &mut self.monomers[monomer.index()];
        monomer_ref.chain = Some(chain);
        monomer_ref.model_id = Some(model_id);
    }

    pub(crate) fn push_atom(&mut self, atom: Atom, placement: AtomPlacement) -> AtomIndex {
        let index = AtomIndex::from_usize(self.atom_arena.len());
        let monomer = &mut self.monomers[atom.monomer.index()];
        match placement {
            AtomPlacement::Primary => {
                monomer.add_atom(index);
                self.atoms.push(index);
            }
            AtomPlacement::Hydrogen => monomer.add_hydrogen(index),
        }
        self.atom_arena.push(atom);
        index
    }

    /// Drops atoms from their monomers and from the structure-wide list.
    ///
    /// Returns the number of atoms removed from the structure-wide list. Removed atoms stay
    /// addressable by index but are no longer reachable from the graph.
    pub(crate) fn remove_atoms(&mut self, removed: &HashSet<AtomIndex>) -> usize {
        if removed.is_empty() {
            return 0;
        }
        for monomer in &mut self.monomers {
            monomer.retain_atoms(|a| !removed.contains(&a));
        }
        let before = self.atoms.len();
        self.atoms.retain(|a| !removed.contains(a));
        before - self.atoms.len()
    }

    pub(crate) fn push_chain_metadata(&mut self, metadata: ChainMetadata) {
        self.chain_metadata.push(metadata);
    }

    pub(crate) fn chain_metadata_mut(&mut self) -> std::slice::IterMut<'_, ChainMetadata> {
        self.chain_metadata.iter_mut()
    }

    pub(crate) fn set_homologues(&mut self, homologues: BTreeMap<SmolStr, Vec<SmolStr>>) {
        self.homologues = homologues;
    }

    pub(crate) fn monomer_mut(&mut self, index: MonomerIndex) -> &mut Monomer {
        &mut self.monomers[index.index()]
    }

    pub fn model(&self, index: ModelIndex) -> &Model {
        &self.models[index.index()]
    }

    pub fn chain(&self, index: ChainIndex) -> &Chain {
        &self.chains[index.index()]
    }

    pub fn monomer(&self, index: MonomerIndex) -> &Monomer {
        &self.monomers[index.index()]
    }

    pub fn atom(&self, index: AtomIndex) -> &Atom {
        &self.atom_arena[index.index()]
    }

    pub fn chain_by_id(&self, id: &str) -> Option<ChainIndex> {
        self.chains
            .iter()
            .position(|c| c.id == id)
            .map(ChainIndex::from_usize)
    }

    /// Looks up the monomer filed under a residue key.
    ///
    /// # Arguments
    ///
    /// * `key` - PDB residue number, author chain id and insertion code.
    ///
    /// # Returns
    ///
    /// The handle of the first monomer created for `key`, or `None` when no atom row
    /// of the entry reached that residue.
    pub fn find_monomer(&self, key: &ResKey) -> Option<MonomerIndex> {
        self.residue_index.get(key).copied()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn monomers(&self) -> &[Monomer] {
        &self.monomers
    }

    /// Structure-wide atom list in file order; bucketed hydrogens are not included.
    pub fn atom_indices(&self) -> &[AtomIndex] {
        &self.atoms
    }

    pub fn iter_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().map(|a| self.atom(*a))
    }

    pub fn iter_chain_monomers(&self, chain: ChainIndex) -> impl Iterator<Item = &Monomer> {
        self.chain(chain).monomers().iter().map(|m| self.monomer(*m))
    }

    pub fn iter_monomer_atoms(&self, monomer: MonomerIndex) -> impl Iterator<Item = &Atom> {
        self.monomer(monomer).atoms().iter().map(|a| self.atom(*a))
    }

    pub fn chain_metadata(&self) -> &[ChainMetadata] {
        &self.chain_metadata
    }

    pub fn all_model_ids(&self) -> &[SmolStr] {
        &self.all_model_ids
    }

    pub fn homologues(&self) -> &BTreeMap<SmolStr, Vec<SmolStr>> {
        &self.homologues
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn hydrogen_count(&self) -> usize {
        self.monomers.iter().map(|m| m.hydrogens().len()).sum()
    }

    pub fn chain_atom_count(&self, chain: ChainIndex) -> usize {
        self.iter_chain_monomers(chain).map(|m| m.atom_count()).sum()
    }

    pub fn monomer_counts(&self) -> MonomerCounts {
        Self::count_monomers(self.monomers.iter())
    }

    pub fn chain_monomer_counts(&self, chain: ChainIndex) -> MonomerCounts {
        Self::count_monomers(self.iter_chain_monomers(chain))
    }

    fn count_monomers<'a>(monomers: impl Iterator<Item = &'a Monomer>) -> MonomerCounts {
        monomers.fold(MonomerCounts::default(), |mut counts, m| {
            if m.is_amino_acid() {
                counts.amino_acids += 1;
            } else if m.is_nucleotide() {
                counts.nucleotides += 1;
            } else {
                counts.ligands += 1;
            }
            counts
        })
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure {{ pdb_id: \"{}\", models: {}, chains: {}, monomers: {}, atoms: {} }}",
            self.pdb_id,
            self.model_count(),
            self.chain_count(),
            self.monomer_count(),
            self.atom_count()
        )
    }
}
