use super::types::{ModelIndex, MonomerIndex};
use smol_str::SmolStr;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Author chain identifier (`auth_asym_id`).
    pub id: SmolStr,
    /// Label chain identifier (`label_asym_id`) of the row that created the chain.
    pub alt_id: SmolStr,
    pub model: ModelIndex,
    pub model_id: SmolStr,
    /// Polymer type from `_entity_poly`, or `non-polymer`.
    pub molecule_type: String,
    /// Chains that share this chain's polymer entity.
    pub homologues: Vec<SmolStr>,
    monomers: Vec<MonomerIndex>,
}

impl Chain {
    pub fn new(id: &str, alt_id: &str, model: ModelIndex, model_id: &str, molecule_type: &str) -> Self {
        Self {
            id: SmolStr::new(id),
            alt_id: SmolStr::new(alt_id),
            model,
            model_id: SmolStr::new(model_id),
            molecule_type: molecule_type.to_string(),
            homologues: Vec::new(),
            monomers: Vec::new(),
        }
    }

    /// Records a monomer once; repeated attachment is a no-op.
    pub(crate) fn add_monomer(&mut self, monomer: MonomerIndex) -> bool {
        if self.monomers.contains(&monomer) {
            return false;
        }
        self.monomers.push(monomer);
        true
    }

    pub fn monomers(&self) -> &[MonomerIndex] {
        &self.monomers
    }

    pub fn monomer_count(&self) -> usize {
        self.monomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomers.is_empty()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {{ id: \"{}\", alt_id: \"{}\", model: \"{}\", type: \"{}\", monomers: {} }}",
            self.id,
            self.alt_id,
            self.model_id,
            self.molecule_type,
            self.monomer_count()
        )
    }
}
