//! Molecular graph builder driven by `_atom_site` rows.
//!
//! The builder keeps an explicit cursor over the current model, chain and monomer. A new
//! monomer is opened strictly when the residue key (PDB number, author chain, insertion
//! code) changes; its variant is decided once, at that point, from the chemical-component
//! dictionary and the entity table:
//!
//! 1. nucleotide when the component is RNA and the entity is a polymer;
//! 2. ligand when the component is not an amino acid or the entity is a non-polymer;
//! 3. amino acid otherwise, taken from the DSSP residue list or synthesized.
//!
//! Monomers missing from the DSSP list receive synthetic ordinals counted on top of the
//! highest real ordinal, so they never collide with DSSP numbering.

use super::categories::CategoryTables;
use super::schema::{ColumnSchema, Row, is_assigned};
use crate::io::context::ParseContext;
use crate::io::error::Error;
use crate::model::atom::Atom;
use crate::model::chain::Chain;
use crate::model::metadata::ChainMetadata;
use crate::model::monomer::{Monomer, MonomerKind};
use crate::model::secondary::SecondaryStructure;
use crate::model::structure::{AtomPlacement, Structure};
use crate::model::types::{
    AtomKind, ChainIndex, Coord, ModelIndex, MoleculeClass, MonomerIndex, ResKey,
};
use smol_str::SmolStr;
use std::collections::HashMap;
use std::path::PathBuf;

const FORMAT: &str = "mmCIF";

const REQUIRED_COLUMNS: [&str; 8] = [
    "id",
    "type_symbol",
    "label_atom_id",
    "label_comp_id",
    "label_asym_id",
    "Cartn_x",
    "Cartn_y",
    "Cartn_z",
];

/// Author columns and the computed columns standing in for them when absent.
const AUTHOR_ALIASES: [(&str, &str); 4] = [
    ("auth_atom_id", "label_atom_id"),
    ("auth_asym_id", "label_asym_id"),
    ("auth_comp_id", "label_comp_id"),
    ("auth_seq_id", "label_seq_id"),
];

#[derive(Debug, Clone, Copy)]
struct AtomSiteIndices {
    id: usize,
    type_symbol: usize,
    label_atom_id: usize,
    label_comp_id: usize,
    label_asym_id: usize,
    auth_asym_id: usize,
    auth_seq_id: Option<usize>,
    cartn_x: usize,
    cartn_y: usize,
    cartn_z: usize,
    model_num: Option<usize>,
    label_entity_id: Option<usize>,
    label_alt_id: Option<usize>,
    ins_code: Option<usize>,
    occupancy: Option<usize>,
}

impl AtomSiteIndices {
    /// Resolves column positions, aliasing missing author columns first.
    ///
    /// Returns the indices and the list of aliases that had to be applied.
    fn resolve(schema: &mut ColumnSchema) -> Result<(Self, Vec<(&'static str, &'static str)>), Error> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !schema.contains(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::missing_columns("_atom_site", missing));
        }

        let applied: Vec<_> = AUTHOR_ALIASES
            .iter()
            .copied()
            .filter(|(author, computed)| schema.add_alias(author, computed))
            .collect();

        let auth_asym_id = schema.position("auth_asym_id");
        let required = |column: &str| schema.position(column).unwrap_or_default();
        let indices = Self {
            id: required("id"),
            type_symbol: required("type_symbol"),
            label_atom_id: required("label_atom_id"),
            label_comp_id: required("label_comp_id"),
            label_asym_id: required("label_asym_id"),
            auth_asym_id: auth_asym_id.unwrap_or_else(|| required("label_asym_id")),
            auth_seq_id: schema.position("auth_seq_id"),
            cartn_x: required("Cartn_x"),
            cartn_y: required("Cartn_y"),
            cartn_z: required("Cartn_z"),
            model_num: schema.position("pdbx_PDB_model_num"),
            label_entity_id: schema.position("label_entity_id"),
            label_alt_id: schema.position("label_alt_id"),
            ins_code: schema.position("pdbx_PDB_ins_code"),
            occupancy: schema.position("occupancy"),
        };
        Ok((indices, applied))
    }
}

/// What the current residue key maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonomerTarget {
    Kept {
        index: MonomerIndex,
        class: MoleculeClass,
    },
    /// Ligand or nucleotide on the ignore list; its atoms are dropped.
    Discarded,
}

#[derive(Debug, Clone)]
struct MonomerCursor {
    key: ResKey,
    target: MonomerTarget,
}

/// Position of the builder inside the molecular graph.
#[derive(Debug, Clone, Default)]
struct Cursor {
    model: Option<ModelIndex>,
    chain: Option<ChainIndex>,
    monomer: Option<MonomerCursor>,
}

/// Counters behind synthetic ordinals.
#[derive(Debug, Clone, Copy, Default)]
struct SyntheticOrdinals {
    base: i32,
    nucleotides: i32,
    ligands: i32,
    free_residues: i32,
}

impl SyntheticOrdinals {
    fn new(base: i32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    fn counter(&mut self, class: MoleculeClass) -> &mut i32 {
        match class {
            MoleculeClass::AminoAcid => &mut self.free_residues,
            MoleculeClass::Nucleotide => &mut self.nucleotides,
            MoleculeClass::Ligand => &mut self.ligands,
        }
    }

    fn current(&self) -> i32 {
        self.base + self.nucleotides + self.ligands + self.free_residues
    }

    /// Provisionally takes the next ordinal for `class`.
    fn reserve(&mut self, class: MoleculeClass) -> i32 {
        *self.counter(class) += 1;
        self.current()
    }

    /// Gives back the most recent reservation for `class`.
    fn release(&mut self, class: MoleculeClass) {
        *self.counter(class) -= 1;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Notices {
    aliases: bool,
    further_models: bool,
}

pub(crate) struct GraphBuilder<'c> {
    secondary: &'c SecondaryStructure,
    context: &'c ParseContext,
    path: Option<PathBuf>,
    structure: Structure,
    /// Monomers already created from DSSP residues.
    listed: HashMap<ResKey, MonomerIndex>,
    cursor: Cursor,
    ordinals: SyntheticOrdinals,
    indices: Option<AtomSiteIndices>,
    notices: Notices,
}

impl<'c> GraphBuilder<'c> {
    pub fn new(secondary: &'c SecondaryStructure, context: &'c ParseContext, path: Option<PathBuf>) -> Self {
        Self {
            secondary,
            context,
            path,
            structure: Structure::new(),
            listed: HashMap::new(),
            cursor: Cursor::default(),
            ordinals: SyntheticOrdinals::new(secondary.last_used_ordinal()),
            indices: None,
            notices: Notices::default(),
        }
    }

    pub fn set_pdb_id(&mut self, pdb_id: &str) {
        self.structure.pdb_id = pdb_id.to_lowercase();
    }

    /// Forgets resolved column positions; called whenever the reader drops its schema.
    pub fn reset_columns(&mut self) {
        self.indices = None;
    }

    pub fn outside_loop_error(&self, line_number: usize) -> Error {
        Error::atom_site_outside_loop(self.path.clone(), line_number)
    }

    pub fn count_line(&mut self) {
        self.structure.stats.lines += 1;
    }

    pub fn into_structure(mut self) -> Structure {
        let stats = &mut self.structure.stats;
        stats.nucleotides = self.ordinals.nucleotides as usize;
        stats.ligands = self.ordinals.ligands as usize;
        stats.synthetic_amino_acids = self.ordinals.free_residues as usize;
        self.structure
    }

    fn ensure_indices(&mut self, schema: &ColumnSchema) -> Result<AtomSiteIndices, Error> {
        if let Some(indices) = self.indices {
            return Ok(indices);
        }
        let mut schema = schema.clone();
        if self.context.debug_enabled(2) {
            log::debug!("_atom_site columns: {}", schema.names().collect::<Vec<_>>().join(" "));
        }
        let (indices, applied) = AtomSiteIndices::resolve(&mut schema)?;
        if !schema.contains("group_PDB") && self.context.parse_warnings_enabled() {
            log::warn!("_atom_site table has no group_PDB column; record types are unknown");
        }
        if !applied.is_empty() && !self.notices.aliases {
            if self.context.progress_enabled() {
                for (author, computed) in &applied {
                    log::info!("Using {computed} instead of missing column {author}");
                }
            }
            self.notices.aliases = true;
            self.structure.stats.column_substitution_notices += 1;
        }
        self.indices = Some(indices);
        Ok(indices)
    }

    fn parse_error(&self, line_number: usize, details: impl Into<String>) -> Error {
        Error::parse(FORMAT, self.path.clone(), line_number, details)
    }

    fn parse_int(&self, raw: &str, column: &str, line_number: usize) -> Result<i32, Error> {
        raw.trim()
            .parse::<i32>()
            .map_err(|_| self.parse_error(line_number, format!("invalid {column} value '{raw}'")))
    }

    /// Converts an ångström value to tenths, rounding or truncating per settings.
    fn parse_coordinate(&self, raw: &str, axis: char, line_number: usize) -> Result<i32, Error> {
        let value: f64 = raw.trim().parse().map_err(|_| {
            self.parse_error(line_number, format!("invalid {axis} coordinate '{raw}'"))
        })?;
        Ok(fixed_point(value, self.context.settings().round_coordinates))
    }

    pub fn handle_row(&mut self, row: &Row<'_>, tables: &CategoryTables, line_number: usize) -> Result<(), Error> {
        self.structure.stats.atom_rows += 1;
        let ix = self.ensure_indices(row.schema())?;
        let value = |position: usize| row.field(position).unwrap_or_default();
        let optional = |position: Option<usize>| {
            position
                .and_then(|p| row.field(p))
                .filter(|v| is_assigned(v))
        };

        let Some(model) = self.resolve_model(optional(ix.model_num), tables) else {
            self.structure.stats.skipped_model_rows += 1;
            return Ok(());
        };

        let chain_id = value(ix.auth_asym_id);
        if let Some(forced) = self.context.forced_chain() {
            if forced != chain_id {
                self.structure.stats.forced_chain_skips += 1;
                return Ok(());
            }
        }
        let entity_id = optional(ix.label_entity_id);
        let chain = self.resolve_chain(chain_id, value(ix.label_asym_id), entity_id, model, tables);

        let serial = self.parse_int(value(ix.id), "id", line_number)?;
        let name3 = value(ix.label_comp_id);
        let pdb_num = match optional(ix.auth_seq_id) {
            Some(raw) => self.parse_int(raw, "auth_seq_id", line_number)?,
            None => {
                self.structure.stats.placeholder_seq_ids += 1;
                if self.context.parse_warnings_enabled() {
                    log::warn!("Atom #{serial} at line {line_number} has no residue number, using 1");
                }
                1
            }
        };
        let insertion_code = optional(ix.ins_code)
            .and_then(|c| c.chars().next())
            .unwrap_or(' ');
        let pos = Coord::new(
            self.parse_coordinate(value(ix.cartn_x), 'X', line_number)?,
            self.parse_coordinate(value(ix.cartn_y), 'Y', line_number)?,
            self.parse_coordinate(value(ix.cartn_z), 'Z', line_number)?,
        );
        let element = value(ix.type_symbol);

        if self.context.is_dna_residue(name3) {
            self.structure.stats.dna_atoms_skipped += 1;
            if self.context.parse_warnings_enabled() && self.context.debug_enabled(1) {
                log::debug!("Atom #{serial} belongs to DNA residue {name3}, skipping");
            }
            return Ok(());
        }
        let class = tables.components.classify(name3);
        if class == MoleculeClass::Nucleotide && !self.context.settings().include_rna {
            self.structure.stats.rna_atoms_skipped += 1;
            if self.context.parse_warnings_enabled() && self.context.debug_enabled(1) {
                log::debug!("Atom #{serial} belongs to RNA residue {name3}, skipping");
            }
            return Ok(());
        }

        let key = ResKey::new(pdb_num, chain_id, insertion_code);
        let target = match &self.cursor.monomer {
            Some(current) if current.key == key => current.target,
            _ => {
                let entity_type = entity_id.and_then(|id| tables.entities.entity_type(id));
                let kind = monomer_class(class, entity_type);
                let target = self.open_monomer(&key, kind, name3, entity_id, chain, tables);
                self.cursor.monomer = Some(MonomerCursor { key, target });
                target
            }
        };

        let hydrogen_bucket = self.context.keeps_hydrogen(element);
        if self.context.is_ignored_element(element) && !hydrogen_bucket {
            self.structure.stats.ignored_element_atoms += 1;
            if self.context.debug_enabled(2) {
                log::debug!("Atom #{serial} has ignored element {element}, skipping");
            }
            return Ok(());
        }

        let (monomer, class) = match target {
            MonomerTarget::Kept { index, class } => (index, class),
            MonomerTarget::Discarded => {
                self.structure.stats.ignored_ligand_atoms += 1;
                return Ok(());
            }
        };

        let (kind, placement) = match class {
            MoleculeClass::AminoAcid | MoleculeClass::Nucleotide if hydrogen_bucket => {
                (AtomKind::Hydrogen, AtomPlacement::Hydrogen)
            }
            MoleculeClass::AminoAcid => (AtomKind::AminoAcid, AtomPlacement::Primary),
            MoleculeClass::Nucleotide => (AtomKind::Rna, AtomPlacement::Primary),
            MoleculeClass::Ligand => (AtomKind::Ligand, AtomPlacement::Primary),
        };
        let dssp_res_num = match placement {
            AtomPlacement::Primary => Some(self.structure.monomer(monomer).dssp_num),
            AtomPlacement::Hydrogen => None,
        };

        let atom = Atom {
            serial,
            name: normalize_atom_name(value(ix.label_atom_id)),
            element: SmolStr::new(element),
            alt_loc: optional(ix.label_alt_id).map(SmolStr::new),
            pos,
            occupancy: optional(ix.occupancy).and_then(|o| o.parse().ok()),
            kind,
            pdb_res_num: pdb_num,
            dssp_res_num,
            chain_id: SmolStr::new(chain_id),
            model_id: self.structure.model(model).id.clone(),
            monomer,
            chain,
        };
        if self.context.debug_enabled(2) {
            log::debug!("Created {atom}");
        }
        self.structure.push_atom(atom, placement);
        Ok(())
    }

    fn resolve_model(&mut self, model_num: Option<&str>, tables: &CategoryTables) -> Option<ModelIndex> {
        let Some(id) = model_num else {
            return Some(*self.cursor.model.get_or_insert_with(|| {
                if self.context.progress_enabled() {
                    log::info!("No model column, creating default model '1'");
                }
                self.structure.push_model("1")
            }));
        };

        self.structure.record_model_id(id);
        match self.cursor.model {
            None => {
                if self.context.progress_enabled() {
                    log::info!("New model '{id}' found");
                }
                let model = self.structure.push_model(id);
                self.cursor.model = Some(model);
                Some(model)
            }
            Some(model) if self.structure.model(model).id != id && tables.metadata.is_nmr() => {
                if !self.notices.further_models {
                    if self.context.progress_enabled() {
                        log::info!("Found further models, ignoring them");
                    }
                    self.notices.further_models = true;
                }
                None
            }
            Some(model) => Some(model),
        }
    }

    fn resolve_chain(
        &mut self,
        chain_id: &str,
        alt_id: &str,
        entity_id: Option<&str>,
        model: ModelIndex,
        tables: &CategoryTables,
    ) -> ChainIndex {
        if let Some(current) = self.cursor.chain {
            if self.structure.chain(current).id == chain_id {
                return current;
            }
        }

        let chain = match self.structure.chain_by_id(chain_id) {
            Some(existing) => existing,
            None => {
                let model_id = self.structure.model(model).id.clone();
                let molecule_type = tables.polymers.chain_type(chain_id).unwrap_or("non-polymer");
                let mut chain = Chain::new(chain_id, alt_id, model, &model_id, molecule_type);
                if let Some(homologues) = tables.polymers.homologues(chain_id) {
                    chain.homologues = homologues.to_vec();
                }
                if self.context.progress_enabled() {
                    log::info!("New chain named {chain_id} found");
                }
                let pdb_id = self.structure.pdb_id.clone();
                self.structure.push_chain_metadata(ChainMetadata::new(
                    &pdb_id,
                    chain_id,
                    entity_id.unwrap_or_default(),
                ));
                self.structure.push_chain(chain)
            }
        };
        self.cursor.chain = Some(chain);
        chain
    }

    fn open_monomer(
        &mut self,
        key: &ResKey,
        class: MoleculeClass,
        name3: &str,
        entity_id: Option<&str>,
        chain: ChainIndex,
        tables: &CategoryTables,
    ) -> MonomerTarget {
        if class == MoleculeClass::AminoAcid {
            let index = self.amino_acid_monomer(key, name3);
            let monomer = self.structure.monomer_mut(index);
            monomer.name3 = SmolStr::new(name3);
            monomer.entity_id = entity_id.map(SmolStr::new);
            self.structure.attach_monomer(index, chain);
            return MonomerTarget::Kept { index, class };
        }

        let dssp_num = self.ordinals.reserve(class);
        if self.context.is_ignored_ligand(name3) {
            self.ordinals.release(class);
            self.structure.stats.ignored_monomers += 1;
            if self.context.debug_enabled(1) {
                log::debug!("Ignoring {} {name3} at {key}", class.name().to_lowercase());
            }
            return MonomerTarget::Discarded;
        }

        let settings = self.context.settings();
        let (kind, sse) = match class {
            MoleculeClass::Nucleotide => (MonomerKind::Nucleotide, settings.rna_sse_code.as_str()),
            _ => (
                MonomerKind::Ligand(tables.components.ligand_info(name3)),
                settings.ligand_sse_code.as_str(),
            ),
        };
        let mut monomer = Monomer::synthetic(key, name3, kind, dssp_num, sse);
        monomer.entity_id = entity_id.map(SmolStr::new);
        if self.context.debug_enabled(1) {
            log::debug!("Found {} {name3} at {key}, ordinal {dssp_num}", class.name().to_lowercase());
        }
        let index = self.structure.push_monomer(monomer);
        self.structure.attach_monomer(index, chain);
        MonomerTarget::Kept { index, class }
    }

    /// Returns the DSSP-listed residue for `key`, or a synthesized one for chain breaks.
    ///
    /// A DSSP residue enters the arena when an atom row first reaches its key.
    fn amino_acid_monomer(&mut self, key: &ResKey, name3: &str) -> MonomerIndex {
        if let Some(index) = self.structure.find_monomer(key) {
            if self.structure.monomer(index).is_amino_acid() {
                return index;
            }
        }
        if let Some(&index) = self.listed.get(key) {
            return index;
        }
        if let Some(residue) = self.secondary.find(key) {
            let index = self.structure.push_monomer(Monomer::from_dssp(residue));
            self.listed.insert(key.clone(), index);
            return index;
        }
        let dssp_num = self.ordinals.reserve(MoleculeClass::AminoAcid);
        if self.context.debug_enabled(2) {
            log::debug!("Residue {name3} at {key} is not in the DSSP list, assigning ordinal {dssp_num}");
        }
        let monomer = Monomer::synthetic(key, name3, MonomerKind::AminoAcid, dssp_num, "C");
        self.structure.push_monomer(monomer)
    }
}

/// Variant of a new monomer from its component class and entity type.
fn monomer_class(component: MoleculeClass, entity_type: Option<&str>) -> MoleculeClass {
    if component == MoleculeClass::Nucleotide && entity_type == Some("polymer") {
        MoleculeClass::Nucleotide
    } else if component == MoleculeClass::Ligand || entity_type == Some("non-polymer") {
        MoleculeClass::Ligand
    } else {
        MoleculeClass::AminoAcid
    }
}

fn normalize_atom_name(name: &str) -> SmolStr {
    if name == "CA" {
        SmolStr::new_static(" CA ")
    } else {
        SmolStr::new(name)
    }
}

/// Ångström value to tenths: rounds half up on the single-precision value, or truncates
/// the double-precision value toward zero.
fn fixed_point(value: f64, round: bool) -> i32 {
    if round {
        ((value as f32) * 10.0 + 0.5).floor() as i32
    } else {
        (value * 10.0) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_rounds_or_truncates() {
        assert_eq!(fixed_point(1.234, true), 12);
        assert_eq!(fixed_point(5.678, true), 57);
        assert_eq!(fixed_point(9.012, true), 90);
        assert_eq!(fixed_point(5.678, false), 56);
        assert_eq!(fixed_point(-1.25, true), -12);
        assert_eq!(fixed_point(-1.29, false), -12);
    }

    #[test]
    fn monomer_class_precedence() {
        use MoleculeClass::*;

        assert_eq!(monomer_class(Nucleotide, Some("polymer")), Nucleotide);
        assert_eq!(monomer_class(Nucleotide, Some("non-polymer")), Ligand);
        assert_eq!(monomer_class(Nucleotide, None), AminoAcid);
        assert_eq!(monomer_class(Ligand, Some("polymer")), Ligand);
        assert_eq!(monomer_class(AminoAcid, Some("non-polymer")), Ligand);
        assert_eq!(monomer_class(AminoAcid, Some("polymer")), AminoAcid);
    }

    #[test]
    fn only_bare_ca_is_padded() {
        assert_eq!(normalize_atom_name("CA"), " CA ");
        assert_eq!(normalize_atom_name("CB"), "CB");
        assert_eq!(normalize_atom_name("CA1"), "CA1");
    }

    #[test]
    fn synthetic_ordinals_count_on_top_of_base() {
        let mut ordinals = SyntheticOrdinals::new(100);

        assert_eq!(ordinals.reserve(MoleculeClass::Ligand), 101);
        assert_eq!(ordinals.reserve(MoleculeClass::Nucleotide), 102);
        ordinals.release(MoleculeClass::Nucleotide);
        assert_eq!(ordinals.reserve(MoleculeClass::AminoAcid), 102);
        assert_eq!(ordinals.current(), 102);
    }

    #[test]
    fn resolve_reports_missing_required_columns() {
        let mut schema = ColumnSchema::default();
        for column in ["id", "label_atom_id", "label_comp_id", "label_asym_id"] {
            schema.push(column);
        }

        let err = AtomSiteIndices::resolve(&mut schema).unwrap_err();
        match err {
            Error::MissingColumns { columns, .. } => {
                assert_eq!(columns, ["type_symbol", "Cartn_x", "Cartn_y", "Cartn_z"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_aliases_author_columns() {
        let mut schema = ColumnSchema::default();
        for column in REQUIRED_COLUMNS.iter().chain(["label_seq_id"].iter()) {
            schema.push(column);
        }

        let (indices, applied) = AtomSiteIndices::resolve(&mut schema).unwrap();
        assert_eq!(indices.auth_asym_id, 4);
        assert_eq!(indices.auth_seq_id, Some(8));
        assert_eq!(applied.len(), 4);
        assert!(indices.model_num.is_none());
    }

    #[test]
    fn resolve_tolerates_missing_sequence_column() {
        let mut schema = ColumnSchema::default();
        for column in REQUIRED_COLUMNS {
            schema.push(column);
        }

        let (indices, applied) = AtomSiteIndices::resolve(&mut schema).unwrap();
        assert!(indices.auth_seq_id.is_none());
        assert_eq!(indices.auth_asym_id, 4);
        assert_eq!(applied.len(), 3);
    }
}
