//! Handlers for the non-coordinate categories and the category dispatcher.

use super::builder::GraphBuilder;
use super::chem::ChemCompDictionary;
use super::schema::{Row, is_assigned};
use crate::io::error::Error;
use crate::model::metadata::Metadata;
use smol_str::SmolStr;
use std::collections::{BTreeMap, HashMap};

/// Categories with a registered handler; every other category is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Exptl,
    Refine,
    Reflns,
    Entity,
    EntityPoly,
    AtomSite,
    ChemComp,
    EntitySrcGen,
    EntitySrcNat,
    PdbxEntitySrcSyn,
    Struct,
    StructKeywords,
    PdbxDatabaseStatus,
}

impl Category {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "_exptl" => Some(Self::Exptl),
            "_refine" => Some(Self::Refine),
            "_reflns" => Some(Self::Reflns),
            "_entity" => Some(Self::Entity),
            "_entity_poly" => Some(Self::EntityPoly),
            "_atom_site" => Some(Self::AtomSite),
            "_chem_comp" => Some(Self::ChemComp),
            "_entity_src_gen" => Some(Self::EntitySrcGen),
            "_entity_src_nat" => Some(Self::EntitySrcNat),
            "_pdbx_entity_src_syn" => Some(Self::PdbxEntitySrcSyn),
            "_struct" => Some(Self::Struct),
            "_struct_keywords" => Some(Self::StructKeywords),
            "_pdbx_database_status" => Some(Self::PdbxDatabaseStatus),
            _ => None,
        }
    }
}

/// Organism-name sources, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum OrganismSource {
    Synthetic,
    Natural,
    Genetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SourcedName {
    value: String,
    source: OrganismSource,
}

fn offer_name(slot: &mut Option<SourcedName>, value: Option<&str>, source: OrganismSource) {
    let Some(value) = value else {
        return;
    };
    if slot.as_ref().is_some_and(|current| current.source > source) {
        return;
    }
    *slot = Some(SourcedName {
        value: value.to_string(),
        source,
    });
}

/// Accumulates header metadata; unset fields become empty strings in [`Metadata`].
#[derive(Debug, Clone, Default)]
pub(crate) struct MetadataBuilder {
    title: Option<String>,
    keywords: Option<String>,
    header: Option<String>,
    experiment: Option<String>,
    resolution: Option<String>,
    date: Option<String>,
    organism_common: Option<SourcedName>,
    organism_scientific: Option<SourcedName>,
}

fn overwrite(slot: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = value {
        *slot = Some(value.to_string());
    }
}

impl MetadataBuilder {
    pub fn experiment(&self) -> Option<&str> {
        self.experiment.as_deref()
    }

    pub fn is_nmr(&self) -> bool {
        self.experiment().is_some_and(|e| e.contains("NMR"))
    }

    fn record_resolution(&mut self, value: Option<&str>) {
        if self.resolution.is_none() {
            overwrite(&mut self.resolution, value);
        }
    }

    fn record_organism(&mut self, row: &Row<'_>, common: &str, scientific: &str, source: OrganismSource) {
        offer_name(&mut self.organism_common, row.assigned(common), source);
        offer_name(&mut self.organism_scientific, row.assigned(scientific), source);
    }

    pub fn organism_common(&self) -> &str {
        self.organism_common.as_ref().map_or("", |n| n.value.as_str())
    }

    pub fn organism_scientific(&self) -> &str {
        self.organism_scientific.as_ref().map_or("", |n| n.value.as_str())
    }

    pub fn build(&self, is_large: bool) -> Metadata {
        let text = |slot: &Option<String>| slot.clone().unwrap_or_default();
        Metadata {
            title: text(&self.title),
            keywords: text(&self.keywords),
            header: text(&self.header),
            experiment: text(&self.experiment),
            resolution: text(&self.resolution),
            date: text(&self.date),
            is_large,
        }
    }
}

/// Attribute map of one `_entity` row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EntityRecord {
    attributes: BTreeMap<String, String>,
}

impl EntityRecord {
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map_or("", |v| v.as_str())
    }

    pub fn entity_type(&self) -> &str {
        self.attribute("type")
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EntityTable {
    records: HashMap<SmolStr, EntityRecord>,
}

impl EntityTable {
    fn record(&mut self, row: &Row<'_>) {
        let Some(id) = row.get("id").or_else(|| row.field(0)) else {
            return;
        };
        let attributes = row
            .entries()
            .filter(|(name, _)| *name != "id")
            .map(|(name, value)| {
                let value = if is_assigned(value) { value } else { "" };
                (name.to_string(), value.to_string())
            })
            .collect();
        self.records.insert(SmolStr::new(id), EntityRecord { attributes });
    }

    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.records.get(id)
    }

    pub fn entity_type(&self, id: &str) -> Option<&str> {
        self.get(id).map(EntityRecord::entity_type)
    }
}

/// Chain-to-polymer-type map and homologue lists from `_entity_poly`.
#[derive(Debug, Clone, Default)]
pub(crate) struct PolymerTable {
    chain_types: HashMap<SmolStr, String>,
    homologues: BTreeMap<SmolStr, Vec<SmolStr>>,
}

impl PolymerTable {
    fn record(&mut self, row: &Row<'_>) {
        let Some(strands) = row.assigned("pdbx_strand_id") else {
            return;
        };
        let chains: Vec<SmolStr> = strands
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(SmolStr::new)
            .collect();
        let kind = row.assigned("type").unwrap_or_default();

        for chain in &chains {
            self.chain_types.insert(chain.clone(), kind.to_string());
            let others = chains.iter().filter(|c| *c != chain).cloned().collect();
            self.homologues.insert(chain.clone(), others);
        }
    }

    pub fn chain_type(&self, chain_id: &str) -> Option<&str> {
        self.chain_types.get(chain_id).map(|s| s.as_str())
    }

    pub fn homologues(&self, chain_id: &str) -> Option<&[SmolStr]> {
        self.homologues.get(chain_id).map(|h| h.as_slice())
    }

    pub fn homologue_map(&self) -> &BTreeMap<SmolStr, Vec<SmolStr>> {
        &self.homologues
    }
}

/// Lookup tables filled by the non-coordinate categories.
#[derive(Debug, Clone, Default)]
pub(crate) struct CategoryTables {
    pub metadata: MetadataBuilder,
    pub entities: EntityTable,
    pub polymers: PolymerTable,
    pub components: ChemCompDictionary,
}

impl CategoryTables {
    /// Routes one row of `category` to its handler.
    pub fn dispatch(
        &mut self,
        builder: &mut GraphBuilder<'_>,
        category: Category,
        row: &Row<'_>,
        in_loop: bool,
        line_number: usize,
    ) -> Result<(), Error> {
        let meta = &mut self.metadata;
        match category {
            Category::Exptl => overwrite(&mut meta.experiment, row.assigned("method")),
            Category::Refine => meta.record_resolution(row.assigned("ls_d_res_high")),
            Category::Reflns => meta.record_resolution(row.assigned("d_resolution_high")),
            Category::Struct => overwrite(&mut meta.title, row.assigned("title")),
            Category::StructKeywords => {
                overwrite(&mut meta.keywords, row.assigned("text"));
                overwrite(&mut meta.header, row.assigned("pdbx_keywords"));
            }
            Category::PdbxDatabaseStatus => {
                overwrite(&mut meta.date, row.assigned("recvd_initial_deposition_date"))
            }
            Category::EntitySrcGen => meta.record_organism(
                row,
                "gene_src_common_name",
                "pdbx_gene_src_scientific_name",
                OrganismSource::Genetic,
            ),
            Category::EntitySrcNat => meta.record_organism(
                row,
                "common_name",
                "pdbx_organism_scientific",
                OrganismSource::Natural,
            ),
            Category::PdbxEntitySrcSyn => meta.record_organism(
                row,
                "organism_common_name",
                "organism_scientific",
                OrganismSource::Synthetic,
            ),
            Category::Entity => self.entities.record(row),
            Category::EntityPoly => self.polymers.record(row),
            Category::ChemComp => self.components.record(row),
            Category::AtomSite => {
                if !in_loop {
                    return Err(builder.outside_loop_error(line_number));
                }
                builder.handle_row(row, self, line_number)?;
            }
        }
        Ok(())
    }
}
