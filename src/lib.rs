//! # CifForge
//!
//! **CifForge** reads macromolecular mmCIF files in one streaming pass and builds a cross-referenced molecular graph of models, chains, monomers and atoms. Amino-acid monomers take their ordinals and secondary structure from a DSSP residue list; residues missing from that list, ligands and RNA nucleotides are synthesized with ordinals that never collide with the DSSP numbering.
//!
//! ## Features
//!
//! - **Streaming parser**: a line-oriented state machine over data blocks, `loop_` tables, quoted values and multi-line text fields, with no full-file buffering.
//! - **Arena-backed model**: `Structure` owns flat arenas of `Model`, `Chain`, `Monomer` and `Atom` values addressed by typed index handles, so every back-reference resolves in constant time.
//! - **Entry metadata**: title, keywords, experiment, resolution, deposition date, per-chain entity and organism details, and chain homologues are collected alongside the coordinates.
//! - **Configurable policies**: TOML `Settings` control coordinate rounding, RNA and hydrogen handling, ignored ligands and elements, forced single-chain parsing and alternate-location resolution.
//! - **Batch parsing**: independent files parse in parallel when the `parallel` feature is enabled.

mod model;
mod utils;

pub mod io;
pub mod ops;

pub use model::atom::Atom;
pub use model::chain::Chain;
pub use model::metadata::{ChainMetadata, Metadata, ParseStats};
pub use model::monomer::{LigandInfo, Monomer, MonomerKind};
pub use model::secondary::{DsspResidue, SecondaryStructure};
pub use model::structure::{Model, MonomerCounts, Structure};
pub use model::types::{
    AtomIndex, AtomKind, ChainIndex, Coord, ModelIndex, MoleculeClass, MonomerIndex, ResKey,
};
