//! Atom records produced from `_atom_site` rows.
//!
//! Coordinates are stored as fixed-point integers in tenths of an ångström, so every
//! distance helper works on integer arithmetic and stays exact across platforms. An atom
//! carries lookup handles back to its monomer and chain inside the owning
//! [`Structure`](crate::Structure).

use super::types::{AtomKind, ChainIndex, Coord, MonomerIndex};
use smol_str::SmolStr;
use std::fmt;

/// Parsed atom with classification tag and back-references into the molecular graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from `_atom_site.id`.
    pub serial: i32,
    /// Atom name; the alpha carbon is normalized to the padded form `" CA "`.
    pub name: SmolStr,
    /// Element symbol from `_atom_site.type_symbol`.
    pub element: SmolStr,
    /// Alternate location code, `None` when the column holds a placeholder.
    pub alt_loc: Option<SmolStr>,
    /// Cartesian coordinates in tenths of an ångström.
    pub pos: Coord,
    /// Crystallographic occupancy when the column is present and numeric.
    pub occupancy: Option<f32>,
    pub kind: AtomKind,
    /// PDB residue number of the owning monomer.
    pub pdb_res_num: i32,
    /// DSSP ordinal of the owning monomer; absent for bucketed hydrogens.
    pub dssp_res_num: Option<i32>,
    pub chain_id: SmolStr,
    pub model_id: SmolStr,
    pub monomer: MonomerIndex,
    pub chain: ChainIndex,
}

impl Atom {
    /// Squared distance to another atom in tenths of an ångström, squared.
    ///
    /// # Arguments
    ///
    /// * `other` - Reference atom to measure against.
    ///
    /// # Returns
    ///
    /// The squared distance as `i64`, exact for every representable coordinate.
    pub fn distance_squared(&self, other: &Atom) -> i64 {
        let delta = self.pos - other.pos;
        delta.iter().map(|d| i64::from(*d) * i64::from(*d)).sum()
    }

    /// Euclidean distance to another atom in ångströms.
    pub fn distance(&self, other: &Atom) -> f64 {
        (self.distance_squared(other) as f64).sqrt() / 10.0
    }

    /// Coordinates converted back to ångströms.
    pub fn angstrom_pos(&self) -> nalgebra::Point3<f64> {
        self.pos.map(|c| f64::from(c) / 10.0)
    }

    pub fn is_backbone_alpha_carbon(&self) -> bool {
        self.name == " CA "
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.trim().eq_ignore_ascii_case("H")
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ serial: {}, name: \"{}\", element: {}, kind: {}, res: {}{}, pos: [{}, {}, {}] }}",
            self.serial,
            self.name,
            self.element,
            self.kind,
            self.chain_id,
            self.pdb_res_num,
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}
