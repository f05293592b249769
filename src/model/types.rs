use nalgebra::Point3;
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

/// Fixed-point Cartesian coordinates in tenths of an ångström.
pub type Coord = Point3<i32>;

macro_rules! arena_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn from_usize(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position of the referenced item inside its owning arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

arena_index!(
    /// Handle of a [`Model`](crate::Model) inside a [`Structure`](crate::Structure).
    ModelIndex
);
arena_index!(
    /// Handle of a [`Chain`](crate::Chain) inside a [`Structure`](crate::Structure).
    ChainIndex
);
arena_index!(
    /// Handle of a [`Monomer`](crate::Monomer) inside a [`Structure`](crate::Structure).
    MonomerIndex
);
arena_index!(
    /// Handle of an [`Atom`](crate::Atom) inside a [`Structure`](crate::Structure).
    AtomIndex
);

/// Identity of a residue position: PDB sequence number, author chain and insertion code.
///
/// Monomer boundaries are detected strictly on a change of this triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResKey {
    pub pdb_num: i32,
    pub chain_id: SmolStr,
    pub insertion_code: char,
}

impl ResKey {
    pub fn new(pdb_num: i32, chain_id: impl Into<SmolStr>, insertion_code: char) -> Self {
        Self {
            pdb_num,
            chain_id: chain_id.into(),
            insertion_code,
        }
    }
}

impl fmt::Display for ResKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{}",
            self.chain_id,
            self.pdb_num,
            self.insertion_code.to_string().trim()
        )
    }
}

/// Broad chemical class of a monomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeClass {
    AminoAcid,
    Nucleotide,
    Ligand,
}

impl MoleculeClass {
    pub fn name(&self) -> &'static str {
        match self {
            MoleculeClass::AminoAcid => "Amino Acid",
            MoleculeClass::Nucleotide => "Nucleotide",
            MoleculeClass::Ligand => "Ligand",
        }
    }
}

impl fmt::Display for MoleculeClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classification tag carried by every parsed atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    AminoAcid,
    Rna,
    Ligand,
    /// Hydrogen retained in a monomer's secondary bucket rather than the global atom list.
    Hydrogen,
}

impl AtomKind {
    pub fn name(&self) -> &'static str {
        match self {
            AtomKind::AminoAcid => "AminoAcid",
            AtomKind::Rna => "RNA",
            AtomKind::Ligand => "Ligand",
            AtomKind::Hydrogen => "Hydrogen",
        }
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AtomKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AminoAcid" => Ok(AtomKind::AminoAcid),
            "RNA" => Ok(AtomKind::Rna),
            "Ligand" => Ok(AtomKind::Ligand),
            "Hydrogen" => Ok(AtomKind::Hydrogen),
            _ => Err(format!("Invalid atom kind: {}", s)),
        }
    }
}

/// Returns the one-letter code of a standard amino acid, `X` for anything else.
pub fn amino_acid_one_letter(name3: &str) -> char {
    match name3 {
        "ALA" => 'A',
        "ARG" => 'R',
        "ASN" => 'N',
        "ASP" => 'D',
        "CYS" => 'C',
        "GLN" => 'Q',
        "GLU" => 'E',
        "GLY" => 'G',
        "HIS" => 'H',
        "ILE" => 'I',
        "LEU" => 'L',
        "LYS" => 'K',
        "MET" => 'M',
        "PHE" => 'F',
        "PRO" => 'P',
        "SER" => 'S',
        "THR" => 'T',
        "TRP" => 'W',
        "TYR" => 'Y',
        "VAL" => 'V',
        "SEC" => 'U',
        "PYL" => 'O',
        _ => 'X',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn res_key_display_omits_blank_insertion_code() {
        assert_eq!(ResKey::new(5, "A", ' ').to_string(), "A-5");
        assert_eq!(ResKey::new(5, "A", 'B').to_string(), "A-5B");
    }

    #[test]
    fn res_key_equality_uses_all_three_fields() {
        let base = ResKey::new(5, "A", ' ');
        assert_eq!(base, ResKey::new(5, "A", ' '));
        assert_ne!(base, ResKey::new(6, "A", ' '));
        assert_ne!(base, ResKey::new(5, "B", ' '));
        assert_ne!(base, ResKey::new(5, "A", 'A'));
    }

    #[test]
    fn atom_kind_from_str_round_trips_names() {
        for kind in [
            AtomKind::AminoAcid,
            AtomKind::Rna,
            AtomKind::Ligand,
            AtomKind::Hydrogen,
        ] {
            assert_eq!(kind.name().parse::<AtomKind>(), Ok(kind));
        }
        assert!("Protein".parse::<AtomKind>().is_err());
    }

    #[test]
    fn amino_acid_one_letter_maps_standard_and_unknown() {
        assert_eq!(amino_acid_one_letter("ALA"), 'A');
        assert_eq!(amino_acid_one_letter("TRP"), 'W');
        assert_eq!(amino_acid_one_letter("MSE"), 'X');
    }

    #[test]
    fn arena_index_reports_position() {
        let index = AtomIndex::from_usize(42);
        assert_eq!(index.index(), 42);
        assert_eq!(index.to_string(), "AtomIndex#42");
    }
}
