//! Molecular graph produced by the mmCIF reader.
//!
//! A [`structure::Structure`] owns flat arenas of models, chains, monomers and atoms that
//! reference each other through typed index handles, together with the descriptive
//! metadata and parse counters collected along the way.

pub mod atom;
pub mod chain;
pub mod metadata;
pub mod monomer;
pub mod secondary;
pub mod structure;
pub mod types;
