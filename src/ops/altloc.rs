//! Alternate-location resolution.
//!
//! Crystallographic disorder is recorded as several atoms with the same name inside one
//! monomer, each carrying a different alternate-location code. The resolver keeps one
//! conformer per such set and drops the others from both the monomer and the
//! structure-wide atom list.

use crate::model::structure::Structure;
use crate::model::types::AtomIndex;
use indexmap::IndexMap;
use serde::Deserialize;
use smol_str::SmolStr;
use std::collections::HashSet;

/// Rule that picks the surviving conformer of a disordered atom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AltLocPolicy {
    /// Keep the conformer whose atom record appears first.
    #[default]
    FirstEncountered,
    /// Keep the conformer with the highest occupancy; ties go to the first record.
    HighestOccupancy,
}

/// Outcome of one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AltLocReport {
    pub monomers_affected: usize,
    pub atoms_removed: usize,
}

/// Removes every non-surviving alternate conformer from `structure`.
///
/// Within a monomer, atoms sharing a name form a set when at least two distinct
/// alternate-location codes occur among them (a missing code counts as its own code).
/// Every atom of the set whose code differs from the survivor's is removed.
///
/// # Arguments
///
/// * `structure` - Structure to prune in place.
/// * `policy` - Rule choosing the survivor of each set.
///
/// # Returns
///
/// Counts of monomers that lost atoms and of atoms removed from the global list.
pub fn resolve_alternate_locations(structure: &mut Structure, policy: AltLocPolicy) -> AltLocReport {
    let mut removed = HashSet::new();
    let mut report = AltLocReport::default();

    for monomer in structure.monomers() {
        let mut by_name: IndexMap<&str, Vec<AtomIndex>> = IndexMap::new();
        for &index in monomer.atoms() {
            by_name
                .entry(structure.atom(index).name.as_str())
                .or_default()
                .push(index);
        }

        let before = removed.len();
        for group in by_name.values().filter(|g| g.len() > 1) {
            let codes: HashSet<Option<&SmolStr>> = group
                .iter()
                .map(|a| structure.atom(*a).alt_loc.as_ref())
                .collect();
            if codes.len() < 2 {
                continue;
            }
            let survivor = select_survivor(structure, group, policy);
            let keep = structure.atom(survivor).alt_loc.as_ref();
            removed.extend(
                group
                    .iter()
                    .copied()
                    .filter(|a| structure.atom(*a).alt_loc.as_ref() != keep),
            );
        }
        if removed.len() > before {
            report.monomers_affected += 1;
        }
    }

    report.atoms_removed = structure.remove_atoms(&removed);
    report
}

fn select_survivor(structure: &Structure, group: &[AtomIndex], policy: AltLocPolicy) -> AtomIndex {
    let first = group[0];
    match policy {
        AltLocPolicy::FirstEncountered => first,
        AltLocPolicy::HighestOccupancy => {
            let occupancy = |a: AtomIndex| structure.atom(a).occupancy.unwrap_or(0.0);
            group.iter().copied().fold(first, |best, candidate| {
                if occupancy(candidate) > occupancy(best) {
                    candidate
                } else {
                    best
                }
            })
        }
    }
}
