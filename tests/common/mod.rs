#![allow(dead_code)]

use cif_forge::io::{ParseContext, Settings, read_dssp_residues, read_mmcif_structure};
use cif_forge::{SecondaryStructure, Structure};
use std::io::Cursor;

pub const ENTRY: &str = "\
data_1TST
#
_exptl.entry_id 1TST
_exptl.method 'X-RAY DIFFRACTION'
#
_refine.entry_id 1TST
_refine.ls_d_res_high 1.80
#
_reflns.entry_id 1TST
_reflns.d_resolution_high 1.75
#
_struct.entry_id 1TST
_struct.title 'Test kinase in complex with heme'
#
_struct_keywords.entry_id 1TST
_struct_keywords.pdbx_keywords TRANSFERASE
_struct_keywords.text 'TRANSFERASE, KINASE'
#
_pdbx_database_status.entry_id 1TST
_pdbx_database_status.recvd_initial_deposition_date 2020-05-17
#
loop_
_entity.id
_entity.type
_entity.pdbx_description
_entity.pdbx_ec
1 polymer 'Test kinase' 2.7.11.1
2 polymer 'Guide RNA' ?
3 non-polymer 'PROTOPORPHYRIN IX CONTAINING FE' ?
4 water water ?
#
loop_
_entity_poly.entity_id
_entity_poly.type
_entity_poly.pdbx_strand_id
1 'polypeptide(L)' A,B
2 polyribonucleotide R
#
_entity_src_gen.entity_id 1
_entity_src_gen.gene_src_common_name human
_entity_src_gen.pdbx_gene_src_scientific_name 'Homo sapiens'
#
_pdbx_entity_src_syn.entity_id 2
_pdbx_entity_src_syn.organism_common_name synthetic
_pdbx_entity_src_syn.organism_scientific 'synthetic construct'
#
loop_
_chem_comp.id
_chem_comp.type
_chem_comp.name
_chem_comp.formula
_chem_comp.pdbx_synonyms
ALA 'L-peptide linking' ALANINE 'C3 H7 N O2' ?
GLY 'peptide linking' GLYCINE 'C2 H5 N O2' ?
A 'RNA linking' 'ADENOSINE MONOPHOSPHATE' 'C10 H14 N5 O7 P' ?
DA 'DNA linking' 'DEOXYADENOSINE MONOPHOSPHATE' 'C10 H14 N5 O6 P' ?
HEM non-polymer 'PROTOPORPHYRIN IX CONTAINING FE' 'C34 H32 Fe N4 O4' HEME
HOH non-polymer WATER 'H2 O' ?
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_alt_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_entity_id
_atom_site.label_seq_id
_atom_site.pdbx_PDB_ins_code
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.auth_seq_id
_atom_site.auth_asym_id
_atom_site.pdbx_PDB_model_num
ATOM   1 N  N  . ALA A 1 1 ? 1.000 2.000 3.000 1.00 1   A 1
ATOM   2 C  CA . ALA A 1 1 ? 1.500 2.000 3.000 1.00 1   A 1
ATOM   3 N  N  . GLY A 1 2 ? 2.000 2.000 3.000 1.00 2   A 1
ATOM   4 N  N  . ALA B 1 1 ? 5.000 2.000 3.000 1.00 1   B 1
HETATM 5 FE FE . HEM C 3 . ? 0.000 0.000 0.000 1.00 201 A 1
HETATM 6 O  O  . HOH D 4 . ? 9.000 9.000 9.000 1.00 301 A 1
ATOM   7 P  P  . A   R 2 1 ? 3.000 3.000 3.000 1.00 1   R 1
ATOM   8 P  P  . DA  R 2 2 ? 4.000 3.000 3.000 1.00 2   R 1
#
";

pub const ENTRY_DSSP: &str = "\
==== Secondary Structure Definition by the program DSSP ====
    2  2  0  0  0 TOTAL NUMBER OF RESIDUES
  #  RESIDUE AA STRUCTURE BP1 BP2  ACC
    1    1 A A  H              0   0   10
    2    1 B A  E              0   0   12
";

pub fn entry_secondary() -> SecondaryStructure {
    read_dssp_residues(Cursor::new(ENTRY_DSSP)).unwrap()
}

pub fn parse(content: &str, settings: Settings) -> Structure {
    read_mmcif_structure(
        Cursor::new(content),
        &entry_secondary(),
        &ParseContext::new(settings),
    )
    .unwrap()
}

pub fn parse_entry(settings: Settings) -> Structure {
    parse(ENTRY, settings)
}
