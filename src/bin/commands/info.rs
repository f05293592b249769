use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use is_terminal::IsTerminal;
use prettytable::{Table, format, row};

use cif_forge::io::{ParseContext, read_dssp_file, read_dssp_residues, read_mmcif_file};
use cif_forge::{SecondaryStructure, Structure};

use crate::commands::{print_boxed_label, run_with_spinner};

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// mmCIF file to parse.
    #[arg(long, value_name = "FILE")]
    pub cif: PathBuf,
    /// DSSP file for the entry. When omitted, the residue table is read from stdin.
    #[arg(long, value_name = "FILE")]
    pub dssp: Option<PathBuf>,
}

pub fn run(args: &InfoArgs, context: &ParseContext) -> Result<()> {
    let secondary = load_secondary(args)?;
    let structure = run_with_spinner("Parsing structure", || {
        read_mmcif_file(&args.cif, &secondary, context)
            .with_context(|| format!("Failed to parse mmCIF input from {}", args.cif.display()))
    })?;

    print_tables(&structure)
}

fn load_secondary(args: &InfoArgs) -> Result<SecondaryStructure> {
    match &args.dssp {
        Some(path) => read_dssp_file(path)
            .with_context(|| format!("Failed to read DSSP residues from {}", path.display())),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("No --dssp provided and stdin is a TTY. Provide --dssp or pipe a DSSP file into ciforge.");
            }
            read_dssp_residues(BufReader::new(stdin.lock()))
                .context("Failed to read DSSP residues from stdin")
        }
    }
}

fn print_tables(structure: &Structure) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, &format!("Entry {}", structure.pdb_id))?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Chains")?;
    let mut chain_table = Table::new();
    chain_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    chain_table.set_titles(row![
        "Chain", "Label", "Model", "Type", "Amino Acids", "Nucleotides", "Ligands", "Atoms"
    ]);
    for model in structure.models() {
        for &index in model.chains() {
            let chain = structure.chain(index);
            let counts = structure.chain_monomer_counts(index);
            chain_table.add_row(row![
                chain.id,
                chain.alt_id,
                model.id,
                chain.molecule_type,
                counts.amino_acids,
                counts.nucleotides,
                counts.ligands,
                structure.chain_atom_count(index)
            ]);
        }
    }
    chain_table
        .print(&mut stderr)
        .context("Failed to render chain table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Metadata")?;
    let mut meta_table = Table::new();
    meta_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    meta_table.set_titles(row!["Key", "Value"]);
    for (key, value) in structure.metadata.entries() {
        meta_table.add_row(row![key, value]);
    }
    meta_table
        .print(&mut stderr)
        .context("Failed to render metadata table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Parse Statistics")?;
    let stats = &structure.stats;
    let mut stats_table = Table::new();
    stats_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    stats_table.set_titles(row!["Metric", "Value"]);
    stats_table.add_row(row!["Lines", stats.lines]);
    stats_table.add_row(row!["Atom rows", stats.atom_rows]);
    stats_table.add_row(row!["Atoms kept", structure.atom_count()]);
    stats_table.add_row(row!["Hydrogens kept", structure.hydrogen_count()]);
    stats_table.add_row(row!["Rows of further models", stats.skipped_model_rows]);
    stats_table.add_row(row!["DNA atoms skipped", stats.dna_atoms_skipped]);
    stats_table.add_row(row!["RNA atoms skipped", stats.rna_atoms_skipped]);
    stats_table.add_row(row!["Ignored-element atoms", stats.ignored_element_atoms]);
    stats_table.add_row(row!["Ignored monomers", stats.ignored_monomers]);
    stats_table.add_row(row!["Synthetic amino acids", stats.synthetic_amino_acids]);
    stats_table.add_row(row!["Alt-loc atoms removed", stats.altloc_atoms_removed]);
    stats_table.add_row(row!["Placeholder residue numbers", stats.placeholder_seq_ids]);
    stats_table.add_row(row!["Models seen", structure.all_model_ids().join(", ")]);
    if structure.metadata.is_nmr() {
        stats_table.add_row(row!["Models kept", "first only (NMR)"]);
    }
    stats_table
        .print(&mut stderr)
        .context("Failed to render statistics table")?;

    Ok(())
}
