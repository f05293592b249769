use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use prettytable::{Table, format, row};

use cif_forge::io::{ParseContext, ParseJob, read_mmcif_batch};

use crate::commands::{print_boxed_label, run_with_spinner};

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Directory holding `<stem>.dssp` for every mmCIF file.
    #[arg(long, value_name = "DIR")]
    pub dssp_dir: PathBuf,
    /// mmCIF files to parse.
    #[arg(value_name = "CIF", required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: &BatchArgs, context: &ParseContext) -> Result<()> {
    let jobs = args
        .files
        .iter()
        .map(|cif| job_for(cif, &args.dssp_dir))
        .collect::<Result<Vec<_>>>()?;

    let results = run_with_spinner(&format!("Parsing {} entries", jobs.len()), || {
        Ok(read_mmcif_batch(&jobs, context))
    })?;

    let mut stderr = io::stderr().lock();
    print_boxed_label(&mut stderr, "Batch Summary")?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["File", "Entry", "Chains", "Monomers", "Atoms", "Status"]);

    let mut failures = 0;
    for (job, result) in jobs.iter().zip(&results) {
        let file = job.cif.display().to_string();
        match result {
            Ok(structure) => {
                table.add_row(row![
                    file,
                    structure.pdb_id,
                    structure.chain_count(),
                    structure.monomer_count(),
                    structure.atom_count(),
                    "ok"
                ]);
            }
            Err(err) => {
                failures += 1;
                table.add_row(row![file, "-", "-", "-", "-", err.to_string()]);
            }
        }
    }
    table
        .print(&mut stderr)
        .context("Failed to render batch summary")?;
    writeln!(&mut stderr)?;

    if failures > 0 {
        bail!("{failures} of {} entries failed to parse", jobs.len());
    }
    Ok(())
}

fn job_for(cif: &Path, dssp_dir: &Path) -> Result<ParseJob> {
    let Some(stem) = cif.file_stem() else {
        bail!("Cannot derive an entry name from '{}'", cif.display());
    };
    let dssp = dssp_dir.join(format!("{}.dssp", stem.to_string_lossy()));
    Ok(ParseJob::new(cif, dssp))
}
