mod common;

use cif_forge::io::{
    Error, ParseContext, ParseJob, Settings, read_dssp_file, read_mmcif_batch, read_mmcif_file,
};
use cif_forge::ops::AltLocPolicy;
use common::{ENTRY, ENTRY_DSSP};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn reads_entry_and_dssp_from_disk() {
    let dir = tempdir().unwrap();
    let cif = write(dir.path(), "1tst.cif", ENTRY);
    let dssp = write(dir.path(), "1tst.dssp", ENTRY_DSSP);

    let secondary = read_dssp_file(&dssp).unwrap();
    assert_eq!(secondary.len(), 2);
    assert_eq!(secondary.last_used_ordinal(), 2);

    let structure = read_mmcif_file(&cif, &secondary, &ParseContext::new_default()).unwrap();
    assert_eq!(structure.pdb_id, "1tst");
    assert_eq!(structure.atom_count(), 5);
}

#[test]
fn file_errors_carry_the_path() {
    let dir = tempdir().unwrap();
    let broken = ENTRY.replace("1.500 2.000 3.000", "1.500 oops 3.000");
    let cif = write(dir.path(), "broken.cif", &broken);
    let secondary = read_dssp_file(write(dir.path(), "broken.dssp", ENTRY_DSSP)).unwrap();

    let err = read_mmcif_file(&cif, &secondary, &ParseContext::new_default()).unwrap_err();
    match err {
        Error::Parse { path, details, .. } => {
            assert_eq!(path.as_deref(), Some(cif.as_path()));
            assert!(details.contains("oops"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_dssp_file_is_rejected_by_the_reader() {
    let dir = tempdir().unwrap();
    let cif = write(dir.path(), "1tst.cif", ENTRY);
    let secondary = read_dssp_file(write(dir.path(), "empty.dssp", "")).unwrap();

    let err = read_mmcif_file(&cif, &secondary, &ParseContext::new_default()).unwrap_err();
    assert!(matches!(err, Error::EmptyResidueSource { path: Some(_) }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = read_dssp_file(dir.path().join("absent.dssp")).unwrap_err();
    assert!(matches!(err, Error::Io { path: Some(_), .. }));
}

#[test]
fn settings_load_from_toml_file() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "ciforge.toml",
        "include_rna = true\nforced_chain = \"A\"\naltloc_policy = \"highest-occupancy\"\nignored_ligands = [\"HOH\", \"HEM\"]\n",
    );

    let settings = Settings::from_path(&path).unwrap();
    assert!(settings.include_rna);
    assert_eq!(settings.forced_chain.as_deref(), Some("A"));
    assert_eq!(settings.altloc_policy, AltLocPolicy::HighestOccupancy);
    assert_eq!(settings.ignored_ligands, ["HOH", "HEM"]);
    assert!(settings.round_coordinates);
}

#[test]
fn unknown_settings_key_names_the_file() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "bad.toml", "include_dna = true\n");

    let err = Settings::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Config { path: Some(_), .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn batch_reports_each_job_separately() {
    let dir = tempdir().unwrap();
    let jobs = vec![
        ParseJob::new(
            write(dir.path(), "1tst.cif", ENTRY),
            write(dir.path(), "1tst.dssp", ENTRY_DSSP),
        ),
        ParseJob::new(dir.path().join("missing.cif"), dir.path().join("1tst.dssp")),
        ParseJob::new(
            write(dir.path(), "copy.cif", ENTRY),
            dir.path().join("1tst.dssp"),
        ),
    ];

    let results = read_mmcif_batch(&jobs, &ParseContext::new_default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().atom_count(), 5);
    assert!(matches!(results[1], Err(Error::Io { .. })));
    assert_eq!(results[2].as_ref().unwrap().pdb_id, "1tst");
}
