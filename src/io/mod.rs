mod batch;
mod context;
mod dssp;
mod error;
mod mmcif;
mod settings;

pub use mmcif::reader::{read as read_mmcif_structure, read_file as read_mmcif_file};

pub use dssp::reader::{read as read_dssp_residues, read_file as read_dssp_file};

pub use batch::{ParseJob, read_mmcif_batch};

pub use context::ParseContext;
pub use settings::Settings;

pub use error::Error;
