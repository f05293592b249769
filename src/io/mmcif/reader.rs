use super::builder::GraphBuilder;
use super::categories::{Category, CategoryTables};
use super::schema::{ColumnSchema, Row};
use super::tokenizer::tokenize;
use crate::io::context::ParseContext;
use crate::io::error::Error;
use crate::model::metadata::exceeds_legacy_limits;
use crate::model::secondary::SecondaryStructure;
use crate::model::structure::Structure;
use crate::ops::resolve_alternate_locations;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Classification of one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    DataBlock(&'a str),
    Comment,
    LoopStart,
    TextDelimiter,
    Column {
        category: &'a str,
        column: &'a str,
        value: Option<&'a str>,
    },
    MalformedColumn,
    Blank,
    Values,
}

fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(name) = line.strip_prefix("data_") {
        LineKind::DataBlock(name.trim())
    } else if line.starts_with("loop_") {
        LineKind::LoopStart
    } else if line.starts_with('#') {
        LineKind::Comment
    } else if line.starts_with(';') {
        LineKind::TextDelimiter
    } else if line.starts_with('_') {
        let (head, rest) = match line.find(char::is_whitespace) {
            Some(split) => line.split_at(split),
            None => (line, ""),
        };
        match head.split_once('.') {
            Some((category, column)) if !column.is_empty() => {
                let rest = rest.trim();
                LineKind::Column {
                    category,
                    column,
                    value: (!rest.is_empty()).then_some(rest),
                }
            }
            _ => LineKind::MalformedColumn,
        }
    } else if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Values
    }
}

/// Strips one pair of surrounding delimiters (`;`, `'`, `"`) and embedded newlines.
fn strip_delimiters(raw: &str) -> String {
    let raw = raw.trim();
    let is_delimiter = |c: char| matches!(c, ';' | '\'' | '"');
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if is_delimiter(first) && is_delimiter(last) => {
            raw[first.len_utf8()..raw.len() - last.len_utf8()].replace('\n', "")
        }
        _ => raw.to_string(),
    }
}

/// Block and loop state of the reader between two physical lines.
#[derive(Debug, Default)]
struct BlockState {
    data_block_seen: bool,
    in_loop: bool,
    in_text_field: bool,
    category: Option<String>,
    schema: ColumnSchema,
    /// Record being assembled across physical lines.
    pending: String,
    /// Values of a single-row category, one per declared column.
    single_values: Vec<String>,
    awaiting_value: bool,
}

impl BlockState {
    fn close_loop(&mut self) {
        self.in_loop = false;
        self.in_text_field = false;
        self.category = None;
        self.schema.clear();
        self.pending.clear();
        self.single_values.clear();
        self.awaiting_value = false;
    }

    fn enter_category(&mut self, category: &str) -> bool {
        if self.category.as_deref() == Some(category) {
            return false;
        }
        self.category = Some(category.to_string());
        self.schema.clear();
        self.single_values.clear();
        self.awaiting_value = false;
        true
    }

    fn open_text_field(&mut self, line: &str) {
        if !self.pending.is_empty() {
            self.pending.push(' ');
        }
        self.pending.push_str(line);
        self.in_text_field = true;
    }

    fn close_text_field(&mut self) {
        self.pending.push_str("\n;");
        self.in_text_field = false;
    }

    fn active_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_name)
    }
}

struct CifReader<'c> {
    context: &'c ParseContext,
    path: Option<PathBuf>,
    state: BlockState,
    tables: CategoryTables,
    builder: GraphBuilder<'c>,
}

impl<'c> CifReader<'c> {
    fn new(secondary: &'c SecondaryStructure, context: &'c ParseContext, path: Option<PathBuf>) -> Self {
        Self {
            context,
            builder: GraphBuilder::new(secondary, context, path.clone()),
            path,
            state: BlockState::default(),
            tables: CategoryTables::default(),
        }
    }

    fn run<R: BufRead>(mut self, reader: R) -> Result<Structure, Error> {
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| Error::from_io(e, self.path.clone()))?;
            let line = line.trim_end_matches('\r');
            self.builder.count_line();

            if self.state.in_text_field && !line.starts_with([';', '#']) {
                self.state.pending.push_str(line);
                continue;
            }
            if !self.handle_line(line, line_number)? {
                break;
            }
        }

        if self.state.in_text_field {
            log::warn!("Unterminated ';' text field at end of input");
        } else if self.state.in_loop && !self.state.pending.is_empty() {
            log::warn!("Incomplete row at end of input was dropped");
        }

        Ok(self.finish())
    }

    /// Processes one physical line; returns `false` when parsing must stop.
    fn handle_line(&mut self, line: &str, line_number: usize) -> Result<bool, Error> {
        match classify_line(line) {
            LineKind::DataBlock(name) => {
                if self.state.data_block_seen {
                    log::warn!("Further data block '{name}' at line {line_number}, stopping");
                    return Ok(false);
                }
                self.state.data_block_seen = true;
                self.builder.set_pdb_id(name);
                if self.context.progress_enabled() {
                    log::info!("Parsing data block '{name}'");
                }
            }
            LineKind::LoopStart => {
                if self.state.in_loop {
                    return Err(Error::nested_loop(self.path.clone(), line_number));
                }
                self.state.in_loop = true;
            }
            LineKind::Comment => {
                self.state.close_loop();
                self.builder.reset_columns();
            }
            LineKind::TextDelimiter => {
                if self.state.in_text_field {
                    self.state.close_text_field();
                    self.handle_values("", line_number)?;
                } else {
                    self.state.open_text_field(line);
                }
            }
            LineKind::Column {
                category,
                column,
                value,
            } => self.handle_column(category, column, value, line_number)?,
            LineKind::MalformedColumn => {
                if self.context.parse_warnings_enabled() {
                    log::warn!("Expected '_category.column' at line {line_number}, skipping");
                }
            }
            LineKind::Blank => {}
            LineKind::Values => self.handle_values(line, line_number)?,
        }
        Ok(true)
    }

    fn handle_column(
        &mut self,
        category: &str,
        column: &str,
        value: Option<&str>,
        line_number: usize,
    ) -> Result<(), Error> {
        if self.state.enter_category(category) {
            self.builder.reset_columns();
            if Category::from_name(category).is_none()
                && self.context.warnings_enabled()
                && self.context.debug_enabled(1)
            {
                log::debug!("No handler for category {category}, ignoring it");
            }
        }

        if self.state.in_loop {
            self.state.schema.push(column);
            return Ok(());
        }

        if self.state.awaiting_value {
            self.state.single_values.push(String::new());
            self.state.awaiting_value = false;
        }
        self.state.schema.push(column);
        match value {
            Some(value) => {
                self.state.single_values.push(strip_delimiters(value));
                self.dispatch_single(line_number)
            }
            None => {
                self.state.awaiting_value = true;
                Ok(())
            }
        }
    }

    fn handle_values(&mut self, line: &str, line_number: usize) -> Result<(), Error> {
        if !self.state.in_loop {
            return self.fill_single_value(line, line_number);
        }

        let record = if self.state.pending.is_empty() {
            line.to_string()
        } else {
            let mut record = std::mem::take(&mut self.state.pending);
            record.push(' ');
            record.push_str(line);
            record
        };
        let tokens = tokenize(&record);
        if tokens.unterminated && self.context.parse_warnings_enabled() {
            log::warn!("Unterminated quoted value at line {line_number}, keeping partial field");
        }

        let width = self.state.schema.width();
        if tokens.fields.len() < width {
            self.state.pending = record;
            return Ok(());
        }
        if tokens.fields.len() > width && self.context.parse_warnings_enabled() {
            log::warn!(
                "Row at line {line_number} has {} fields, expected {width}; ignoring the surplus",
                tokens.fields.len()
            );
        }

        let Some(category) = self.state.active_category() else {
            return Ok(());
        };
        let row = Row::new(&self.state.schema, &tokens.fields);
        self.tables
            .dispatch(&mut self.builder, category, &row, true, line_number)
    }

    fn fill_single_value(&mut self, line: &str, line_number: usize) -> Result<(), Error> {
        if !self.state.awaiting_value {
            if self.context.debug_enabled(2) {
                log::debug!("Stray value outside any category at line {line_number}");
            }
            self.state.pending.clear();
            return Ok(());
        }

        let raw = if self.state.pending.is_empty() {
            line.to_string()
        } else {
            std::mem::take(&mut self.state.pending)
        };
        let value = strip_delimiters(&raw);
        if value.is_empty() && raw.trim().is_empty() {
            return Ok(());
        }
        self.state.single_values.push(value);
        self.state.awaiting_value = false;
        self.dispatch_single(line_number)
    }

    fn dispatch_single(&mut self, line_number: usize) -> Result<(), Error> {
        let Some(category) = self.state.active_category() else {
            return Ok(());
        };
        let row = Row::new(&self.state.schema, &self.state.single_values);
        self.tables
            .dispatch(&mut self.builder, category, &row, false, line_number)
    }

    fn finish(self) -> Structure {
        let tables = self.tables;
        let mut structure = self.builder.into_structure();
        if self.context.debug_enabled(1) {
            log::debug!("Read {} chemical components", tables.components.len());
        }

        let report = resolve_alternate_locations(&mut structure, self.context.settings().altloc_policy);
        structure.stats.altloc_monomers = report.monomers_affected;
        structure.stats.altloc_atoms_removed = report.atoms_removed;
        if report.atoms_removed > 0 && self.context.progress_enabled() {
            log::info!(
                "Removed {} alternate-location atoms from {} monomers",
                report.atoms_removed,
                report.monomers_affected
            );
        }

        for meta in structure.chain_metadata_mut() {
            if let Some(entity) = tables.entities.get(&meta.macromolecule_id) {
                meta.molecule_name = entity.attribute("pdbx_description").to_string();
                meta.ec_number = entity.attribute("pdbx_ec").to_string();
            }
            meta.organism_common = tables.metadata.organism_common().to_string();
            meta.organism_scientific = tables.metadata.organism_scientific().to_string();
            if let Some(others) = tables.polymers.homologues(&meta.chain_id) {
                meta.all_molecule_chains = others
                    .iter()
                    .chain(std::iter::once(&meta.chain_id))
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
            }
        }

        let is_large = exceeds_legacy_limits(structure.chain_count(), structure.stats.atom_rows);
        structure.metadata = tables.metadata.build(is_large);
        structure.set_homologues(tables.polymers.homologue_map().clone());
        structure
    }
}

/// Parses an mmCIF stream into a [`Structure`], taking amino-acid ordinals and secondary
/// structure codes from the given DSSP residue list.
///
/// Only the first data block is read. Alternate locations are resolved before returning.
///
/// # Arguments
///
/// * `reader` - Buffered mmCIF text.
/// * `secondary` - DSSP residues of the same entry; must not be empty.
/// * `context` - Settings and lookup tables for this run.
///
/// # Returns
///
/// The populated structure with its metadata, chain metadata and parse statistics.
///
/// # Errors
///
/// Returns an error for an empty residue list, unreadable input, nested loops,
/// `_atom_site` data outside a loop, missing required `_atom_site` columns, and
/// non-numeric values in numeric atom columns.
pub fn read<R: BufRead>(
    reader: R,
    secondary: &SecondaryStructure,
    context: &ParseContext,
) -> Result<Structure, Error> {
    read_from_source(reader, secondary, context, None)
}

/// Parses an mmCIF file; the path is attached to every error.
///
/// # Arguments
///
/// * `path` - Location of the mmCIF file.
/// * `secondary` - DSSP residues of the same entry.
/// * `context` - Settings and lookup tables for this run.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be opened, and every error of [`read`].
pub fn read_file<P: AsRef<Path>>(
    path: P,
    secondary: &SecondaryStructure,
    context: &ParseContext,
) -> Result<Structure, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read_from_source(BufReader::new(file), secondary, context, Some(path.to_path_buf()))
}

fn read_from_source<R: BufRead>(
    reader: R,
    secondary: &SecondaryStructure,
    context: &ParseContext,
    path: Option<PathBuf>,
) -> Result<Structure, Error> {
    if secondary.is_empty() {
        return Err(Error::empty_residue_source(path));
    }
    CifReader::new(secondary, context, path).run(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::settings::Settings;
    use crate::model::secondary::DsspResidue;
    use crate::model::types::{AtomKind, MoleculeClass, ResKey};
    use smol_str::SmolStr;
    use std::io::Cursor;

    fn dssp(residues: &[(i32, i32, &str)]) -> SecondaryStructure {
        SecondaryStructure::from_residues(
            residues
                .iter()
                .map(|(dssp_num, pdb_num, chain)| DsspResidue {
                    dssp_num: *dssp_num,
                    pdb_num: *pdb_num,
                    chain_id: SmolStr::new(*chain),
                    insertion_code: ' ',
                    amino_acid: 'A',
                    sse: 'H',
                })
                .collect(),
        )
    }

    fn parse(content: &str, secondary: &SecondaryStructure) -> Result<Structure, Error> {
        read(Cursor::new(content), secondary, &ParseContext::new_default())
    }

    fn parse_with(content: &str, secondary: &SecondaryStructure, settings: Settings) -> Structure {
        read(Cursor::new(content), secondary, &ParseContext::new(settings)).unwrap()
    }

    const MINIMAL_ATOMS: &str = "\
data_TEST
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 C CA ALA A 1.234 5.678 9.012
#
";

    #[test]
    fn classify_line_recognizes_every_kind() {
        assert_eq!(classify_line("data_1ABC"), LineKind::DataBlock("1ABC"));
        assert_eq!(classify_line("loop_"), LineKind::LoopStart);
        assert_eq!(classify_line("# comment"), LineKind::Comment);
        assert_eq!(classify_line(";text"), LineKind::TextDelimiter);
        assert_eq!(
            classify_line("_exptl.method   'X-RAY DIFFRACTION'"),
            LineKind::Column {
                category: "_exptl",
                column: "method",
                value: Some("'X-RAY DIFFRACTION'"),
            }
        );
        assert_eq!(
            classify_line("_atom_site.id"),
            LineKind::Column {
                category: "_atom_site",
                column: "id",
                value: None,
            }
        );
        assert_eq!(classify_line("_broken"), LineKind::MalformedColumn);
        assert_eq!(classify_line("   "), LineKind::Blank);
        assert_eq!(classify_line("1 C CA"), LineKind::Values);
    }

    #[test]
    fn strip_delimiters_removes_one_pair_only() {
        assert_eq!(strip_delimiters("'X-RAY DIFFRACTION'"), "X-RAY DIFFRACTION");
        assert_eq!(strip_delimiters("\"a 'b'\""), "a 'b'");
        assert_eq!(strip_delimiters(";Line one\n;"), "Line one");
        assert_eq!(strip_delimiters("plain"), "plain");
        assert_eq!(strip_delimiters("'"), "'");
    }

    #[test]
    fn minimal_atom_site_builds_one_padded_atom() {
        let structure = parse(MINIMAL_ATOMS, &dssp(&[(1, 10, "A")])).unwrap();

        assert_eq!(structure.pdb_id, "test");
        assert_eq!(structure.atom_count(), 1);
        let atom = structure.iter_atoms().next().unwrap();
        assert_eq!(atom.name, " CA ");
        assert_eq!(atom.element, "C");
        assert_eq!((atom.pos.x, atom.pos.y, atom.pos.z), (12, 57, 90));
        assert_eq!(structure.monomer(atom.monomer).name3, "ALA");
        assert_eq!(structure.model_count(), 1);
        assert_eq!(structure.models()[0].id, "1");
    }

    #[test]
    fn truncation_mode_truncates_coordinates() {
        let settings = Settings {
            round_coordinates: false,
            ..Settings::default()
        };
        let structure = parse_with(MINIMAL_ATOMS, &dssp(&[(1, 10, "A")]), settings);

        let atom = structure.iter_atoms().next().unwrap();
        assert_eq!((atom.pos.x, atom.pos.y, atom.pos.z), (12, 56, 90));
    }

    #[test]
    fn empty_residue_list_is_fatal() {
        let err = parse(MINIMAL_ATOMS, &SecondaryStructure::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyResidueSource { path: None }));
    }

    #[test]
    fn nested_loop_is_fatal() {
        let content = "data_X\nloop_\n_a.b\nloop_\n";
        let err = parse(content, &dssp(&[(1, 1, "A")])).unwrap_err();
        assert!(matches!(err, Error::NestedLoop { line_number: 4, .. }));
    }

    #[test]
    fn atom_site_outside_loop_is_fatal() {
        let content = "data_X\n_atom_site.id 1\n";
        let err = parse(content, &dssp(&[(1, 1, "A")])).unwrap_err();
        assert!(matches!(err, Error::AtomSiteOutsideLoop { line_number: 2, .. }));
    }

    #[test]
    fn missing_atom_site_columns_are_fatal() {
        let content = "data_X\nloop_\n_atom_site.id\n_atom_site.type_symbol\n1 C\n";
        let err = parse(content, &dssp(&[(1, 1, "A")])).unwrap_err();
        assert!(matches!(err, Error::MissingColumns { category: "_atom_site", .. }));
    }

    #[test]
    fn non_numeric_coordinate_is_a_parse_error() {
        let content = MINIMAL_ATOMS.replace("1.234", "abc");
        let err = parse(&content, &dssp(&[(1, 1, "A")])).unwrap_err();
        assert!(matches!(err, Error::Parse { line_number: 11, .. }));
    }

    #[test]
    fn single_row_values_are_unquoted() {
        let content = "\
data_X
_exptl.entry_id 1ABC
_exptl.method 'SOLUTION NMR'
#
_struct.entry_id 1ABC
_struct.title
;Crystal structure of
 a test protein
;
#
_struct_keywords.pdbx_keywords HYDROLASE
_struct_keywords.text \"HYDROLASE, TEST\"
#
_pdbx_database_status.recvd_initial_deposition_date 2001-02-03
#
";
        let structure = parse(content, &dssp(&[(1, 1, "A")])).unwrap();

        assert_eq!(structure.metadata.experiment, "SOLUTION NMR");
        assert_eq!(structure.metadata.title, "Crystal structure of a test protein");
        assert_eq!(structure.metadata.header, "HYDROLASE");
        assert_eq!(structure.metadata.keywords, "HYDROLASE, TEST");
        assert_eq!(structure.metadata.date, "2001-02-03");
        assert!(structure.metadata.resolution.is_empty());
    }

    #[test]
    fn single_row_value_on_next_line_is_used() {
        let content = "data_X\n_struct.title\n'A title on its own line'\n#\n";
        let structure = parse(content, &dssp(&[(1, 1, "A")])).unwrap();
        assert_eq!(structure.metadata.title, "A title on its own line");
    }

    #[test]
    fn comment_line_discards_open_text_field() {
        let content = "\
data_X
_struct.title
;first part
# not a comment
second
;
;
_struct_keywords.pdbx_keywords HYDROLASE
#
";
        let structure = parse(content, &dssp(&[(1, 1, "A")])).unwrap();

        assert!(structure.metadata.title.is_empty());
        assert_eq!(structure.metadata.header, "HYDROLASE");
    }

    #[test]
    fn wrapped_loop_rows_are_reassembled() {
        let content = "\
data_X
loop_
_entity.id
_entity.type
_entity.pdbx_description
_entity.pdbx_ec
1 polymer
;PROTEIN
KINASE
;
2.7.11.1
2 water water ?
#
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_entity_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 N N ALA A 1 1 0.0 0.0 0.0
#
";
        let structure = parse(content, &dssp(&[(1, 1, "A")])).unwrap();
        let meta = &structure.chain_metadata()[0];

        assert_eq!(meta.molecule_name, "PROTEINKINASE");
        assert_eq!(meta.ec_number, "2.7.11.1");
        assert_eq!(meta.macromolecule_id, "1");
    }

    #[test]
    fn second_data_block_stops_parsing() {
        let content = format!("{MINIMAL_ATOMS}data_OTHER\n_struct.title 'ignored'\n");
        let structure = parse(&content, &dssp(&[(1, 10, "A")])).unwrap();

        assert_eq!(structure.pdb_id, "test");
        assert_eq!(structure.atom_count(), 1);
        assert!(structure.metadata.title.is_empty());
    }

    #[test]
    fn consecutive_rows_share_a_monomer() {
        let content = "\
data_X
_chem_comp.id ALA
_chem_comp.type 'L-peptide linking'
#
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 N N ALA A 5 0.0 0.0 0.0
2 C CA ALA A 5 1.0 0.0 0.0
#
";
        let structure = parse(content, &dssp(&[(1, 5, "A")])).unwrap();
        let monomer = structure.find_monomer(&ResKey::new(5, "A", ' ')).unwrap();

        assert_eq!(structure.monomer(monomer).atom_count(), 2);
        assert_eq!(structure.monomer(monomer).class(), MoleculeClass::AminoAcid);
        assert_eq!(structure.monomer(monomer).dssp_num, 1);
        assert_eq!(structure.monomer_count(), 1);
    }

    #[test]
    fn listed_residue_is_created_once_when_revisited() {
        let content = "\
data_X
loop_
_chem_comp.id
_chem_comp.type
ALA 'L-peptide linking'
HEM non-polymer
#
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 FE FE HEM A 5 0.0 0.0 0.0
2 N N ALA A 6 1.0 0.0 0.0
3 N N ALA A 5 2.0 0.0 0.0
4 N N ALA A 7 3.0 0.0 0.0
5 C CA ALA A 5 4.0 0.0 0.0
#
";
        let structure = parse(content, &dssp(&[(1, 5, "A")])).unwrap();

        assert_eq!(structure.monomer_count(), 4);
        let listed: Vec<_> = structure.monomers().iter().filter(|m| !m.synthetic).collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].dssp_num, 1);
        assert_eq!(listed[0].atom_count(), 2);
        assert!(structure.monomers().iter().all(|m| m.chain.is_some()));
    }

    #[test]
    fn column_substitution_is_noted_once_per_run() {
        let header = "\
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
";
        let content = format!(
            "data_X\n_chem_comp.id ALA\n_chem_comp.type 'L-peptide linking'\n#\n\
             {header}1 N N ALA A 1 0.0 0.0 0.0\n2 C CA ALA A 1 1.0 0.0 0.0\n#\n\
             {header}3 N N ALA A 2 2.0 0.0 0.0\n4 C CA ALA A 2 3.0 0.0 0.0\n#\n"
        );
        let structure = parse(&content, &dssp(&[(1, 1, "A")])).unwrap();

        assert_eq!(structure.stats.atom_rows, 4);
        assert_eq!(structure.stats.column_substitution_notices, 1);
        assert_eq!(structure.atom_count(), 4);
        let second = structure.find_monomer(&ResKey::new(2, "A", ' ')).unwrap();
        assert!(structure.monomer(second).synthetic);
        assert_eq!(structure.chain_count(), 1);
    }

    #[test]
    fn placeholder_residue_numbers_fall_back_to_one() {
        let content = "\
data_X
_chem_comp.id HEM
_chem_comp.type non-polymer
#
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 FE FE HEM A . 0.0 0.0 0.0
2 N NA HEM A . 1.0 0.0 0.0
#
";
        let structure = parse(content, &dssp(&[(1, 50, "A")])).unwrap();

        assert_eq!(structure.stats.placeholder_seq_ids, 2);
        let heme = structure.find_monomer(&ResKey::new(1, "A", ' ')).unwrap();
        assert_eq!(structure.monomer(heme).class(), MoleculeClass::Ligand);
        assert_eq!(structure.monomer(heme).atom_count(), 2);
        assert_eq!(structure.iter_atoms().next().unwrap().pdb_res_num, 1);
    }

    #[test]
    fn hydrogens_go_to_bucket_when_requested() {
        let content = "\
data_X
loop_
_chem_comp.id
_chem_comp.type
ALA 'L-peptide linking'
#
loop_
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
1 N N ALA A 5 0.0 0.0 0.0
2 H H ALA A 5 1.0 0.0 0.0
#
";
        let secondary = dssp(&[(1, 5, "A")]);
        let dropped = parse(content, &secondary).unwrap();
        assert_eq!(dropped.atom_count(), 1);
        assert_eq!(dropped.hydrogen_count(), 0);
        assert_eq!(dropped.stats.ignored_element_atoms, 1);

        let kept = parse_with(
            content,
            &secondary,
            Settings {
                handle_hydrogens: true,
                ..Settings::default()
            },
        );
        assert_eq!(kept.atom_count(), 1);
        assert_eq!(kept.hydrogen_count(), 1);
        let monomer = kept.find_monomer(&ResKey::new(5, "A", ' ')).unwrap();
        let hydrogen = kept.atom(kept.monomer(monomer).hydrogens()[0]);
        assert_eq!(hydrogen.kind, AtomKind::Hydrogen);
        assert!(hydrogen.dssp_res_num.is_none());
    }
}
