use super::settings::Settings;
use smol_str::SmolStr;
use std::collections::HashSet;

/// Read-only lookup context shared by every parse of a run.
///
/// Built once from [`Settings`]; the name sets are normalized so per-row checks are
/// plain hash lookups.
#[derive(Debug, Clone)]
pub struct ParseContext {
    settings: Settings,
    dna_names: HashSet<SmolStr>,
    ignored_ligands: HashSet<SmolStr>,
    ignored_elements: HashSet<SmolStr>,
}

impl ParseContext {
    pub fn new(settings: Settings) -> Self {
        let mut dna_names = HashSet::new();

        macro_rules! register_dna {
            ($($name:expr),* $(,)?) => {
                $(dna_names.insert(SmolStr::new_static($name));)*
            };
        }

        register_dna!("DA", "DC", "DG", "DT", "DI");

        let ignored_ligands = settings
            .ignored_ligands
            .iter()
            .map(|l| SmolStr::new(l.trim()))
            .collect();
        let ignored_elements = settings
            .ignored_elements
            .iter()
            .map(|e| normalize_element(e))
            .collect();

        Self {
            settings,
            dna_names,
            ignored_ligands,
            ignored_elements,
        }
    }

    pub fn new_default() -> Self {
        Self::new(Settings::default())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_dna_residue(&self, name3: &str) -> bool {
        self.dna_names.contains(name3.trim())
    }

    pub fn is_ignored_ligand(&self, name3: &str) -> bool {
        self.ignored_ligands.contains(name3.trim())
    }

    pub fn is_ignored_element(&self, element: &str) -> bool {
        self.ignored_elements.contains(&normalize_element(element))
    }

    /// Whether a hydrogen atom goes to its monomer's hydrogen bucket.
    pub fn keeps_hydrogen(&self, element: &str) -> bool {
        self.settings.handle_hydrogens && normalize_element(element) == "H"
    }

    pub fn debug_enabled(&self, level: u8) -> bool {
        self.settings.debug_level >= level
    }

    pub fn parse_warnings_enabled(&self) -> bool {
        !self.settings.suppress_parse_warnings && !self.settings.silent
    }

    pub fn warnings_enabled(&self) -> bool {
        !self.settings.suppress_warnings && !self.settings.silent
    }

    pub fn progress_enabled(&self) -> bool {
        !self.settings.silent
    }

    pub fn forced_chain(&self) -> Option<&str> {
        self.settings.forced_chain.as_deref()
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new_default()
    }
}

fn normalize_element(element: &str) -> SmolStr {
    SmolStr::new(element.trim().to_ascii_uppercase())
}
