use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::HashMap;

/// Returns whether a value is set, treating the mmCIF placeholders `.` and `?` and the
/// empty string as unset.
pub(crate) fn is_assigned(value: &str) -> bool {
    !matches!(value, "." | "?" | "")
}

/// Column layout of the current category: declared names in file order plus aliases
/// that resolve to an existing position.
#[derive(Debug, Clone, Default)]
pub(crate) struct ColumnSchema {
    columns: IndexMap<SmolStr, usize>,
    aliases: HashMap<SmolStr, usize>,
}

impl ColumnSchema {
    pub fn clear(&mut self) {
        self.columns.clear();
        self.aliases.clear();
    }

    pub fn push(&mut self, column: &str) {
        let position = self.columns.len();
        self.columns.entry(SmolStr::new(column)).or_insert(position);
    }

    /// Number of declared columns, which is the expected width of a row.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns
            .get(column)
            .or_else(|| self.aliases.get(column))
            .copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Makes `alias` resolve to the position of `target`.
    ///
    /// Returns `false` when `alias` already resolves or `target` is not declared.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> bool {
        if self.contains(alias) {
            return false;
        }
        match self.columns.get(target).copied() {
            Some(position) => {
                self.aliases.insert(SmolStr::new(alias), position);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }
}

/// One data row viewed through its schema.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Row<'a> {
    schema: &'a ColumnSchema,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    pub fn new(schema: &'a ColumnSchema, fields: &'a [String]) -> Self {
        Self { schema, fields }
    }

    pub fn schema(&self) -> &'a ColumnSchema {
        self.schema
    }

    pub fn field(&self, position: usize) -> Option<&'a str> {
        self.fields.get(position).map(|s| s.as_str())
    }

    /// Raw value of a column, placeholders included.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.schema.position(column).and_then(|p| self.field(p))
    }

    /// Value of a column with placeholders filtered out.
    pub fn assigned(&self, column: &str) -> Option<&'a str> {
        self.get(column).filter(|v| is_assigned(v))
    }

    /// Declared columns paired with their values, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let fields = self.fields;
        self.schema
            .columns
            .iter()
            .filter_map(move |(name, pos)| fields.get(*pos).map(|v| (name.as_str(), v.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(columns: &[&str]) -> ColumnSchema {
        let mut schema = ColumnSchema::default();
        for column in columns {
            schema.push(column);
        }
        schema
    }

    #[test]
    fn placeholders_are_unassigned() {
        assert!(!is_assigned("."));
        assert!(!is_assigned("?"));
        assert!(!is_assigned(""));
        assert!(is_assigned("A"));
    }

    #[test]
    fn positions_follow_declaration_order() {
        let schema = schema(&["id", "type", "name"]);

        assert_eq!(schema.width(), 3);
        assert_eq!(schema.position("type"), Some(1));
        assert!(schema.position("missing").is_none());
        assert_eq!(schema.names().collect::<Vec<_>>(), ["id", "type", "name"]);
    }

    #[test]
    fn aliases_resolve_without_widening_rows() {
        let mut schema = schema(&["id", "auth_asym_id"]);

        assert!(schema.add_alias("label_asym_id", "auth_asym_id"));
        assert!(!schema.add_alias("label_asym_id", "auth_asym_id"));
        assert!(!schema.add_alias("x", "missing"));
        assert_eq!(schema.position("label_asym_id"), Some(1));
        assert_eq!(schema.width(), 2);
    }

    #[test]
    fn row_filters_placeholders() {
        let schema = schema(&["id", "alt", "name"]);
        let fields = vec!["1".to_string(), ".".to_string(), "N".to_string()];
        let row = Row::new(&schema, &fields);

        assert_eq!(row.get("alt"), Some("."));
        assert!(row.assigned("alt").is_none());
        assert_eq!(row.assigned("name"), Some("N"));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn entries_skip_columns_without_values() {
        let schema = schema(&["id", "type"]);
        let fields = vec!["1".to_string()];
        let row = Row::new(&schema, &fields);

        assert_eq!(row.entries().collect::<Vec<_>>(), [("id", "1")]);
    }
}
