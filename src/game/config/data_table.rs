//! Data tables
//!
//! A table is a JSON object mapping row names to rows:
//!
//! ```json
//! {
//!   "WoodenCrate": { "retrigger_cooldown": 0.25, "...": "..." },
//!   "MetalBarrel": { "retrigger_cooldown": 0.4, "...": "..." }
//! }
//! ```
//!
//! Every row is validated when the table is loaded; one malformed row
//! rejects the whole table.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::error::{ConfigError, ConfigResult};

/// Load-time checks for a table row.
pub trait ValidateRow {
    /// Check the row's invariants. `row` is the row name, for error messages.
    fn validate(&self, row: &str) -> ConfigResult<()>;
}

/// Named rows of one type.
#[derive(Debug, Clone)]
pub struct DataTable<Row> {
    rows: HashMap<String, Row>,
}

impl<Row> Default for DataTable<Row> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<Row: ValidateRow> DataTable<Row> {
    /// Build a table from rows, validating each.
    pub fn from_rows(rows: impl IntoIterator<Item = (String, Row)>) -> ConfigResult<Self> {
        let rows: HashMap<String, Row> = rows.into_iter().collect();
        for (name, row) in &rows {
            row.validate(name)?;
        }
        Ok(Self { rows })
    }

    /// Insert or replace a row after validating it.
    pub fn insert(&mut self, name: impl Into<String>, row: Row) -> ConfigResult<()> {
        let name = name.into();
        row.validate(&name)?;
        self.rows.insert(name, row);
        Ok(())
    }
}

impl<Row: ValidateRow + DeserializeOwned> DataTable<Row> {
    /// Parse and validate a table from JSON text.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let rows: HashMap<String, Row> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// Read, parse and validate a table file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&json)?;
        info!(path = %path.display(), rows = table.len(), "loaded audio table");
        Ok(table)
    }
}

impl<Row> DataTable<Row> {
    /// Look up a row by name.
    pub fn find_row(&self, name: &str) -> Option<&Row> {
        self.rows.get(name)
    }

    /// Look up a row, logging and returning [`ConfigError::MissingRow`] if absent.
    pub fn require_row(&self, name: &str) -> ConfigResult<&Row> {
        self.find_row(name).ok_or_else(|| {
            warn!(row = name, "audio table row not found");
            ConfigError::MissingRow(name.to_string())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    /// Row names, sorted.
    pub fn row_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        value: f32,
    }

    impl ValidateRow for Row {
        fn validate(&self, row: &str) -> ConfigResult<()> {
            if self.value < 0.0 {
                return Err(ConfigError::Negative {
                    row: row.to_string(),
                    field: "value".to_string(),
                    value: self.value,
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_and_lookup() {
        let table: DataTable<Row> =
            DataTable::from_json_str(r#"{ "b": { "value": 2.0 }, "a": { "value": 1.0 } }"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row_names(), vec!["a", "b"]);
        assert_eq!(table.find_row("b").map(|r| r.value), Some(2.0));
        assert!(table.find_row("c").is_none());
    }

    #[test]
    fn test_missing_row_error() {
        let table: DataTable<Row> = DataTable::default();
        let err = table.require_row("ghost").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRow(ref name) if name == "ghost"));
    }

    #[test]
    fn test_invalid_row_rejects_table() {
        let result: ConfigResult<DataTable<Row>> =
            DataTable::from_json_str(r#"{ "ok": { "value": 1.0 }, "bad": { "value": -1.0 } }"#);
        assert!(matches!(result, Err(ConfigError::Negative { ref row, .. }) if row == "bad"));
    }

    #[test]
    fn test_malformed_json() {
        let result: ConfigResult<DataTable<Row>> = DataTable::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result: ConfigResult<DataTable<Row>> = DataTable::load("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
