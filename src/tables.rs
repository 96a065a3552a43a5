use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One organization record as parsed from the dump, keyed by field name.
///
/// Records are validated at load time: every record is an object carrying a
/// string `id`, the primary key all derived rows reference.
pub type Record = Map<String, Value>;

/// A named output table - a fixed column list plus rows of JSON scalars.
///
/// Rows are positionally aligned to `columns`; missing fields are
/// `Value::Null` and become SQL NULL when written.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    /// Table name in the output database
    pub name: String,

    /// Column names, fixed for the whole run
    pub columns: Vec<String>,

    /// Row values, one entry per column
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Append a row; the caller aligns values to `columns`.
    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }
}

/// Builds a table whose column list is inferred from the data.
///
/// Used for list tables whose elements are nested mappings (addresses,
/// relationships, labels): the column list is the union of flattened keys
/// across all elements, in first-seen order, computed in one pass. The
/// parent id travels alongside each element and lands in the foreign-key
/// column, which is always appended last.
#[derive(Debug)]
pub struct TableBuilder {
    name: String,
    columns: Vec<String>,
    seen: HashSet<String>,
    rows: Vec<(Map<String, Value>, String)>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        TableBuilder {
            name: name.into(),
            columns: Vec::new(),
            seen: HashSet::new(),
            rows: Vec::new(),
        }
    }

    /// Add one flattened element together with its parent record id.
    pub fn push(&mut self, element: Map<String, Value>, parent_id: &str) {
        for key in element.keys() {
            if self.seen.insert(key.clone()) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push((element, parent_id.to_string()));
    }

    /// Materialize the table, filling gaps with NULL.
    pub fn finish(self, fk_column: &str) -> Table {
        let mut columns = self.columns;
        columns.push(fk_column.to_string());

        let value_columns = columns.len() - 1;
        let mut table = Table::new(self.name, columns);

        for (mut element, parent_id) in self.rows {
            let mut row = Vec::with_capacity(value_columns + 1);
            for column in &table.columns[..value_columns] {
                row.push(element.remove(column).unwrap_or(Value::Null));
            }
            row.push(Value::String(parent_id));
            table.rows.push(row);
        }

        table
    }
}
