//! Simple-table projection
//!
//! Some output tables are just a column slice of the record collection:
//! `ror`, `institutes` and `email_address` each take a fixed list of fields
//! from every record, in record order, with NULL for whatever is missing.

use crate::config::SimpleSpec;
use crate::error::Result;
use crate::flatten::record_id;
use crate::tables::{Record, Table};
use serde_json::Value;

/// Project one simple table out of the record collection.
///
/// One row per record, no deduplication, no filtering. The `id` path is
/// projected like any other field; specs name its column `ror_id` directly
/// so the output matches the GRID-style schema without a rename pass.
pub fn project_simple(records: &[Record], spec: &SimpleSpec) -> Result<Table> {
    let columns = spec.fields.iter().map(|f| f.column.clone()).collect();
    let mut table = Table::new(spec.table.clone(), columns);

    for (index, record) in records.iter().enumerate() {
        record_id(record, index)?;
        let row = spec
            .fields
            .iter()
            .map(|field| lookup_path(record, &field.path))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Resolve a dotted field path against a record; any missing or non-object
/// segment yields NULL.
fn lookup_path(record: &Record, path: &str) -> Value {
    let mut segments = path.split('.');
    let Some(mut value) = segments.next().and_then(|segment| record.get(segment)) else {
        return Value::Null;
    };

    for segment in segments {
        match value.get(segment) {
            Some(nested) => value = nested,
            None => return Value::Null,
        }
    }

    value.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldProjection, TableConfig};
    use serde_json::json;

    fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn ror_spec() -> SimpleSpec {
        TableConfig::ror_v1().simple.remove(0)
    }

    #[test]
    fn test_projects_one_row_per_record_in_order() {
        let records = records(vec![
            json!({"id": "https://ror.org/01", "name": "Foo University"}),
            json!({"id": "https://ror.org/02", "name": "Bar Institute"}),
        ]);

        let table = project_simple(&records, &ror_spec()).unwrap();

        assert_eq!(table.name, "ror");
        assert_eq!(table.columns, vec!["ror_id", "name"]);
        assert_eq!(table.rows[0], vec![json!("https://ror.org/01"), json!("Foo University")]);
        assert_eq!(table.rows[1], vec![json!("https://ror.org/02"), json!("Bar Institute")]);
    }

    #[test]
    fn test_missing_field_becomes_null() {
        let records = records(vec![json!({"id": "https://ror.org/01"})]);

        let table = project_simple(&records, &ror_spec()).unwrap();

        assert_eq!(table.rows[0][1], Value::Null);
    }

    #[test]
    fn test_dotted_path_reaches_into_nested_object() {
        let spec = SimpleSpec {
            table: "countries".to_string(),
            fields: vec![
                FieldProjection::new("id", "ror_id"),
                FieldProjection::new("country.country_code", "country_code"),
            ],
        };
        let records = records(vec![
            json!({"id": "https://ror.org/01", "country": {"country_code": "US", "country_name": "United States"}}),
            json!({"id": "https://ror.org/02", "country": null}),
        ]);

        let table = project_simple(&records, &spec).unwrap();

        assert_eq!(table.rows[0][1], json!("US"));
        assert_eq!(table.rows[1][1], Value::Null);
    }

    #[test]
    fn test_record_without_id_is_fatal() {
        let records = records(vec![json!({"name": "No Id"})]);
        assert!(project_simple(&records, &ror_spec()).is_err());
    }
}
