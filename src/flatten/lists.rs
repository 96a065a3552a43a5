//! List expansion
//!
//! Turns a list-valued record field into a lookup table, one row per list
//! element. Scalar elements (acronyms, aliases, links, types) land in the
//! configured semantic column; mapping elements (labels, relationships,
//! addresses) flatten into dotted column names until only scalar leaves
//! remain. Rows are grouped by record order and keep their list order.

use crate::config::ListSpec;
use crate::error::Result;
use crate::flatten::record_id;
use crate::tables::{Record, Table, TableBuilder};
use serde_json::{Map, Value};

/// Fallback column for scalar elements when the spec names none.
const VALUE_COLUMN: &str = "value";

/// Expand one list-valued field into a table.
///
/// A record without the field, or with an empty list, contributes zero
/// rows. The table always materializes, with its foreign-key column last,
/// even when no record carried the field at all.
pub fn expand_list(records: &[Record], spec: &ListSpec, fk_column: &str) -> Result<Table> {
    let value_column = spec.value_column.as_deref().unwrap_or(VALUE_COLUMN);
    let mut builder = TableBuilder::new(spec.table.clone());

    for (index, record) in records.iter().enumerate() {
        let id = record_id(record, index)?;

        let Some(Value::Array(elements)) = record.get(&spec.field) else {
            continue;
        };

        for element in elements {
            let mut row = Map::new();
            match element {
                Value::Object(fields) => flatten_into(fields, None, &mut row),
                scalar => {
                    row.insert(value_column.to_string(), scalar.clone());
                }
            }
            builder.push(row, id);
        }
    }

    Ok(builder.finish(fk_column))
}

/// Flatten a nested mapping into dotted keys (`parent.child`), recursively.
/// Non-mapping leaves are kept verbatim; the writer serializes any residual
/// array to JSON text.
fn flatten_into(fields: &Map<String, Value>, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (key, value) in fields {
        let column = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(nested, Some(&column), out),
            leaf => {
                out.insert(column, leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use serde_json::json;

    fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn spec(field: &str) -> ListSpec {
        TableConfig::ror_v1()
            .lists
            .into_iter()
            .find(|s| s.field == field)
            .unwrap()
    }

    #[test]
    fn test_scalar_elements_use_semantic_column() {
        let records = records(vec![
            json!({"id": "https://ror.org/01", "acronyms": ["FOO", "FU"]}),
            json!({"id": "https://ror.org/02", "acronyms": ["BAR"]}),
        ]);

        let table = expand_list(&records, &spec("acronyms"), "ror_id").unwrap();

        assert_eq!(table.name, "acronyms");
        assert_eq!(table.columns, vec!["acronym", "ror_id"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0], vec![json!("FOO"), json!("https://ror.org/01")]);
        assert_eq!(table.rows[1], vec![json!("FU"), json!("https://ror.org/01")]);
        assert_eq!(table.rows[2], vec![json!("BAR"), json!("https://ror.org/02")]);
    }

    #[test]
    fn test_absent_or_empty_field_contributes_zero_rows() {
        let records = records(vec![
            json!({"id": "https://ror.org/01"}),
            json!({"id": "https://ror.org/02", "acronyms": []}),
            json!({"id": "https://ror.org/03", "acronyms": ["BAZ"]}),
        ]);

        let table = expand_list(&records, &spec("acronyms"), "ror_id").unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec![json!("BAZ"), json!("https://ror.org/03")]);
    }

    #[test]
    fn test_no_rows_still_materializes_table_with_fk_column() {
        let records = records(vec![json!({"id": "https://ror.org/01"})]);

        let table = expand_list(&records, &spec("aliases"), "ror_id").unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["ror_id"]);
    }

    #[test]
    fn test_mapping_elements_flatten_to_dotted_columns() {
        let records = records(vec![json!({
            "id": "https://ror.org/01",
            "addresses": [{
                "city": "Pasadena",
                "lat": 34.1377,
                "geonames_city": {
                    "id": 5381396,
                    "geonames_admin1": {"name": "California", "code": "US.CA"}
                }
            }]
        })]);

        let table = expand_list(&records, &spec("addresses"), "ror_id").unwrap();

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        let get = |column: &str| &row[table.column_index(column).unwrap()];

        assert_eq!(get("city"), &json!("Pasadena"));
        assert_eq!(get("lat"), &json!(34.1377));
        assert_eq!(get("geonames_city.id"), &json!(5381396));
        assert_eq!(get("geonames_city.geonames_admin1.name"), &json!("California"));
        assert_eq!(get("ror_id"), &json!("https://ror.org/01"));
    }

    #[test]
    fn test_column_union_fills_missing_keys_with_null() {
        let records = records(vec![
            json!({"id": "https://ror.org/01", "labels": [{"label": "Foo", "iso639": "en"}]}),
            json!({"id": "https://ror.org/02", "labels": [{"label": "Bar"}]}),
        ]);

        let table = expand_list(&records, &spec("labels"), "ror_id").unwrap();

        let iso = table.column_index("iso639").unwrap();
        assert_eq!(table.rows[0][iso], json!("en"));
        assert_eq!(table.rows[1][iso], Value::Null);
    }

    #[test]
    fn test_relationship_elements_keep_their_own_id_column() {
        let records = records(vec![json!({
            "id": "https://ror.org/01",
            "relationships": [
                {"type": "Parent", "label": "Umbrella Org", "id": "https://ror.org/09"},
                {"type": "Child", "label": "Sub Org", "id": "https://ror.org/10"}
            ]
        })]);

        let table = expand_list(&records, &spec("relationships"), "ror_id").unwrap();

        let id = table.column_index("id").unwrap();
        let fk = table.column_index("ror_id").unwrap();
        assert_ne!(id, fk);
        assert_eq!(table.rows[0][id], json!("https://ror.org/09"));
        assert_eq!(table.rows[0][fk], json!("https://ror.org/01"));
        assert_eq!(table.rows[1][id], json!("https://ror.org/10"));
    }

    #[test]
    fn test_row_count_matches_summed_list_lengths() {
        let records = records(vec![
            json!({"id": "https://ror.org/01", "links": ["http://foo.edu", "http://foo.org"]}),
            json!({"id": "https://ror.org/02"}),
            json!({"id": "https://ror.org/03", "links": ["http://baz.edu"]}),
        ]);

        let table = expand_list(&records, &spec("links"), "ror_id").unwrap();
        assert_eq!(table.rows.len(), 3);
    }
}
