//! Table layout configuration
//!
//! The converter is driven entirely by a [`TableConfig`] passed into each
//! component: which simple tables to project, which list fields to expand
//! and under what column names, and where the external identifiers go.
//! Column names are final at emission time, so the output needs no post-hoc
//! renaming. The stock ROR v1 layout (mirroring the GRID table structure
//! from Digital Science) is available as the [`ROR_V1`] static.

use once_cell::sync::Lazy;

/// Field every record must carry; its value becomes the foreign key of all
/// derived rows.
pub const ID_FIELD: &str = "id";

/// One projected column of a simple table.
#[derive(Debug, Clone)]
pub struct FieldProjection {
    /// Source field; a dotted path reaches into nested objects
    pub path: String,

    /// Column name in the output table
    pub column: String,
}

impl FieldProjection {
    pub fn new(path: impl Into<String>, column: impl Into<String>) -> Self {
        FieldProjection {
            path: path.into(),
            column: column.into(),
        }
    }
}

/// A table projected directly from record fields, one row per record.
#[derive(Debug, Clone)]
pub struct SimpleSpec {
    pub table: String,
    pub fields: Vec<FieldProjection>,
}

/// A table expanded from a list-valued field, one row per list element.
#[derive(Debug, Clone)]
pub struct ListSpec {
    /// Record field holding the list
    pub field: String,

    /// Output table name
    pub table: String,

    /// Column name for scalar elements (`acronyms` -> `acronym`). Mapping
    /// elements ignore this and flatten into dotted column names.
    pub value_column: Option<String>,
}

impl ListSpec {
    fn scalar(field: &str, value_column: &str) -> Self {
        ListSpec {
            field: field.to_string(),
            table: field.to_string(),
            value_column: Some(value_column.to_string()),
        }
    }

    fn mapping(field: &str) -> Self {
        ListSpec {
            field: field.to_string(),
            table: field.to_string(),
            value_column: None,
        }
    }
}

/// Full output layout for one conversion run.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub simple: Vec<SimpleSpec>,
    pub lists: Vec<ListSpec>,

    /// Table receiving the expanded `external_ids` field
    pub external_ids_table: String,

    /// Foreign-key column carried by every non-primary table
    pub fk_column: String,
}

impl TableConfig {
    /// The ROR v1 dump layout.
    pub fn ror_v1() -> Self {
        let simple = vec![
            SimpleSpec {
                table: "ror".to_string(),
                fields: vec![
                    FieldProjection::new("id", "ror_id"),
                    FieldProjection::new("name", "name"),
                ],
            },
            SimpleSpec {
                table: "institutes".to_string(),
                fields: vec![
                    FieldProjection::new("id", "ror_id"),
                    FieldProjection::new("name", "name"),
                    FieldProjection::new("wikipedia_url", "wikipedia_url"),
                    FieldProjection::new("established", "established"),
                ],
            },
            SimpleSpec {
                table: "email_address".to_string(),
                fields: vec![
                    FieldProjection::new("id", "ror_id"),
                    FieldProjection::new("email_address", "email_address"),
                ],
            },
        ];

        let lists = vec![
            ListSpec::scalar("acronyms", "acronym"),
            ListSpec::scalar("aliases", "alias"),
            ListSpec::scalar("links", "link"),
            ListSpec::scalar("types", "type"),
            ListSpec::mapping("labels"),
            ListSpec::mapping("relationships"),
            ListSpec::mapping("addresses"),
        ];

        TableConfig {
            simple,
            lists,
            external_ids_table: "external_ids".to_string(),
            fk_column: "ror_id".to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::ror_v1()
    }
}

/// Stock ROR v1 layout, shared by the binary and the doc examples.
pub static ROR_V1: Lazy<TableConfig> = Lazy::new(TableConfig::ror_v1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ror_v1_layout() {
        let config = TableConfig::ror_v1();

        let simple: Vec<&str> = config.simple.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(simple, vec!["ror", "institutes", "email_address"]);

        let lists: Vec<&str> = config.lists.iter().map(|s| s.table.as_str()).collect();
        assert_eq!(
            lists,
            vec!["acronyms", "aliases", "links", "types", "labels", "relationships", "addresses"]
        );

        assert_eq!(config.fk_column, "ror_id");
        assert_eq!(config.external_ids_table, "external_ids");
    }

    #[test]
    fn test_scalar_lists_have_semantic_column_names() {
        let config = TableConfig::ror_v1();
        let acronyms = config.lists.iter().find(|s| s.field == "acronyms").unwrap();
        assert_eq!(acronyms.value_column.as_deref(), Some("acronym"));

        let addresses = config.lists.iter().find(|s| s.field == "addresses").unwrap();
        assert!(addresses.value_column.is_none());
    }
}
