//! External-identifier expansion
//!
//! The `external_ids` field maps an identifier scheme (ISNI, GRID, Wikidata,
//! FundRef, ...) to an entry holding a `preferred` identifier and `all`
//! candidates, where `all` is either one scalar or a list. Each candidate
//! becomes one row flagged with whether it is the scheme's preferred value.

use crate::config::TableConfig;
use crate::error::Result;
use crate::flatten::record_id;
use crate::tables::{Record, Table};
use serde_json::Value;

/// Record field holding the scheme mapping.
const EXTERNAL_IDS_FIELD: &str = "external_ids";

const TYPE_COLUMN: &str = "external_type";
const ID_COLUMN: &str = "external_id";
const PREFERRED_COLUMN: &str = "preferred";

/// Expand `external_ids` into one row per (record, scheme, candidate).
///
/// Schemes iterate in deterministic key order, so re-runs produce identical
/// row sets. An absent field, absent scheme entry or empty candidate list
/// contributes zero rows. The preferred flag compares candidates against the
/// scheme's declared value; a null or missing `preferred` flags nothing, so
/// each (record, scheme) group carries at most one flagged row.
pub fn expand_external_ids(records: &[Record], config: &TableConfig) -> Result<Table> {
    let columns = vec![
        config.fk_column.clone(),
        TYPE_COLUMN.to_string(),
        ID_COLUMN.to_string(),
        PREFERRED_COLUMN.to_string(),
    ];
    let mut table = Table::new(config.external_ids_table.clone(), columns);

    for (index, record) in records.iter().enumerate() {
        let id = record_id(record, index)?;

        let Some(Value::Object(schemes)) = record.get(EXTERNAL_IDS_FIELD) else {
            continue;
        };

        for (scheme, entry) in schemes {
            let preferred = entry.get("preferred").unwrap_or(&Value::Null);

            // Normalize `all` to a candidate list; a bare scalar wraps to a
            // singleton.
            let candidates: Vec<&Value> = match entry.get("all") {
                Some(Value::Array(list)) => list.iter().collect(),
                Some(Value::Null) | None => Vec::new(),
                Some(single) => vec![single],
            };

            for candidate in candidates {
                let flagged = !preferred.is_null() && candidate == preferred;
                table.push_row(vec![
                    Value::String(id.to_string()),
                    Value::String(scheme.clone()),
                    candidate.clone(),
                    Value::Bool(flagged),
                ]);
            }
        }
    }

    Ok(table)
}
