//! # ror2db - ROR data dump to SQLite converter
//!
//! A batch conversion library (plus the `ror2db` binary): read one JSON
//! snapshot of the Research Organization Registry, flatten its nested
//! records into a GRID-style relational layout, write the tables to a
//! SQLite database.
//!
//! ## Modules
//!
//! - **flatten**: project and expand records into in-memory tables
//! - **config**: the table layout driving projection and expansion
//! - **input**: load and validate the dump file
//! - **db**: persist tables to SQLite and report row counts
//!
//! ## Quick Start
//!
//! ```rust
//! use ror2db::{convert, TableConfig};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let record = json!({
//!     "id": "https://ror.org/03yrm5c26",
//!     "name": "California Institute of Technology",
//!     "acronyms": ["CIT"],
//!     "external_ids": {
//!         "ISNI": {"preferred": null, "all": ["0000 0001 0706 8890"]}
//!     }
//! });
//! let records = vec![record.as_object().cloned().unwrap()];
//!
//! let tables = convert(&records, &TableConfig::default())?;
//!
//! let acronyms = tables.iter().find(|t| t.name == "acronyms").unwrap();
//! assert_eq!(acronyms.rows[0][0], json!("CIT"));
//! # Ok(())
//! # }
//! ```

use log::info;

pub mod config;
pub mod db;
pub mod error;
pub mod flatten;
pub mod input;
pub mod tables;

// Re-export commonly used types for convenience
pub use config::TableConfig;
pub use error::{ConvertError, Result};
pub use tables::{Record, Table};

/// Build every output table for one snapshot.
///
/// Simple tables come first, then the list tables, then `external_ids`,
/// which is also the order they are written to the database. The record
/// collection is read-only; each expander works independently.
pub fn convert(records: &[Record], config: &TableConfig) -> Result<Vec<Table>> {
    let mut tables = Vec::with_capacity(config.simple.len() + config.lists.len() + 1);

    for spec in &config.simple {
        let table = flatten::project_simple(records, spec)?;
        info!("Table {} created with {} rows", table.name, table.len());
        tables.push(table);
    }

    for spec in &config.lists {
        let table = flatten::expand_list(records, spec, &config.fk_column)?;
        info!("Table {} created with {} rows", table.name, table.len());
        tables.push(table);
    }

    let table = flatten::expand_external_ids(records, config)?;
    info!("Table {} created with {} rows", table.name, table.len());
    tables.push(table);

    Ok(tables)
}
