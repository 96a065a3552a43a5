//! SQLite writer and row-count reporter
//!
//! Each table is written independently: drop any previous version, create
//! the new one with inferred column affinities, insert all rows in one
//! transaction. Tables not produced by the current run are left untouched,
//! so re-running against an existing database only replaces its own tables.

use crate::error::Result;
use crate::tables::Table;
use log::{debug, info};
use rusqlite::types::Value as SqlValue;
use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Derived database name: the input path with its extension replaced,
/// `v1.1-2022-06-16-ror-data.json` -> `v1.1-2022-06-16-ror-data.db`.
pub fn database_path(input: &Path) -> PathBuf {
    input.with_extension("db")
}

/// Open (or create) the output database.
pub fn open(path: &Path) -> Result<Connection> {
    Ok(Connection::open(path)?)
}

/// Persist every table, replacing same-named tables already present.
pub fn write_tables(conn: &mut Connection, tables: &[Table]) -> Result<()> {
    for table in tables {
        write_table(conn, table)?;
    }
    Ok(())
}

fn write_table(conn: &mut Connection, table: &Table) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS {}", quote(&table.name)), [])?;
    tx.execute(&create_table_sql(table), [])?;

    if !table.rows.is_empty() {
        let placeholders = vec!["?"; table.columns.len()].join(", ");
        let insert = format!(
            "INSERT INTO {} VALUES ({placeholders})",
            quote(&table.name)
        );
        let mut stmt = tx.prepare(&insert)?;
        for row in &table.rows {
            stmt.execute(rusqlite::params_from_iter(row.iter().map(bind_value)))?;
        }
    }

    tx.commit()?;
    debug!("table {} written with {} rows", table.name, table.len());
    Ok(())
}

fn create_table_sql(table: &Table) -> String {
    let columns: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} {}", quote(column), column_affinity(&table.rows, i)))
        .collect();
    format!("CREATE TABLE {} ({})", quote(&table.name), columns.join(", "))
}

/// Column affinity from the observed values: INTEGER for integers and
/// booleans, REAL once a float appears, TEXT for anything else (including
/// all-NULL columns).
fn column_affinity(rows: &[Vec<Value>], column: usize) -> &'static str {
    let mut saw_integer = false;
    let mut saw_real = false;

    for row in rows {
        match &row[column] {
            Value::Null => {}
            Value::Bool(_) => saw_integer = true,
            Value::Number(n) => {
                if n.is_f64() {
                    saw_real = true;
                } else {
                    saw_integer = true;
                }
            }
            _ => return "TEXT",
        }
    }

    if saw_real {
        "REAL"
    } else if saw_integer {
        "INTEGER"
    } else {
        "TEXT"
    }
}

/// Booleans store as 0/1; a residual array or object stores as its JSON
/// text so the insert is total.
fn bind_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                SqlValue::Real(f)
            } else {
                SqlValue::Text(n.to_string())
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Column names contain dots (`geonames_city.id`), so every identifier is
/// double-quoted.
fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Row counts for every table in the database, not just the ones written
/// this run.
pub fn table_counts(conn: &Connection) -> Result<Vec<(String, i64)>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut counts = Vec::with_capacity(names.len());
    for name in names {
        let count: i64 =
            conn.query_row(&format!("SELECT count(*) FROM {}", quote(&name)), [], |row| {
                row.get(0)
            })?;
        counts.push((name, count));
    }
    Ok(counts)
}

/// Log one `<table>: <n> rows` line per table, a diagnostic rather than a
/// correctness check.
pub fn report_counts(conn: &Connection) -> Result<()> {
    for (name, count) in table_counts(conn)? {
        info!("{name}: {count} rows");
    }
    Ok(())
}
