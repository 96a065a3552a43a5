//! Record flattening - normalize nested ROR records into relational tables
//!
//! Three expanders read the same immutable record collection and produce
//! disjoint tables:
//!
//! - [`project_simple`] projects fixed field lists into one row per record
//! - [`expand_list`] emits one row per element of a list-valued field
//! - [`expand_external_ids`] unrolls the `external_ids` mapping into one row
//!   per (scheme, candidate identifier) pair with a preferred flag
//!
//! Every emitted row carries the owning record's `id` in the configured
//! foreign-key column; the parent id is passed explicitly alongside each
//! element, never rejoined by position.

pub mod external_ids;
pub mod lists;
pub mod simple;

pub use external_ids::expand_external_ids;
pub use lists::expand_list;
pub use simple::project_simple;

use crate::config::ID_FIELD;
use crate::error::{ConvertError, Result};
use crate::tables::Record;
use serde_json::Value;

/// Primary key of a record; load-time validation makes this infallible in
/// practice, but a record smuggled in without an id still aborts the run.
pub(crate) fn record_id(record: &Record, index: usize) -> Result<&str> {
    match record.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id),
        _ => Err(ConvertError::MissingId { index }),
    }
}
