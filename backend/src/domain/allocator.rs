//! Sequential box identifier allocation.
//!
//! The next identifier is the numeric maximum across all existing records
//! plus one, so allocation is correct regardless of the store's iteration
//! order and identifiers are never reused after a soft delete.

use crate::domain::box_record::{BoxId, BoxRecord};

/// Compute the next identifier for a store holding `records`.
///
/// An empty store yields `BOX-000001`. Identifiers are validated when the
/// store loads, so allocation never sees a corrupt suffix and can never
/// hand out a colliding value.
///
/// # Examples
/// ```
/// use movebox_backend::domain::next_box_id;
///
/// assert_eq!(next_box_id(&[]).as_str(), "BOX-000001");
/// ```
pub fn next_box_id(records: &[BoxRecord]) -> BoxId {
    let highest = records
        .iter()
        .map(|record| record.box_id.suffix())
        .max()
        .unwrap_or(0);
    BoxId::from_suffix(highest + 1)
}
