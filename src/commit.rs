//! Commit a confirmed merge: apply-and-remove.
//!
//! Both ids are resolved before anything is written, so a missing row
//! aborts with no partial write. The secondary row's removal is the last
//! step; see the `RecordStore` contract for how ordered backing stores
//! must translate identity-keyed deletion.

use crate::error::ReconcileError;
use crate::merge::MergeResult;
use crate::store::RecordStore;

/// Write the merge result into the primary row, then remove the
/// secondary row.
pub fn commit(
    store: &mut dyn RecordStore,
    primary_id: &str,
    secondary_id: &str,
    result: &MergeResult,
) -> Result<(), ReconcileError> {
    // Resolve both sides up front; abort untouched if either is gone.
    for id in [primary_id, secondary_id] {
        if store.get_by_identity(id).is_none() {
            return Err(ReconcileError::NotFound { id: id.to_string() });
        }
    }

    store.write_fields(primary_id, result)?;
    store.delete_by_identity(secondary_id)?;

    log::info!("merged record {} into {}", secondary_id, primary_id);
    Ok(())
}
