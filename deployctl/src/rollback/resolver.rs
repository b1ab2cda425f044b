//! Rollback target resolution

use std::collections::BTreeSet;

use crate::errors::ResolveError;
use crate::models::release::RevisionRecord;

/// Pick the revision to roll back to.
///
/// Without an explicit target this is the second most recent revision in
/// `history`, which is not necessarily `current - 1` when revisions were
/// pruned. An explicit target only has to exist in `history`; it may be newer
/// than the current revision.
pub fn resolve_target(
    history: &[RevisionRecord],
    explicit: Option<u32>,
) -> Result<u32, ResolveError> {
    let mut revisions = BTreeSet::new();
    for record in history {
        if !revisions.insert(record.revision) {
            return Err(ResolveError::DuplicateRevision(record.revision));
        }
    }

    match explicit {
        Some(requested) if revisions.contains(&requested) => Ok(requested),
        Some(requested) => Err(ResolveError::UnknownRevision {
            requested,
            available: revisions.into_iter().collect(),
        }),
        None => revisions
            .into_iter()
            .rev()
            .nth(1)
            .ok_or(ResolveError::NoPriorRevision),
    }
}
