//! Revision resolver properties over generated histories

use deployctl::errors::ResolveError;
use deployctl::models::release::RevisionRecord;
use deployctl::rollback::resolver::resolve_target;

fn history(revisions: &[u32]) -> Vec<RevisionRecord> {
    revisions
        .iter()
        .map(|&revision| RevisionRecord {
            revision,
            description: format!("d{}", revision),
            updated: String::new(),
        })
        .collect()
}

/// Distinct revision sets of varying size, order and spacing
fn histories() -> Vec<Vec<u32>> {
    let mut all = Vec::new();
    for len in 0..6u32 {
        let ascending: Vec<u32> = (1..=len).collect();
        let sparse: Vec<u32> = (1..=len).map(|n| n * 3 + 1).collect();
        let mut descending = ascending.clone();
        descending.reverse();
        let mut rotated = sparse.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(1);
        }
        all.extend([ascending, sparse, descending, rotated]);
    }
    all
}

#[test]
fn test_default_target_is_second_highest() {
    for revisions in histories().into_iter().filter(|h| h.len() >= 2) {
        let mut sorted = revisions.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(
            resolve_target(&history(&revisions), None),
            Ok(sorted[1]),
            "history {:?}",
            revisions
        );
    }
}

#[test]
fn test_short_history_has_no_prior_revision() {
    for revisions in histories().into_iter().filter(|h| h.len() < 2) {
        assert_eq!(
            resolve_target(&history(&revisions), None),
            Err(ResolveError::NoPriorRevision)
        );
    }
}

#[test]
fn test_explicit_target_membership() {
    for revisions in histories() {
        let mut available = revisions.clone();
        available.sort_unstable();
        for requested in 0..20 {
            let result = resolve_target(&history(&revisions), Some(requested));
            if revisions.contains(&requested) {
                assert_eq!(result, Ok(requested));
            } else {
                assert_eq!(
                    result,
                    Err(ResolveError::UnknownRevision {
                        requested,
                        available: available.clone(),
                    })
                );
            }
        }
    }
}

#[test]
fn test_unknown_revision_message_lists_available() {
    let err = resolve_target(&history(&[1, 2]), Some(5)).unwrap_err();
    assert_eq!(err.to_string(), "Revision 5 not found. Available: [1, 2]");
}
