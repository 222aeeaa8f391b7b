use std::collections::HashMap;

use crate::domain::RecordKind;

/// Sequence bookkeeping for refreshes.
///
/// Every request gets a fresh sequence number. Only a response carrying the
/// latest number issued for its kind is accepted, so a slow stale response
/// can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct FetchTracker {
    next_seq: u64,
    latest: HashMap<RecordKind, u64>,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a sequence number for a new fetch of `kind`.
    pub fn request(&mut self, kind: RecordKind) -> u64 {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        self.next_seq
    }

    /// True if `seq` is the latest request for `kind`. Accepting settles it,
    /// so a repeated response with the same number is rejected.
    pub fn accept(&mut self, kind: RecordKind, seq: u64) -> bool {
        if self.latest.get(&kind) != Some(&seq) {
            return false;
        }
        self.latest.remove(&kind);
        true
    }
}
