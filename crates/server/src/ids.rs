use jurisai_common::IdStrategy;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Prefix shared by every generated document id
const ID_PREFIX: &str = "doc_";

/// Sequence number of a `doc_<n>` id, if it has one
pub fn sequence_number(id: &str) -> Option<u64> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

/// Highest `doc_<n>` sequence number among `ids`, 0 when there is none
pub fn last_sequence_number<'a>(ids: impl IntoIterator<Item = &'a String>) -> u64 {
    ids.into_iter()
        .filter_map(|id| sequence_number(id))
        .max()
        .unwrap_or(0)
}

/// Document identifier generator
///
/// Sequential ids come from an atomic counter, so concurrent index
/// requests never observe the same value. The counter starts after the
/// highest stored sequence number, not the record count: a failed write
/// leaves a gap that must not be handed out again after a restart.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    issued: AtomicU64,
}

impl IdGenerator {
    /// `last_issued` is the highest sequence number already stored
    pub fn new(strategy: IdStrategy, last_issued: u64) -> Self {
        Self {
            strategy,
            issued: AtomicU64::new(last_issued),
        }
    }

    pub fn next_id(&self) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
                format!("{}{}", ID_PREFIX, n)
            }
            IdStrategy::Uuid => format!("{}{}", ID_PREFIX, Uuid::new_v4()),
        }
    }
}
