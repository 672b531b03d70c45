//! Stash log data structures
//!
//! The stash log is an ordered list of file snapshots grouped into batches, one
//! batch per stash push. The newest batch sits at the front of the log and the
//! last entry of every batch carries the batch-end marker.

pub mod stash_entry;

/// Suffix written after the path of the last entry of a batch
pub const BATCH_END_MARKER: &str = " END";
