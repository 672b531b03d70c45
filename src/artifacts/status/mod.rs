//! Working tree status inspection
//!
//! Compares the working directory against the index, and the index against the
//! tree of the HEAD commit.
//!
//! ## Components
//!
//! - `file_change`: Enum types for categorizing changes
//! - `inspector`: Digest comparisons for single files and whole index snapshots
//! - `status_info`: Status information aggregation

pub mod file_change;
pub mod inspector;
pub mod status_info;
