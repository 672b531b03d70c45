//! Object types and operations
//!
//! All content is stored as objects identified by the SHA-1 digest of their bytes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Flat snapshot of path -> digest pairs
//! - **Commit**: Tree reference plus parent, author, timestamp and message
//!
//! Objects carry no type header on disk; the caller knows what it asked for.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
