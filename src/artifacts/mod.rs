//! Data structures and algorithms
//!
//! - `branch`: Branch names and the symbolic HEAD form
//! - `checkout`: Checkout planning and conflict detection
//! - `core`: Shared utilities (pager wrapper)
//! - `index`: Index entry line codec
//! - `objects`: Object types (blob, tree, commit)
//! - `stash`: Stash entry line codec
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod index;
pub mod objects;
pub mod stash;
pub mod status;
