//! Command implementations
//!
//! Commands are implemented as methods on `Repository`, in two groups:
//!
//! - `plumbing`: Low-level commands for direct object access (hash-object, cat-file)
//! - `porcelain`: User-facing commands (init, add, commit, status, log, branch, checkout, stash)
//!
//! Every command writes its user-facing output to the repository writer. Problems
//! the user can fix (a missing branch, a dirty working tree) are reported there
//! and the command still returns `Ok`.

pub mod plumbing;
pub mod porcelain;
