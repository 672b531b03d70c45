//! Checkout operations and conflict handling
//!
//! Switching branches reconciles the working directory with the target commit's
//! tree:
//! - Every file of the target tree is written
//! - Files tracked before the switch but absent from the target tree are deleted
//! - Files that were never tracked are left alone
//!
//! The whole change set and every conflict are computed before anything on disk
//! is touched, so a refused checkout leaves the working directory, index and HEAD
//! exactly as they were.

pub mod conflict;
pub mod migration;
