//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `status`: Show working tree status
//! - `log`: Show commit history
//! - `branch`: Create or list branches
//! - `checkout`: Switch branches
//! - `stash`: Shelve and restore uncommitted changes

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod stash;
pub mod status;
