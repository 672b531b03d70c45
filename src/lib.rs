//! A minimal version-control engine
//!
//! Content-addressed object storage, a staging index, a linear commit history on
//! named branches, checkout between branches and a stash for uncommitted edits.
//! All state lives in a `.stow` directory inside the working directory.

pub mod areas;
pub mod artifacts;
pub mod commands;
