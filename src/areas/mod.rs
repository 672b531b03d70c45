//! Core repository components
//!
//! This module contains the persisted state of a repository:
//!
//! - `database`: Content-addressed object database for blobs, trees, and commits
//! - `index`: Staging area mapping paths to content digests
//! - `refs`: Branch refs and HEAD
//! - `stash`: Batched log of shelved file contents
//! - `repository`: Accessor composing the areas above
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod stash;
pub mod workspace;
