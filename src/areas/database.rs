//! Object database
//!
//! Content-addressed storage for blobs, trees and commits. Every object lives in
//! `<root>/objects/<digest>` holding exactly the bytes the digest was computed
//! over. Objects are immutable: storing an object that already exists is a no-op.
//!
//! Writes go to a temporary file in the objects directory and are renamed into
//! place, so a reader never observes a partially written object. The temporary
//! file is removed on every exit path.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const TEMP_OBJECT_PREFIX: &str = "tmp-obj-";

/// Errors callers may want to tell apart from plain I/O failures
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: ObjectId, reason: String },
}

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Read the raw bytes of an object
    ///
    /// Fails with [`DatabaseError::ObjectNotFound`] when nothing is stored under the ID.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        if !object_path.is_file() {
            return Err(DatabaseError::ObjectNotFound(object_id.clone()).into());
        }

        let content = std::fs::read(&object_path).with_context(|| {
            format!("Unable to read object file {}", object_path.display())
        })?;

        Ok(content.into())
    }

    /// Store an object and return its ID
    ///
    /// The write is skipped when an object with the same ID already exists.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::hash(&object_content);
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(&self.path).with_context(|| {
            format!("Unable to create object directory {}", self.path.display())
        })?;
        self.write_object(&object_path, &object_content)?;
        tracing::debug!(oid = %object_id, size = object_content.len(), "object stored");

        Ok(object_id)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        self.parse_object(object_id)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        self.parse_object(object_id)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        self.parse_object(object_id)
    }

    fn parse_object<T: Unpackable>(&self, object_id: &ObjectId) -> anyhow::Result<T> {
        let object_content = self.load(object_id)?;

        T::deserialize(Cursor::new(object_content)).map_err(|error| {
            DatabaseError::MalformedObject {
                oid: object_id.clone(),
                reason: format!("{:#}", error),
            }
            .into()
        })
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> anyhow::Result<()> {
        // the temp file lives next to its target so the rename stays on one filesystem;
        // dropping it on any early return deletes it
        let mut temp_file = tempfile::Builder::new()
            .prefix(TEMP_OBJECT_PREFIX)
            .tempfile_in(&self.path)
            .with_context(|| {
                format!("Unable to create temporary object in {}", self.path.display())
            })?;

        temp_file.write_all(object_content).with_context(|| {
            format!(
                "Unable to write temporary object {}",
                temp_file.path().display()
            )
        })?;

        temp_file
            .persist(object_path)
            .map_err(|error| error.error)
            .with_context(|| {
                format!("Unable to rename object file to {}", object_path.display())
            })?;

        Ok(())
    }
}
