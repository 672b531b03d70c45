//! Tree object
//!
//! Trees are flat snapshots: a mapping from repository-relative path to the
//! digest of that file's content.
//!
//! ## Format
//!
//! One line per entry, `<digest> <path>\n`, in path order. The ordering makes the
//! serialization canonical, so identical trees always have identical IDs. An
//! empty tree serializes to zero bytes.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::split_entry_line;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    /// Build a tree from index entries
    pub fn build<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> Self {
        let mut root = Self::default();

        for entry in entries {
            root.add_entry(entry.name.clone(), entry.oid.clone());
        }

        root
    }

    /// Insert or replace the digest recorded for a path
    pub fn add_entry(&mut self, path: String, oid: ObjectId) {
        self.entries.insert(path, oid);
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the entries; later changes to the tree are not visible through it
    pub fn entries(&self) -> BTreeMap<String, ObjectId> {
        self.entries.clone()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(path, oid)| format!("{} {}\n", oid, path))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tree = Tree::default();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            match split_entry_line(&line) {
                Ok((oid, path)) => tree.add_entry(path.to_string(), oid),
                Err(error) => tracing::warn!(%error, "skipping malformed tree line"),
            }
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("{}\t{}", oid, path))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
