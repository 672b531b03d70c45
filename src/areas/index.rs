//! Index (staging area)
//!
//! The index tracks which content should be included in the next commit as a
//! mapping from repository-relative path to content digest. It is working state,
//! not history, so it lives outside the object database.
//!
//! ## Index File Format
//!
//! One line per entry, `<digest> <path>`. Entries are written in path order,
//! though readers accept any order. A missing file is an empty index and
//! malformed lines are skipped.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

/// Staging area
///
/// Loaded from disk when constructed. Mutations stay in memory until
/// [`Index::write_updates`] persists them.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file
    path: Box<Path>,
    /// Tracked files mapped by path
    entries: BTreeMap<String, IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    /// Open the index stored at `path`, loading whatever was last saved there
    pub fn new(path: Box<Path>) -> anyhow::Result<Self> {
        let mut index = Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        };
        index.rehydrate()?;

        Ok(index)
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk, discarding in-memory changes
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&self.path)
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut()
            .read_to_string(&mut content)
            .with_context(|| format!("failed to read index file at {:?}", self.path))?;

        for line in content.lines().filter(|line| !line.is_empty()) {
            match IndexEntry::parse_line(line) {
                Ok(entry) => {
                    self.entries.insert(entry.name.clone(), entry);
                }
                Err(error) => tracing::warn!(%error, "skipping malformed index line"),
            }
        }

        Ok(())
    }

    /// Stage `oid` as the content of `path`, replacing any earlier entry
    ///
    /// Entries that can no longer coexist with the new path are dropped: a file
    /// staged where a parent directory of the path was tracked as a file, or a file
    /// replacing a tracked directory.
    pub fn add(&mut self, path: String, oid: ObjectId) {
        let entry = IndexEntry::new(path, oid);
        self.discard_conflicts(&entry);
        self.entries.insert(entry.name.clone(), entry);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &str) {
        if self.entries.remove(path).is_some() {
            self.changed = true;
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path).map(|entry| &entry.oid)
    }

    /// Empty the in-memory index; call [`Index::write_updates`] to persist
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Snapshot of path -> digest; later changes to the index are not visible through it
    pub fn entries(&self) -> BTreeMap<String, ObjectId> {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.oid.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Replace the whole content of the index
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = (String, ObjectId)>) {
        self.clear();
        for (path, oid) in entries {
            self.entries
                .insert(path.clone(), IndexEntry::new(path, oid));
        }
        self.changed = true;
    }

    /// Persist all entries, overwriting the index file
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create parent directories for index at {:?}", self.path)
            })?;
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open index file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let content = self
            .entries
            .values()
            .map(|entry| format!("{}\n", entry.to_line()))
            .collect::<String>();
        lock.deref_mut()
            .write_all(content.as_bytes())
            .with_context(|| format!("failed to write index file at {:?}", self.path))?;

        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "index written");

        Ok(())
    }

    fn discard_conflicts(&mut self, entry: &IndexEntry) {
        for parent in entry.parent_dirs() {
            self.entries.remove(parent);
        }

        let prefix = format!("{}/", entry.name);
        let children = self
            .entries
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .map(|(path, _)| path.clone())
            .collect::<Vec<_>>();
        for child in children {
            self.entries.remove(&child);
        }
    }
}
