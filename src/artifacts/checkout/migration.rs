//! Checkout migration and conflict detection
//!
//! Moving the working directory from the current index to a target tree happens
//! in three phases:
//!
//! 1. Stale check: tracked files with unsaved changes are collected before the
//!    target is even loaded
//! 2. Planning: every path of the target tree becomes a write, every path tracked
//!    by the old index but missing from the target tree becomes a delete, and
//!    untracked files in the way are collected
//! 3. Applying: the workspace carries out deletes, then writes
//!
//! ## Conflict Detection
//!
//! - Stale files: a tracked file differs from its index entry or is missing
//! - Untracked overwrites: a file that was never added sits where the target tree
//!   writes (or where it needs a directory) and holds different content
//!
//! A migration with conflicts refuses to apply.

use crate::areas::repository::Repository;
use crate::artifacts::checkout::conflict::{ConflictMessage, ConflictType};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::inspector::Inspector;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// Set of detected conflicts grouped by type
pub type ConflictsSet = BTreeMap<ConflictType, BTreeSet<String>>;

/// Checkout migration planner
///
/// Holds a snapshot of the index taken before the switch. Nothing is read from or
/// written to disk until [`Migration::check_stale_files`],
/// [`Migration::plan_changes`] and [`Migration::apply_changes`] are called.
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Index content before the switch
    old_entries: BTreeMap<String, ObjectId>,
    /// Target tree content, empty until planned
    target: BTreeMap<String, ObjectId>,
    inspector: Inspector<'r>,
    /// Files to write, with the blob holding their new content
    writes: BTreeMap<String, ObjectId>,
    /// Tracked files to delete
    deletes: BTreeSet<String>,
    conflicts: ConflictsSet,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, old_entries: BTreeMap<String, ObjectId>) -> Self {
        Self {
            repository,
            old_entries,
            target: BTreeMap::new(),
            inspector: Inspector::new(repository),
            writes: BTreeMap::new(),
            deletes: BTreeSet::new(),
            conflicts: ConflictsSet::new(),
        }
    }

    pub fn writes(&self) -> &BTreeMap<String, ObjectId> {
        &self.writes
    }

    pub fn deletes(&self) -> &BTreeSet<String> {
        &self.deletes
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts.values().any(|paths| !paths.is_empty())
    }

    /// Index content once the migration is applied
    pub fn target_entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.target
    }

    /// Record every tracked file that differs from its index entry or is gone
    pub fn check_stale_files(&mut self) -> anyhow::Result<()> {
        self.conflicts.remove(&ConflictType::StaleFile);

        for path in self.inspector.workspace_changes(&self.old_entries)?.into_keys() {
            self.record_conflict(ConflictType::StaleFile, path);
        }

        Ok(())
    }

    /// Plan writes and deletes towards `target`, recording untracked files in the way
    ///
    /// Stale files are recorded separately by [`Migration::check_stale_files`].
    pub fn plan_changes(&mut self, target: &Tree) -> anyhow::Result<()> {
        self.writes.clear();
        self.deletes.clear();
        self.conflicts.remove(&ConflictType::UntrackedOverwritten);
        self.target = target.entries();

        let target = self.target.clone();
        for (path, oid) in &target {
            self.check_for_untracked_conflict(path, oid)?;
            self.writes.insert(path.clone(), oid.clone());
        }

        self.deletes = self
            .old_entries
            .keys()
            .filter(|path| !self.target.contains_key(*path))
            .cloned()
            .collect();

        tracing::info!(
            writes = self.writes.len(),
            deletes = self.deletes.len(),
            conflicts = self.conflicts.values().map(BTreeSet::len).sum::<usize>(),
            "checkout planned"
        );

        Ok(())
    }

    /// Carry out a planned migration on the working directory
    pub fn apply_changes(&self) -> anyhow::Result<()> {
        if self.has_conflicts() {
            anyhow::bail!("\n{}\n\nAborting", self.collect_errors().join("\n\n"));
        }

        self.repository.workspace().apply_migration(self)
    }

    /// One report per conflict type, listing the offending paths
    pub fn collect_errors(&self) -> Vec<String> {
        self.conflicts
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(conflict_type, paths)| {
                let paths = paths
                    .iter()
                    .map(|p| format!("\t{}", p))
                    .collect::<Vec<String>>();

                let ConflictMessage { header, footer } = conflict_type.into();
                format!("error: {}\n{}\n{}", header, paths.join("\n"), footer)
            })
            .collect::<Vec<_>>()
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self
            .repository
            .database()
            .parse_object_as_blob(object_id)?
            .into_content())
    }

    fn check_for_untracked_conflict(&mut self, path: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let repository = self.repository;
        let workspace = repository.workspace();

        // a file standing where the target needs a directory
        let entry = IndexEntry::new(path.to_string(), oid.clone());
        for parent in entry.parent_dirs() {
            if workspace.is_file(parent) && !self.old_entries.contains_key(parent) {
                self.record_conflict(ConflictType::UntrackedOverwritten, parent.to_string());
            }
        }

        if self.old_entries.contains_key(path) || !workspace.exists(path) {
            return Ok(());
        }

        if workspace.is_file(path) {
            if workspace.hash_file(path)?.as_ref() != Some(oid) {
                self.record_conflict(ConflictType::UntrackedOverwritten, path.to_string());
            }
        } else {
            // a directory standing where the target needs a file: only tracked
            // files inside it get deleted
            let untracked = workspace
                .list_files(Some(path))?
                .into_iter()
                .filter(|file| !self.old_entries.contains_key(file))
                .collect::<Vec<_>>();
            for file in untracked {
                self.record_conflict(ConflictType::UntrackedOverwritten, file);
            }
        }

        Ok(())
    }

    fn record_conflict(&mut self, conflict_type: ConflictType, path: String) {
        self.conflicts.entry(conflict_type).or_default().insert(path);
    }
}
