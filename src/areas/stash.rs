//! Stash log
//!
//! A side log of shelved file contents, independent of commit history. Each stash
//! push adds one batch at the front of the log; a pop restores the front batch and
//! only then drops it, so batches come back in LIFO order.
//!
//! ## File Format
//!
//! One line per entry, `<digest> <path>[ END]`, newest batch first. The ` END`
//! suffix closes a batch. Malformed lines are skipped when loading.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::stash::BATCH_END_MARKER;
use crate::artifacts::stash::stash_entry::StashEntry;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, new)]
pub struct StashLog {
    /// Path to the stash file
    path: Box<Path>,
}

impl StashLog {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest batch first; a missing log is empty
    pub fn load(&self) -> anyhow::Result<Vec<StashEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read stash log at {:?}", self.path))?;

        Ok(content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| match StashEntry::parse_line(line) {
                Ok(entry) => Some(entry),
                Err(error) => {
                    tracing::warn!(%error, "skipping malformed stash line");
                    None
                }
            })
            .collect())
    }

    /// Rewrite the log with `entries`
    ///
    /// Every line is encoded before the file is touched, so an entry that cannot
    /// be written leaves the previous log in place.
    pub fn save(&self, entries: &[StashEntry]) -> anyhow::Result<()> {
        let content = entries
            .iter()
            .map(|entry| entry.to_line().map(|line| format!("{}\n", line)))
            .collect::<anyhow::Result<String>>()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut stash_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("failed to open stash log at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut stash_file, Lock::Exclusive, 0, 1)?;

        lock.deref_mut()
            .write_all(content.as_bytes())
            .with_context(|| format!("failed to write stash log at {:?}", self.path))?;

        Ok(())
    }

    /// Put a new batch in front of the existing ones
    ///
    /// Only the last entry of the batch is marked as its end. A path ending with
    /// the batch-end marker is moved to that last position, the only place it reads
    /// back unchanged; a batch with two such paths is refused. An empty batch
    /// leaves the log untouched.
    pub fn push_batch(&self, files: Vec<(String, ObjectId)>) -> anyhow::Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        let (mut files, marker_suffixed): (Vec<_>, Vec<_>) = files
            .into_iter()
            .partition(|(path, _)| !path.ends_with(BATCH_END_MARKER));
        if marker_suffixed.len() > 1 {
            anyhow::bail!(
                "cannot stash more than one path ending with {:?}: {}",
                BATCH_END_MARKER,
                marker_suffixed
                    .iter()
                    .map(|(path, _)| path.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        files.extend(marker_suffixed);

        let batch_len = files.len();
        let mut entries = files
            .into_iter()
            .enumerate()
            .map(|(idx, (path, oid))| StashEntry::new(path, oid, idx + 1 == batch_len))
            .collect::<Vec<_>>();
        entries.extend(self.load()?);

        tracing::debug!(files = batch_len, "stash batch pushed");
        self.save(&entries)
    }

    /// The newest batch, empty when the log has none; the log is left unchanged
    ///
    /// A log whose last batch lost its end marker yields everything that is left.
    pub fn peek_batch(&self) -> anyhow::Result<Vec<StashEntry>> {
        let mut entries = self.load()?;

        let batch_len = entries
            .iter()
            .position(|entry| entry.is_batch_end)
            .map_or(entries.len(), |idx| idx + 1);
        entries.truncate(batch_len);

        Ok(entries)
    }

    /// Remove the first `batch_len` entries and persist the rest
    pub fn drop_batch(&self, batch_len: usize) -> anyhow::Result<()> {
        let mut entries = self.load()?;
        let remaining = entries.split_off(batch_len.min(entries.len()));

        self.save(&remaining)?;
        tracing::debug!(files = entries.len(), remaining = remaining.len(), "stash batch dropped");

        Ok(())
    }

    /// Entries grouped into batches, newest first
    pub fn batches(&self) -> anyhow::Result<Vec<Vec<StashEntry>>> {
        let mut batches = Vec::new();
        let mut current = Vec::new();

        for entry in self.load()? {
            let is_batch_end = entry.is_batch_end;
            current.push(entry);

            if is_batch_end {
                batches.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            batches.push(current);
        }

        Ok(batches)
    }

    /// Delete the stash log file if present
    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove stash log at {:?}", self.path))?;
        }

        Ok(())
    }
}
