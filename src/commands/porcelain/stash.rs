use crate::areas::database::DatabaseError;
use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;

impl Repository {
    /// Shelve tracked files whose content differs from the index, then restore
    /// their staged content
    ///
    /// Tracked files missing from disk have nothing to shelve and are skipped.
    pub async fn stash_push(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let modified_files = Inspector::new(self)
            .workspace_changes(&index.entries())?
            .into_iter()
            .filter(|(_, change)| *change == WorkspaceChangeType::Modified)
            .map(|(path, _)| path)
            .collect::<Vec<_>>();

        if modified_files.is_empty() {
            writeln!(self.writer(), "No changes to stash")?;
            return Ok(());
        }

        let mut batch = Vec::with_capacity(modified_files.len());
        for path in &modified_files {
            let data = self.workspace().read_file(path)?;
            let oid = self.database().store(&Blob::new(data))?;
            batch.push((path.clone(), oid));
        }
        self.stash().push_batch(batch)?;

        for path in &modified_files {
            let staged_oid = index
                .get(path)
                .ok_or_else(|| anyhow::anyhow!("{} is no longer tracked", path))?;
            let staged = self.database().parse_object_as_blob(staged_oid)?;
            self.workspace().write_file(path, staged.content())?;
        }

        writeln!(
            self.writer(),
            "Saved working directory state (stashed {} file(s))",
            modified_files.len()
        )?;

        Ok(())
    }

    /// Restore the most recently stashed batch into the working directory
    ///
    /// The batch leaves the log only once every entry has been restored or
    /// skipped; a failed write keeps it stashed.
    pub fn stash_pop(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let batch = self.stash().peek_batch()?;

        if batch.is_empty() {
            writeln!(self.writer(), "No stash entries found")?;
            return Ok(());
        }

        let mut restored = 0;
        for entry in &batch {
            let blob = match self.database().parse_object_as_blob(&entry.oid) {
                Ok(blob) => blob,
                Err(error)
                    if matches!(
                        error.downcast_ref::<DatabaseError>(),
                        Some(DatabaseError::ObjectNotFound(_))
                    ) =>
                {
                    tracing::warn!(path = %entry.path, oid = %entry.oid, "stashed object not found");
                    writeln!(
                        self.writer(),
                        "Warning: stashed object not found for {}",
                        entry.path
                    )?;
                    continue;
                }
                Err(error) => return Err(error),
            };

            self.workspace().write_file(&entry.path, blob.content())?;
            restored += 1;
        }

        self.stash().drop_batch(batch.len())?;

        writeln!(self.writer(), "Restored {} file(s) from stash", restored)?;

        Ok(())
    }

    pub fn stash_list(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let batches = self.stash().batches()?;

        if batches.is_empty() {
            writeln!(self.writer(), "No stash entries")?;
            return Ok(());
        }

        for (position, batch) in batches.iter().enumerate() {
            writeln!(self.writer(), "stash@{{{}}}", position)?;
            for entry in batch {
                writeln!(
                    self.writer(),
                    "  {} ({})",
                    entry.path,
                    entry.oid.to_short_oid()
                )?;
            }
        }

        Ok(())
    }

    pub fn stash_clear(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        self.stash().clear()?;
        writeln!(self.writer(), "Stash cleared")?;

        Ok(())
    }
}
