use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::{FileChangeType, WorkspaceChangeType};
use crate::artifacts::status::status_info::{ChangeSet, Status};

// Terminology:
// - staged changes: the index differs from the tree of the HEAD commit
// - unstaged changes: a tracked file on disk differs from its index entry or is gone
// - untracked files: files on disk that were never added to the index
impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status = Status::new(self).initialize(&index)?;

        match self.refs().current_branch()? {
            Some(branch_name) => writeln!(self.writer(), "On branch {}", branch_name)?,
            None => writeln!(self.writer(), "HEAD detached")?,
        }
        writeln!(self.writer())?;

        self.print_changeset("Changes to be committed:", status.index_changeset())?;
        self.print_changeset(
            "Changes not staged for commit:",
            status.workspace_changeset(),
        )?;

        let untracked_changeset = status
            .untracked_files()
            .iter()
            .map(|path| {
                (
                    path.clone(),
                    FileChangeType::Workspace(WorkspaceChangeType::Untracked),
                )
            })
            .collect::<ChangeSet>();
        self.print_changeset("Untracked files:", &untracked_changeset)?;

        if status.is_clean() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
        }

        Ok(())
    }

    fn print_changeset(&self, header: &str, changeset: &ChangeSet) -> anyhow::Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "{}", header)?;
        for (path, change) in changeset {
            writeln!(self.writer(), "{}{}", change, path)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
