use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Switch the working directory, index and HEAD to another branch
    ///
    /// Refuses to run while a tracked file has unsaved changes or when untracked
    /// files would be overwritten; nothing is touched in that case.
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        self.check_initialized()?;

        let branch_name = match BranchName::try_parse(target.to_string()) {
            Ok(branch_name) if self.refs().branch_exists(&branch_name) => branch_name,
            _ => {
                writeln!(self.writer(), "Branch '{}' does not exist", target)?;
                return Ok(());
            }
        };

        if self.refs().is_current_branch(&branch_name)? {
            writeln!(self.writer(), "Already on '{}'", branch_name)?;
            return Ok(());
        }

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let mut migration = Migration::new(self, index.entries());
        migration.check_stale_files()?;

        // a dirty working tree is reported before the target is read
        if !migration.has_conflicts() {
            let target_oid = self
                .refs()
                .read_branch(&branch_name)?
                .ok_or_else(|| anyhow::anyhow!("branch {} has no commit", branch_name))?;
            let target_tree = self.load_commit_tree(&target_oid)?;

            migration.plan_changes(&target_tree)?;
        }

        if migration.has_conflicts() {
            for error in migration.collect_errors() {
                writeln!(self.writer(), "{}\n", error)?;
            }
            writeln!(self.writer(), "Aborting")?;
            return Ok(());
        }

        migration.apply_changes()?;

        index.replace_all(migration.target_entries().clone());
        index.write_updates()?;

        self.refs().set_current_branch(&branch_name)?;
        writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;

        Ok(())
    }
}
