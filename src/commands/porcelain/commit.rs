use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::tree::Tree;

impl Repository {
    pub async fn commit(&mut self, message: &str, author: Author) -> anyhow::Result<()> {
        self.check_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        if index.is_empty() {
            writeln!(self.writer(), "nothing to commit")?;
            return Ok(());
        }

        let tree = Tree::build(index.iter());
        let tree_id = self.database().store(&tree)?;

        let parent = self.refs().head_commit()?;
        let is_root = parent.is_none();
        let commit = Commit::new(parent, tree_id, author, message.to_string());
        let commit_id = self.database().store(&commit)?;

        self.refs().update_head(&commit_id)?;

        let branch = match self.refs().current_branch()? {
            Some(branch_name) => branch_name.to_string(),
            None => "detached HEAD".to_string(),
        };
        let root_marker = if is_root { " (root-commit)" } else { "" };
        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            root_marker,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
