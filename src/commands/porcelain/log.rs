use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Walk the parent chain from HEAD, newest commit first
    pub fn log(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let mut curr_commit_oid = self.refs().head_commit()?;

        if curr_commit_oid.is_none() {
            writeln!(self.writer(), "No commits yet")?;
            return Ok(());
        }

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.database().parse_object_as_commit(&commit_oid)?;

            self.show_commit_medium(&commit_oid, &commit)?;

            curr_commit_oid = commit.parent().cloned();
            if curr_commit_oid.is_some() {
                writeln!(self.writer())?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "commit {}", commit_oid)?;
        writeln!(self.writer(), "Author: {}", commit.author().name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}
