use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;

impl Repository {
    /// Create a branch at the current HEAD commit
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.check_initialized()?;

        let Ok(branch_name) = BranchName::try_parse(branch_name.to_string()) else {
            writeln!(self.writer(), "fatal: invalid branch name: '{}'", branch_name)?;
            return Ok(());
        };

        if self.refs().branch_exists(&branch_name) {
            writeln!(self.writer(), "Branch '{}' already exists", branch_name)?;
            return Ok(());
        }

        let Some(source_oid) = self.refs().head_commit()? else {
            writeln!(self.writer(), "Cannot create branch: no commits yet")?;
            return Ok(());
        };

        self.refs().create_branch(&branch_name, &source_oid)?;
        writeln!(self.writer(), "Created branch '{}'", branch_name)?;

        Ok(())
    }

    /// Print every branch, marking the current one
    ///
    /// The current branch is listed even before its ref file exists.
    pub fn list_branches(&mut self) -> anyhow::Result<()> {
        self.check_initialized()?;

        let current_branch = self.refs().current_branch()?;
        let mut branches = self.refs().list_branches()?;

        if let Some(current_branch) = &current_branch
            && !branches.contains(current_branch)
        {
            branches.push(current_branch.clone());
            branches.sort();
        }

        for branch_name in branches {
            if current_branch.as_ref() == Some(&branch_name) {
                writeln!(self.writer(), "* {}", branch_name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch_name)?;
            }
        }

        Ok(())
    }
}
