use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.path().exists() {
            writeln!(
                self.writer(),
                "Repository already exists at {}",
                self.path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .stow/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .stow/refs/heads directory")?;

        self.refs()
            .set_current_branch(&BranchName::try_parse(DEFAULT_BRANCH.to_string())?)
            .context("Failed to create initial HEAD reference")?;

        tracing::debug!(path = %self.path().display(), "repository initialized");
        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
