//! References (branches and HEAD)
//!
//! Branches are mutable names pointing at commits. HEAD says which commit the
//! working tree is based on, in one of two forms:
//! - Attached: `ref: refs/heads/<branch>`, following that branch
//! - Detached: a raw 40-character commit digest
//!
//! ## File Format
//!
//! - `<root>/HEAD` holds either form above
//! - `<root>/refs/heads/<branch>` holds a commit digest, no trailing newline required
//!
//! A missing HEAD reads as attached to the default branch, and a branch without a
//! ref file has no commits yet.

use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// What HEAD currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadTarget {
    /// HEAD follows a branch
    Branch(BranchName),
    /// HEAD holds a commit ID directly
    Detached(ObjectId),
}

impl HeadTarget {
    fn parse(content: &str) -> anyhow::Result<Self> {
        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);

        if let Some(symref_match) = symref_match {
            Ok(HeadTarget::Branch(BranchName::try_parse_ref_path(
                &symref_match[1],
            )?))
        } else {
            Ok(HeadTarget::Detached(ObjectId::try_parse(content.to_string())?))
        }
    }
}

/// References manager
///
/// Reads and writes HEAD and branch ref files under the repository directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory
    path: Box<Path>,
}

impl Refs {
    /// Read HEAD
    pub fn head_target(&self) -> anyhow::Result<HeadTarget> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(HeadTarget::Branch(BranchName::try_parse(
                DEFAULT_BRANCH.to_string(),
            )?));
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        HeadTarget::parse(content.trim())
            .with_context(|| format!("invalid HEAD content at {:?}", head_path))
    }

    /// Name of the branch HEAD is attached to, None when detached
    pub fn current_branch(&self) -> anyhow::Result<Option<BranchName>> {
        match self.head_target()? {
            HeadTarget::Branch(branch_name) => Ok(Some(branch_name)),
            HeadTarget::Detached(_) => Ok(None),
        }
    }

    /// Check if a branch is the currently checked-out branch
    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(self.current_branch()?.as_ref() == Some(branch_name))
    }

    /// Commit HEAD resolves to, None when there are no commits yet
    pub fn head_commit(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.head_target()? {
            HeadTarget::Branch(branch_name) => self.read_branch(&branch_name),
            HeadTarget::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Move HEAD to a new commit
    ///
    /// When attached, the current branch is advanced and HEAD keeps pointing at it;
    /// when detached, HEAD itself is rewritten.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.head_target()? {
            HeadTarget::Branch(branch_name) => {
                tracing::debug!(branch = %branch_name, %oid, "advancing branch");
                self.update_ref_file(&self.branch_path(&branch_name), oid.as_ref())
            }
            HeadTarget::Detached(_) => {
                tracing::debug!(%oid, "moving detached HEAD");
                self.update_ref_file(&self.head_path(), oid.as_ref())
            }
        }
    }

    /// Attach HEAD to a branch
    ///
    /// The branch is not required to exist; callers check that first when it matters.
    pub fn set_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &branch_name.to_symbolic_ref())
    }

    /// Point HEAD directly at a commit
    pub fn detach_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), oid.as_ref())
    }

    pub fn branch_exists(&self, branch_name: &BranchName) -> bool {
        self.branch_path(branch_name).is_file()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let ref_path = self.branch_path(branch_name);

        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)
            .with_context(|| format!("failed to read ref file at {:?}", ref_path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string()).with_context(
            || format!("invalid commit ID in ref file at {:?}", ref_path),
        )?))
    }

    pub fn create_branch(&self, branch_name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if self.branch_exists(branch_name) {
            anyhow::bail!("branch {} already exists", branch_name);
        }

        self.update_ref_file(&self.branch_path(branch_name), oid.as_ref())
    }

    /// All branches with a ref file, sorted by name
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut()
            .write_all(raw_ref.as_bytes())
            .with_context(|| format!("failed to write ref file at {:?}", path))?;

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn branch_path(&self, branch_name: &BranchName) -> PathBuf {
        self.heads_path().join(branch_name.as_ref())
    }
}
