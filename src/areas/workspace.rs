use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Working directory
///
/// Paths handed in and out are repository-relative strings with forward slashes.
/// The repository directory is never listed, even when it sits inside the root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    repository_path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>, repository_path: Box<Path>) -> Self {
        Workspace {
            path,
            repository_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user supplied path into a repository-relative one
    ///
    /// Relative paths are taken from the workspace root; absolute paths must point
    /// inside it. `.` components are dropped and `..` is rejected.
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<String> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.path)
                .with_context(|| format!("path {:?} is outside of the repository", path))?
        } else {
            path
        };

        let mut components = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => components.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => anyhow::bail!("path {:?} is outside of the repository", path),
            }
        }

        Ok(components.join("/"))
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.full_path(file_path).exists()
    }

    pub fn is_file(&self, file_path: &str) -> bool {
        self.full_path(file_path).is_file()
    }

    /// Every regular file under `root_file_path` (the whole workspace when None),
    /// sorted by path
    pub fn list_files(&self, root_file_path: Option<&str>) -> anyhow::Result<Vec<String>> {
        let root = match root_file_path {
            Some(p) if !p.is_empty() => self.full_path(p),
            _ => self.path.to_path_buf(),
        };

        if !root.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root);
        }

        let mut files = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative_path(entry.path()).ok())
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.starts_with(&self.repository_path)
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let full_path = self.full_path(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Failed to read file: {:?}", full_path))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Digest of the file content on disk, None when there is no such file
    pub fn hash_file(&self, file_path: &str) -> anyhow::Result<Option<ObjectId>> {
        if !self.is_file(file_path) {
            return Ok(None);
        }

        Ok(Some(self.parse_blob(file_path)?.object_id()?))
    }

    /// Write a file, creating its parent directories as needed
    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.full_path(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }

    /// Remove a file, then every parent directory it leaves empty
    ///
    /// The workspace root itself is never removed.
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let full_path = self.full_path(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        for ancestor in full_path.ancestors().skip(1) {
            if ancestor == self.path.as_ref() || !ancestor.starts_with(&self.path) {
                break;
            }

            let is_empty = std::fs::read_dir(ancestor)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty {
                break;
            }

            std::fs::remove_dir(ancestor)
                .with_context(|| format!("Failed to remove directory: {:?}", ancestor))?;
        }

        Ok(())
    }

    // Deletions go first so a path freed by a removed file or directory can be
    // reused by one of the writes.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for file_path in migration.deletes() {
            self.remove_file(file_path)?;
        }

        for (file_path, oid) in migration.writes() {
            let data = migration.load_blob_data(oid)?;
            self.write_file(file_path, &data)?;
        }

        Ok(())
    }

    fn full_path(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }
}
