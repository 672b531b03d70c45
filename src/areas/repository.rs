use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::stash::StashLog;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository directory created inside the working directory
pub const REPOSITORY_DIR_NAME: &str = ".stow";

pub struct Repository {
    /// Repository directory holding objects, refs, index and stash
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    stash: StashLog,
}

impl Repository {
    /// Repository for the working directory at `path`, stored in `<path>/.stow`
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let workspace_path = Path::new(path);

        Self::open(
            &workspace_path.join(REPOSITORY_DIR_NAME),
            workspace_path,
            writer,
        )
    }

    /// Repository with explicit repository and working directory roots
    ///
    /// The working directory is created when missing. The repository directory is
    /// only created by `init`.
    pub fn open(
        repository_path: &Path,
        workspace_path: &Path,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        if !workspace_path.exists() {
            std::fs::create_dir_all(workspace_path).with_context(|| {
                format!("failed to create working directory {:?}", workspace_path)
            })?;
        }

        let workspace_path = workspace_path.canonicalize()?;
        let path = resolve_path(repository_path)?;

        let index = Index::new(path.join("index").into_boxed_path())?;
        let database = Database::new(path.join("objects").into_boxed_path());
        let workspace = Workspace::new(
            workspace_path.into_boxed_path(),
            path.clone().into_boxed_path(),
        );
        let refs = Refs::new(path.clone().into_boxed_path());
        let stash = StashLog::new(path.join("stash").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
            stash,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_initialized(&self) -> bool {
        self.path.is_dir()
    }

    /// Fail unless `init` has created the repository directory
    pub fn check_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            anyhow::bail!("not a stow repository: {}", self.path.display());
        }

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn stash(&self) -> &StashLog {
        &self.stash
    }

    /// Tree captured by a commit
    pub fn load_commit_tree(&self, commit_oid: &ObjectId) -> anyhow::Result<Tree> {
        let commit = self.database.parse_object_as_commit(commit_oid)?;

        self.database.parse_object_as_tree(commit.tree_oid())
    }

    /// Tree of the HEAD commit, empty when there are no commits yet
    pub fn head_tree(&self) -> anyhow::Result<Tree> {
        match self.refs.head_commit()? {
            Some(commit_oid) => self.load_commit_tree(&commit_oid),
            None => Ok(Tree::default()),
        }
    }

    /// Resolve a user supplied path against the working directory
    pub fn relative_path(&self, path: &str) -> anyhow::Result<String> {
        self.workspace.relative_path(&PathBuf::from(path))
    }
}

// Canonical form of a path that may not exist yet: its closest existing parent is
// canonicalized so it compares equal with paths found by walking the workspace.
fn resolve_path(path: &Path) -> anyhow::Result<PathBuf> {
    if let Ok(path) = path.canonicalize() {
        return Ok(path);
    }

    let absolute = std::path::absolute(path)?;
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => Ok(resolve_path(parent)?.join(name)),
        _ => Ok(absolute),
    }
}
