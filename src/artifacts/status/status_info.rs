use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::{FileChangeType, IndexChangeType};
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, FileChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    /// Index against the HEAD tree
    pub(crate) index_changeset: ChangeSet,
    /// Working directory against the index
    pub(crate) workspace_changeset: ChangeSet,
    /// Files on disk that were never added
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn index_changeset(&self) -> &ChangeSet {
        &self.index_changeset
    }

    pub fn workspace_changeset(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }

    pub fn is_clean(&self) -> bool {
        self.index_changeset.is_empty()
            && self.workspace_changeset.is_empty()
            && self.untracked_files.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let inspector = Inspector::new(self.repository);
        let index_entries = index.entries();
        let head_entries = self.repository.head_tree()?.entries();

        let workspace_changeset = inspector
            .workspace_changes(&index_entries)?
            .into_iter()
            .map(|(path, change)| (path, FileChangeType::Workspace(change)))
            .collect::<ChangeSet>();

        let index_changeset = index_entries
            .keys()
            .chain(head_entries.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|path| {
                match inspector
                    .check_index_against_head_tree(index_entries.get(path), head_entries.get(path))
                {
                    IndexChangeType::None => None,
                    change => Some((path.clone(), FileChangeType::Index(change))),
                }
            })
            .collect::<ChangeSet>();

        let untracked_files = self
            .repository
            .workspace()
            .list_files(None)?
            .into_iter()
            .filter(|path| !index.contains(path))
            .collect::<FileSet>();

        Ok(StatusInfo {
            index_changeset,
            workspace_changeset,
            untracked_files,
        })
    }
}

