use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::{IndexChangeType, WorkspaceChangeType};
use derive_new::new;
use std::collections::BTreeMap;

/// Compares index entries against the working directory and the HEAD tree
///
/// Content is compared by digest only: every tracked file is re-read and hashed.
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    pub fn check_index_against_workspace(
        &self,
        path: &str,
        index_oid: Option<&ObjectId>,
    ) -> anyhow::Result<WorkspaceChangeType> {
        let Some(index_oid) = index_oid else {
            return Ok(WorkspaceChangeType::Untracked);
        };

        match self.repository.workspace().hash_file(path)? {
            None => Ok(WorkspaceChangeType::Deleted),
            Some(oid) if &oid != index_oid => Ok(WorkspaceChangeType::Modified),
            Some(_) => Ok(WorkspaceChangeType::None),
        }
    }

    pub fn check_index_against_head_tree(
        &self,
        index_oid: Option<&ObjectId>,
        head_oid: Option<&ObjectId>,
    ) -> IndexChangeType {
        match (index_oid, head_oid) {
            (Some(index_oid), Some(head_oid)) if index_oid != head_oid => {
                IndexChangeType::Modified
            }
            (Some(_), None) => IndexChangeType::Added,
            (None, Some(_)) => IndexChangeType::Deleted,
            _ => IndexChangeType::None,
        }
    }

    /// Tracked files whose content on disk no longer matches the index
    ///
    /// A tracked file missing from disk is reported as deleted. An empty result
    /// means the working tree is clean.
    pub fn workspace_changes(
        &self,
        entries: &BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<BTreeMap<String, WorkspaceChangeType>> {
        let mut changes = BTreeMap::new();

        for (path, oid) in entries {
            let change = self.check_index_against_workspace(path, Some(oid))?;

            if change != WorkspaceChangeType::None {
                changes.insert(path.clone(), change);
            }
        }

        Ok(changes)
    }
}
