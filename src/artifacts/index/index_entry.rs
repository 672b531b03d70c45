use crate::artifacts::index::split_entry_line;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// One staged file: a repository-relative, forward-slash separated path and the
/// digest of the content that the next commit will capture
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct IndexEntry {
    pub name: String,
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Parse an index line: `<digest> <path>`
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (oid, name) = split_entry_line(line)?;

        Ok(Self::new(name.to_string(), oid))
    }

    pub fn to_line(&self) -> String {
        format!("{} {}", self.oid, self.name)
    }

    /// Directory prefixes of the entry path, shallowest first
    ///
    /// `a/b/c.txt` yields `["a", "a/b"]`.
    pub fn parent_dirs(&self) -> Vec<&str> {
        self.name
            .match_indices('/')
            .map(|(idx, _)| &self.name[..idx])
            .collect()
    }
}
