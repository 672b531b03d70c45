use crate::artifacts::index::split_entry_line;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::stash::BATCH_END_MARKER;
use derive_new::new;

/// A shelved file: the path it came from, the digest of the shelved content and
/// whether it closes its batch
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StashEntry {
    pub path: String,
    pub oid: ObjectId,
    pub is_batch_end: bool,
}

impl StashEntry {
    /// Parse a stash line: `<digest> <path>[ END]`
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let (oid, rest) = split_entry_line(line)?;

        match rest.strip_suffix(BATCH_END_MARKER) {
            Some(path) if !path.is_empty() => Ok(Self::new(path.to_string(), oid, true)),
            _ => Ok(Self::new(rest.to_string(), oid, false)),
        }
    }

    /// Format as a stash line
    ///
    /// Fails for an entry inside a batch whose path ends with the batch-end
    /// marker, since that line would read back as a different path closing the
    /// batch.
    pub fn to_line(&self) -> anyhow::Result<String> {
        let marker = if self.is_batch_end {
            BATCH_END_MARKER
        } else {
            if self.path.ends_with(BATCH_END_MARKER) {
                anyhow::bail!(
                    "path {:?} ends with the batch-end marker and can only close a batch",
                    self.path
                );
            }
            ""
        };

        Ok(format!("{} {}{}", self.oid, self.path, marker))
    }
}
