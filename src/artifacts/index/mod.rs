//! Index (staging area) data structures
//!
//! The index, the tree and the stash log all persist entries as text lines of the
//! form `<digest> <path>`. The line is split on the first space only: the digest
//! is validated as a full hex object ID, which never contains a space, so the
//! path keeps any spaces of its own.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

pub mod index_entry;

/// Split a `<digest> <path>` line into a validated digest and the raw remainder
pub fn split_entry_line(line: &str) -> anyhow::Result<(ObjectId, &str)> {
    let (digest, rest) = line
        .split_once(' ')
        .with_context(|| format!("missing separator in entry line {:?}", line))?;
    let oid = ObjectId::try_parse(digest.to_string())?;

    if rest.is_empty() {
        anyhow::bail!("missing path in entry line {:?}", line);
    }

    Ok((oid, rest))
}

/// Whether a path can be written as one entry line
pub fn fits_entry_line(path: &str) -> bool {
    !path.contains(['\n', '\r'])
}
