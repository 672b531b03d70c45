//! Commit object
//!
//! Commits record a snapshot of the staged files at a point in time. They contain:
//! - A tree object ID (the snapshot)
//! - An optional parent commit ID (absent for the root commit)
//! - The author name and a UTC timestamp in whole seconds
//! - A free-form message, possibly spanning several lines
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <timestamp>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is omitted for root commits. Everything after the first
//! blank line is the message, kept verbatim.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use chrono::SubsecRound;
use std::io::BufRead;

/// Author information: a display name and the moment the commit was made
///
/// Only the Unix seconds are stored, so the timestamp is always held in UTC
/// whatever offset it was created with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current time
    pub fn new(name: String) -> Self {
        Self::new_with_timestamp(name, chrono::Local::now().fixed_offset())
    }

    /// Create a new author with a specific timestamp
    ///
    /// Sub-second precision is dropped and the offset is normalized to UTC, matching
    /// what a stored commit reads back as.
    pub fn new_with_timestamp(
        name: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            timestamp: timestamp
                .trunc_subsecs(0)
                .with_timezone(&chrono::Utc)
                .fixed_offset(),
        }
    }

    /// Parse a timestamp given as RFC 2822 or `%Y-%m-%d %H:%M:%S %z`
    pub fn parse_timestamp(date: &str) -> anyhow::Result<chrono::DateTime<chrono::FixedOffset>> {
        chrono::DateTime::parse_from_rfc2822(date)
            .or_else(|_| chrono::DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
            .with_context(|| format!("invalid author date: {}", date))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Format complete author info as stored in the commit header
    ///
    /// # Returns
    ///
    /// String in format "name timestamp"
    pub fn display(&self) -> String {
        format!("{} {}", self.name, self.timestamp.timestamp())
    }

    /// Format timestamp in human-readable form, always in UTC
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name timestamp", the name itself may contain spaces
        let (name, timestamp) = value
            .rsplit_once(' ')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: {}", value))?;
        let timestamp = timestamp
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp: {}", timestamp))?;
        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {}", timestamp))?;

        Ok(Author {
            name: name.to_string(),
            timestamp: timestamp.fixed_offset(),
        })
    }
}

/// Commit object
///
/// Immutable once built. Its ID is the digest of its serialization, computed by
/// whoever stores it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (None for the root commit)
    parent: Option<ObjectId>,
    /// Tree object ID representing the snapshot
    tree_oid: ObjectId,
    author: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> i64 {
        self.author.timestamp()
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = self.header_lines().join("\n");
        object_content.push_str("\n\n");
        object_content.push_str(&self.message);

        Ok(Bytes::from(object_content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Invalid commit object: not UTF-8")?;

        // headers never contain blank lines, so the first one separates the message
        let (header, message) = content
            .split_once("\n\n")
            .unwrap_or((content.trim_end_matches('\n'), ""));

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;

        for line in header.lines() {
            if let Some(oid) = line.strip_prefix("tree ") {
                tree_oid = Some(ObjectId::try_parse(oid.trim().to_string())?);
            } else if let Some(oid) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(oid.trim().to_string())?);
            } else if let Some(value) = line.strip_prefix("author ") {
                author = Some(Author::try_from(value)?);
            }
        }

        let tree_oid = tree_oid.context("Invalid commit object: missing tree line")?;
        let author = author.context("Invalid commit object: missing author line")?;

        Ok(Self::new(parent, tree_oid, author, message.to_string()))
    }
}

impl Object for Commit {
    fn display(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
