//! Blob object
//!
//! Blobs store file content. They contain only the raw file bytes, without a
//! header or any metadata (paths live in trees), so a blob's ID is exactly the
//! SHA-1 of the file.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Raw file content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
