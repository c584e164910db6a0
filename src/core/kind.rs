//! Container type tags and writer version.

use std::fmt;

use crate::util::{Error, Result};

/// Container version written by this library.
pub const CURRENT_VERSION: i32 = 1;

/// Asset kind identified by the 4-byte container tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Mesh vertices, indices and bounds.
    Mesh,
    /// Texture pixels.
    Texture,
    /// Per-model asset counts.
    ModelInfo,
}

impl AssetKind {
    /// Raw 4-byte tag as stored on disk.
    pub const fn tag(self) -> [u8; 4] {
        match self {
            Self::Mesh => *b"MESH",
            Self::Texture => *b"TEXI",
            Self::ModelInfo => *b"INFO",
        }
    }

    /// Look up a kind from a raw tag.
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match &tag {
            b"MESH" => Some(Self::Mesh),
            b"TEXI" => Some(Self::Texture),
            b"INFO" => Some(Self::ModelInfo),
            _ => None,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tag_to_string(self.tag()))
    }
}

/// Printable form of a tag; non-ASCII bytes are escaped.
pub fn tag_to_string(tag: [u8; 4]) -> String {
    tag.iter().flat_map(|b| std::ascii::escape_default(*b)).map(char::from).collect()
}

/// Reject a container version this reader does not understand.
pub fn check_version(version: i32) -> Result<()> {
    if (1..=CURRENT_VERSION).contains(&version) {
        Ok(())
    } else {
        Err(Error::UnsupportedVersion(version))
    }
}
