//! Binary container format.
//!
//! Every asset file is a single container: a 4-byte type tag, a writer
//! version, a JSON metadata block and an opaque (usually compressed) blob.
//! The codec itself is permissive about tags and versions; the typed
//! serializers in [`crate::asset`] check those.
//!
//! ```ignore
//! use modelcache::container::{self, AssetFile};
//!
//! let file = container::read("meshes/mesh0.object")?;
//! println!("{} v{}: {}", file.tag_string(), file.version, file.json);
//! ```

pub mod format;
mod reader;
mod writer;

pub use reader::{from_bytes, read, Header};
pub use writer::{to_bytes, write, write_to};

use crate::core::{check_version, tag_to_string, AssetKind};
use crate::util::{Error, Result};

/// In-memory form of one container file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetFile {
    /// Raw type tag, not NUL-terminated.
    pub tag: [u8; 4],
    /// Writer version.
    pub version: i32,
    /// JSON metadata text.
    pub json: String,
    /// Binary payload.
    pub blob: Vec<u8>,
}

impl AssetFile {
    /// Create a container for a known asset kind.
    pub fn new(kind: AssetKind, version: i32, json: String, blob: Vec<u8>) -> Self {
        Self { tag: kind.tag(), version, json, blob }
    }

    /// Asset kind for this tag, if it is one this library knows.
    pub fn kind(&self) -> Option<AssetKind> {
        AssetKind::from_tag(self.tag)
    }

    /// Printable tag.
    pub fn tag_string(&self) -> String {
        tag_to_string(self.tag)
    }

    /// Require a specific kind and a supported version.
    pub fn expect_kind(&self, kind: AssetKind) -> Result<()> {
        if self.tag != kind.tag() {
            return Err(Error::KindMismatch {
                expected: kind.to_string(),
                actual: self.tag_string(),
            });
        }
        check_version(self.version)
    }

    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        to_bytes(self)
    }

    /// Parse from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        from_bytes(data)
    }
}
