//! Core layer - container tags and block compression.
//!
//! This module provides:
//! - [`AssetKind`] - The 4-byte type tags (`MESH`, `TEXI`, `INFO`)
//! - [`compress`] / [`decompress`] - LZ4 block compression with a size bound

mod compression;
mod kind;

pub use compression::{bounded_size, compress, decompress, COMPRESSION_NAME};
pub use kind::{check_version, tag_to_string, AssetKind, CURRENT_VERSION};
