//! Container layout constants.
//!
//! ```text
//! type[4] | version:i32 | metadataLen:u32 | blobLen:u32 | metadata | blob
//! ```
//! All integers are little-endian and there is no padding.

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Offset of the type tag.
pub const TAG_OFFSET: usize = 0;

/// Offset of the writer version.
pub const VERSION_OFFSET: usize = 4;

/// Offset of the metadata length.
pub const METADATA_LEN_OFFSET: usize = 8;

/// Offset of the blob length.
pub const BLOB_LEN_OFFSET: usize = 12;

/// Total file size implied by a header's declared lengths.
#[inline]
pub const fn expected_file_size(metadata_len: u32, blob_len: u32) -> u64 {
    HEADER_SIZE as u64 + metadata_len as u64 + blob_len as u64
}
