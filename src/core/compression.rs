//! Block compression for container blobs.
//!
//! Blobs are stored in the raw LZ4 block format. The stream does not carry
//! its uncompressed length, so callers pass the size recorded in the
//! container metadata back to [`decompress`].

use lz4_flex::block;

use crate::util::{Error, Result};

/// Name recorded in the `compression` metadata field.
pub const COMPRESSION_NAME: &str = "LZ4";

/// Worst-case compressed size for an input of `len` bytes.
///
/// Always at least `len`.
#[inline]
pub fn bounded_size(len: usize) -> usize {
    block::get_maximum_output_size(len).max(len)
}

/// Compress `data` into a buffer sized to the actual compressed length.
///
/// Empty input compresses to an empty blob.
pub fn compress(data: &[u8]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0u8; bounded_size(data.len())];
    match block::compress_into(data, &mut out) {
        Ok(written) => {
            out.truncate(written);
            out
        }
        // The buffer is sized to the block bound, so this only happens if
        // the bound itself is wrong; fall back to the allocating encoder.
        Err(_) => block::compress(data),
    }
}

/// Largest output an LZ4 block of `len` bytes can expand to.
#[inline]
fn max_expansion(len: usize) -> usize {
    len.saturating_mul(255).saturating_add(16)
}

/// Decompress a blob that must expand to exactly `expected_size` bytes.
///
/// A corrupt stream or a length mismatch is reported as
/// [`Error::CorruptBlob`]; no partially filled buffer is returned. Sizes the
/// blob could not possibly expand to are rejected before allocating.
pub fn decompress(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    if data.is_empty() {
        return if expected_size == 0 {
            Ok(Vec::new())
        } else {
            Err(Error::CorruptBlob(format!(
                "empty blob, expected {} bytes",
                expected_size
            )))
        };
    }

    if expected_size > max_expansion(data.len()) {
        return Err(Error::CorruptBlob(format!(
            "{} byte blob cannot expand to {} bytes",
            data.len(),
            expected_size
        )));
    }

    let out = block::decompress(data, expected_size)
        .map_err(|e| Error::CorruptBlob(e.to_string()))?;

    if out.len() != expected_size {
        return Err(Error::CorruptBlob(format!(
            "decompressed {} bytes, expected {}",
            out.len(),
            expected_size
        )));
    }

    Ok(out)
}
