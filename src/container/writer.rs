//! Container writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::format::HEADER_SIZE;
use super::AssetFile;
use crate::util::{Error, Result};

/// Serialize a container into any writer.
pub fn write_to(out: &mut impl Write, file: &AssetFile) -> Result<()> {
    let metadata_len = checked_len(file.json.len(), "metadata")?;
    let blob_len = checked_len(file.blob.len(), "blob")?;

    out.write_all(&file.tag)?;
    out.write_i32::<LittleEndian>(file.version)?;
    out.write_u32::<LittleEndian>(metadata_len)?;
    out.write_u32::<LittleEndian>(blob_len)?;
    out.write_all(file.json.as_bytes())?;
    out.write_all(&file.blob)?;
    Ok(())
}

/// Write a container to disk, creating or truncating the target.
pub fn write(path: impl AsRef<Path>, file: &AssetFile) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write_to(&mut out, file)?;
    out.flush()?;
    Ok(())
}

/// Serialize a container into a new byte vector.
pub fn to_bytes(file: &AssetFile) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_SIZE + file.json.len() + file.blob.len());
    write_to(&mut out, file)?;
    Ok(out)
}

fn checked_len(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        Error::corrupt_container(format!("{} of {} bytes exceeds the u32 length field", what, len))
    })
}
