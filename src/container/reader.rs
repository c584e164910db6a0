//! Container reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::format::*;
use super::AssetFile;
use crate::util::{Error, Result};

/// Parsed fixed-size header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub tag: [u8; 4],
    pub version: i32,
    pub metadata_len: u32,
    pub blob_len: u32,
}

impl Header {
    /// Parse the 16-byte header.
    pub fn parse(mut data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::corrupt_container(format!(
                "header truncated: {} of {} bytes",
                data.len(),
                HEADER_SIZE
            )));
        }

        let mut tag = [0u8; 4];
        data.read_exact(&mut tag)?;
        let version = data.read_i32::<LittleEndian>()?;
        let metadata_len = data.read_u32::<LittleEndian>()?;
        let blob_len = data.read_u32::<LittleEndian>()?;

        Ok(Self { tag, version, metadata_len, blob_len })
    }

    /// File size this header promises.
    #[inline]
    pub fn file_size(&self) -> u64 {
        expected_file_size(self.metadata_len, self.blob_len)
    }

    /// Check the declared lengths against the actual byte count.
    fn check_size(&self, actual: u64) -> Result<()> {
        let expected = self.file_size();
        if actual < expected {
            return Err(Error::corrupt_container(format!(
                "truncated: header declares {} bytes, found {}",
                expected, actual
            )));
        }
        if actual > expected {
            return Err(Error::corrupt_container(format!(
                "{} trailing bytes after declared payload",
                actual - expected
            )));
        }
        Ok(())
    }
}

/// Read a container from disk.
///
/// Fails with [`Error::NotFound`] when the file cannot be opened and with
/// [`Error::CorruptContainer`] when its size disagrees with the header.
pub fn read(path: impl AsRef<Path>) -> Result<AssetFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let size = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut raw = [0u8; HEADER_SIZE];
    let available = read_up_to(&mut reader, &mut raw)?;
    let header = Header::parse(&raw[..available])?;
    header.check_size(size)?;

    let metadata = read_exact_vec(&mut reader, header.metadata_len as usize)?;
    let blob = read_exact_vec(&mut reader, header.blob_len as usize)?;

    build(header, metadata, blob)
}

/// Parse a container from an in-memory byte slice.
pub fn from_bytes(data: &[u8]) -> Result<AssetFile> {
    let header = Header::parse(data)?;
    header.check_size(data.len() as u64)?;

    let meta_start = HEADER_SIZE;
    let blob_start = meta_start + header.metadata_len as usize;
    let metadata = data[meta_start..blob_start].to_vec();
    let blob = data[blob_start..].to_vec();

    build(header, metadata, blob)
}

fn build(header: Header, metadata: Vec<u8>, blob: Vec<u8>) -> Result<AssetFile> {
    let json = String::from_utf8(metadata)
        .map_err(|e| Error::corrupt_container(format!("metadata is not UTF-8: {}", e)))?;

    Ok(AssetFile {
        tag: header.tag,
        version: header.version,
        json,
        blob,
    })
}

/// Fill as much of `buf` as the reader provides.
fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        }
    }
    Ok(filled)
}

fn read_exact_vec(reader: &mut impl Read, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::corrupt_container("file shrank while reading")
        } else {
            Error::Io(e)
        }
    })?;
    Ok(buf)
}
