//! Texture serializer.
//!
//! Only 8 bits per channel are representable; the pixel format is derived
//! from the channel count.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{check_compression, Asset};
use crate::container::AssetFile;
use crate::core::{compress, decompress, AssetKind, COMPRESSION_NAME, CURRENT_VERSION};
use crate::util::{Error, Result};

/// Semantic role of a texture in its material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureKind {
    #[serde(rename = "texture_diffuse")]
    Diffuse,
    #[serde(rename = "texture_specular")]
    Specular,
    #[serde(rename = "texture_normal")]
    Normal,
    #[serde(rename = "texture_height")]
    Height,
    #[serde(rename = "texture_ao")]
    AmbientOcclusion,
    #[serde(rename = "texture_metallic")]
    Metallic,
    #[serde(rename = "texture_roughness")]
    Roughness,
}

impl TextureKind {
    /// Name used in metadata and shader uniforms.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Diffuse => "texture_diffuse",
            Self::Specular => "texture_specular",
            Self::Normal => "texture_normal",
            Self::Height => "texture_height",
            Self::AmbientOcclusion => "texture_ao",
            Self::Metallic => "texture_metallic",
            Self::Roughness => "texture_roughness",
        }
    }
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pixel layout, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    R8,
    RG8,
    RGB8,
    RGBA8,
}

impl PixelFormat {
    /// Format for a channel count in `1..=4`.
    pub const fn from_channels(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(Self::R8),
            2 => Some(Self::RG8),
            3 => Some(Self::RGB8),
            4 => Some(Self::RGBA8),
            _ => None,
        }
    }

    /// Channels per pixel.
    pub const fn channels(self) -> u32 {
        match self {
            Self::R8 => 1,
            Self::RG8 => 2,
            Self::RGB8 => 3,
            Self::RGBA8 => 4,
        }
    }
}

/// Decoded texture.
///
/// The pixel buffer has a single owner; [`Texture::into_pixels`] hands it
/// to the uploader and consumes the texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pub kind: TextureKind,
    /// Source path, used to deduplicate textures shared between materials.
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pixels: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct TextureMetadata {
    #[serde(rename = "type")]
    kind: TextureKind,
    format: PixelFormat,
    width: u32,
    height: u32,
    #[serde(rename = "nrComponents")]
    channels: u32,
    buffer_size: usize,
    compression: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    path: String,
}

/// `width * height * channels`, or `None` on overflow.
fn buffer_size(width: u32, height: u32, channels: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels as usize)
}

impl Texture {
    /// Build a texture, checking the buffer against its dimensions.
    pub fn new(
        kind: TextureKind,
        path: impl Into<String>,
        width: u32,
        height: u32,
        channels: u32,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if PixelFormat::from_channels(channels).is_none() {
            return Err(Error::corrupt_asset(format!(
                "unsupported channel count {}",
                channels
            )));
        }
        let expected = buffer_size(width, height, channels)
            .ok_or_else(|| Error::corrupt_asset("texture dimensions overflow"))?;
        if pixels.len() != expected {
            return Err(Error::corrupt_asset(format!(
                "{}x{}x{} texture needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                pixels.len()
            )));
        }

        Ok(Self { kind, path: path.into(), width, height, channels, pixels })
    }

    /// Pixel format implied by the channel count.
    pub fn format(&self) -> PixelFormat {
        // Channel count is checked in `new`
        PixelFormat::from_channels(self.channels).unwrap_or(PixelFormat::RGBA8)
    }

    /// Borrow the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data, consuming the texture.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl Asset for Texture {
    const KIND: AssetKind = AssetKind::Texture;

    fn encode(&self) -> Result<AssetFile> {
        let metadata = TextureMetadata {
            kind: self.kind,
            format: self.format(),
            width: self.width,
            height: self.height,
            channels: self.channels,
            buffer_size: self.pixels.len(),
            compression: COMPRESSION_NAME.to_string(),
            path: self.path.clone(),
        };

        Ok(AssetFile::new(
            Self::KIND,
            CURRENT_VERSION,
            serde_json::to_string(&metadata)?,
            compress(&self.pixels),
        ))
    }

    fn decode(file: &AssetFile) -> Result<Self> {
        file.expect_kind(Self::KIND)?;

        let metadata: TextureMetadata = serde_json::from_str(&file.json)?;
        check_compression(&metadata.compression)?;

        if metadata.format.channels() != metadata.channels {
            return Err(Error::schema(format!(
                "format {:?} does not match nrComponents {}",
                metadata.format, metadata.channels
            )));
        }
        if buffer_size(metadata.width, metadata.height, metadata.channels) != Some(metadata.buffer_size) {
            return Err(Error::schema(format!(
                "buffer_size {} does not match {}x{}x{}",
                metadata.buffer_size, metadata.width, metadata.height, metadata.channels
            )));
        }

        let pixels = decompress(&file.blob, metadata.buffer_size)?;

        Self::new(
            metadata.kind,
            metadata.path,
            metadata.width,
            metadata.height,
            metadata.channels,
            pixels,
        )
    }
}
