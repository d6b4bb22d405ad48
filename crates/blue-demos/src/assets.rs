//! Sprite sheet for the zoom demo: animation frames of 8-bit palette indices
//! plus a 16-colour palette.
//!
//! Loaded from `ZOOM.TEX` / `ZOOM.PAL` in an asset directory, or generated.
//! The palette file holds big-endian RGB1555 words.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use blue_core::Rgb1555;

use crate::zoom_sprite::{ANIMATION_FRAME_COUNT, SPRITE_HEIGHT, SPRITE_WIDTH};

pub const TEXTURE_FILE: &str = "ZOOM.TEX";
pub const PALETTE_FILE: &str = "ZOOM.PAL";

pub const PALETTE_COLORS: usize = 16;

/// Bytes of texture data one animation frame occupies.
pub const FRAME_BYTES: usize = SPRITE_WIDTH as usize * SPRITE_HEIGHT as usize;

#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: io::Error },
    ShortTexture { len: usize, expected: usize },
    ShortPalette { len: usize },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            AssetError::ShortTexture { len, expected } => {
                write!(f, "texture is {len} bytes, need at least {expected}")
            }
            AssetError::ShortPalette { len } => write!(
                f,
                "palette is {len} bytes, need {} ({PALETTE_COLORS} colours)",
                PALETTE_COLORS * 2
            ),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    texture: Vec<u8>,
    palette: [Rgb1555; PALETTE_COLORS],
}

impl SpriteSheet {
    /// Build from raw file contents, validating sizes.
    pub fn from_bytes(texture: Vec<u8>, palette: &[u8]) -> Result<Self, AssetError> {
        let expected = FRAME_BYTES * ANIMATION_FRAME_COUNT as usize;
        if texture.len() < expected {
            return Err(AssetError::ShortTexture {
                len: texture.len(),
                expected,
            });
        }
        if palette.len() < PALETTE_COLORS * 2 {
            return Err(AssetError::ShortPalette { len: palette.len() });
        }

        let mut colors = [Rgb1555::BLACK; PALETTE_COLORS];
        for (color, word) in colors.iter_mut().zip(palette.chunks_exact(2)) {
            *color = Rgb1555::from_raw(u16::from_be_bytes([word[0], word[1]]));
        }

        Ok(Self {
            texture,
            palette: colors,
        })
    }

    /// Read `ZOOM.TEX` and `ZOOM.PAL` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let texture = read(&dir.join(TEXTURE_FILE))?;
        let palette = read(&dir.join(PALETTE_FILE))?;
        let sheet = Self::from_bytes(texture, &palette)?;
        info!(
            dir = %dir.display(),
            texture_bytes = sheet.texture.len(),
            "loaded sprite sheet"
        );
        Ok(sheet)
    }

    /// Diagonal stripes that shift one palette entry per frame.
    pub fn generated() -> Self {
        let width = SPRITE_WIDTH as usize;
        let height = SPRITE_HEIGHT as usize;
        let mut texture = Vec::with_capacity(FRAME_BYTES * ANIMATION_FRAME_COUNT as usize);
        for frame in 0..ANIMATION_FRAME_COUNT as usize {
            for y in 0..height {
                for x in 0..width {
                    texture.push(((x / 8 + y / 8 + frame) % PALETTE_COLORS) as u8);
                }
            }
        }

        let mut palette = [Rgb1555::BLACK; PALETTE_COLORS];
        for (i, color) in palette.iter_mut().enumerate() {
            let level = (i * 2) as u8;
            *color = Rgb1555::new(1, level, 31 - level, 15);
        }

        Self { texture, palette }
    }

    pub fn texture(&self) -> &[u8] {
        &self.texture
    }

    pub fn palette(&self) -> &[Rgb1555; PALETTE_COLORS] {
        &self.palette
    }

    /// Texture bytes for one animation frame, if present.
    pub fn frame(&self, frame: u16) -> Option<&[u8]> {
        let start = usize::from(frame) * FRAME_BYTES;
        self.texture.get(start..start + FRAME_BYTES)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
