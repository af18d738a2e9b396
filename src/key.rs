use std::path::{Path, PathBuf};

use crate::foundation::core::{DEFAULT_TCOORD, PixelCoord, Rgb8};
use crate::foundation::error::{TileAlphaError, TileAlphaResult};
use crate::sheet::TileSheet;

/// Where the per-pixel transparency decision comes from. Exactly one is active per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransparencySource {
    /// Black pixels of a same-sized image are transparent.
    Mask(PathBuf),
    /// Pixels of this exact color are transparent outside terrain.
    Rgb(Rgb8),
    /// The color (or palette index) found at this position is transparent outside terrain.
    Sample(PixelCoord),
}

impl TransparencySource {
    /// Apply precedence: mask, then explicit color, then sample position, then
    /// [`DEFAULT_TCOORD`].
    pub fn select(mask: Option<&Path>, rgb: Option<Rgb8>, tcoord: Option<PixelCoord>) -> Self {
        if let Some(mask) = mask {
            return Self::Mask(mask.to_path_buf());
        }
        if let Some(rgb) = rgb {
            return Self::Rgb(rgb);
        }
        Self::Sample(tcoord.unwrap_or(DEFAULT_TCOORD))
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Mask(_) => "mask",
            Self::Rgb(_) => "rgb",
            Self::Sample(_) => "sample",
        }
    }
}

/// The reference value that marks a non-terrain pixel transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ColorKey {
    /// Raw palette index, compared before palette lookup.
    Index(u8),
    /// Exact RGB match against the (palette-resolved) pixel color.
    Rgb(Rgb8),
}

impl ColorKey {
    /// Resolve a key from an explicit color or a sample position.
    ///
    /// Sampling an indexed sheet keeps the raw index; sampling a direct sheet keeps
    /// the color. Mask sources have no key and yield `None`.
    pub fn resolve(
        sheet: &TileSheet,
        source: &TransparencySource,
    ) -> TileAlphaResult<Option<Self>> {
        let key = match *source {
            TransparencySource::Mask(_) => return Ok(None),
            TransparencySource::Rgb(rgb) => Self::Rgb(rgb),
            TransparencySource::Sample(coord) => {
                let (width, height) = sheet.dimensions();
                let (x, y) = coord.within(width, height).ok_or(TileAlphaError::CoordOutOfBounds {
                    x: coord.x,
                    y: coord.y,
                    width,
                    height,
                })?;
                match sheet.index_at(x, y) {
                    Some(index) => Self::Index(index),
                    None => Self::Rgb(sheet.rgb_at(x, y)),
                }
            }
        };
        tracing::debug!(?key, "resolved transparent key");
        Ok(Some(key))
    }

    pub fn matches(self, sheet: &TileSheet, x: u32, y: u32) -> bool {
        match self {
            Self::Index(index) => sheet.index_at(x, y) == Some(index),
            Self::Rgb(rgb) => sheet.rgb_at(x, y) == rgb,
        }
    }
}
