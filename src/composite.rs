use crate::foundation::core::Rgb8;
use crate::foundation::error::{TileAlphaError, TileAlphaResult};
use crate::key::ColorKey;
use crate::sheet::TileSheet;
use crate::terrain::TerrainMask;

pub const OPAQUE: u8 = 255;
pub const TRANSPARENT: u8 = 0;

/// Row-major RGBA8 output, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaBuffer {
    fn alpha_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4 + 3
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.alpha_index(x, y) - 3;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.alpha_index(x, y)]
    }

    fn set_alpha(&mut self, x: u32, y: u32, a: u8) {
        let i = self.alpha_index(x, y);
        self.data[i] = a;
    }

    pub fn transparent_count(&self) -> usize {
        self.data
            .chunks_exact(4)
            .filter(|px| px[3] == TRANSPARENT)
            .count()
    }
}

/// Copy (palette-resolved) RGB into a fresh buffer with every pixel opaque.
pub fn composite_rgb(sheet: &TileSheet) -> RgbaBuffer {
    let (width, height) = sheet.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let c = sheet.rgb_at(x, y);
            data.extend_from_slice(&[c.r, c.g, c.b, OPAQUE]);
        }
    }
    RgbaBuffer {
        width,
        height,
        data,
    }
}

pub fn check_mask_dimensions(sheet: &TileSheet, mask: &TileSheet) -> TileAlphaResult<()> {
    if sheet.dimensions() != mask.dimensions() {
        return Err(TileAlphaError::DimensionMismatch {
            sheet: sheet.dimensions(),
            mask: mask.dimensions(),
        });
    }
    Ok(())
}

/// Black mask pixels (palette index 0 for indexed masks) become transparent.
///
/// Callers check sizes first with [`check_mask_dimensions`].
pub fn alpha_from_mask(buf: &mut RgbaBuffer, mask: &TileSheet) {
    debug_assert_eq!((buf.width, buf.height), mask.dimensions());
    for y in 0..buf.height {
        for x in 0..buf.width {
            let clear = match mask.index_at(x, y) {
                Some(index) => index == 0,
                None => mask.rgb_at(x, y) == Rgb8::BLACK,
            };
            buf.set_alpha(x, y, if clear { TRANSPARENT } else { OPAQUE });
        }
    }
}

/// Non-terrain pixels matching `key` become transparent; everything else is opaque.
pub fn alpha_from_key(
    buf: &mut RgbaBuffer,
    sheet: &TileSheet,
    key: ColorKey,
    terrain: &TerrainMask,
) {
    debug_assert_eq!((buf.width, buf.height), sheet.dimensions());
    debug_assert_eq!(terrain.dimensions(), sheet.dimensions());
    for y in 0..buf.height {
        for x in 0..buf.width {
            let clear = terrain.is_non_terrain(x, y) && key.matches(sheet, x, y);
            buf.set_alpha(x, y, if clear { TRANSPARENT } else { OPAQUE });
        }
    }
}
