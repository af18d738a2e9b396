use crate::foundation::core::Rgb8;
use crate::foundation::error::{TileAlphaError, TileAlphaResult};

/// Color table of an indexed image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette(pub Vec<Rgb8>);

impl Palette {
    /// Build from a flat `r, g, b, r, g, b, ...` table; a trailing partial entry is dropped.
    pub fn from_flat(rgb: &[u8]) -> Self {
        Self(
            rgb.chunks_exact(3)
                .map(|c| Rgb8::new(c[0], c[1], c[2]))
                .collect(),
        )
    }

    /// Color for `index`. Indices past the table end resolve to black.
    pub fn lookup(&self, index: u8) -> Rgb8 {
        self.0.get(usize::from(index)).copied().unwrap_or(Rgb8::BLACK)
    }
}

/// Pixel storage, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Pixels {
    Indexed { indices: Vec<u8>, palette: Palette },
    Direct { rgb: Vec<Rgb8> },
}

/// A decoded tile sheet. `width`/`height` are the authoritative bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileSheet {
    width: u32,
    height: u32,
    pixels: Pixels,
}

impl TileSheet {
    pub fn indexed(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Palette,
    ) -> TileAlphaResult<Self> {
        check_len(width, height, indices.len())?;
        Ok(Self {
            width,
            height,
            pixels: Pixels::Indexed { indices, palette },
        })
    }

    pub fn direct(width: u32, height: u32, rgb: Vec<Rgb8>) -> TileAlphaResult<Self> {
        check_len(width, height, rgb.len())?;
        Ok(Self {
            width,
            height,
            pixels: Pixels::Direct { rgb },
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.pixels, Pixels::Indexed { .. })
    }

    pub fn palette(&self) -> Option<&Palette> {
        match &self.pixels {
            Pixels::Indexed { palette, .. } => Some(palette),
            Pixels::Direct { .. } => None,
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Raw palette index at `(x, y)`, or `None` for direct-color sheets.
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        match &self.pixels {
            Pixels::Indexed { indices, .. } => Some(indices[self.offset(x, y)]),
            Pixels::Direct { .. } => None,
        }
    }

    /// Color at `(x, y)`, resolving the palette for indexed sheets.
    pub fn rgb_at(&self, x: u32, y: u32) -> Rgb8 {
        let i = self.offset(x, y);
        match &self.pixels {
            Pixels::Indexed { indices, palette } => palette.lookup(indices[i]),
            Pixels::Direct { rgb } => rgb[i],
        }
    }
}

fn check_len(width: u32, height: u32, len: usize) -> TileAlphaResult<()> {
    let expected = width as usize * height as usize;
    if len != expected {
        return Err(TileAlphaError::sheet(format!(
            "{width}x{height} sheet needs {expected} pixels, got {len}"
        )));
    }
    Ok(())
}
