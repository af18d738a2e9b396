/// Legacy terrain layout of the old 8x8 tile sheet, as `(lx, ly, ux, uy)` groups.
pub const DEFAULT_TERRAIN: [i64; 28] = [
    0, 0, 256, 16, //
    64, 16, 256, 24, //
    216, 80, 240, 88, //
    48, 272, 152, 280, //
    176, 272, 192, 280, //
    0, 632, 256, 688, //
    0, 712, 256, 736,
];

/// Sample coordinate used when neither a mask, an explicit color, nor `--tcoord` is given.
pub const DEFAULT_TCOORD: PixelCoord = PixelCoord { x: 0, y: 32 };

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Caller-supplied pixel position.
///
/// Signed so that negative input survives parsing and is rejected by bounds checks
/// instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelCoord {
    pub x: i64,
    pub y: i64,
}

impl PixelCoord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Return the position as unsigned indices when it lies inside `width x height`.
    pub fn within(self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x = u32::try_from(self.x).ok().filter(|&x| x < width)?;
        let y = u32::try_from(self.y).ok().filter(|&y| y < height)?;
        Some((x, y))
    }
}

/// Rectangle `[low_x, high_x) x [low_y, high_y)` in image space.
///
/// Only built by [`crate::terrain::parse_terrain`], which guarantees
/// `low <= high` on both axes and that the box fits the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BoundingBox {
    pub low_x: u32,
    pub low_y: u32,
    pub high_x: u32,
    pub high_y: u32,
}

impl BoundingBox {
    /// Return `true` when `(x, y)` falls inside the box.
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.low_x <= x && x < self.high_x && self.low_y <= y && y < self.high_y
    }
}
