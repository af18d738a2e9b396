pub type TileAlphaResult<T> = Result<T, TileAlphaError>;

/// Coarse failure category, one per class of user-visible abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Terrain list length is not a multiple of four.
    Malformed,
    /// A bounding box has its lower corner past its upper corner.
    Geometry,
    /// A bounding box or sample coordinate lies outside the image.
    OutOfBounds,
    /// Mask and source images differ in size.
    DimensionMismatch,
    /// Reading, decoding, encoding or writing a file failed.
    Io,
}

#[derive(thiserror::Error, Debug)]
pub enum TileAlphaError {
    #[error("malformed terrain list: {len} values is not a multiple of 4")]
    MalformedTerrain { len: usize },

    #[error("terrain box {index} {bbox:?}: lower corner exceeds upper corner")]
    InvalidGeometry { index: usize, bbox: [i64; 4] },

    #[error("terrain box {index} {bbox:?} lies outside the {width}x{height} image")]
    BoxOutOfBounds {
        index: usize,
        bbox: [i64; 4],
        width: u32,
        height: u32,
    },

    #[error("sample coordinate ({x}, {y}) lies outside the {width}x{height} image")]
    CoordOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("mask is {}x{} but source is {}x{}", mask.0, mask.1, sheet.0, sheet.1)]
    DimensionMismatch { sheet: (u32, u32), mask: (u32, u32) },

    #[error("sheet error: {0}")]
    Sheet(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Png(#[from] png::DecodingError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileAlphaError {
    pub fn sheet(msg: impl Into<String>) -> Self {
        Self::Sheet(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedTerrain { .. } => ErrorKind::Malformed,
            Self::InvalidGeometry { .. } => ErrorKind::Geometry,
            Self::BoxOutOfBounds { .. } | Self::CoordOutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Self::Sheet(_) | Self::Image(_) | Self::Png(_) | Self::Other(_) => ErrorKind::Io,
        }
    }
}
