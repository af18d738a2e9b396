//! Tilealpha turns indexed or true-color tile sheets into RGBA images with a binary
//! alpha channel.
//!
//! Transparency comes from one of:
//!
//! - a same-sized mask image (black is transparent), or
//! - a transparent color, given explicitly or sampled from the sheet, applied to every
//!   pixel outside a set of always-opaque terrain boxes.
//!
//! [`convert_path`] runs the whole load, validate, composite and save sequence;
//! [`convert_sheet`] does the in-memory part.
#![forbid(unsafe_code)]

mod foundation;

pub mod composite;
pub mod convert;
pub mod encode;
pub mod key;
pub mod sheet;
pub mod terrain;

pub use crate::foundation::core::{
    BoundingBox, DEFAULT_TCOORD, DEFAULT_TERRAIN, PixelCoord, Rgb8,
};
pub use crate::foundation::error::{ErrorKind, TileAlphaError, TileAlphaResult};

pub use crate::composite::RgbaBuffer;
pub use crate::convert::{ConvertOpts, ConvertReport, convert_path, convert_sheet};
pub use crate::key::{ColorKey, TransparencySource};
pub use crate::sheet::{Palette, TileSheet};
pub use crate::terrain::{TerrainMask, parse_terrain};
