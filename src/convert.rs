use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::composite::{
    RgbaBuffer, alpha_from_key, alpha_from_mask, check_mask_dimensions, composite_rgb,
};
use crate::encode::save_rgba;
use crate::foundation::core::{DEFAULT_TERRAIN, PixelCoord, Rgb8};
use crate::foundation::error::TileAlphaResult;
use crate::key::{ColorKey, TransparencySource};
use crate::sheet::{TileSheet, load_path};
use crate::terrain::{TerrainMask, parse_terrain};

/// Options for one conversion. Unset fields fall back to the legacy defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOpts {
    /// Same-sized image whose black pixels are transparent. Overrides everything else.
    pub mask: Option<PathBuf>,
    /// Where to sample the transparent color.
    pub tcoord: Option<PixelCoord>,
    /// Flat `lx, ly, ux, uy, ...` list of always-opaque regions.
    pub terrain: Option<Vec<i64>>,
    /// Explicit transparent color; wins over `tcoord`.
    pub transparent: Option<Rgb8>,
}

impl ConvertOpts {
    pub fn from_json_path(path: &Path) -> TileAlphaResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options '{}'", path.display()))?;
        let opts = serde_json::from_str(&text)
            .with_context(|| format!("parse options JSON '{}'", path.display()))?;
        Ok(opts)
    }

    pub fn terrain_values(&self) -> &[i64] {
        self.terrain.as_deref().unwrap_or(&DEFAULT_TERRAIN)
    }

    pub fn source(&self) -> TransparencySource {
        TransparencySource::select(self.mask.as_deref(), self.transparent, self.tcoord)
    }

    /// Overlay every field set in `other` on top of `self`.
    pub fn merged_with(mut self, other: ConvertOpts) -> Self {
        if other.mask.is_some() {
            self.mask = other.mask;
        }
        if other.tcoord.is_some() {
            self.tcoord = other.tcoord;
        }
        if other.terrain.is_some() {
            self.terrain = other.terrain;
        }
        if other.transparent.is_some() {
            self.transparent = other.transparent;
        }
        self
    }
}

/// Summary of a finished conversion.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ConvertReport {
    pub width: u32,
    pub height: u32,
    pub indexed: bool,
    pub mode: &'static str,
    pub transparent_pixels: usize,
}

/// Build the RGBA output for an already-loaded sheet.
///
/// With `mask` present the terrain, color and sample options are ignored entirely.
pub fn convert_sheet(
    sheet: &TileSheet,
    mask: Option<&TileSheet>,
    opts: &ConvertOpts,
) -> TileAlphaResult<RgbaBuffer> {
    let (width, height) = sheet.dimensions();

    if let Some(mask) = mask {
        check_mask_dimensions(sheet, mask)?;
        let mut buf = composite_rgb(sheet);
        alpha_from_mask(&mut buf, mask);
        return Ok(buf);
    }

    let boxes = parse_terrain(opts.terrain_values(), width, height)?;
    let source = TransparencySource::select(None, opts.transparent, opts.tcoord);
    let key = ColorKey::resolve(sheet, &source)?;
    let terrain = TerrainMask::build(&boxes, width, height);

    let mut buf = composite_rgb(sheet);
    if let Some(key) = key {
        alpha_from_key(&mut buf, sheet, key, &terrain);
    }
    Ok(buf)
}

/// Load `input`, convert it and write the result to `output`.
///
/// Any failure aborts before the output is written, except a failure while
/// writing itself, which may leave a partial file behind.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn convert_path(
    input: &Path,
    output: &Path,
    opts: &ConvertOpts,
) -> TileAlphaResult<ConvertReport> {
    let sheet = load_path(input)?;
    let source = opts.source();
    tracing::info!(mode = source.mode(), "transparency source selected");

    let mask = match &source {
        TransparencySource::Mask(path) => Some(load_path(path)?),
        TransparencySource::Rgb(_) | TransparencySource::Sample(_) => None,
    };
    let buf = convert_sheet(&sheet, mask.as_ref(), opts)?;
    save_rgba(output, &buf)?;

    let report = ConvertReport {
        width: buf.width,
        height: buf.height,
        indexed: sheet.is_indexed(),
        mode: source.mode(),
        transparent_pixels: buf.transparent_count(),
    };
    tracing::info!(transparent = report.transparent_pixels, "converted");
    Ok(report)
}
