use crate::foundation::core::BoundingBox;
use crate::foundation::error::{TileAlphaError, TileAlphaResult};

/// Validate a flat `lx, ly, ux, uy, ...` list against a `width x height` image.
///
/// Checks run in order: list length, then for each box its corner ordering and
/// then its extent. The first offending box is reported by index.
pub fn parse_terrain(values: &[i64], width: u32, height: u32) -> TileAlphaResult<Vec<BoundingBox>> {
    if values.len() % 4 != 0 {
        return Err(TileAlphaError::MalformedTerrain { len: values.len() });
    }

    let mut boxes = Vec::with_capacity(values.len() / 4);
    for (index, chunk) in values.chunks_exact(4).enumerate() {
        let bbox = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let [lx, ly, ux, uy] = bbox;
        if lx > ux || ly > uy {
            return Err(TileAlphaError::InvalidGeometry { index, bbox });
        }
        if lx < 0 || ly < 0 || ux > i64::from(width) || uy > i64::from(height) {
            return Err(TileAlphaError::BoxOutOfBounds {
                index,
                bbox,
                width,
                height,
            });
        }
        // Every value is now within 0..=u32::MAX.
        boxes.push(BoundingBox {
            low_x: lx as u32,
            low_y: ly as u32,
            high_x: ux as u32,
            high_y: uy as u32,
        });
    }
    Ok(boxes)
}

/// Per-pixel terrain classification.
///
/// A pixel is terrain (always opaque) when any box contains it; every other pixel
/// is a candidate for color-keyed transparency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainMask {
    width: u32,
    height: u32,
    non_terrain: Vec<bool>,
}

impl TerrainMask {
    #[tracing::instrument(skip(boxes), fields(box_count = boxes.len()))]
    pub fn build(boxes: &[BoundingBox], width: u32, height: u32) -> Self {
        let mut non_terrain = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                non_terrain.push(boxes.iter().all(|b| !b.contains(x, y)));
            }
        }
        let mask = Self {
            width,
            height,
            non_terrain,
        };
        tracing::debug!(terrain = mask.terrain_count(), "terrain mask built");
        mask
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_non_terrain(&self, x: u32, y: u32) -> bool {
        self.non_terrain[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels forced opaque.
    pub fn terrain_count(&self) -> usize {
        self.non_terrain.iter().filter(|&&n| !n).count()
    }
}
