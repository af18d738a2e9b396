use std::path::Path;

use anyhow::Context;

use crate::composite::RgbaBuffer;
use crate::foundation::error::TileAlphaResult;

/// Write `buf` as an RGBA image. The format follows the extension of `path`.
#[tracing::instrument(
    skip_all,
    fields(path = %path.display(), width = buf.width, height = buf.height)
)]
pub fn save_rgba(path: &Path, buf: &RgbaBuffer) -> TileAlphaResult<()> {
    let format = image::ImageFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &buf.data,
        buf.width,
        buf.height,
        image::ColorType::Rgba8,
        format,
    )
    .with_context(|| format!("write {format:?} '{}'", path.display()))?;

    tracing::info!(?format, "saved");
    Ok(())
}
