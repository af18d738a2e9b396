use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::ImageDecoder;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{TileAlphaError, TileAlphaResult};
use crate::sheet::model::{Palette, TileSheet};

/// Read and decode a tile sheet from disk. The format is sniffed from the file content.
pub fn load_path(path: &Path) -> TileAlphaResult<TileSheet> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let sheet = decode_bytes(&bytes).map_err(|e| match e {
        TileAlphaError::Image(_) | TileAlphaError::Png(_) => TileAlphaError::Other(
            anyhow::Error::new(e).context(format!("decode image '{}'", path.display())),
        ),
        other => other,
    })?;
    tracing::debug!(
        path = %path.display(),
        width = sheet.width(),
        height = sheet.height(),
        indexed = sheet.is_indexed(),
        palette_len = ?sheet.palette().map(|p| p.0.len()),
        "loaded sheet"
    );
    Ok(sheet)
}

/// Decode an in-memory image.
///
/// Palette images (PNG and BMP) keep their raw indices and color table; everything
/// else is flattened to RGB with any source alpha dropped.
pub fn decode_bytes(bytes: &[u8]) -> TileAlphaResult<TileSheet> {
    let format = image::guess_format(bytes)?;
    let indexed = match format {
        image::ImageFormat::Png => decode_indexed_png(bytes)?,
        image::ImageFormat::Bmp => decode_indexed_bmp(bytes)?,
        _ => None,
    };
    match indexed {
        Some(sheet) => Ok(sheet),
        None => decode_direct(bytes, format),
    }
}

// GIF, TGA and ICO palette images land here too and are compared by color, not index.
fn decode_direct(bytes: &[u8], format: image::ImageFormat) -> TileAlphaResult<TileSheet> {
    let rgb = image::load_from_memory_with_format(bytes, format)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| Rgb8::from(p.0)).collect();
    TileSheet::direct(width, height, pixels)
}

fn decode_indexed_png(bytes: &[u8]) -> TileAlphaResult<Option<TileSheet>> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let info = reader.info();
    if info.color_type != png::ColorType::Indexed {
        return Ok(None);
    }
    let (width, height) = (info.width, info.height);
    let depth = match info.bit_depth {
        png::BitDepth::One => 1,
        png::BitDepth::Two => 2,
        png::BitDepth::Four => 4,
        png::BitDepth::Eight => 8,
        png::BitDepth::Sixteen => {
            return Err(TileAlphaError::sheet("16-bit palette PNG is not valid"));
        }
    };
    let palette = info
        .palette
        .as_deref()
        .map(Palette::from_flat)
        .ok_or_else(|| TileAlphaError::sheet("indexed PNG has no PLTE chunk"))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let indices = unpack_indices(&buf, frame.line_size, width, height, depth);
    TileSheet::indexed(width, height, indices, palette).map(Some)
}

fn decode_indexed_bmp(bytes: &[u8]) -> TileAlphaResult<Option<TileSheet>> {
    let Some(header) = BmpHeader::parse(bytes) else {
        return Ok(None);
    };
    // RLE data is left to the RGB path.
    if header.compressed || header.bit_depth > 8 {
        return Ok(None);
    }

    let mut decoder = image::codecs::bmp::BmpDecoder::new(Cursor::new(bytes))?;
    decoder.set_indexed_color(true);
    let Some(palette) = decoder.get_palette().map(|p| p.to_vec()) else {
        return Ok(None);
    };
    let palette = Palette(palette.into_iter().map(Rgb8::from).collect());

    let (width, height) = decoder.dimensions();
    let mut buf = vec![0; decoder.total_bytes() as usize];
    decoder.read_image(&mut buf)?;
    // Sub-byte depths come back packed at the start of each `width`-byte row.
    let indices = unpack_indices(&buf, width as usize, width, height, header.bit_depth);
    TileSheet::indexed(width, height, indices, palette).map(Some)
}

/// The few BMP header fields the decoder does not expose.
struct BmpHeader {
    bit_depth: u8,
    compressed: bool,
}

impl BmpHeader {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let u16_at = |at: usize| bytes.get(at..at + 2).map(|b| u16::from_le_bytes([b[0], b[1]]));
        let u32_at = |at: usize| {
            bytes
                .get(at..at + 4)
                .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        };

        let info_size = u32_at(14)?;
        // OS/2 core headers keep 16-bit dimensions and have no compression field.
        let (bit_depth, compression) = if info_size == 12 {
            (u16_at(24)?, 0)
        } else {
            (u16_at(28)?, u32_at(30)?)
        };
        Some(Self {
            bit_depth: u8::try_from(bit_depth).ok()?,
            compressed: compression != 0,
        })
    }
}

/// Expand packed scanlines (MSB-first, `depth` bits per pixel) to one index per byte.
fn unpack_indices(buf: &[u8], line_size: usize, width: u32, height: u32, depth: u8) -> Vec<u8> {
    let (width, height) = (width as usize, height as usize);
    if depth == 8 {
        return buf
            .chunks(line_size)
            .take(height)
            .flat_map(|row| row[..width].iter().copied())
            .collect();
    }

    let depth = usize::from(depth);
    let mask = (1u8 << depth) - 1;
    let mut out = Vec::with_capacity(width * height);
    for row in buf.chunks(line_size).take(height) {
        for x in 0..width {
            let bit = x * depth;
            let shift = 8 - depth - bit % 8;
            out.push((row[bit / 8] >> shift) & mask);
        }
    }
    out
}
