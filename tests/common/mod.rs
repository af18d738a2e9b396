#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tilealpha_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_indexed_png(
    path: &Path,
    width: u32,
    height: u32,
    palette: &[[u8; 3]],
    indices: &[u8],
) {
    let f = std::fs::File::create(path).unwrap();
    let mut enc = png::Encoder::new(std::io::BufWriter::new(f), width, height);
    enc.set_color(png::ColorType::Indexed);
    enc.set_depth(png::BitDepth::Eight);
    enc.set_palette(palette.concat());
    let mut writer = enc.write_header().unwrap();
    writer.write_image_data(indices).unwrap();
}

/// Uncompressed 8-bit BMP, bottom-up rows padded to 4 bytes.
pub fn write_indexed_bmp(
    path: &Path,
    width: u32,
    height: u32,
    palette: &[[u8; 3]],
    indices: &[u8],
) {
    write_packed_bmp(path, width, height, 8, palette, indices);
}

/// Uncompressed BMP at 1, 4 or 8 bits per pixel. Sub-byte rows are packed MSB-first.
pub fn write_packed_bmp(
    path: &Path,
    width: u32,
    height: u32,
    bpp: u16,
    palette: &[[u8; 3]],
    indices: &[u8],
) {
    let bpp_bits = bpp as usize;
    let row_size = ((width as usize * bpp_bits).div_ceil(8) + 3) & !3;
    let palette_size = palette.len() * 4;
    let data_offset = 14 + 40 + palette_size;
    let image_size = row_size * height as usize;

    let mut out = Vec::with_capacity(data_offset + image_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((data_offset + image_size) as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for &[r, g, b] in palette {
        out.extend_from_slice(&[b, g, r, 0]);
    }
    for row in indices.chunks(width as usize).rev() {
        let mut line = vec![0u8; row_size];
        for (x, &index) in row.iter().enumerate() {
            let bit = x * bpp_bits;
            line[bit / 8] |= index << (8 - bpp_bits - bit % 8);
        }
        out.extend_from_slice(&line);
    }
    std::fs::write(path, out).unwrap();
}

pub fn write_rgb_png(path: &Path, width: u32, height: u32, rgb: &[[u8; 3]]) {
    let img = image::RgbImage::from_raw(width, height, rgb.concat()).unwrap();
    img.save(path).unwrap();
}

pub fn read_rgba(path: &Path) -> image::RgbaImage {
    image::open(path).unwrap().to_rgba8()
}

pub fn alpha_at(img: &image::RgbaImage, x: u32, y: u32) -> u8 {
    img.get_pixel(x, y).0[3]
}
