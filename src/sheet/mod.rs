pub mod decode;
pub mod model;

pub use decode::{decode_bytes, load_path};
pub use model::{Palette, TileSheet};
