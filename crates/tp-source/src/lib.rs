/// Image and text sources for textpainter: decoding, encoding, resampling.

pub mod image;
pub mod resize;
pub mod text;
