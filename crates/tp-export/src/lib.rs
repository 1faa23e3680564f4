//! Rasterisation des glyphes sur le canvas de sortie.

pub mod rasterizer;

pub use rasterizer::Rasterizer;
