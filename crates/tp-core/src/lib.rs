/// Configuration, types, and shared structures for textpainter.
///
/// This crate contains the bitmap, color, predicate and configuration types
/// shared across the textpainter workspace.

pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod predicate;
pub mod traits;

pub use cell::{FontCell, Margin};
pub use config::MosaicConfig;
pub use error::CoreError;
pub use frame::{Bitmap, Rgba};
pub use predicate::{Paintability, Polarity};
pub use traits::{GlyphDrawer, Predicate, Processor};
