//! Moteur de mosaïque textuelle : mise à l'échelle, rendu, pré-traitements.
//!
//! Le pipeline est `Processor → Scaler → Painter`, la même règle de
//! peignabilité étant partagée par le scaler et le painter.

pub mod mask;
pub mod painter;
pub mod processors;
pub mod scaler;

pub use painter::{Painted, Painter, render_text_grid};
pub use scaler::{ScaleOutcome, ScaleReport, Scaled, Scaler};
