//! Pré-traitements appliqués à l'image source avant la mise à l'échelle.
//!
//! Chaque processeur transforme l'image et peut redéfinir la règle de
//! peignabilité vue par le scaler et le painter.

pub mod duotone;
pub mod palette;
pub mod passthrough;
pub mod smoothing;

use tp_core::config::ProcessorKind;
use tp_core::predicate::Paintability;
use tp_core::traits::{Predicate, Processor};

pub use duotone::Duotone;
pub use palette::Palette;
pub use passthrough::Passthrough;
pub use smoothing::Smoothing;

/// Instancie le processeur décrit par `kind`.
///
/// `average_brightness` sert de seuil au duotone quand aucun n'est configuré.
///
/// # Example
/// ```
/// use tp_core::config::ProcessorKind;
/// use tp_mosaic::processors::build_processor;
/// let p = build_processor(&ProcessorKind::from_name("smooth").unwrap(), 128.0);
/// assert_eq!(p.name(), "smoothing");
/// ```
#[must_use]
pub fn build_processor(kind: &ProcessorKind, average_brightness: f64) -> Box<dyn Processor> {
    match kind {
        ProcessorKind::Passthrough => Box::new(Passthrough),
        ProcessorKind::Duotone(cfg) => Box::new(Duotone::new(
            cfg.threshold.unwrap_or(average_brightness),
            cfg.polarity,
            cfg.primary,
            cfg.secondary,
        )),
        ProcessorKind::Palette(cfg) => Box::new(Palette::new(cfg.colors.clone())),
        ProcessorKind::Smoothing(cfg) => Box::new(Smoothing::new(cfg.more)),
    }
}

/// Règle de peignabilité d'un processeur, utilisable comme [`Predicate`].
pub struct ProcessorPredicate<'a> {
    pub processor: &'a dyn Processor,
    pub base: Paintability,
}

impl Predicate for ProcessorPredicate<'_> {
    #[inline]
    fn is_paintable(&self, r: u8, g: u8, b: u8) -> bool {
        self.processor.is_paintable(r, g, b, &self.base)
    }
}
