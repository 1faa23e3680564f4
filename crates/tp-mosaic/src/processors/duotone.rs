use anyhow::Result;
use rayon::prelude::*;
use tp_core::color::{Rgb, brightness, color_distance};
use tp_core::frame::Bitmap;
use tp_core::predicate::{Paintability, Polarity};
use tp_core::traits::Processor;

/// Réduit l'image à deux couleurs séparées par un seuil de luminosité.
///
/// Les pixels du côté `polarity` du seuil prennent `primary`, les autres
/// `secondary` ; l'alpha est conservé.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// use tp_core::predicate::Polarity;
/// use tp_core::traits::Processor;
/// use tp_mosaic::processors::Duotone;
///
/// let duotone = Duotone::new(128.0, Polarity::Below, (0, 0, 128), (255, 255, 0));
/// let out = duotone.process(&Bitmap::filled(2, 2, (30, 30, 30, 255))).unwrap();
/// assert_eq!(out.pixel(0, 0), (0, 0, 128, 255));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Duotone {
    side: Paintability,
    primary: Rgb,
    secondary: Rgb,
}

impl Duotone {
    #[must_use]
    pub fn new(threshold: f64, polarity: Polarity, primary: Rgb, secondary: Rgb) -> Self {
        Self {
            side: Paintability::new(threshold, polarity),
            primary,
            secondary,
        }
    }
}

impl Processor for Duotone {
    fn process(&self, input: &Bitmap) -> Result<Bitmap> {
        log::debug!(
            "duotone : seuil {:.1}, {:?} → {:?}",
            self.side.threshold,
            self.primary,
            self.secondary
        );
        let mut out = input.clone();
        out.data.par_chunks_exact_mut(4).for_each(|px| {
            let (r, g, b) = if self.side.accepts(brightness(px[0], px[1], px[2])) {
                self.primary
            } else {
                self.secondary
            };
            px[0] = r;
            px[1] = g;
            px[2] = b;
        });
        Ok(out)
    }

    /// Peignable si plus proche de la couleur primaire que de la secondaire,
    /// ce qui couvre aussi les mélanges produits par le rééchantillonnage.
    fn is_paintable(&self, r: u8, g: u8, b: u8, _base: &Paintability) -> bool {
        color_distance((r, g, b), self.primary) < color_distance((r, g, b), self.secondary)
    }

    fn name(&self) -> &'static str {
        "duotone"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_split_on_threshold() {
        let mut bm = Bitmap::filled(2, 1, (20, 20, 20, 100));
        bm.put_pixel(1, 0, (230, 230, 230, 255));
        let duotone = Duotone::new(128.0, Polarity::Below, (0, 0, 0), (255, 255, 255));
        let out = duotone.process(&bm).unwrap();
        assert_eq!(out.pixel(0, 0), (0, 0, 0, 100));
        assert_eq!(out.pixel(1, 0), (255, 255, 255, 255));
    }

    #[test]
    fn above_polarity_swaps_sides() {
        let duotone = Duotone::new(128.0, Polarity::Above, (0, 0, 0), (255, 255, 255));
        let out = duotone
            .process(&Bitmap::filled(1, 1, (230, 230, 230, 255)))
            .unwrap();
        assert_eq!(out.pixel(0, 0), (0, 0, 0, 255));
    }

    #[test]
    fn predicate_ignores_base_threshold() {
        let duotone = Duotone::new(128.0, Polarity::Below, (0, 0, 0), (255, 255, 255));
        let base = Paintability::new(0.0, Polarity::Below);
        assert!(duotone.is_paintable(60, 60, 60, &base));
        assert!(!duotone.is_paintable(200, 200, 200, &base));
    }
}
