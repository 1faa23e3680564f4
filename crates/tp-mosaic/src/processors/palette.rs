use anyhow::Result;
use rayon::prelude::*;
use tp_core::color::{Rgb, brightness, closest_color};
use tp_core::frame::Bitmap;
use tp_core::predicate::Paintability;
use tp_core::traits::Processor;

/// Remplace chaque pixel par la couleur la plus proche de la palette.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// use tp_core::traits::Processor;
/// use tp_mosaic::processors::Palette;
///
/// let palette = Palette::new(vec![(255, 0, 0), (0, 0, 255)]);
/// let out = palette.process(&Bitmap::filled(1, 1, (200, 30, 60, 255))).unwrap();
/// assert_eq!(out.pixel(0, 0), (255, 0, 0, 255));
/// ```
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    #[must_use]
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            log::warn!("palette vide : l'image ne sera pas modifiée");
        }
        Self { colors }
    }
}

impl Processor for Palette {
    fn process(&self, input: &Bitmap) -> Result<Bitmap> {
        log::debug!("palette de {} couleurs", self.colors.len());
        let mut out = input.clone();
        out.data.par_chunks_exact_mut(4).for_each(|px| {
            let (r, g, b) = closest_color((px[0], px[1], px[2]), &self.colors);
            px[0] = r;
            px[1] = g;
            px[2] = b;
        });
        Ok(out)
    }

    /// La règle de base, appliquée à la couleur de palette la plus proche.
    fn is_paintable(&self, r: u8, g: u8, b: u8, base: &Paintability) -> bool {
        let (r, g, b) = closest_color((r, g, b), &self.colors);
        base.accepts(brightness(r, g, b))
    }

    fn name(&self) -> &'static str {
        "palette"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::predicate::Polarity;

    #[test]
    fn every_output_pixel_is_a_palette_color() {
        let colors = vec![(0, 0, 0), (128, 128, 128), (255, 255, 255)];
        let mut bm = Bitmap::new(16, 1);
        for x in 0..16u32 {
            let v = (x * 16) as u8;
            bm.put_pixel(x, 0, (v, v, v, 255));
        }
        let out = Palette::new(colors.clone()).process(&bm).unwrap();
        assert!(out.pixels().all(|(r, g, b, _)| colors.contains(&(r, g, b))));
    }

    #[test]
    fn predicate_uses_closest_color() {
        let palette = Palette::new(vec![(0, 0, 0), (255, 255, 255)]);
        let base = Paintability::new(200.0, Polarity::Below);
        // sous le seuil, mais plus proche du blanc
        assert!(!palette.is_paintable(150, 150, 150, &base));
        assert!(palette.is_paintable(100, 100, 100, &base));
    }
}
