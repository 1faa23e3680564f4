use anyhow::Result;
use tp_core::frame::Bitmap;
use tp_core::traits::Processor;

/// Aucun traitement : l'image est copiée telle quelle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Processor for Passthrough {
    fn process(&self, input: &Bitmap) -> Result<Bitmap> {
        Ok(input.clone())
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::predicate::{Paintability, Polarity};

    #[test]
    fn copy_is_identical_and_predicate_is_base() {
        let mut bm = Bitmap::filled(3, 3, (9, 8, 7, 255));
        bm.put_pixel(1, 1, (200, 0, 0, 10));
        assert_eq!(Passthrough.process(&bm).unwrap(), bm);
        let base = Paintability::new(50.0, Polarity::Above);
        assert!(Passthrough.is_paintable(200, 200, 200, &base));
        assert!(!Passthrough.is_paintable(0, 0, 0, &base));
    }
}
