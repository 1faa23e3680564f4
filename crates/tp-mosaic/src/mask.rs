use rayon::prelude::*;
use tp_core::frame::Bitmap;
use tp_core::traits::Predicate;

/// Aperçu du seuil : pixels peignables en noir, pixels vides en blanc.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_mosaic::mask::paintability_mask;
///
/// let mut bm = Bitmap::filled(2, 1, (20, 20, 20, 255));
/// bm.put_pixel(1, 0, (240, 240, 240, 255));
/// let mask = paintability_mask(&bm, &Paintability::new(128.0, Polarity::Below));
/// assert_eq!(mask.pixel(0, 0), (0, 0, 0, 255));
/// assert_eq!(mask.pixel(1, 0), (255, 255, 255, 255));
/// ```
#[must_use]
pub fn paintability_mask(bitmap: &Bitmap, predicate: &dyn Predicate) -> Bitmap {
    let mut mask = Bitmap::new(bitmap.width, bitmap.height);
    mask.data
        .par_chunks_exact_mut(4)
        .zip(bitmap.data.par_chunks_exact(4))
        .for_each(|(dst, src)| {
            let v = if predicate.is_paintable(src[0], src[1], src[2]) {
                0
            } else {
                255
            };
            dst.copy_from_slice(&[v, v, v, 255]);
        });
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::count_paintable;
    use tp_core::predicate::{Paintability, Polarity};

    #[test]
    fn mask_black_count_matches_paintable_count() {
        let mut bm = Bitmap::filled(7, 5, (250, 250, 250, 255));
        for x in 0..7 {
            bm.put_pixel(x, x % 5, (5, 5, 5, 255));
        }
        let predicate = Paintability::new(128.0, Polarity::Below);
        let mask = paintability_mask(&bm, &predicate);
        let black = mask.pixels().filter(|&p| p == (0, 0, 0, 255)).count();
        assert_eq!(black, count_paintable(&bm, &predicate));
        assert_eq!(black, 7);
    }

    #[test]
    fn above_polarity_inverts_the_mask() {
        let bm = Bitmap::filled(2, 2, (250, 250, 250, 255));
        let mask = paintability_mask(&bm, &Paintability::new(128.0, Polarity::Above));
        assert!(mask.pixels().all(|p| p == (0, 0, 0, 255)));
    }
}
