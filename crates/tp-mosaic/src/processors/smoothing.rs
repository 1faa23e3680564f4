use anyhow::Result;
use rayon::prelude::*;
use tp_core::frame::Bitmap;
use tp_core::traits::Processor;

#[rustfmt::skip]
static SMOOTH: [u32; 9] = [
    1, 1, 1,
    1, 5, 1,
    1, 1, 1,
];

#[rustfmt::skip]
static SMOOTH_MORE: [u32; 25] = [
    1, 1,  1, 1, 1,
    1, 5,  5, 5, 1,
    1, 5, 44, 5, 1,
    1, 5,  5, 5, 1,
    1, 1,  1, 1, 1,
];

/// Lissage par convolution, bords répliqués.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// use tp_core::traits::Processor;
/// use tp_mosaic::processors::Smoothing;
///
/// let flat = Bitmap::filled(4, 4, (90, 90, 90, 255));
/// assert_eq!(Smoothing::new(true).process(&flat).unwrap(), flat);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Smoothing {
    more: bool,
}

impl Smoothing {
    /// `more` sélectionne le noyau 5×5.
    #[must_use]
    pub fn new(more: bool) -> Self {
        Self { more }
    }

    fn kernel(&self) -> (&'static [u32], i64) {
        if self.more {
            (SMOOTH_MORE.as_slice(), 5)
        } else {
            (SMOOTH.as_slice(), 3)
        }
    }
}

impl Processor for Smoothing {
    fn process(&self, input: &Bitmap) -> Result<Bitmap> {
        let mut out = input.clone();
        if input.is_empty() {
            return Ok(out);
        }
        let (kernel, size) = self.kernel();
        let total: u32 = kernel.iter().sum();
        let radius = size / 2;
        let width = i64::from(input.width);
        let height = i64::from(input.height);
        log::debug!("lissage {size}×{size} sur {}×{}", input.width, input.height);

        out.data
            .par_chunks_exact_mut(input.width as usize * 4)
            .enumerate()
            .for_each(|(y, row)| {
                let y = y as i64;
                for x in 0..width {
                    let mut acc = [0u32; 3];
                    for (k, weight) in kernel.iter().enumerate() {
                        let k = k as i64;
                        let sx = (x + k % size - radius).clamp(0, width - 1);
                        let sy = (y + k / size - radius).clamp(0, height - 1);
                        let (r, g, b, _) = input.pixel(sx as u32, sy as u32);
                        acc[0] += u32::from(r) * weight;
                        acc[1] += u32::from(g) * weight;
                        acc[2] += u32::from(b) * weight;
                    }
                    let offset = x as usize * 4;
                    for (c, sum) in acc.into_iter().enumerate() {
                        row[offset + c] = ((sum + total / 2) / total) as u8;
                    }
                }
            });
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "smoothing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_have_expected_sums() {
        assert_eq!(SMOOTH.iter().sum::<u32>(), 13);
        assert_eq!(SMOOTH_MORE.iter().sum::<u32>(), 100);
    }

    #[test]
    fn single_dot_is_spread_by_weights() {
        let mut bm = Bitmap::filled(3, 3, (0, 0, 0, 255));
        bm.put_pixel(1, 1, (130, 130, 130, 255));
        let out = Smoothing::new(false).process(&bm).unwrap();
        assert_eq!(out.pixel(1, 1), (50, 50, 50, 255));
        assert_eq!(out.pixel(0, 0), (10, 10, 10, 255));
    }

    #[test]
    fn edges_are_clamped() {
        let mut bm = Bitmap::filled(5, 1, (0, 0, 0, 255));
        bm.put_pixel(0, 0, (100, 100, 100, 7));
        let out = Smoothing::new(true).process(&bm).unwrap();
        // la colonne 0 est répliquée au-delà du bord gauche
        let (r, _, _, a) = out.pixel(0, 0);
        assert_eq!(r, 78);
        assert_eq!(a, 7);
    }

    #[test]
    fn output_keeps_dimensions() {
        let bm = Bitmap::filled(7, 2, (1, 2, 3, 255));
        let out = Smoothing::new(false).process(&bm).unwrap();
        assert_eq!((out.width, out.height), (7, 2));
        assert_eq!(out, bm);
    }
}
