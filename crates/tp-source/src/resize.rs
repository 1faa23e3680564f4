use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use tp_core::config::ResampleFilter;
use tp_core::error::CoreError;
use tp_core::frame::{Bitmap, Rgba};

/// Resizer réutilisable wrappant fast_image_resize.
///
/// L'alpha n'est pas prémultiplié : un pixel transparent garde sa couleur,
/// et donc sa luminosité.
///
/// # Example
/// ```
/// use tp_source::resize::Resizer;
/// use tp_core::config::ResampleFilter;
/// let r = Resizer::new(ResampleFilter::Box);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

fn resize_alg(filter: ResampleFilter) -> ResizeAlg {
    match filter {
        ResampleFilter::Nearest => ResizeAlg::Nearest,
        ResampleFilter::Box => ResizeAlg::Convolution(FilterType::Box),
        ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

impl Resizer {
    /// Create a new resizer using `filter` for every call.
    #[must_use]
    pub fn new(filter: ResampleFilter) -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new()
                .resize_alg(resize_alg(filter))
                .use_alpha(false),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if either bitmap has a zero dimension or the resize fails.
    ///
    /// # Example
    /// ```
    /// use tp_source::resize::Resizer;
    /// use tp_core::config::ResampleFilter;
    /// use tp_core::frame::Bitmap;
    /// let mut r = Resizer::new(ResampleFilter::Box);
    /// let src = Bitmap::new(100, 100);
    /// let mut dst = Bitmap::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &Bitmap, dst: &mut Bitmap) -> Result<()> {
        if src.is_empty() {
            return Err(CoreError::InvalidDimensions {
                width: src.width,
                height: src.height,
            }
            .into());
        }
        if dst.is_empty() {
            return Err(CoreError::InvalidDimensions {
                width: dst.width,
                height: dst.height,
            }
            .into());
        }
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // fast_image_resize exige &mut sur la source
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }

    /// Resize `src` to a new `width × height` bitmap.
    ///
    /// # Errors
    /// Same as [`Resizer::resize_into`].
    ///
    /// # Example
    /// ```
    /// use tp_source::resize::Resizer;
    /// use tp_core::config::ResampleFilter;
    /// use tp_core::frame::Bitmap;
    /// let mut r = Resizer::new(ResampleFilter::Bilinear);
    /// let out = r.resize(&Bitmap::new(10, 4), 7, 3).unwrap();
    /// assert_eq!((out.width, out.height), (7, 3));
    /// assert_eq!(out.data.len(), 7 * 3 * 4);
    /// ```
    pub fn resize(&mut self, src: &Bitmap, width: u32, height: u32) -> Result<Bitmap> {
        let mut dst = Bitmap::new(width, height);
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResampleFilter::default())
    }
}

/// Couleur moyenne de l'image : réduction par moyenne de surface à 1×1.
///
/// # Errors
/// Returns an error if `src` has a zero dimension.
///
/// # Example
/// ```
/// use tp_source::resize::average_color;
/// use tp_core::frame::Bitmap;
/// let bm = Bitmap::filled(8, 8, (40, 80, 120, 255));
/// let (r, g, b, _) = average_color(&bm).unwrap();
/// assert!(r.abs_diff(40) <= 1 && g.abs_diff(80) <= 1 && b.abs_diff(120) <= 1);
/// ```
pub fn average_color(src: &Bitmap) -> Result<Rgba> {
    let average = Resizer::new(ResampleFilter::Box).resize(src, 1, 1)?;
    Ok(average.pixel(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_black_white(width: u32, height: u32) -> Bitmap {
        let mut bm = Bitmap::filled(width, height, (255, 255, 255, 255));
        for y in 0..height {
            for x in 0..width / 2 {
                bm.put_pixel(x, y, (0, 0, 0, 255));
            }
        }
        bm
    }

    #[test]
    fn output_has_exact_pixel_count() {
        let src = split_black_white(33, 17);
        let mut resizer = Resizer::new(ResampleFilter::Box);
        for (w, h) in [(1, 1), (5, 40), (70, 3), (33, 17), (100, 100)] {
            let out = resizer.resize(&src, w, h).unwrap();
            assert_eq!(out.data.len(), w as usize * h as usize * 4);
        }
    }

    #[test]
    fn resize_is_deterministic() {
        let src = split_black_white(40, 30);
        let mut resizer = Resizer::new(ResampleFilter::Bilinear);
        let a = resizer.resize(&src, 23, 11).unwrap();
        let b = resizer.resize(&src, 23, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn same_size_is_a_copy() {
        let src = split_black_white(6, 6);
        let out = Resizer::new(ResampleFilter::Lanczos3).resize(&src, 6, 6).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let src = Bitmap::new(4, 4);
        let mut resizer = Resizer::new(ResampleFilter::Box);
        assert!(resizer.resize(&src, 0, 3).is_err());
        assert!(resizer.resize(&Bitmap::new(0, 0), 3, 3).is_err());
    }

    #[test]
    fn average_of_half_black_half_white_is_mid_gray() {
        let (r, g, b, _) = average_color(&split_black_white(10, 10)).unwrap();
        for v in [r, g, b] {
            assert!((125..=130).contains(&v), "moyenne inattendue : {v}");
        }
    }

    #[test]
    fn transparent_pixels_keep_their_color() {
        let src = Bitmap::filled(4, 4, (200, 200, 200, 0));
        let out = Resizer::new(ResampleFilter::Box).resize(&src, 2, 2).unwrap();
        let (r, _, _, a) = out.pixel(0, 0);
        assert!(r.abs_diff(200) <= 1);
        assert_eq!(a, 0);
    }
}
