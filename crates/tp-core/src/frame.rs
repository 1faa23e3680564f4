use crate::error::CoreError;

/// A pixel as `(r, g, b, a)`.
pub type Rgba = (u8, u8, u8, u8);

/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// Chaque étape du pipeline produit un nouveau `Bitmap` plutôt que de
/// modifier son entrée.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// let bm = Bitmap::new(10, 10);
/// assert_eq!(bm.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bitmap {
    /// Crée un bitmap transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use tp_core::frame::Bitmap;
    /// let bm = Bitmap::new(100, 50);
    /// assert_eq!(bm.width, 100);
    /// assert_eq!(bm.height, 50);
    /// assert_eq!(bm.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Crée un bitmap rempli d'une seule couleur.
    ///
    /// # Example
    /// ```
    /// use tp_core::frame::Bitmap;
    /// let bm = Bitmap::filled(2, 2, (255, 255, 255, 255));
    /// assert_eq!(bm.pixel(1, 1), (255, 255, 255, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let (r, g, b, a) = color;
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&[r, g, b, a]);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBuffer`] if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a bitmap from 3-channel samples; alpha is set to 255.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBuffer`] if `data.len() != width * height * 3`.
    ///
    /// # Example
    /// ```
    /// use tp_core::frame::Bitmap;
    /// let bm = Bitmap::from_rgb(1, 1, &[10, 20, 30]).unwrap();
    /// assert_eq!(bm.pixel(0, 0), (10, 20, 30, 255));
    /// ```
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CoreError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        let mut rgba = Vec::with_capacity(expected / 3 * 4);
        for px in data.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            data: rgba,
            width,
            height,
        })
    }

    /// Nombre de pixels (`width × height`).
    #[inline]
    #[must_use]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` si l'une des dimensions est nulle.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use tp_core::frame::Bitmap;
    /// let bm = Bitmap::new(10, 10);
    /// assert_eq!(bm.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y). Hors limites : no-op.
    #[inline(always)]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx] = color.0;
        self.data[idx + 1] = color.1;
        self.data[idx + 2] = color.2;
        self.data[idx + 3] = color.3;
    }

    /// Iterate over all pixels in row-major order.
    ///
    /// # Example
    /// ```
    /// use tp_core::frame::Bitmap;
    /// let bm = Bitmap::filled(3, 2, (1, 2, 3, 4));
    /// assert_eq!(bm.pixels().count(), 6);
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| (p[0], p[1], p[2], p[3]))
    }
}
