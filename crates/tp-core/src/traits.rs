use crate::frame::{Bitmap, Rgba};
use crate::predicate::Paintability;

/// Décide si un pixel reçoit un caractère.
///
/// Partagé par le Scaler et le Painter. Doit être pur.
///
/// # Example
/// ```
/// use tp_core::traits::Predicate;
///
/// struct RedOnly;
/// impl Predicate for RedOnly {
///     fn is_paintable(&self, r: u8, g: u8, b: u8) -> bool { r > 0 && g == 0 && b == 0 }
/// }
/// assert!(RedOnly.is_paintable(255, 0, 0));
/// ```
pub trait Predicate: Send + Sync {
    /// `true` si le pixel `(r, g, b)` doit être peint. L'alpha est ignoré.
    fn is_paintable(&self, r: u8, g: u8, b: u8) -> bool;
}

/// Pré-traitement d'image appliqué avant la mise à l'échelle.
///
/// Implémenté par : `Passthrough`, `Duotone`, `Palette`, `Smoothing`
/// (`tp_mosaic::processors`).
///
/// # Example
/// ```
/// use tp_core::traits::Processor;
/// use tp_core::frame::Bitmap;
///
/// struct Identity;
/// impl Processor for Identity {
///     fn process(&self, input: &Bitmap) -> anyhow::Result<Bitmap> { Ok(input.clone()) }
///     fn name(&self) -> &'static str { "identity" }
/// }
/// ```
pub trait Processor: Send + Sync {
    /// Produit une nouvelle image à partir de `input`.
    ///
    /// # Errors
    /// Implementation specific.
    fn process(&self, input: &Bitmap) -> anyhow::Result<Bitmap>;

    /// Paintability of a processed pixel. Defaults to the base threshold rule.
    fn is_paintable(&self, r: u8, g: u8, b: u8, base: &Paintability) -> bool {
        base.is_paintable(r, g, b)
    }

    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;
}

/// Dessine un caractère dans une cellule du canvas.
///
/// `(x, y)` est le coin supérieur gauche de la cellule. Les pixels hors du
/// canvas sont ignorés.
///
/// # Example
/// ```
/// use tp_core::traits::GlyphDrawer;
/// use tp_core::frame::{Bitmap, Rgba};
///
/// struct Dot;
/// impl GlyphDrawer for Dot {
///     fn draw_glyph(&mut self, canvas: &mut Bitmap, x: u32, y: u32, _ch: char, fill: Rgba) {
///         canvas.put_pixel(x, y, fill);
///     }
/// }
/// let mut canvas = Bitmap::new(4, 4);
/// Dot.draw_glyph(&mut canvas, 1, 1, 'a', (9, 9, 9, 255));
/// assert_eq!(canvas.pixel(1, 1), (9, 9, 9, 255));
/// ```
pub trait GlyphDrawer {
    /// Dessine `ch` avec la couleur `fill` à la position `(x, y)`.
    fn draw_glyph(&mut self, canvas: &mut Bitmap, x: u32, y: u32, ch: char, fill: Rgba);
}
