use anyhow::Result;
use tp_core::cell::{FontCell, Margin, canvas_dimensions};
use tp_core::color::{Rgb, WHITE};
use tp_core::config::{MosaicConfig, TextOverflow};
use tp_core::frame::Bitmap;
use tp_core::traits::{GlyphDrawer, Predicate};

/// Résultat d'un rendu : le canvas et ses compteurs.
pub struct Painted {
    pub canvas: Bitmap,
    /// Glyphes effectivement dessinés.
    pub glyphs: usize,
    /// Pixels non peignables, laissés au fond.
    pub empty_cells: usize,
}

/// Curseur de texte : cycle ou s'arrête à la fin selon la politique.
struct TextCursor<'a> {
    text: &'a str,
    chars: std::str::Chars<'a>,
    overflow: TextOverflow,
    exhausted: bool,
}

impl<'a> TextCursor<'a> {
    fn new(text: &'a str, overflow: TextOverflow) -> Self {
        Self {
            text,
            chars: text.chars(),
            overflow,
            exhausted: text.is_empty(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        if self.exhausted {
            return None;
        }
        if let Some(ch) = self.chars.next() {
            return Some(ch);
        }
        match self.overflow {
            TextOverflow::Repeat => {
                self.chars = self.text.chars();
                self.chars.next()
            }
            TextOverflow::Truncate => {
                self.exhausted = true;
                None
            }
        }
    }
}

/// Dessine le texte sur les pixels peignables d'un bitmap mis à l'échelle.
///
/// # Example
/// ```
/// use tp_core::cell::{FontCell, Margin};
/// use tp_core::frame::{Bitmap, Rgba};
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_core::traits::GlyphDrawer;
/// use tp_mosaic::painter::Painter;
///
/// struct Count(usize);
/// impl GlyphDrawer for Count {
///     fn draw_glyph(&mut self, _: &mut Bitmap, _: u32, _: u32, _: char, _: Rgba) { self.0 += 1; }
/// }
///
/// let painter = Painter::new(FontCell::new(9, 19).unwrap(), Margin::default());
/// let bitmap = Bitmap::filled(3, 2, (0, 0, 0, 255));
/// let mut drawer = Count(0);
/// let painted = painter
///     .paint("hi", &bitmap, &Paintability::new(100.0, Polarity::Below), &mut drawer)
///     .unwrap();
/// assert_eq!(drawer.0, 6);
/// assert_eq!((painted.canvas.width, painted.canvas.height), (27, 38));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    pub cell: FontCell,
    pub margin: Margin,
    pub background: Rgb,
    pub overflow: TextOverflow,
}

impl Painter {
    /// White background, repeating text.
    #[must_use]
    pub fn new(cell: FontCell, margin: Margin) -> Self {
        Self {
            cell,
            margin,
            background: WHITE,
            overflow: TextOverflow::Repeat,
        }
    }

    /// Build a painter from the config's cell, margin, background and overflow policy.
    ///
    /// # Errors
    /// Returns an error if the configured cell has a zero side.
    pub fn from_config(config: &MosaicConfig) -> Result<Self> {
        Ok(Self {
            cell: config.font_cell()?,
            margin: config.margin(),
            background: config.background,
            overflow: config.overflow,
        })
    }

    /// Parcourt `bitmap` ligne par ligne et dessine un caractère par pixel peignable.
    ///
    /// # Errors
    /// Returns an error if the canvas dimensions overflow.
    pub fn paint(
        &self,
        text: &str,
        bitmap: &Bitmap,
        predicate: &dyn Predicate,
        drawer: &mut dyn GlyphDrawer,
    ) -> Result<Painted> {
        let (width, height) =
            canvas_dimensions(bitmap.width, bitmap.height, self.cell, self.margin)?;
        let (br, bg, bb) = self.background;
        let mut canvas = Bitmap::filled(width, height, (br, bg, bb, 255));
        log::info!(
            "rendu {}×{} cellules sur un canvas {width}×{height}",
            bitmap.width,
            bitmap.height
        );

        if text.is_empty() {
            log::warn!("texte vide : aucun glyphe dessiné");
        }

        let mut cursor = TextCursor::new(text, self.overflow);
        let mut glyphs = 0;
        let mut empty_cells = 0;
        let mut skipped = 0;

        let mut y = self.margin.y;
        for row in 0..bitmap.height {
            let mut x = self.margin.x;
            for col in 0..bitmap.width {
                let (r, g, b, a) = bitmap.pixel(col, row);
                if predicate.is_paintable(r, g, b) {
                    if let Some(ch) = cursor.next_char() {
                        drawer.draw_glyph(&mut canvas, x, y, ch, (r, g, b, a));
                        glyphs += 1;
                    } else {
                        skipped += 1;
                    }
                } else {
                    empty_cells += 1;
                }
                x += self.cell.width;
            }
            y += self.cell.height;
        }

        if skipped > 0 && !text.is_empty() {
            log::warn!("texte épuisé : {skipped} cellules peignables laissées vides");
        }
        log::debug!("{glyphs} glyphes dessinés, {empty_cells} cellules vides");

        Ok(Painted {
            canvas,
            glyphs,
            empty_cells,
        })
    }
}

/// Version texte du rendu : un caractère par pixel peignable, une espace sinon,
/// un saut de ligne après chaque rangée.
///
/// # Example
/// ```
/// use tp_core::config::TextOverflow;
/// use tp_core::frame::Bitmap;
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_mosaic::painter::render_text_grid;
///
/// let mut bitmap = Bitmap::filled(3, 2, (0, 0, 0, 255));
/// bitmap.put_pixel(1, 0, (255, 255, 255, 255));
/// let grid = render_text_grid(
///     "abc",
///     &bitmap,
///     &Paintability::new(100.0, Polarity::Below),
///     TextOverflow::Repeat,
/// );
/// assert_eq!(grid, "a b\ncab\n");
/// ```
#[must_use]
pub fn render_text_grid(
    text: &str,
    bitmap: &Bitmap,
    predicate: &dyn Predicate,
    overflow: TextOverflow,
) -> String {
    let mut cursor = TextCursor::new(text, overflow);
    let mut out = String::with_capacity((bitmap.width as usize + 1) * bitmap.height as usize);
    for row in 0..bitmap.height {
        for col in 0..bitmap.width {
            let (r, g, b, _) = bitmap.pixel(col, row);
            let ch = if predicate.is_paintable(r, g, b) {
                cursor.next_char().unwrap_or(' ')
            } else {
                ' '
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
