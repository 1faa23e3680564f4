use std::collections::HashMap;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use tp_core::cell::FontCell;
use tp_core::frame::{Bitmap, Rgba};
use tp_core::traits::GlyphDrawer;

/// Dessine des glyphes TrueType/OpenType sur un canvas RGBA.
///
/// Chaque caractère est rasterisé une fois en carte de couverture de la taille
/// d'une cellule, puis mis en cache. ASCII imprimable et Latin-1 sont
/// pré-calculés ; les autres caractères le sont au premier usage.
pub struct Rasterizer {
    font: FontVec,
    scale: PxScale,
    cell: FontCell,
    /// Couverture 0..=255 par caractère, `cell.width * cell.height` octets.
    glyph_cache: HashMap<char, Vec<u8>>,
}

impl Rasterizer {
    /// Charge une police depuis ses octets.
    ///
    /// `cell = None` mesure la cellule sur la police : avance de 'M' en
    /// largeur, ascent - descent + line gap en hauteur.
    ///
    /// # Errors
    /// Retourne une erreur si la police fournie est invalide.
    pub fn new(font_data: Vec<u8>, scale_px: f32, cell: Option<FontCell>) -> Result<Self> {
        let font = FontVec::try_from_vec(font_data).context("Police invalide")?;
        let scale = PxScale::from(scale_px);
        let cell = match cell {
            Some(cell) => cell,
            None => measure_cell(&font, scale)?,
        };
        log::info!(
            "police chargée : {scale_px}px, cellule {}×{}",
            cell.width,
            cell.height
        );

        let mut rasterizer = Self {
            font,
            scale,
            cell,
            glyph_cache: HashMap::new(),
        };
        rasterizer.cache_charset(32..=126);
        rasterizer.cache_charset(0x00A0..=0x00FF);
        log::debug!("{} glyphes pré-calculés", rasterizer.glyph_cache.len());

        Ok(rasterizer)
    }

    /// Charge une police depuis un fichier.
    ///
    /// # Errors
    /// Retourne une erreur si le fichier est illisible ou la police invalide.
    pub fn from_file(path: &Path, scale_px: f32, cell: Option<FontCell>) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        Self::new(data, scale_px, cell)
    }

    fn cache_charset(&mut self, range: std::ops::RangeInclusive<u32>) {
        for codepoint in range {
            if let Some(ch) = char::from_u32(codepoint) {
                // glyph_id 0 = .notdef, pas de boîte de remplacement
                if self.font.glyph_id(ch).0 == 0 {
                    continue;
                }
                let coverage = self.rasterize(ch);
                self.glyph_cache.insert(ch, coverage);
            }
        }
    }

    fn rasterize(&self, ch: char) -> Vec<u8> {
        let (cw, chh) = (self.cell.width, self.cell.height);
        let mut buffer = vec![0u8; cw as usize * chh as usize];

        let scaled = self.scale.y / self.font.height_unscaled();
        let ascent_px = self.font.ascent_unscaled() * scaled;
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(self.scale, point(0.0, ascent_px));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if px >= 0 && py >= 0 && (px as u32) < cw && (py as u32) < chh {
                    let idx = py as usize * cw as usize + px as usize;
                    buffer[idx] = buffer[idx].max((v * 255.0).round() as u8);
                }
            });
        }
        buffer
    }

    fn coverage(&mut self, ch: char) -> Option<&Vec<u8>> {
        if !self.glyph_cache.contains_key(&ch) {
            if self.font.glyph_id(ch).0 == 0 {
                log::debug!("glyphe absent de la police : {ch:?}");
                return None;
            }
            let coverage = self.rasterize(ch);
            self.glyph_cache.insert(ch, coverage);
        }
        self.glyph_cache.get(&ch)
    }
}

impl GlyphDrawer for Rasterizer {
    fn draw_glyph(&mut self, canvas: &mut Bitmap, x: u32, y: u32, ch: char, fill: Rgba) {
        let cell = self.cell;
        if let Some(coverage) = self.coverage(ch) {
            blit_coverage(canvas, x, y, coverage, cell, fill);
        }
    }
}

fn measure_cell(font: &FontVec, scale: PxScale) -> Result<FontCell> {
    let scaled = scale.y / font.height_unscaled();
    let v_advance =
        font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
    let height = (v_advance * scaled).ceil() as u32;
    let width = (font.h_advance_unscaled(font.glyph_id('M')) * scale.x
        / font.height_unscaled())
    .ceil() as u32;
    Ok(FontCell::new(width.max(1), height.max(1))?)
}

/// Mélange `fill` sur le canvas, pondéré par la couverture et l'alpha de `fill`.
/// Les pixels hors du canvas sont ignorés.
fn blit_coverage(
    canvas: &mut Bitmap,
    x: u32,
    y: u32,
    coverage: &[u8],
    cell: FontCell,
    fill: Rgba,
) {
    let (fr, fg, fb, fa) = fill;
    let fill_alpha = f32::from(fa) / 255.0;
    for cy in 0..cell.height {
        let py = y + cy;
        if py >= canvas.height {
            break;
        }
        for cx in 0..cell.width {
            let px = x + cx;
            if px >= canvas.width {
                break;
            }
            let cov = coverage[(cy * cell.width + cx) as usize];
            if cov == 0 {
                continue;
            }
            let alpha = f32::from(cov) / 255.0 * fill_alpha;
            let (dr, dg, db, da) = canvas.pixel(px, py);
            let mix = |src: u8, dst: u8| {
                (f32::from(src) * alpha + f32::from(dst) * (1.0 - alpha)).round() as u8
            };
            let out_a = (255.0 * alpha + f32::from(da) * (1.0 - alpha)).round() as u8;
            canvas.put_pixel(px, py, (mix(fr, dr), mix(fg, dg), mix(fb, db), out_a));
        }
    }
}
