use anyhow::Result;
use rayon::prelude::*;
use tp_core::cell::FontCell;
use tp_core::config::ResampleFilter;
use tp_core::frame::Bitmap;
use tp_core::traits::Predicate;
use tp_source::resize::Resizer;

/// Itérations par défaut de la boucle de convergence.
pub const DEFAULT_MAX_ITERATIONS: u32 = 40;

/// Au-delà, un candidat n'est plus rééchantillonné (64 Mpx).
pub const MAX_CELLS: u64 = 1 << 26;

/// Comment la boucle de convergence s'est arrêtée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// La taille corrigée pour l'aspect convenait déjà.
    AlreadyFit,
    /// `|peints - texte| < largeur`.
    Converged,
    /// Les dimensions ne changent plus d'une itération à l'autre.
    FixedPoint,
    /// Aucun pixel peignable : le ratio ne peut pas converger.
    NoPaintablePixels,
    /// Le candidat suivant dépasserait [`MAX_CELLS`].
    SizeLimit,
    /// Plafond d'itérations atteint.
    IterationCap,
    /// Texte vide : seule la correction d'aspect est appliquée.
    EmptyText,
    /// Image source de surface nulle, rendue telle quelle.
    EmptySource,
}

/// Résumé d'un appel à [`Scaler::scale`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleReport {
    /// Dimensions après correction d'aspect.
    pub aspect_size: (u32, u32),
    /// Itérations de la boucle de convergence.
    pub iterations: u32,
    /// Raison de l'arrêt.
    pub outcome: ScaleOutcome,
    /// Pixels peignables de l'image retournée.
    pub paintable: usize,
    /// Nombre de caractères du texte.
    pub text_len: usize,
}

/// Image mise à l'échelle et son rapport.
pub struct Scaled {
    pub bitmap: Bitmap,
    pub report: ScaleReport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    width: u32,
    height: u32,
    paintable: usize,
}

impl Candidate {
    fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn deviation(&self, text_len: usize) -> usize {
        self.paintable.abs_diff(text_len)
    }

    /// One line of slack: the deviation is smaller than the width.
    fn within_slack(&self, text_len: usize) -> bool {
        self.deviation(text_len) < self.width as usize
    }
}

/// Count pixels accepted by `predicate`.
///
/// # Example
/// ```
/// use tp_core::frame::Bitmap;
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_mosaic::scaler::count_paintable;
/// let bm = Bitmap::filled(4, 3, (0, 0, 0, 255));
/// assert_eq!(count_paintable(&bm, &Paintability::new(10.0, Polarity::Below)), 12);
/// ```
#[must_use]
pub fn count_paintable(bitmap: &Bitmap, predicate: &dyn Predicate) -> usize {
    bitmap
        .data
        .par_chunks_exact(4)
        .filter(|p| predicate.is_paintable(p[0], p[1], p[2]))
        .count()
}

/// Widen the image so square pixels end up as `cell`-shaped characters.
///
/// # Example
/// ```
/// use tp_core::cell::FontCell;
/// use tp_mosaic::scaler::aspect_corrected_size;
/// let cell = FontCell::new(9, 19).unwrap();
/// assert_eq!(aspect_corrected_size(2, 2, cell), (5, 2));
/// ```
#[must_use]
pub fn aspect_corrected_size(width: u32, height: u32, cell: FontCell) -> (u32, u32) {
    let corrected = (f64::from(width) * cell.aspect_ratio()).ceil();
    ((corrected as u32).max(1), height)
}

/// Shrink `(width, height)` to at most `max_cells` cells, keeping the ratio.
///
/// # Example
/// ```
/// use tp_mosaic::scaler::fit_within;
/// assert_eq!(fit_within(400, 100, 10_000), (200, 50));
/// assert_eq!(fit_within(30, 20, 10_000), (30, 20));
/// ```
#[must_use]
pub fn fit_within(width: u32, height: u32, max_cells: u64) -> (u32, u32) {
    let area = u64::from(width) * u64::from(height);
    if area <= max_cells {
        return (width, height);
    }
    let factor = (area as f64 / max_cells as f64).sqrt();
    let height = ((f64::from(height) / factor).floor() as u32).max(1);
    let width = ((f64::from(width) / factor).floor() as u32)
        .min((max_cells / u64::from(height)).min(u64::from(u32::MAX)) as u32)
        .max(1);
    (width, height)
}

/// Next size predicted by the empty-pixel ratio, or `None` when the ratio
/// cannot move the candidate towards the text length.
fn next_size(current: &Candidate, text_len: usize) -> Option<(u32, u32)> {
    if current.paintable == 0 {
        return None;
    }
    let area = current.area() as f64;
    let empty_ratio = (area - current.paintable as f64) / area;
    let scalar = (area / (text_len as f64 + area * empty_ratio)).sqrt();
    if !scalar.is_finite() || scalar <= 0.0 {
        return None;
    }
    let width = (f64::from(current.width) / scalar).ceil().max(1.0);
    let height = (f64::from(current.height) / scalar).ceil().max(1.0);
    Some((width as u32, height as u32))
}

/// Best visited size: restricted to the one-line slack when any size meets it,
/// then the largest paintable count not exceeding the text, else the smallest excess.
fn select(visited: &[Candidate], text_len: usize) -> Candidate {
    let fitting: Vec<Candidate> = visited
        .iter()
        .copied()
        .filter(|c| c.within_slack(text_len))
        .collect();
    let pool = if fitting.is_empty() {
        visited
    } else {
        &fitting
    };

    pool.iter()
        .filter(|c| c.paintable <= text_len)
        .min_by_key(|c| text_len - c.paintable)
        .or_else(|| pool.iter().min_by_key(|c| c.paintable - text_len))
        .copied()
        .unwrap_or(visited[0])
}

/// Gap to the one-line slack; zero once the candidate fits.
fn slack_gap(c: &Candidate, text_len: usize) -> usize {
    c.deviation(text_len).saturating_sub(c.width as usize - 1)
}

/// Ajuste une image pour que ses pixels peignables correspondent à la longueur du texte.
///
/// Chaque candidat est rééchantillonné depuis l'image source d'origine,
/// jamais depuis le candidat précédent.
///
/// # Example
/// ```
/// use tp_core::cell::FontCell;
/// use tp_core::config::ResampleFilter;
/// use tp_core::frame::Bitmap;
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_mosaic::scaler::Scaler;
///
/// let source = Bitmap::filled(40, 30, (0, 0, 0, 255));
/// let cell = FontCell::new(9, 19).unwrap();
/// let predicate = Paintability::new(128.0, Polarity::Below);
/// let mut scaler = Scaler::new(ResampleFilter::Box, 40);
/// let scaled = scaler.scale(&source, 500, cell, &predicate).unwrap();
/// assert!(scaled.report.paintable.abs_diff(500) < scaled.bitmap.width as usize);
/// ```
pub struct Scaler {
    resizer: Resizer,
    max_iterations: u32,
    max_cells: u64,
}

impl Scaler {
    #[must_use]
    pub fn new(filter: ResampleFilter, max_iterations: u32) -> Self {
        Self {
            resizer: Resizer::new(filter),
            max_iterations: max_iterations.max(1),
            max_cells: MAX_CELLS,
        }
    }

    /// Plafond de cellules par candidat, [`MAX_CELLS`] par défaut.
    #[must_use]
    pub fn with_max_cells(mut self, max_cells: u64) -> Self {
        self.max_cells = max_cells.max(1);
        self
    }

    fn too_large(&self, width: u32, height: u32) -> bool {
        u64::from(width) * u64::from(height) > self.max_cells
    }

    fn evaluate(
        &mut self,
        source: &Bitmap,
        width: u32,
        height: u32,
        predicate: &dyn Predicate,
    ) -> Result<(Candidate, Bitmap)> {
        let bitmap = self.resizer.resize(source, width, height)?;
        let paintable = count_paintable(&bitmap, predicate);
        Ok((
            Candidate {
                width,
                height,
                paintable,
            },
            bitmap,
        ))
    }

    /// Correction d'aspect puis convergence vers `text_len` pixels peignables.
    ///
    /// # Errors
    /// Returns an error if resampling fails.
    #[allow(clippy::too_many_lines)]
    pub fn scale(
        &mut self,
        source: &Bitmap,
        text_len: usize,
        cell: FontCell,
        predicate: &dyn Predicate,
    ) -> Result<Scaled> {
        log::info!(
            "mise à l'échelle {}×{} pour {text_len} caractères (cellule {}×{})",
            source.width,
            source.height,
            cell.width,
            cell.height
        );

        if source.is_empty() {
            log::warn!("image source vide, aucune mise à l'échelle");
            return Ok(Scaled {
                bitmap: source.clone(),
                report: ScaleReport {
                    aspect_size: (source.width, source.height),
                    iterations: 0,
                    outcome: ScaleOutcome::EmptySource,
                    paintable: 0,
                    text_len,
                },
            });
        }

        // Étape A : correction d'aspect
        let (wide_w, wide_h) = aspect_corrected_size(source.width, source.height, cell);
        let (aspect_w, aspect_h) = fit_within(wide_w, wide_h, self.max_cells);
        if (aspect_w, aspect_h) != (wide_w, wide_h) {
            log::warn!(
                "correction d'aspect {wide_w}×{wide_h} trop grande, réduite à {aspect_w}×{aspect_h}"
            );
        }
        let (first, aspect_bitmap) = self.evaluate(source, aspect_w, aspect_h, predicate)?;
        log::debug!(
            "aspect : {aspect_w}×{aspect_h}, peignables {} / {}",
            first.paintable,
            first.area()
        );

        if text_len == 0 {
            log::warn!("texte vide : seule la correction d'aspect est appliquée");
            return Ok(Scaled {
                bitmap: aspect_bitmap,
                report: ScaleReport {
                    aspect_size: (aspect_w, aspect_h),
                    iterations: 0,
                    outcome: ScaleOutcome::EmptyText,
                    paintable: first.paintable,
                    text_len,
                },
            });
        }

        // Étape B : convergence
        let mut visited = vec![first];
        let mut current = first;
        let mut iterations = 0;
        let mut outcome = ScaleOutcome::IterationCap;

        if first.within_slack(text_len) {
            outcome = ScaleOutcome::AlreadyFit;
        } else {
            while iterations < self.max_iterations {
                let Some((width, height)) = next_size(&current, text_len) else {
                    log::debug!(
                        "aucun pixel peignable à {}×{}, convergence impossible",
                        current.width,
                        current.height
                    );
                    outcome = ScaleOutcome::NoPaintablePixels;
                    break;
                };
                if (width, height) == (current.width, current.height) {
                    outcome = ScaleOutcome::FixedPoint;
                    break;
                }
                if self.too_large(width, height) {
                    log::warn!("candidat {width}×{height} trop grand, arrêt");
                    outcome = ScaleOutcome::SizeLimit;
                    break;
                }

                iterations += 1;
                let (candidate, _) = self.evaluate(source, width, height, predicate)?;
                log::debug!(
                    "itération {iterations} : {width}×{height}, peignables {}, écart {}",
                    candidate.paintable,
                    candidate.deviation(text_len)
                );
                visited.push(candidate);
                current = candidate;

                if candidate.within_slack(text_len) {
                    outcome = ScaleOutcome::Converged;
                    break;
                }
            }
        }

        if !matches!(
            outcome,
            ScaleOutcome::AlreadyFit | ScaleOutcome::NoPaintablePixels | ScaleOutcome::SizeLimit
        ) {
            self.refine(source, current, text_len, predicate, &mut visited)?;
            self.search(source, text_len, predicate, &mut visited)?;
        }

        let chosen = select(&visited, text_len);
        let bitmap = if (chosen.width, chosen.height) == (aspect_w, aspect_h) {
            aspect_bitmap
        } else {
            self.resizer.resize(source, chosen.width, chosen.height)?
        };

        log::info!(
            "image ajustée : {}×{}, {} pixels peignables pour {text_len} caractères ({outcome:?}, {iterations} itérations)",
            chosen.width,
            chosen.height,
            chosen.paintable
        );

        Ok(Scaled {
            bitmap,
            report: ScaleReport {
                aspect_size: (aspect_w, aspect_h),
                iterations,
                outcome,
                paintable: chosen.paintable,
                text_len,
            },
        })
    }

    /// Grow by one line when text is left over, then try ±1 on each axis.
    fn refine(
        &mut self,
        source: &Bitmap,
        last: Candidate,
        text_len: usize,
        predicate: &dyn Predicate,
        visited: &mut Vec<Candidate>,
    ) -> Result<()> {
        let (w, h) = (last.width, last.height);
        let mut sizes = Vec::with_capacity(5);

        if last.paintable < text_len {
            if w > h {
                log::debug!("texte restant : une ligne de plus");
                sizes.push((w, h + 1));
            } else {
                log::debug!("texte restant : une colonne de plus");
                sizes.push((w + 1, h));
            }
        }
        sizes.extend([(w + 1, h), (w, h + 1)]);
        if w > 1 {
            sizes.push((w - 1, h));
        }
        if h > 1 {
            sizes.push((w, h - 1));
        }

        for (width, height) in sizes {
            if visited
                .iter()
                .any(|c| (c.width, c.height) == (width, height))
            {
                continue;
            }
            if self.too_large(width, height) {
                continue;
            }
            let (candidate, _) = self.evaluate(source, width, height, predicate)?;
            visited.push(candidate);
        }
        Ok(())
    }

    /// Tant qu'aucune taille visitée ne tient dans la marge d'une ligne, explore
    /// les voisins ±1 de la plus proche, dans la limite de `max_iterations` pas.
    fn search(
        &mut self,
        source: &Bitmap,
        text_len: usize,
        predicate: &dyn Predicate,
        visited: &mut Vec<Candidate>,
    ) -> Result<()> {
        for step in 0..self.max_iterations {
            if visited.iter().any(|c| c.within_slack(text_len)) {
                return Ok(());
            }
            let mut frontier = Vec::new();
            let mut ranked = visited.clone();
            ranked.sort_by_key(|c| slack_gap(c, text_len));
            for best in ranked {
                let (w, h) = (best.width, best.height);
                frontier = [
                    (w + 1, h),
                    (w, h + 1),
                    (w.saturating_sub(1), h),
                    (w, h.saturating_sub(1)),
                ]
                .into_iter()
                .filter(|&(nw, nh)| nw > 0 && nh > 0 && !self.too_large(nw, nh))
                .filter(|&(nw, nh)| !visited.iter().any(|c| (c.width, c.height) == (nw, nh)))
                .collect();
                if !frontier.is_empty() {
                    break;
                }
            }
            if frontier.is_empty() {
                break;
            }
            for (width, height) in frontier {
                let (candidate, _) = self.evaluate(source, width, height, predicate)?;
                log::debug!(
                    "recherche {step} : {width}×{height}, peignables {}, écart {}",
                    candidate.paintable,
                    candidate.deviation(text_len)
                );
                visited.push(candidate);
            }
        }
        Ok(())
    }
}

impl Default for Scaler {
    fn default() -> Self {
        Self::new(ResampleFilter::default(), DEFAULT_MAX_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::predicate::{Paintability, Polarity};

    fn dark() -> Paintability {
        Paintability::new(128.0, Polarity::Below)
    }

    fn left_half_black(width: u32, height: u32) -> Bitmap {
        let mut bm = Bitmap::filled(width, height, (255, 255, 255, 255));
        for y in 0..height {
            for x in 0..width / 2 {
                bm.put_pixel(x, y, (0, 0, 0, 255));
            }
        }
        bm
    }

    fn vertical_gradient(width: u32, height: u32) -> Bitmap {
        let mut bm = Bitmap::new(width, height);
        for y in 0..height {
            let v = (y * 255 / (height - 1).max(1)) as u8;
            for x in 0..width {
                bm.put_pixel(x, y, (v, v, v, 255));
            }
        }
        bm
    }

    fn radial_gradient(width: u32, height: u32) -> Bitmap {
        let mut bm = Bitmap::new(width, height);
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let max = (cx * cx + cy * cy).sqrt();
        for y in 0..height {
            for x in 0..width {
                let (dx, dy) = (f64::from(x) - cx, f64::from(y) - cy);
                let v = ((dx * dx + dy * dy).sqrt() / max * 255.0) as u8;
                bm.put_pixel(x, y, (v, v, v, 255));
            }
        }
        bm
    }

    fn candidate(width: u32, height: u32, paintable: usize) -> Candidate {
        Candidate {
            width,
            height,
            paintable,
        }
    }

    #[test]
    fn growth_adds_a_row_to_wide_candidates() {
        let source = Bitmap::filled(4, 4, (0, 0, 0, 255));
        let last = candidate(6, 3, 18);
        let mut visited = vec![last];
        Scaler::default()
            .refine(&source, last, 24, &dark(), &mut visited)
            .unwrap();
        assert_eq!(visited[1], candidate(6, 4, 24));
        assert_eq!(select(&visited, 24), candidate(6, 4, 24));
    }

    #[test]
    fn growth_adds_a_column_to_tall_candidates() {
        let source = Bitmap::filled(4, 4, (0, 0, 0, 255));
        let last = candidate(3, 6, 18);
        let mut visited = vec![last];
        Scaler::default()
            .refine(&source, last, 24, &dark(), &mut visited)
            .unwrap();
        assert_eq!(visited[1], candidate(4, 6, 24));
        assert_eq!(select(&visited, 24), candidate(4, 6, 24));
    }

    #[test]
    fn no_growth_when_text_is_covered() {
        let source = Bitmap::filled(4, 4, (0, 0, 0, 255));
        let last = candidate(6, 3, 18);
        let mut visited = vec![last];
        Scaler::default()
            .refine(&source, last, 10, &dark(), &mut visited)
            .unwrap();
        assert_eq!(visited[1], candidate(7, 3, 21));
    }

    #[test]
    fn search_walks_until_slack_is_met() {
        let source = Bitmap::filled(10, 10, (0, 0, 0, 255));
        let mut visited = vec![candidate(10, 10, 100)];
        Scaler::default()
            .search(&source, 50, &dark(), &mut visited)
            .unwrap();
        assert!(visited.iter().any(|c| c.within_slack(50)));
        let chosen = select(&visited, 50);
        assert!(chosen.paintable.abs_diff(50) < chosen.width as usize);
    }

    #[test]
    fn fit_quality_on_gradients() {
        let sources = [vertical_gradient(17, 53), radial_gradient(40, 31)];
        let cells = [(9, 19), (10, 10), (9, 15)];
        for source in &sources {
            for (cw, ch) in cells {
                let cell = FontCell::new(cw, ch).unwrap();
                for text_len in [120, 333, 1000, 2500] {
                    let scaled = Scaler::default()
                        .scale(source, text_len, cell, &dark())
                        .unwrap();
                    let painted = count_paintable(&scaled.bitmap, &dark());
                    assert_eq!(painted, scaled.report.paintable);
                    assert!(
                        painted.abs_diff(text_len) < scaled.bitmap.width as usize,
                        "{}×{} cellule {cw}×{ch}, {text_len} caractères : {painted} peignables sur {}×{}",
                        source.width,
                        source.height,
                        scaled.bitmap.width,
                        scaled.bitmap.height
                    );
                }
            }
        }
    }

    #[test]
    fn oversized_aspect_correction_is_clamped() {
        let source = Bitmap::filled(100, 70, (0, 0, 0, 255));
        let cell = FontCell::new(1, 100).unwrap();
        let scaled = Scaler::default()
            .with_max_cells(10_000)
            .scale(&source, 0, cell, &dark())
            .unwrap();
        let (w, h) = scaled.report.aspect_size;
        assert!(u64::from(w) * u64::from(h) <= 10_000);
        assert_eq!((scaled.bitmap.width, scaled.bitmap.height), (w, h));
        let ratio = f64::from(w) / f64::from(h);
        assert!((ratio - 10_000.0 / 70.0).abs() / (10_000.0 / 70.0) < 0.15);
    }

    #[test]
    fn fit_within_respects_extreme_ratios() {
        let (w, h) = fit_within(u32::MAX, 1, 1000);
        assert_eq!(h, 1);
        assert!(u64::from(w) * u64::from(h) <= 1000);
    }

    #[test]
    fn aspect_correction_rounds_up() {
        let cell = FontCell::new(9, 15).unwrap();
        assert_eq!(aspect_corrected_size(10, 7, cell), (17, 7));
        let square = FontCell::new(10, 10).unwrap();
        assert_eq!(aspect_corrected_size(10, 7, square), (10, 7));
    }

    #[test]
    fn next_size_guards_zero_paintable() {
        let c = Candidate {
            width: 10,
            height: 10,
            paintable: 0,
        };
        assert_eq!(next_size(&c, 50), None);
    }

    #[test]
    fn next_size_shrinks_when_text_is_short() {
        let c = Candidate {
            width: 5,
            height: 2,
            paintable: 10,
        };
        assert_eq!(next_size(&c, 2), Some((3, 1)));
    }

    #[test]
    fn select_prefers_closest_from_below() {
        let visited = [
            Candidate {
                width: 3,
                height: 1,
                paintable: 3,
            },
            Candidate {
                width: 2,
                height: 1,
                paintable: 2,
            },
        ];
        assert_eq!(select(&visited, 2), visited[1]);
    }

    #[test]
    fn select_falls_back_to_smallest_excess() {
        let visited = [
            Candidate {
                width: 4,
                height: 1,
                paintable: 4,
            },
            Candidate {
                width: 3,
                height: 1,
                paintable: 3,
            },
        ];
        assert_eq!(select(&visited, 1), visited[1]);
    }

    #[test]
    fn fit_quality_on_uniform_dark_image() {
        let source = Bitmap::filled(40, 30, (0, 0, 0, 255));
        let cell = FontCell::new(9, 19).unwrap();
        let scaled = Scaler::default().scale(&source, 500, cell, &dark()).unwrap();
        let report = &scaled.report;
        assert_eq!(report.outcome, ScaleOutcome::Converged);
        assert_eq!(report.paintable, count_paintable(&scaled.bitmap, &dark()));
        assert!(report.paintable <= 500);
        assert!(report.paintable.abs_diff(500) < scaled.bitmap.width as usize);
    }

    #[test]
    fn fit_quality_on_half_dark_image() {
        let source = left_half_black(40, 30);
        let cell = FontCell::new(9, 19).unwrap();
        let scaled = Scaler::default().scale(&source, 500, cell, &dark()).unwrap();
        let painted = count_paintable(&scaled.bitmap, &dark());
        assert_eq!(painted, scaled.report.paintable);
        assert!(painted.abs_diff(500) < scaled.bitmap.width as usize);
        assert!(scaled.report.iterations <= DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn scaling_is_deterministic() {
        let source = left_half_black(64, 48);
        let cell = FontCell::new(9, 15).unwrap();
        let a = Scaler::default().scale(&source, 777, cell, &dark()).unwrap();
        let b = Scaler::default().scale(&source, 777, cell, &dark()).unwrap();
        assert_eq!(
            (a.bitmap.width, a.bitmap.height),
            (b.bitmap.width, b.bitmap.height)
        );
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn all_bright_image_terminates_at_aspect_size() {
        let source = Bitmap::filled(10, 10, (255, 255, 255, 255));
        let cell = FontCell::new(9, 19).unwrap();
        let scaled = Scaler::default()
            .scale(&source, 1000, cell, &dark())
            .unwrap();
        assert_eq!(scaled.report.outcome, ScaleOutcome::NoPaintablePixels);
        assert!(scaled.report.iterations <= DEFAULT_MAX_ITERATIONS);
        assert_eq!((scaled.bitmap.width, scaled.bitmap.height), (22, 10));
        assert_eq!(scaled.report.paintable, 0);
    }

    #[test]
    fn all_dark_image_terminates() {
        let source = Bitmap::filled(10, 10, (0, 0, 0, 255));
        let cell = FontCell::new(9, 19).unwrap();
        for text_len in [1, 7, 100, 5000] {
            let scaled = Scaler::new(ResampleFilter::Nearest, 5)
                .scale(&source, text_len, cell, &dark())
                .unwrap();
            assert!(scaled.report.iterations <= 5);
            assert!(!scaled.bitmap.is_empty());
        }
    }

    #[test]
    fn empty_text_keeps_aspect_size() {
        let source = Bitmap::filled(4, 4, (0, 0, 0, 255));
        let cell = FontCell::new(9, 18).unwrap();
        let scaled = Scaler::default().scale(&source, 0, cell, &dark()).unwrap();
        assert_eq!(scaled.report.outcome, ScaleOutcome::EmptyText);
        assert_eq!((scaled.bitmap.width, scaled.bitmap.height), (8, 4));
    }

    #[test]
    fn empty_source_is_returned_unchanged() {
        let source = Bitmap::new(0, 5);
        let cell = FontCell::new(9, 18).unwrap();
        let scaled = Scaler::default().scale(&source, 10, cell, &dark()).unwrap();
        assert_eq!(scaled.report.outcome, ScaleOutcome::EmptySource);
        assert_eq!(scaled.bitmap, source);
    }
}
