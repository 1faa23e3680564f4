use crate::error::CoreError;

/// Empreinte en pixels d'un caractère sur le canvas de sortie.
///
/// # Example
/// ```
/// use tp_core::cell::FontCell;
/// let cell = FontCell::new(9, 15).unwrap();
/// assert_eq!(cell.width, 9);
/// assert!(FontCell::new(0, 15).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontCell {
    /// Largeur d'une cellule en pixels (> 0).
    pub width: u32,
    /// Hauteur d'une cellule en pixels (> 0).
    pub height: u32,
}

impl FontCell {
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Rapport hauteur / largeur de la cellule.
    #[inline]
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Bordure ajoutée autour du canvas, en pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margin {
    /// Marge horizontale (gauche et droite).
    pub x: u32,
    /// Marge verticale (haut et bas).
    pub y: u32,
}

/// Dimensions of the canvas that paints a `grid_w × grid_h` bitmap.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] if the result overflows `u32`.
///
/// # Example
/// ```
/// use tp_core::cell::{canvas_dimensions, FontCell, Margin};
/// let cell = FontCell::new(9, 19).unwrap();
/// let dims = canvas_dimensions(4, 3, cell, Margin { x: 5, y: 2 }).unwrap();
/// assert_eq!(dims, (4 * 9 + 10, 3 * 19 + 4));
/// ```
pub fn canvas_dimensions(
    grid_w: u32,
    grid_h: u32,
    cell: FontCell,
    margin: Margin,
) -> Result<(u32, u32), CoreError> {
    let overflow = CoreError::InvalidDimensions {
        width: grid_w,
        height: grid_h,
    };
    let width = grid_w
        .checked_mul(cell.width)
        .and_then(|w| w.checked_add(margin.x.checked_mul(2)?))
        .ok_or_else(|| overflow.clone())?;
    let height = grid_h
        .checked_mul(cell.height)
        .and_then(|h| h.checked_add(margin.y.checked_mul(2)?))
        .ok_or(overflow)?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_dimensions_match_formula() {
        for (cw, ch) in [(1, 1), (9, 15), (9, 19), (12, 7)] {
            for (mx, my) in [(0, 0), (3, 0), (0, 8), (10, 20)] {
                let cell = FontCell::new(cw, ch).unwrap();
                let (w, h) = canvas_dimensions(7, 5, cell, Margin { x: mx, y: my }).unwrap();
                assert_eq!(w, 7 * cw + 2 * mx);
                assert_eq!(h, 5 * ch + 2 * my);
            }
        }
    }

    #[test]
    fn canvas_dimensions_overflow_is_an_error() {
        let cell = FontCell::new(u32::MAX, 1).unwrap();
        assert!(canvas_dimensions(2, 1, cell, Margin::default()).is_err());
    }

    #[test]
    fn height_overflow_reports_the_grid() {
        let cell = FontCell::new(1, u32::MAX).unwrap();
        assert_eq!(
            canvas_dimensions(1, 2, cell, Margin::default()),
            Err(CoreError::InvalidDimensions {
                width: 1,
                height: 2
            })
        );
    }

    #[test]
    fn aspect_ratio_is_height_over_width() {
        let cell = FontCell::new(9, 18).unwrap();
        assert!((cell.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }
}
