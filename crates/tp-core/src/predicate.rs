use serde::{Deserialize, Serialize};

use crate::color::brightness;
use crate::traits::Predicate;

/// Sens du seuil de luminosité.
///
/// # Example
/// ```
/// use tp_core::predicate::Polarity;
/// assert_eq!(Polarity::default(), Polarity::Below);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Polarity {
    /// Peint les pixels plus sombres que le seuil.
    #[default]
    Below,
    /// Peint les pixels plus clairs que le seuil.
    Above,
}

/// Décide si un pixel reçoit un caractère.
///
/// Pure : même entrée, même réponse, sans état caché.
///
/// # Example
/// ```
/// use tp_core::predicate::{Paintability, Polarity};
/// use tp_core::traits::Predicate;
/// let p = Paintability::new(128.0, Polarity::Below);
/// assert!(p.is_paintable(0, 0, 0));
/// assert!(!p.is_paintable(255, 255, 255));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paintability {
    /// Seuil de luminosité dans [0, 255].
    pub threshold: f64,
    /// Sens de comparaison.
    pub polarity: Polarity,
}

impl Paintability {
    #[must_use]
    pub fn new(threshold: f64, polarity: Polarity) -> Self {
        Self {
            threshold,
            polarity,
        }
    }

    /// Compare a precomputed brightness against the threshold.
    #[inline(always)]
    #[must_use]
    pub fn accepts(&self, brightness: f64) -> bool {
        match self.polarity {
            Polarity::Below => brightness < self.threshold,
            Polarity::Above => brightness > self.threshold,
        }
    }
}

impl Predicate for Paintability {
    #[inline(always)]
    fn is_paintable(&self, r: u8, g: u8, b: u8) -> bool {
        self.accepts(brightness(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let gray = brightness(100, 100, 100);
        let below = Paintability::new(gray, Polarity::Below);
        let above = Paintability::new(gray, Polarity::Above);
        assert!(!below.is_paintable(100, 100, 100));
        assert!(!above.is_paintable(100, 100, 100));
    }

    #[test]
    fn above_inverts_below() {
        let below = Paintability::new(128.0, Polarity::Below);
        let above = Paintability::new(128.0, Polarity::Above);
        for v in [0u8, 50, 127, 129, 200, 255] {
            let b = brightness(v, v, v);
            if (b - 128.0).abs() > 1e-9 {
                assert_ne!(below.is_paintable(v, v, v), above.is_paintable(v, v, v));
            }
        }
    }

    #[test]
    fn predicate_is_deterministic() {
        let p = Paintability::new(90.5, Polarity::Below);
        let samples: Vec<(u8, u8, u8)> = (0..=255u8).map(|v| (v, 255 - v, v / 2)).collect();
        let first: Vec<bool> = samples.iter().map(|&(r, g, b)| p.is_paintable(r, g, b)).collect();
        let mut reversed: Vec<bool> = samples
            .iter()
            .rev()
            .map(|&(r, g, b)| p.is_paintable(r, g, b))
            .collect();
        reversed.reverse();
        assert_eq!(first, reversed);
    }
}
