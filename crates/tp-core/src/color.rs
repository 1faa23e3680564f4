use crate::error::CoreError;

/// A color as `(r, g, b)`.
pub type Rgb = (u8, u8, u8);

/// Blanc, couleur de fond par défaut.
pub const WHITE: Rgb = (255, 255, 255);

/// Noir.
pub const BLACK: Rgb = (0, 0, 0);

/// Luminosité perçue : `sqrt(0.241 R² + 0.691 G² + 0.068 B²)`, dans [0, 255].
///
/// # Example
/// ```
/// use tp_core::color::brightness;
/// assert_eq!(brightness(0, 0, 0), 0.0);
/// assert!((brightness(255, 255, 255) - 255.0).abs() < 1e-6);
/// ```
#[inline(always)]
#[must_use]
pub fn brightness(r: u8, g: u8, b: u8) -> f64 {
    let r = f64::from(r);
    let g = f64::from(g);
    let b = f64::from(b);
    (0.241 * r * r + 0.691 * g * g + 0.068 * b * b).sqrt()
}

/// Distance euclidienne entre deux couleurs RGB.
///
/// # Example
/// ```
/// use tp_core::color::color_distance;
/// assert_eq!(color_distance((0, 0, 0), (3, 4, 0)), 5.0);
/// ```
#[inline]
#[must_use]
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = f64::from(a.0) - f64::from(b.0);
    let dg = f64::from(a.1) - f64::from(b.1);
    let db = f64::from(a.2) - f64::from(b.2);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Closest palette entry to `color`; the first entry wins ties.
/// Returns `color` unchanged for an empty palette.
///
/// # Example
/// ```
/// use tp_core::color::closest_color;
/// let palette = [(0, 0, 0), (255, 255, 255)];
/// assert_eq!(closest_color((200, 190, 210), &palette), (255, 255, 255));
/// ```
#[must_use]
pub fn closest_color(color: Rgb, palette: &[Rgb]) -> Rgb {
    let mut best = match palette.first() {
        Some(&c) => c,
        None => return color,
    };
    let mut best_distance = color_distance(color, best);
    for &candidate in &palette[1..] {
        let distance = color_distance(color, candidate);
        if distance < best_distance {
            best_distance = distance;
            best = candidate;
        }
    }
    best
}

/// Parse `"r g b"` (whitespace separated) into a color.
///
/// # Errors
/// Returns [`CoreError::InvalidColor`] unless there are exactly three values in `0..=255`.
///
/// # Example
/// ```
/// use tp_core::color::parse_rgb;
/// assert_eq!(parse_rgb("255 128 0").unwrap(), (255, 128, 0));
/// assert!(parse_rgb("300 0 0").is_err());
/// ```
pub fn parse_rgb(s: &str) -> Result<Rgb, CoreError> {
    let values: Vec<u8> = s
        .split_whitespace()
        .map(str::parse::<u8>)
        .collect::<Result<_, _>>()
        .map_err(|_| CoreError::InvalidColor(s.to_string()))?;
    match values.as_slice() {
        &[r, g, b] => Ok((r, g, b)),
        _ => Err(CoreError::InvalidColor(s.to_string())),
    }
}

/// Parse a palette `"r g b,r g b,..."`, optionally wrapped in brackets.
///
/// # Errors
/// Returns [`CoreError::InvalidColor`] on any malformed entry or an empty palette.
///
/// # Example
/// ```
/// use tp_core::color::parse_palette;
/// let p = parse_palette("[0 0 0,255 255 255]").unwrap();
/// assert_eq!(p, vec![(0, 0, 0), (255, 255, 255)]);
/// ```
pub fn parse_palette(s: &str) -> Result<Vec<Rgb>, CoreError> {
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    let palette = inner
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_rgb)
        .collect::<Result<Vec<_>, _>>()?;
    if palette.is_empty() {
        return Err(CoreError::InvalidColor(s.to_string()));
    }
    Ok(palette)
}
