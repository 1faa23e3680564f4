use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cell::{FontCell, Margin};
use crate::color::{BLACK, Rgb, WHITE};
use crate::error::CoreError;
use crate::predicate::Polarity;

/// Configuration complète du rendu texte.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use tp_core::config::MosaicConfig;
/// let config = MosaicConfig::default();
/// assert_eq!(config.max_iterations, 40);
/// assert_eq!(config.background, (255, 255, 255));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MosaicConfig {
    // === Police ===
    /// Fichier TrueType/OpenType (monospace de préférence).
    pub font_path: PathBuf,
    /// Taille de rendu de la police en pixels.
    pub font_size: f32,
    /// Largeur d'une cellule de caractère en pixels.
    pub cell_width: u32,
    /// Hauteur d'une cellule de caractère en pixels.
    pub cell_height: u32,

    // === Ajustement ===
    /// Seuil de luminosité [0, 255]. None = luminosité de la couleur moyenne de l'image.
    pub threshold: Option<f64>,
    /// Peindre sous ou au-dessus du seuil.
    pub polarity: Polarity,
    /// Nombre maximal d'itérations de la boucle de convergence.
    pub max_iterations: u32,
    /// Filtre de rééchantillonnage.
    pub resample: ResampleFilter,

    // === Peinture ===
    /// Marge horizontale en pixels.
    pub margin_x: u32,
    /// Marge verticale en pixels.
    pub margin_y: u32,
    /// Couleur de fond (RGB).
    pub background: Rgb,
    /// Comportement quand le texte est plus court que les cellules peintes.
    pub overflow: TextOverflow,

    // === Pré-traitement ===
    /// Processeur appliqué à l'image source.
    pub processor: ProcessorKind,
}

/// Resampling filter used for every resize.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ResampleFilter {
    /// Plus proche voisin.
    Nearest,
    /// Moyenne de surface.
    #[default]
    Box,
    /// Bilinéaire.
    Bilinear,
    /// Lanczos3, plus net mais plus lent.
    Lanczos3,
}

/// Policy when paintable cells outnumber the characters of the text.
///
/// # Example
/// ```
/// use tp_core::config::TextOverflow;
/// assert_eq!(TextOverflow::default(), TextOverflow::Repeat);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum TextOverflow {
    /// Le texte recommence au début.
    #[default]
    Repeat,
    /// Les cellules au-delà de la fin du texte restent vides.
    Truncate,
}

/// Pré-traitement sélectionné, avec ses paramètres typés.
///
/// # Example
/// ```
/// use tp_core::config::ProcessorKind;
/// let kind = ProcessorKind::from_name("duotone").unwrap();
/// assert_eq!(kind.name(), "duotone");
/// assert!(ProcessorKind::from_name("sepia").is_err());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind")]
pub enum ProcessorKind {
    /// Image inchangée.
    #[default]
    Passthrough,
    /// Deux couleurs, séparées par un seuil de luminosité.
    Duotone(DuotoneConfig),
    /// Chaque pixel prend la couleur la plus proche d'une palette.
    Palette(PaletteConfig),
    /// Lissage par convolution.
    Smoothing(SmoothingConfig),
}

/// Paramètres du processeur duotone.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DuotoneConfig {
    /// None = luminosité de la couleur moyenne de l'image.
    pub threshold: Option<f64>,
    /// Côté du seuil qui reçoit la couleur primaire.
    pub polarity: Polarity,
    /// Couleur primaire.
    pub primary: Rgb,
    /// Couleur secondaire.
    pub secondary: Rgb,
}

impl Default for DuotoneConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            polarity: Polarity::Below,
            primary: BLACK,
            secondary: WHITE,
        }
    }
}

/// Paramètres du processeur palette.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Couleurs disponibles.
    pub colors: Vec<Rgb>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: vec![BLACK, WHITE],
        }
    }
}

/// Paramètres du processeur de lissage.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Noyau 5×5 plus fort au lieu du 3×3.
    pub more: bool,
}

impl ProcessorKind {
    /// Select a processor by its CLI name, with default parameters.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownProcessor`] for an unknown name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.to_ascii_lowercase().as_str() {
            "passthrough" | "none" => Ok(Self::Passthrough),
            "duotone" => Ok(Self::Duotone(DuotoneConfig::default())),
            "palette" => Ok(Self::Palette(PaletteConfig::default())),
            "smoothing" | "smooth" => Ok(Self::Smoothing(SmoothingConfig::default())),
            _ => Err(CoreError::UnknownProcessor(name.to_string())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Duotone(_) => "duotone",
            Self::Palette(_) => "palette",
            Self::Smoothing(_) => "smoothing",
        }
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("fonts/JetBrainsMono-Regular.ttf"),
            font_size: 15.0,
            cell_width: 9,
            cell_height: 15,
            threshold: None,
            polarity: Polarity::Below,
            max_iterations: 40,
            resample: ResampleFilter::Box,
            margin_x: 0,
            margin_y: 0,
            background: WHITE,
            overflow: TextOverflow::Repeat,
            processor: ProcessorKind::Passthrough,
        }
    }
}

impl MosaicConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.font_size = self.font_size.clamp(4.0, 256.0);
        self.max_iterations = self.max_iterations.clamp(1, 200);
        self.threshold = self.threshold.map(|t| t.clamp(0.0, 255.0));
        if let ProcessorKind::Duotone(d) = &mut self.processor {
            d.threshold = d.threshold.map(|t| t.clamp(0.0, 255.0));
        }
    }

    /// Structural checks that clamping cannot repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] on a zero-sized cell or an empty palette.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(CoreError::Config(format!(
                "la cellule doit être non nulle, reçu {}×{}",
                self.cell_width, self.cell_height
            )));
        }
        if let ProcessorKind::Palette(p) = &self.processor {
            if p.colors.is_empty() {
                return Err(CoreError::Config("palette vide".into()));
            }
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a side is zero.
    pub fn font_cell(&self) -> Result<FontCell, CoreError> {
        FontCell::new(self.cell_width, self.cell_height)
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        Margin {
            x: self.margin_x,
            y: self.margin_y,
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    font: Option<FontSection>,
    fit: Option<FitSection>,
    paint: Option<PaintSection>,
    processor: Option<ProcessorKind>,
}

#[derive(Deserialize)]
struct FontSection {
    path: Option<PathBuf>,
    size: Option<f32>,
    cell_width: Option<u32>,
    cell_height: Option<u32>,
}

#[derive(Deserialize)]
struct FitSection {
    threshold: Option<f64>,
    polarity: Option<Polarity>,
    max_iterations: Option<u32>,
    resample: Option<ResampleFilter>,
}

#[derive(Deserialize)]
struct PaintSection {
    margin_x: Option<u32>,
    margin_y: Option<u32>,
    background: Option<Rgb>,
    overflow: Option<TextOverflow>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
/// ```no_run
/// use tp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<MosaicConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

/// Parse TOML content and merge it over the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or a structurally invalid result.
///
/// # Example
/// ```
/// use tp_core::config::parse_config;
/// let config = parse_config("[paint]\nmargin_x = 12\n").unwrap();
/// assert_eq!(config.margin_x, 12);
/// assert_eq!(config.cell_width, 9);
/// ```
pub fn parse_config(content: &str) -> Result<MosaicConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = MosaicConfig::default();

    if let Some(f) = file.font {
        if let Some(v) = f.path {
            config.font_path = v;
        }
        if let Some(v) = f.size {
            config.font_size = v;
        }
        if let Some(v) = f.cell_width {
            config.cell_width = v;
        }
        if let Some(v) = f.cell_height {
            config.cell_height = v;
        }
    }

    if let Some(f) = file.fit {
        if f.threshold.is_some() {
            config.threshold = f.threshold;
        }
        if let Some(v) = f.polarity {
            config.polarity = v;
        }
        if let Some(v) = f.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = f.resample {
            config.resample = v;
        }
    }

    if let Some(p) = file.paint {
        if let Some(v) = p.margin_x {
            config.margin_x = v;
        }
        if let Some(v) = p.margin_y {
            config.margin_y = v;
        }
        if let Some(v) = p.background {
            config.background = v;
        }
        if let Some(v) = p.overflow {
            config.overflow = v;
        }
    }

    if let Some(v) = file.processor {
        config.processor = v;
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}
