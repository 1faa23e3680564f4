use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use tp_core::color::{parse_palette, parse_rgb};
use tp_core::config::{MosaicConfig, PaletteConfig, ProcessorKind, SmoothingConfig};
use tp_core::predicate::Polarity;

/// textpainter : peint une image avec les caractères d'un texte.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Fichier texte UTF-8. Requis sauf avec --processor-only ou --preview.
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Image de sortie ; le format suit l'extension.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Police TrueType/OpenType.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Taille de la police en pixels.
    #[arg(long)]
    pub font_size: Option<f32>,

    /// Largeur d'une cellule de caractère en pixels.
    #[arg(long)]
    pub cell_width: Option<u32>,

    /// Hauteur d'une cellule de caractère en pixels.
    #[arg(long)]
    pub cell_height: Option<u32>,

    /// Marge horizontale en pixels.
    #[arg(long)]
    pub margin_x: Option<u32>,

    /// Marge verticale en pixels.
    #[arg(long)]
    pub margin_y: Option<u32>,

    /// Seuil de luminosité [0, 255]. Défaut : luminosité de la couleur moyenne.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Peindre les pixels plus clairs que le seuil.
    #[arg(long, default_value_t = false)]
    pub above: bool,

    /// Couleur de fond, "r g b".
    #[arg(long)]
    pub background: Option<String>,

    /// Pré-traitement : passthrough, duotone, palette, smoothing.
    #[arg(long)]
    pub processor: Option<String>,

    /// Couleurs de la palette, "r g b,r g b". Implique --processor palette.
    #[arg(long)]
    pub palette: Option<String>,

    /// Noyau de lissage 5×5. Implique --processor smoothing.
    #[arg(long, default_value_t = false)]
    pub smooth_more: bool,

    /// Enregistrer seulement l'image pré-traitée.
    #[arg(long, default_value_t = false)]
    pub processor_only: bool,

    /// Enregistrer le masque de peignabilité à la taille ajustée, sans texte.
    #[arg(long, default_value_t = false)]
    pub preview: bool,

    /// Écrire aussi la mosaïque en texte brut dans ce fichier.
    #[arg(long)]
    pub text_output: Option<PathBuf>,

    /// Niveau de log : off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// The text file is only optional for the modes that paint no text.
    ///
    /// # Errors
    /// Returns an error if `--text` is missing in a mode that needs it.
    pub fn validate(&self) -> Result<()> {
        if self.text.is_none() && !self.processor_only && !self.preview {
            anyhow::bail!("Aucun texte spécifié. Utilisez --text, ou --preview / --processor-only.");
        }
        if self.processor_only && self.preview {
            anyhow::bail!("--processor-only et --preview sont exclusifs.");
        }
        Ok(())
    }

    /// Apply command-line overrides on top of a loaded config.
    ///
    /// # Errors
    /// Returns an error on a malformed color, palette or processor name,
    /// or if the resulting config is invalid.
    pub fn apply_overrides(&self, config: &mut MosaicConfig) -> Result<()> {
        if let Some(ref font) = self.font {
            config.font_path.clone_from(font);
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        if let Some(w) = self.cell_width {
            config.cell_width = w;
        }
        if let Some(h) = self.cell_height {
            config.cell_height = h;
        }
        if let Some(x) = self.margin_x {
            config.margin_x = x;
        }
        if let Some(y) = self.margin_y {
            config.margin_y = y;
        }
        if let Some(t) = self.threshold {
            config.threshold = Some(t);
        }
        if self.above {
            config.polarity = Polarity::Above;
        }
        if let Some(ref bg) = self.background {
            config.background = parse_rgb(bg)?;
        }
        if let Some(ref name) = self.processor {
            config.processor = ProcessorKind::from_name(name)?;
        }
        if let Some(ref palette) = self.palette {
            let colors = parse_palette(palette)?;
            match &mut config.processor {
                ProcessorKind::Palette(p) => p.colors = colors,
                other => {
                    if !matches!(other, ProcessorKind::Passthrough) {
                        log::warn!("--palette remplace le processeur {}", other.name());
                    }
                    *other = ProcessorKind::Palette(PaletteConfig { colors });
                }
            }
        }
        if self.smooth_more {
            match &mut config.processor {
                ProcessorKind::Smoothing(s) => s.more = true,
                other => {
                    if !matches!(other, ProcessorKind::Passthrough) {
                        log::warn!("--smooth-more remplace le processeur {}", other.name());
                    }
                    *other = ProcessorKind::Smoothing(SmoothingConfig { more: true });
                }
            }
        }

        config.clamp_all();
        config.validate()?;
        Ok(())
    }
}
