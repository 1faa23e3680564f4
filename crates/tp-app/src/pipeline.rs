use std::path::Path;

use anyhow::{Context, Result};
use tp_core::color::brightness;
use tp_core::config::{MosaicConfig, TextOverflow};
use tp_core::frame::Bitmap;
use tp_core::predicate::Paintability;
use tp_core::traits::{GlyphDrawer, Processor};
use tp_export::Rasterizer;
use tp_mosaic::mask::paintability_mask;
use tp_mosaic::painter::{Painter, render_text_grid};
use tp_mosaic::processors::{ProcessorPredicate, build_processor};
use tp_mosaic::scaler::{ScaleReport, Scaler};
use tp_source::image::{load_image, save_image};
use tp_source::resize::average_color;
use tp_source::text::load_text;

use crate::cli::Cli;

/// Image pré-traitée et règle de peignabilité associée.
pub struct Prepared {
    pub processor: Box<dyn Processor>,
    pub processed: Bitmap,
    pub base: Paintability,
}

impl Prepared {
    #[must_use]
    pub fn predicate(&self) -> ProcessorPredicate<'_> {
        ProcessorPredicate {
            processor: self.processor.as_ref(),
            base: self.base,
        }
    }
}

/// Résultat complet d'un rendu.
pub struct Mosaic {
    pub prepared: Prepared,
    /// Image ajustée : un pixel par cellule.
    pub scaled: Bitmap,
    pub report: ScaleReport,
    pub canvas: Bitmap,
    pub glyphs: usize,
    pub empty_cells: usize,
}

impl Mosaic {
    /// Same walk as the painter, as plain text.
    #[must_use]
    pub fn text_grid(&self, text: &str, overflow: TextOverflow) -> String {
        render_text_grid(text, &self.scaled, &self.prepared.predicate(), overflow)
    }
}

/// Luminosité de la couleur moyenne ; 0 pour une image vide.
fn average_brightness(bitmap: &Bitmap) -> Result<f64> {
    if bitmap.is_empty() {
        log::warn!("image vide : luminosité moyenne fixée à 0");
        return Ok(0.0);
    }
    let (r, g, b, _) = average_color(bitmap)?;
    Ok(brightness(r, g, b))
}

/// Run the configured processor on `source` and settle the threshold.
///
/// The default threshold is the average brightness of the processed image,
/// computed once before scaling.
///
/// # Errors
/// Returns an error if the processor or the averaging resize fails.
pub fn prepare(source: &Bitmap, config: &MosaicConfig) -> Result<Prepared> {
    let processor = build_processor(&config.processor, average_brightness(source)?);
    let processed = processor
        .process(source)
        .with_context(|| format!("Échec du processeur {}", processor.name()))?;
    log::info!("processeur : {}", processor.name());

    let threshold = match config.threshold {
        Some(t) => t,
        None => average_brightness(&processed)?,
    };
    let base = Paintability::new(threshold, config.polarity);
    log::info!("seuil {threshold:.1} ({:?})", config.polarity);

    Ok(Prepared {
        processor,
        processed,
        base,
    })
}

/// Processor, Scaler et Painter enchaînés sur une image déjà décodée.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn render_mosaic(
    source: &Bitmap,
    text: &str,
    config: &MosaicConfig,
    drawer: &mut dyn GlyphDrawer,
) -> Result<Mosaic> {
    let prepared = prepare(source, config)?;
    let cell = config.font_cell()?;
    let text_len = text.chars().count();

    let mut scaler = Scaler::new(config.resample, config.max_iterations);
    let scaled = scaler.scale(&prepared.processed, text_len, cell, &prepared.predicate())?;

    let painter = Painter::from_config(config)?;
    let painted = painter.paint(text, &scaled.bitmap, &prepared.predicate(), drawer)?;

    Ok(Mosaic {
        prepared,
        scaled: scaled.bitmap,
        report: scaled.report,
        canvas: painted.canvas,
        glyphs: painted.glyphs,
        empty_cells: painted.empty_cells,
    })
}

/// Masque de peignabilité à la taille que le texte occuperait.
///
/// # Errors
/// Returns an error if preparation or scaling fails.
pub fn render_preview(source: &Bitmap, text_len: usize, config: &MosaicConfig) -> Result<Bitmap> {
    let prepared = prepare(source, config)?;
    let mut scaler = Scaler::new(config.resample, config.max_iterations);
    let scaled = scaler.scale(
        &prepared.processed,
        text_len,
        config.font_cell()?,
        &prepared.predicate(),
    )?;
    Ok(paintability_mask(&scaled.bitmap, &prepared.predicate()))
}

/// Point d'entrée du binaire, une fois la config résolue.
///
/// # Errors
/// Returns an error if an input cannot be read, rendering fails or an output
/// cannot be written.
pub fn run(cli: &Cli, config: &MosaicConfig) -> Result<()> {
    let source = load_image(&cli.image)?;
    log::info!(
        "image source {} : {}×{}",
        cli.image.display(),
        source.width,
        source.height
    );

    if cli.processor_only {
        let prepared = prepare(&source, config)?;
        return save_image(&prepared.processed, &cli.output);
    }

    let text = match cli.text {
        Some(ref path) => load_text(path)?,
        None => String::new(),
    };

    if cli.preview {
        let mask = render_preview(&source, text.chars().count(), config)?;
        return save_image(&mask, &cli.output);
    }

    let mut rasterizer = Rasterizer::from_file(
        &config.font_path,
        config.font_size,
        Some(config.font_cell()?),
    )?;
    let mosaic = render_mosaic(&source, &text, config, &mut rasterizer)?;
    log::info!(
        "{} glyphes, {} cellules vides, grille {}×{} ({:?})",
        mosaic.glyphs,
        mosaic.empty_cells,
        mosaic.scaled.width,
        mosaic.scaled.height,
        mosaic.report.outcome
    );
    save_image(&mosaic.canvas, &cli.output)?;

    if let Some(ref path) = cli.text_output {
        write_text_grid(path, &mosaic.text_grid(&text, config.overflow))?;
    }
    Ok(())
}

fn write_text_grid(path: &Path, grid: &str) -> Result<()> {
    std::fs::write(path, grid)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("mosaïque texte enregistrée : {}", path.display());
    Ok(())
}
