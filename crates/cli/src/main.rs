//! Seamline command-line tool.
//!
//! Reads footprint masks (or a footprint collection), computes Voronoi
//! centerline seamlines between overlapping footprints and writes the
//! segmented footprints as a GeoJSON layer.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use seamline_core::{
    label_from_path, Footprint, MaskReader, PolygonExtractor, SeamlineConfig, VectorWriter,
};
use seamline_io::{FootprintCollection, GeoJsonWriter, JsonMaskReader};
use seamline_seam::{MaskPolygonExtractor, SeamlineOrchestrator};

#[derive(Parser)]
#[command(name = "seamline")]
#[command(about = "Voronoi centerline seamlines for image mosaics")]
#[command(version)]
struct Cli {
    /// Emit per-step diagnostics
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute seamlines from mask files (one per image)
    Masks {
        /// Mask files; each file stem becomes the image label
        #[arg(required = true)]
        masks: Vec<PathBuf>,

        #[command(flatten)]
        seam: SeamArgs,
    },

    /// Compute seamlines from a footprint collection file
    Footprints {
        /// Footprint collection (JSON)
        file: PathBuf,

        #[command(flatten)]
        seam: SeamArgs,
    },

    /// Extract footprint polygons from masks without cutting
    Extract {
        /// Mask files; each file stem becomes the image label
        #[arg(required = true)]
        masks: Vec<PathBuf>,

        /// Output footprint collection (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct SeamArgs {
    /// Output GeoJSON file
    #[arg(short, long)]
    output: PathBuf,

    /// Boundary sampling spacing in map units
    #[arg(long, default_value = "10.0")]
    dist_min: f64,

    /// Minimum Voronoi ridge length kept in the graph
    #[arg(long, default_value = "0.0")]
    min_cut_length: f64,

    /// Attribute name holding the image label
    #[arg(long, default_value = "image")]
    image_field: String,

    /// Output layer name
    #[arg(long, default_value = "seamlines")]
    layer: String,
}

impl SeamArgs {
    fn config(&self, debug: bool) -> SeamlineConfig {
        SeamlineConfig::new()
            .with_dist_min(self.dist_min)
            .with_min_cut_length(self.min_cut_length)
            .with_image_field_name(self.image_field.clone())
            .with_layer_name(self.layer.clone())
            .with_debug(debug)
    }
}

/// Reads masks and extracts one footprint per mask.
///
/// Returns the footprints in argument order and the CRS of the first mask
/// that declares one.
fn footprints_from_masks(paths: &[PathBuf]) -> anyhow::Result<(Vec<Footprint>, Option<String>)> {
    let reader = JsonMaskReader::new();
    let extractor = MaskPolygonExtractor::new();
    let mut footprints = Vec::with_capacity(paths.len());
    let mut crs: Option<String> = None;

    for path in paths {
        let mask = reader
            .read_mask(path)
            .with_context(|| format!("Failed to read mask {}", path.display()))?;
        if crs.is_none() {
            crs = mask.crs().map(str::to_string);
        }

        let label = label_from_path(path);
        let footprint = extractor
            .extract(&label, &mask)
            .with_context(|| format!("Failed to extract footprint from {}", path.display()))?;
        log::info!("Footprint '{}': area {:.3}", label, footprint.area());
        footprints.push(footprint);
    }

    Ok((footprints, crs))
}

/// Runs the seamline pipeline and writes the GeoJSON layer.
fn run_seamlines(
    footprints: &[Footprint],
    crs: Option<&str>,
    seam: &SeamArgs,
    debug: bool,
) -> anyhow::Result<()> {
    let config = seam.config(debug);
    let result = SeamlineOrchestrator::new(config.clone())
        .compute(footprints)
        .context("Seamline computation failed")?;

    let summary = result.summary();
    println!(
        "{} footprints, {} overlapping pairs, {} cuts ({} fallback), {} ms",
        summary.footprints,
        summary.overlapping_pairs,
        summary.cuts,
        summary.fallbacks,
        summary.computation_time_ms
    );

    GeoJsonWriter::from_config(&config)
        .write(&seam.output, crs, &result.segmented)
        .with_context(|| format!("Failed to write {}", seam.output.display()))?;
    println!("Seamlines saved to: {}", seam.output.display());
    Ok(())
}

fn extract_to_file(masks: &[PathBuf], output: &Path) -> anyhow::Result<()> {
    let (footprints, crs) = footprints_from_masks(masks)?;
    FootprintCollection::new(crs, &footprints)
        .save_json(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "{} footprints saved to: {}",
        footprints.len(),
        output.display()
    );
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Masks { masks, seam } => {
            let (footprints, crs) = footprints_from_masks(&masks)?;
            run_seamlines(&footprints, crs.as_deref(), &seam, cli.debug)?;
        }

        Commands::Footprints { file, seam } => {
            let collection = FootprintCollection::from_json_file(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            run_seamlines(
                &collection.to_footprints(),
                collection.crs.as_deref(),
                &seam,
                cli.debug,
            )?;
        }

        Commands::Extract { masks, output } => {
            extract_to_file(&masks, &output)?;
        }
    }

    Ok(())
}
