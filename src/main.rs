use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use sprite_slicer::cli::{CliArgs, Command, CommonArgs};
use sprite_slicer::config::{LoadedConfig, SlicerConfig};
use sprite_slicer::sheet::{SliceOptions, SpriteSheet, collect_sheet_paths};
use sprite_slicer::sprite::{NewSize, Sprite};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Open the viewer with a file picker if no arguments provided
    #[cfg(feature = "gui")]
    if std::env::args().len() == 1 {
        init_logging(false);
        return sprite_slicer::gui::run(None, &sprite_slicer::gui::ViewSettings::default());
    }

    let cli = CliArgs::parse();

    let args = match &cli.command {
        Command::Inspect(args) => args.clone(),
        #[cfg(feature = "gui")]
        Command::View(view) => {
            init_logging(false);
            let settings = sprite_slicer::gui::ViewSettings {
                scale: view.scale,
                flip_x: view.flip_x,
                flip_y: view.flip_y,
            };
            return sprite_slicer::gui::run(view.input.clone(), &settings);
        }
    };

    let merged = merge_config_with_args(&args)?;
    init_logging(merged.verbose);

    info!("Sprite slicer v{}", env!("CARGO_PKG_VERSION"));

    let paths = collect_sheet_paths(&merged.input)?;
    info!("Slicing {} sheet(s)...", paths.len());

    // One sheet per task; each slice is a single sequential scan
    let sheets: Result<Vec<_>> = paths
        .par_iter()
        .map(|path| {
            SpriteSheet::open(path, &merged.options)
                .with_context(|| format!("failed to slice {}", path.display()))
                .map(|sheet| (path, sheet))
        })
        .collect();

    for (path, sheet) in sheets? {
        report_sheet(&path.display().to_string(), &sheet, &merged);
    }

    info!("Done!");

    Ok(())
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn report_sheet(name: &str, sheet: &SpriteSheet, merged: &MergedConfig) {
    if sheet.is_empty() {
        warn!("{}: no sprites found (check marker colors)", name);
        return;
    }

    info!("{}: {} rows, {} sprites", name, sheet.row_count(), sheet.len());

    for (i, row) in sheet.rows().iter().enumerate() {
        let mut sprites: Vec<Sprite> = row.clone();
        if merged.flip_y {
            sprites = SpriteSheet::flip_y(&sprites, merged.reverse);
        }
        if merged.flip_x {
            sprites = SpriteSheet::flip_x(&sprites);
        }

        let frames: Vec<String> = sprites
            .iter()
            .map(|s| {
                format!(
                    "{}x{}@({},{})",
                    s.width(),
                    s.height(),
                    s.region.x,
                    s.region.y
                )
            })
            .collect();
        info!("  row {}: {} sprites [{}]", i, sprites.len(), frames.join(", "));
    }
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    options: SliceOptions,
    flip_y: bool,
    reverse: bool,
    flip_x: bool,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input sheets: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    let base = loaded_config
        .as_ref()
        .map(|lc| lc.config.clone())
        .unwrap_or_else(SlicerConfig::default);
    let mut options = base.to_options();

    // Either size flag turns scaling on
    if let Some(k) = args.scale {
        options = options.scale(true).new_size(Some(NewSize::Factor(k)));
    } else if let Some(size) = args.size {
        options = options.scale(true).new_size(Some(size.into()));
    }

    if args.no_transparent {
        options = options.transparent_color(None);
    } else if let Some(color) = args.transparent {
        options = options.transparent_color(Some(color.rgb()));
    }

    if let Some(color) = args.row_marker {
        options = options.row_marker(color.rgba());
    }
    if let Some(color) = args.col_marker {
        options = options.col_marker(color.rgba());
    }
    if let Some(converter) = args.converter {
        options = options.converter(converter.into());
    }
    if let Some(filter) = args.filter {
        options = options.filter(filter);
    }

    options.validate()?;

    Ok(MergedConfig {
        input,
        options,
        flip_y: args.flip_y,
        reverse: args.reverse,
        flip_x: args.flip_x,
        verbose: args.verbose,
    })
}
