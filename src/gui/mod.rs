mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui;
use log::info;

use crate::sheet::{SUPPORTED_EXTENSIONS, SliceOptions, SpriteSheet};
use crate::sprite::{NewSize, Sprite};
use app::ViewerApp;

/// How the viewer prepares sprites before drawing them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    /// Multiply each sprite's size by this factor
    pub scale: u32,
    /// Mirror top to bottom
    pub flip_x: bool,
    /// Mirror left to right and reverse order
    pub flip_y: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            scale: 8,
            flip_x: false,
            flip_y: false,
        }
    }
}

/// Slice a sheet and apply the viewer's flips
pub fn prepare_sprites(path: &std::path::Path, settings: &ViewSettings) -> Result<Vec<Sprite>> {
    let options = SliceOptions::new()
        .scale(true)
        .new_size(Some(NewSize::Factor(settings.scale)));
    let sheet = SpriteSheet::open(path, &options)
        .with_context(|| format!("failed to slice {}", path.display()))?;

    let mut sprites = sheet.combined();
    if settings.flip_y {
        sprites = SpriteSheet::flip_y(&sprites, true);
    }
    if settings.flip_x {
        sprites = SpriteSheet::flip_x(&sprites);
    }
    Ok(sprites)
}

/// Show a sheet's sprites in a window; asks for a file when `input` is None
pub fn run(input: Option<PathBuf>, settings: &ViewSettings) -> Result<()> {
    let path = match input {
        Some(path) => path,
        None => {
            let picked = rfd::FileDialog::new()
                .add_filter("Images", SUPPORTED_EXTENSIONS)
                .set_directory(std::env::current_dir().unwrap_or_default())
                .pick_file();
            match picked {
                Some(path) => path,
                // Picker cancelled
                None => return Ok(()),
            }
        }
    };

    let sprites = prepare_sprites(&path, settings)?;
    info!("Showing {} sprites from {}", sprites.len(), path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 500.0]),
        ..Default::default()
    };
    let title = path.display().to_string();

    eframe::run_native(
        "Sprite Slicer",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, title, sprites)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
