use eframe::egui;

use crate::sprite::Sprite;

/// Horizontal and vertical step between blitted sprites
pub const CELL_STEP: f32 = 80.0;
/// Wrap to the next line once x reaches this offset
pub const WRAP_AT: f32 = 800.0;

/// Viewer window showing every sprite of one sheet
pub struct ViewerApp {
    title: String,
    sprites: Vec<Sprite>,
    /// One slot per sprite; empty sprites keep their cell but have no texture
    textures: Option<Vec<Option<egui::TextureHandle>>>,
}

impl ViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, title: String, sprites: Vec<Sprite>) -> Self {
        Self {
            title,
            sprites,
            textures: None,
        }
    }

    /// Upload sprite pixels once the context is available
    fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.textures.is_some() {
            return;
        }

        let textures = sprite_images(&self.sprites)
            .into_iter()
            .enumerate()
            .map(|(i, image)| {
                image.map(|image| {
                    ctx.load_texture(format!("sprite_{}", i), image, egui::TextureOptions::NEAREST)
                })
            })
            .collect();
        self.textures = Some(textures);
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_textures(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(textures) = self.textures.as_ref().filter(|t| !t.is_empty()) else {
                ui.label(format!("{}: no sprites found", self.title));
                return;
            };

            let origin = ui.max_rect().min;
            let painter = ui.painter();
            for (slot, pos) in textures.iter().zip(grid_positions(textures.len())) {
                // Zero-size sprites still take up their cell
                let Some(texture) = slot else {
                    continue;
                };
                let rect = egui::Rect::from_min_size(origin + pos, texture.size_vec2());
                painter.image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
        });
    }
}

/// Pixel data to upload for each sprite, None for sprites with no area
pub fn sprite_images(sprites: &[Sprite]) -> Vec<Option<egui::ColorImage>> {
    sprites
        .iter()
        .map(|sprite| {
            if sprite.width() == 0 || sprite.height() == 0 {
                return None;
            }
            Some(egui::ColorImage::from_rgba_unmultiplied(
                [sprite.width() as usize, sprite.height() as usize],
                sprite.image.as_raw(),
            ))
        })
        .collect()
}

/// Top-left offsets of `count` cells laid out left to right, wrapping at [`WRAP_AT`]
pub fn grid_positions(count: usize) -> Vec<egui::Vec2> {
    let mut positions = Vec::with_capacity(count);
    let (mut x, mut y) = (0.0, 0.0);
    for _ in 0..count {
        positions.push(egui::vec2(x, y));
        x += CELL_STEP;
        if x >= WRAP_AT {
            x = 0.0;
            y += CELL_STEP;
        }
    }
    positions
}
