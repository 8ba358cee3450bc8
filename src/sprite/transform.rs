use image::{Rgb, RgbaImage, imageops::FilterType};

use super::Sprite;
use crate::error::SlicerError;

/// Largest scaled sprite accepted, in RGBA bytes (1 GiB)
pub const MAX_SPRITE_BYTES: u64 = 1 << 30;

/// Pixel format normalization applied after a sprite is cut out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Converter {
    /// Leave pixels exactly as decoded
    None,
    /// Drop per-pixel alpha (every pixel becomes fully opaque)
    #[default]
    Opaque,
    /// Keep per-pixel alpha
    WithAlpha,
}

/// Target size for sprite scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewSize {
    /// Multiply each sprite's own width and height
    Factor(u32),
    /// Resize every sprite to exactly this size
    Exact { width: u32, height: u32 },
}

impl NewSize {
    /// Dimensions a sprite of the given size ends up with, or None on overflow
    pub fn target_for(self, width: u32, height: u32) -> Option<(u32, u32)> {
        match self {
            NewSize::Factor(k) => Some((width.checked_mul(k)?, height.checked_mul(k)?)),
            NewSize::Exact { width, height } => Some((width, height)),
        }
    }
}

/// Resize an image according to `new_size`.
///
/// Fails with [`SlicerError::InvalidSize`] when the target does not fit in
/// `u32` or would exceed [`MAX_SPRITE_BYTES`].
pub fn scale_image(
    img: RgbaImage,
    new_size: NewSize,
    filter: FilterType,
) -> Result<RgbaImage, SlicerError> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Ok(img);
    }
    let (new_width, new_height) = new_size.target_for(w, h).ok_or_else(|| {
        SlicerError::InvalidSize(format!("scaling a {}x{} sprite overflows", w, h))
    })?;
    if (new_width, new_height) == (w, h) || new_width == 0 || new_height == 0 {
        return Ok(img);
    }

    let bytes = u64::from(new_width)
        .checked_mul(u64::from(new_height))
        .and_then(|pixels| pixels.checked_mul(4));
    if bytes.is_none_or(|b| b > MAX_SPRITE_BYTES) {
        return Err(SlicerError::InvalidSize(format!(
            "scaled sprite {}x{} exceeds the {} byte limit",
            new_width, new_height, MAX_SPRITE_BYTES
        )));
    }

    Ok(image::imageops::resize(&img, new_width, new_height, filter))
}

/// Apply a pixel format conversion in place
pub fn convert_image(img: &mut RgbaImage, converter: Converter) {
    match converter {
        Converter::None | Converter::WithAlpha => {}
        Converter::Opaque => {
            for pixel in img.pixels_mut() {
                pixel[3] = u8::MAX;
            }
        }
    }
}

/// Make every pixel matching `key` fully transparent
pub fn apply_color_key(img: &mut RgbaImage, key: Rgb<u8>) {
    for pixel in img.pixels_mut() {
        if pixel[0] == key[0] && pixel[1] == key[1] && pixel[2] == key[2] {
            pixel[3] = 0;
        }
    }
}

/// Mirror each sprite left to right, optionally reversing the sequence.
///
/// Turns a row of frames facing right into frames facing left. With
/// `reverse` the frame order is reversed too, so a walk cycle authored
/// moving one way plays back moving the other way.
pub fn flip_y<'a, I>(sprites: I, reverse: bool) -> Vec<Sprite>
where
    I: IntoIterator<Item = &'a Sprite>,
{
    let mut flipped: Vec<Sprite> = sprites
        .into_iter()
        .map(|s| Sprite {
            region: s.region,
            image: image::imageops::flip_horizontal(&s.image),
        })
        .collect();
    if reverse {
        flipped.reverse();
    }
    flipped
}

/// Mirror each sprite top to bottom, keeping sequence order
pub fn flip_x<'a, I>(sprites: I) -> Vec<Sprite>
where
    I: IntoIterator<Item = &'a Sprite>,
{
    sprites
        .into_iter()
        .map(|s| Sprite {
            region: s.region,
            image: image::imageops::flip_vertical(&s.image),
        })
        .collect()
}
