mod sprite;
mod transform;

pub use sprite::{Sprite, SpriteRegion};
pub use transform::{
    Converter, MAX_SPRITE_BYTES, NewSize, apply_color_key, convert_image, flip_x, flip_y,
    scale_image,
};
