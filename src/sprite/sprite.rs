use image::RgbaImage;

/// Rectangle of the source sheet a sprite was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteRegion {
    /// Left edge in sheet pixels
    pub x: u32,
    /// Top edge in sheet pixels (first row below the guide line)
    pub y: u32,
    /// Width before scaling
    pub width: u32,
    /// Height before scaling
    pub height: u32,
}

impl SpriteRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the region covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A single frame cut out of a sprite sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Where the frame lives in the source sheet
    pub region: SpriteRegion,
    /// Pixel data after scaling, conversion and color keying
    pub image: RgbaImage,
}

impl Sprite {
    /// Width of the sprite (after scaling)
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the sprite (after scaling)
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
