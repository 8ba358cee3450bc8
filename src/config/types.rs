use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};

use crate::cli::{ConverterArg, ResizeFilter};
use crate::sheet::{DEFAULT_COL_MARKER, DEFAULT_ROW_MARKER, DEFAULT_TRANSPARENT, SliceOptions};
use crate::sprite::NewSize;

/// Sprite scaling target in a config file.
///
/// `2` multiplies every sprite's size, `{ "width": 8, "height": 8 }`
/// resizes every sprite to exactly that size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeConfig {
    Factor(u32),
    Exact { width: u32, height: u32 },
}

impl From<SizeConfig> for NewSize {
    fn from(size: SizeConfig) -> Self {
        match size {
            SizeConfig::Factor(k) => NewSize::Factor(k),
            SizeConfig::Exact { width, height } => NewSize::Exact { width, height },
        }
    }
}

/// Slicer configuration file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Sheet paths or glob patterns
    pub input: Vec<String>,
    /// Scale sprites after slicing
    pub scale: bool,
    /// Scale target, used only when `scale` is set
    pub new_size: Option<SizeConfig>,
    /// RGB color made transparent; null disables color keying
    pub transparent_color: Option<[u8; 3]>,
    /// RGBA color of row guide pixels (column 0)
    pub row_marker: [u8; 4],
    /// RGBA color of column guide pixels (on each band's top line)
    pub col_marker: [u8; 4],
    /// Pixel format conversion: "none", "opaque" or "alpha"
    pub converter: ConverterArg,
    /// Resize filter algorithm (nearest, triangle, catmull-rom, gaussian, lanczos3)
    pub filter: ResizeFilter,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            input: Vec::new(),
            scale: false,
            new_size: None,
            transparent_color: Some(DEFAULT_TRANSPARENT.0),
            row_marker: DEFAULT_ROW_MARKER.0,
            col_marker: DEFAULT_COL_MARKER.0,
            converter: ConverterArg::Opaque,
            filter: ResizeFilter::Nearest,
        }
    }
}

impl SlicerConfig {
    /// Build slice options from this config
    pub fn to_options(&self) -> SliceOptions {
        SliceOptions::new()
            .scale(self.scale)
            .new_size(self.new_size.map(NewSize::from))
            .transparent_color(self.transparent_color.map(Rgb))
            .row_marker(Rgba(self.row_marker))
            .col_marker(Rgba(self.col_marker))
            .converter(self.converter.into())
            .filter(self.filter)
    }
}
