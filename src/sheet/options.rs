use image::{Rgb, Rgba};

use crate::cli::ResizeFilter;
use crate::error::SlicerError;
use crate::sprite::{Converter, NewSize};

/// Default row guide color: opaque yellow
pub const DEFAULT_ROW_MARKER: Rgba<u8> = Rgba([255, 255, 0, 255]);
/// Default column guide color: opaque blue
pub const DEFAULT_COL_MARKER: Rgba<u8> = Rgba([0, 0, 255, 255]);
/// Default transparency key: white
pub const DEFAULT_TRANSPARENT: Rgb<u8> = Rgb([255, 255, 255]);

/// Options controlling how a sheet is sliced and post-processed
#[derive(Debug, Clone, PartialEq)]
pub struct SliceOptions {
    pub scale: bool,
    pub new_size: Option<NewSize>,
    pub transparent_color: Option<Rgb<u8>>,
    pub row_marker: Rgba<u8>,
    pub col_marker: Rgba<u8>,
    pub converter: Converter,
    pub filter: ResizeFilter,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SliceOptions {
    pub fn new() -> Self {
        Self {
            scale: false,
            new_size: None,
            transparent_color: Some(DEFAULT_TRANSPARENT),
            row_marker: DEFAULT_ROW_MARKER,
            col_marker: DEFAULT_COL_MARKER,
            converter: Converter::Opaque,
            filter: ResizeFilter::Nearest,
        }
    }

    pub fn scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn new_size(mut self, new_size: Option<NewSize>) -> Self {
        self.new_size = new_size;
        self
    }

    /// Pass `None` to disable color keying
    pub fn transparent_color(mut self, color: Option<Rgb<u8>>) -> Self {
        self.transparent_color = color;
        self
    }

    pub fn row_marker(mut self, color: Rgba<u8>) -> Self {
        self.row_marker = color;
        self
    }

    pub fn col_marker(mut self, color: Rgba<u8>) -> Self {
        self.col_marker = color;
        self
    }

    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Size to scale to, if scaling is enabled and a size is set
    pub fn effective_size(&self) -> Option<NewSize> {
        if self.scale { self.new_size } else { None }
    }

    /// Reject sizes that would collapse sprites to nothing
    pub fn validate(&self) -> Result<(), SlicerError> {
        match self.new_size {
            Some(NewSize::Factor(0)) => Err(SlicerError::InvalidSize(
                "scale factor must be at least 1".to_string(),
            )),
            Some(NewSize::Exact { width, height }) if width == 0 || height == 0 => {
                Err(SlicerError::InvalidSize(format!(
                    "target size {}x{} has a zero dimension",
                    width, height
                )))
            }
            _ => Ok(()),
        }
    }
}
