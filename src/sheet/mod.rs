mod loader;
mod options;
pub mod scanner;
mod slicer;

pub use loader::{
    SUPPORTED_EXTENSIONS, collect_sheet_paths, is_supported_image, load_image,
    load_image_from_bytes,
};
pub use options::{DEFAULT_COL_MARKER, DEFAULT_ROW_MARKER, DEFAULT_TRANSPARENT, SliceOptions};
pub use slicer::SpriteSheet;
