pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod sheet;
pub mod sprite;

pub use cli::{CliArgs, Command, CommonArgs, ResizeFilter};
pub use error::SlicerError;
pub use sheet::{SliceOptions, SpriteSheet};
pub use sprite::{Converter, NewSize, Sprite, SpriteRegion};
