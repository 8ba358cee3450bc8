mod args;

#[cfg(feature = "gui")]
pub use args::ViewArgs;
pub use args::{CliArgs, Command, CommonArgs, ConverterArg, HexColor, ResizeFilter, SizeArg};
