use clap::{Args, Parser, Subcommand, ValueEnum};
use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sprite::{Converter, NewSize};

#[derive(Parser, Debug)]
#[command(name = "slicer")]
#[command(version, about = "Marker-guided sprite sheet slicer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Slice sheets and report their row/column layout
    Inspect(CommonArgs),
    /// Open a sheet in the viewer (picks a file when none is given)
    #[cfg(feature = "gui")]
    View(ViewArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Sprite sheet files or directories
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a .slicer config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Multiply each sprite's size by N
    #[arg(long, value_name = "N", conflicts_with = "size")]
    pub scale: Option<u32>,

    /// Resize every sprite to WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", conflicts_with = "scale")]
    pub size: Option<SizeArg>,

    /// Color made transparent, as RRGGBB hex [default: ffffff]
    #[arg(long, value_name = "RRGGBB", conflicts_with = "no_transparent")]
    pub transparent: Option<HexColor>,

    /// Disable color keying
    #[arg(long)]
    pub no_transparent: bool,

    /// Row guide color, as RRGGBB or RRGGBBAA hex [default: ffff00ff]
    #[arg(long, value_name = "HEX")]
    pub row_marker: Option<HexColor>,

    /// Column guide color, as RRGGBB or RRGGBBAA hex [default: 0000ffff]
    #[arg(long, value_name = "HEX")]
    pub col_marker: Option<HexColor>,

    /// Pixel format conversion after slicing [default: opaque]
    #[arg(long, value_enum)]
    pub converter: Option<ConverterArg>,

    /// Resize filter algorithm [default: nearest]
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Mirror sprites left to right before reporting
    #[arg(long)]
    pub flip_y: bool,

    /// Reverse frame order when mirroring with --flip-y
    #[arg(long, requires = "flip_y")]
    pub reverse: bool,

    /// Mirror sprites top to bottom before reporting
    #[arg(long)]
    pub flip_x: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "gui")]
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Sprite sheet to open
    pub input: Option<PathBuf>,

    /// Multiply each sprite's size by N
    #[arg(long, value_name = "N", default_value_t = 8)]
    pub scale: u32,

    /// Mirror sprites top to bottom
    #[arg(long)]
    pub flip_x: bool,

    /// Mirror sprites left to right and reverse their order
    #[arg(long)]
    pub flip_y: bool,
}

/// Pixel format conversion applied to each sprite
#[derive(
    Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConverterArg {
    /// Keep pixels as decoded
    None,
    /// Force every pixel opaque
    #[default]
    Opaque,
    /// Keep per-pixel alpha
    Alpha,
}

impl From<ConverterArg> for Converter {
    fn from(arg: ConverterArg) -> Self {
        match arg {
            ConverterArg::None => Converter::None,
            ConverterArg::Opaque => Converter::Opaque,
            ConverterArg::Alpha => Converter::WithAlpha,
        }
    }
}

/// Resize filter algorithm
#[derive(
    Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbor (best for pixel art)
    #[default]
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3 (highest quality)
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Exact sprite size given as WIDTHxHEIGHT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg {
    pub width: u32,
    pub height: u32,
}

impl From<SizeArg> for NewSize {
    fn from(size: SizeArg) -> Self {
        NewSize::Exact {
            width: size.width,
            height: size.height,
        }
    }
}

impl std::str::FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {}", s))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_e| format!("invalid width: {}", w))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_e| format!("invalid height: {}", h))?;
        Ok(SizeArg { width, height })
    }
}

/// Color given as RRGGBB or RRGGBBAA hex, with an optional leading '#'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub [u8; 4]);

impl HexColor {
    pub fn rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }

    pub fn rgb(self) -> Rgb<u8> {
        Rgb([self.0[0], self.0[1], self.0[2]])
    }
}

impl std::str::FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(format!("expected RRGGBB or RRGGBBAA, got {}", s));
        }

        let mut channels = [0, 0, 0, u8::MAX];
        for (i, channel) in channels.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_e| format!("invalid hex color: {}", s))?;
        }
        Ok(HexColor(channels))
    }
}
