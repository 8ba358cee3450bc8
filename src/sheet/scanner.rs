//! Guide-line scanning.
//!
//! A sheet is read as horizontal bands. Column 0 carries row markers; two
//! consecutive row markers bound one band, and the upper one is the band's
//! guide line. Column markers on that guide line split the band into frames.
//!
//! ```text
//!   Y . . . . B . . . . B      y = 0   guide line (Y = row, B = column marker)
//!   . s s s s . t t t t .      y = 1
//!   . s s s s . t t t t .      y = 2
//!   Y . . . . B . . . . B      y = 3   closes band 0, opens band 1
//! ```

use image::{Rgba, RgbaImage};
use log::debug;

use crate::sprite::SpriteRegion;

/// Vertical extent of a band between two row markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// y of the opening marker (the guide line)
    pub top: u32,
    /// y of the closing marker
    pub bottom: u32,
}

impl Band {
    /// Frame height inside the band, excluding both guide lines
    pub fn sprite_height(&self) -> u32 {
        self.bottom.saturating_sub(self.top).saturating_sub(1)
    }
}

/// Row scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No row marker seen yet
    AwaitingRowStart,
    /// A band is open at `row_start`
    InRow { row_start: u32 },
}

impl ScanState {
    /// Advance on a row marker at `y`.
    ///
    /// Closing a band re-opens the next one at the same line, so adjacent
    /// bands share their boundary marker.
    pub fn on_row_marker(self, y: u32) -> (ScanState, Option<Band>) {
        match self {
            ScanState::AwaitingRowStart => (ScanState::InRow { row_start: y }, None),
            ScanState::InRow { row_start } => (
                ScanState::InRow { row_start: y },
                Some(Band {
                    top: row_start,
                    bottom: y,
                }),
            ),
        }
    }
}

/// Find every closed band in column 0, top to bottom.
///
/// A band opened by the last row marker in the image has no closing marker
/// and is ignored. Malformed layouts never error; they just produce fewer
/// bands.
pub fn find_bands(image: &RgbaImage, row_marker: Rgba<u8>) -> Vec<Band> {
    let (width, height) = image.dimensions();
    let mut bands = Vec::new();
    if width == 0 {
        return bands;
    }

    let mut state = ScanState::AwaitingRowStart;
    for y in 0..height {
        if *image.get_pixel(0, y) != row_marker {
            continue;
        }
        let (next, closed) = state.on_row_marker(y);
        if let Some(band) = closed {
            debug!("Band closed: y={}..{}", band.top, band.bottom);
            bands.push(band);
        } else {
            debug!("Band opened at y={}", y);
        }
        state = next;
    }

    if let ScanState::InRow { row_start } = state {
        debug!("Guide line at y={} has no closing marker, ignored", row_start);
    }

    bands
}

/// Split a band into frame regions using the column markers on its guide line.
///
/// x=0 is the implicit first boundary; each column marker closes the frame
/// to its left and starts the next one. Zero-width segments are skipped.
pub fn band_regions(image: &RgbaImage, band: Band, col_marker: Rgba<u8>) -> Vec<SpriteRegion> {
    let height = band.sprite_height();
    let mut regions = Vec::new();
    let mut col_start = 0;

    for x in 0..image.width() {
        if *image.get_pixel(x, band.top) != col_marker {
            continue;
        }
        if x > col_start {
            regions.push(SpriteRegion::new(col_start, band.top + 1, x - col_start, height));
        }
        col_start = x;
    }

    regions
}

/// Scan the whole sheet into rows of regions, in row-major order
pub fn scan_regions(
    image: &RgbaImage,
    row_marker: Rgba<u8>,
    col_marker: Rgba<u8>,
) -> Vec<Vec<SpriteRegion>> {
    find_bands(image, row_marker)
        .into_iter()
        .map(|band| band_regions(image, band, col_marker))
        .collect()
}
