use std::path::Path;

use image::RgbaImage;
use log::debug;

use super::loader::{load_image, load_image_from_bytes};
use super::options::SliceOptions;
use super::scanner::scan_regions;
use crate::error::SlicerError;
use crate::sprite::{
    Sprite, SpriteRegion, apply_color_key, convert_image, flip_x, flip_y, scale_image,
};

/// Sprites cut from one sheet, grouped by row in scan order.
///
/// Built once from a single scan and read-only afterwards. Rows may hold
/// different numbers of sprites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteSheet {
    rows: Vec<Vec<Sprite>>,
}

impl SpriteSheet {
    /// Slice an already decoded image
    pub fn from_image(image: &RgbaImage, options: &SliceOptions) -> Result<Self, SlicerError> {
        options.validate()?;

        let rows = scan_regions(image, options.row_marker, options.col_marker)
            .into_iter()
            .map(|regions| {
                regions
                    .into_iter()
                    .map(|region| extract_sprite(image, region, options))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Sliced {}x{} sheet into {} rows, {} sprites",
            image.width(),
            image.height(),
            rows.len(),
            rows.iter().map(Vec::len).sum::<usize>()
        );

        Ok(Self { rows })
    }

    /// Decode the sheet at `path` and slice it
    pub fn open(path: &Path, options: &SliceOptions) -> Result<Self, SlicerError> {
        let image = load_image(path)?;
        Self::from_image(&image, options)
    }

    /// Decode an in-memory encoded sheet and slice it
    pub fn from_bytes(bytes: &[u8], options: &SliceOptions) -> Result<Self, SlicerError> {
        let image = load_image_from_bytes(bytes)?;
        Self::from_image(&image, options)
    }

    /// Sprites of row `index`, left to right
    pub fn row(&self, index: usize) -> Result<&[Sprite], SlicerError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(SlicerError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            })
    }

    /// Alias of [`SpriteSheet::row`]
    pub fn get_row(&self, index: usize) -> Result<&[Sprite], SlicerError> {
        self.row(index)
    }

    pub fn rows(&self) -> &[Vec<Sprite>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of sprites across all rows
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All sprites in row-major order, as a fresh vector
    pub fn combined(&self) -> Vec<Sprite> {
        self.rows.iter().flatten().cloned().collect()
    }

    /// Alias of [`SpriteSheet::combined`]
    pub fn get_combined(&self) -> Vec<Sprite> {
        self.combined()
    }

    /// Source regions per row, without pixel data
    pub fn regions(&self) -> Vec<Vec<SpriteRegion>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|s| s.region).collect())
            .collect()
    }

    /// Mirror sprites left to right; see [`crate::sprite::flip_y`]
    pub fn flip_y<'a, I>(sprites: I, reverse: bool) -> Vec<Sprite>
    where
        I: IntoIterator<Item = &'a Sprite>,
    {
        flip_y(sprites, reverse)
    }

    /// Mirror sprites top to bottom; see [`crate::sprite::flip_x`]
    pub fn flip_x<'a, I>(sprites: I) -> Vec<Sprite>
    where
        I: IntoIterator<Item = &'a Sprite>,
    {
        flip_x(sprites)
    }
}

/// Copy one region out of the sheet and post-process it.
///
/// Order matters: scale, then convert, then color key, so the key is applied
/// to the final pixel format.
fn extract_sprite(
    image: &RgbaImage,
    region: SpriteRegion,
    options: &SliceOptions,
) -> Result<Sprite, SlicerError> {
    let mut pixels =
        image::imageops::crop_imm(image, region.x, region.y, region.width, region.height)
            .to_image();

    if let Some(new_size) = options.effective_size() {
        pixels = scale_image(pixels, new_size, options.filter.to_image_filter())?;
    }
    convert_image(&mut pixels, options.converter);
    if let Some(key) = options.transparent_color {
        apply_color_key(&mut pixels, key);
    }

    Ok(Sprite {
        region,
        image: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::{Converter, NewSize};
    use image::{Rgb, Rgba};

    const ROW: Rgba<u8> = Rgba([255, 255, 0, 255]);
    const COL: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    /// One band (y=0..3) with column boundaries at x=0, 5, 10
    fn two_frame_sheet() -> RgbaImage {
        let mut img = RgbaImage::from_fn(11, 4, |x, _| Rgba([(x * 20) as u8, 40, 60, 200]));
        img.put_pixel(0, 0, ROW);
        img.put_pixel(0, 3, ROW);
        img.put_pixel(5, 0, COL);
        img.put_pixel(10, 0, COL);
        img
    }

    /// Three bands with 3, 1 and 2 frames; 16x4 cells plus guide lines
    fn jagged_sheet() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(64, 16, Rgba([10, 20, 30, 255]));
        for y in [0, 5, 10, 15] {
            img.put_pixel(0, y, ROW);
        }
        for x in [16, 32, 48] {
            img.put_pixel(x, 0, COL);
        }
        img.put_pixel(16, 5, COL);
        for x in [16, 48] {
            img.put_pixel(x, 10, COL);
        }
        img
    }

    #[test]
    fn test_two_frames_in_one_row() {
        let sheet = SpriteSheet::from_image(&two_frame_sheet(), &SliceOptions::new()).unwrap();

        assert_eq!(sheet.row_count(), 1);
        let row = sheet.row(0).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].dimensions(), (5, 2));
        assert_eq!(row[1].dimensions(), (5, 2));
        assert_eq!(row[1].region, SpriteRegion::new(5, 1, 5, 2));
    }

    #[test]
    fn test_pixels_come_from_region() {
        let options = SliceOptions::new().converter(Converter::WithAlpha);
        let sheet = SpriteSheet::from_image(&two_frame_sheet(), &options).unwrap();
        let second = &sheet.row(0).unwrap()[1];

        assert_eq!(*second.image.get_pixel(0, 0), Rgba([100, 40, 60, 200]));
        assert_eq!(*second.image.get_pixel(4, 1), Rgba([180, 40, 60, 200]));
    }

    #[test]
    fn test_jagged_rows() {
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &SliceOptions::new()).unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.row(0).unwrap().len(), 3);
        assert_eq!(sheet.row(1).unwrap().len(), 1);
        assert_eq!(sheet.row(2).unwrap().len(), 2);
        assert_eq!(sheet.row(2).unwrap()[1].dimensions(), (32, 4));
        assert_eq!(sheet.len(), 6);
    }

    #[test]
    fn test_unclosed_trailing_band_is_ignored() {
        let mut img = jagged_sheet();
        img.put_pixel(0, 15, Rgba([0, 0, 0, 255]));
        let sheet = SpriteSheet::from_image(&img, &SliceOptions::new()).unwrap();

        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn test_sheet_without_markers_is_empty() {
        let img = RgbaImage::from_pixel(8, 8, WHITE);
        let sheet = SpriteSheet::from_image(&img, &SliceOptions::new()).unwrap();

        assert!(sheet.is_empty());
        assert!(sheet.combined().is_empty());
    }

    #[test]
    fn test_row_out_of_range() {
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &SliceOptions::new()).unwrap();
        let err = sheet.row(3).unwrap_err();

        assert!(matches!(
            err,
            SlicerError::RowOutOfRange { index: 3, rows: 3 }
        ));
        assert!(sheet.get_row(usize::MAX).is_err());
    }

    #[test]
    fn test_row_is_idempotent() {
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &SliceOptions::new()).unwrap();
        let first = sheet.row(1).unwrap().to_vec();
        let second = sheet.get_row(1).unwrap().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_combined_is_row_major() {
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &SliceOptions::new()).unwrap();
        let combined = sheet.get_combined();

        assert_eq!(combined.len(), sheet.len());
        let expected: Vec<SpriteRegion> = sheet.regions().into_iter().flatten().collect();
        let actual: Vec<SpriteRegion> = combined.iter().map(|s| s.region).collect();
        assert_eq!(actual, expected);
        assert_eq!(actual[3], SpriteRegion::new(0, 6, 16, 4));
    }

    #[test]
    fn test_scale_by_factor() {
        let options = SliceOptions::new()
            .scale(true)
            .new_size(Some(NewSize::Factor(2)));
        let sheet = SpriteSheet::from_image(&two_frame_sheet(), &options).unwrap();

        assert_eq!(sheet.row(0).unwrap()[0].dimensions(), (10, 4));
        // Region still describes the source rectangle
        assert_eq!(sheet.row(0).unwrap()[0].region.width, 5);
    }

    #[test]
    fn test_scale_to_exact_size() {
        let options = SliceOptions::new().scale(true).new_size(Some(NewSize::Exact {
            width: 8,
            height: 8,
        }));
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &options).unwrap();

        assert!(sheet.combined().iter().all(|s| s.dimensions() == (8, 8)));
    }

    #[test]
    fn test_size_ignored_without_scale_flag() {
        let options = SliceOptions::new().new_size(Some(NewSize::Factor(4)));
        let sheet = SpriteSheet::from_image(&two_frame_sheet(), &options).unwrap();

        assert_eq!(sheet.row(0).unwrap()[0].dimensions(), (5, 2));
    }

    #[test]
    fn test_zero_factor_rejected() {
        let options = SliceOptions::new()
            .scale(true)
            .new_size(Some(NewSize::Factor(0)));
        let result = SpriteSheet::from_image(&two_frame_sheet(), &options);

        assert!(matches!(result, Err(SlicerError::InvalidSize(_))));
    }

    #[test]
    fn test_oversized_factor_is_an_error() {
        let options = SliceOptions::new()
            .scale(true)
            .new_size(Some(NewSize::Factor(u32::MAX)));
        let result = SpriteSheet::from_image(&two_frame_sheet(), &options);

        assert!(matches!(result, Err(SlicerError::InvalidSize(_))));
    }

    #[test]
    fn test_color_key_after_opaque_conversion() {
        let mut img = two_frame_sheet();
        img.put_pixel(1, 1, Rgba([255, 255, 255, 90]));
        let sheet = SpriteSheet::from_image(&img, &SliceOptions::new()).unwrap();
        let first = &sheet.row(0).unwrap()[0];

        assert_eq!(first.image.get_pixel(1, 0)[3], 0);
        assert_eq!(first.image.get_pixel(2, 0)[3], 255);
    }

    #[test]
    fn test_color_key_disabled() {
        let mut img = two_frame_sheet();
        img.put_pixel(1, 1, WHITE);
        let options = SliceOptions::new().transparent_color(None);
        let sheet = SpriteSheet::from_image(&img, &options).unwrap();

        assert_eq!(*sheet.row(0).unwrap()[0].image.get_pixel(1, 0), WHITE);
    }

    #[test]
    fn test_custom_key_and_markers() {
        let red = Rgba([255, 0, 0, 255]);
        let green = Rgba([0, 255, 0, 255]);
        let mut img = RgbaImage::from_pixel(6, 5, Rgba([1, 2, 3, 255]));
        img.put_pixel(0, 0, red);
        img.put_pixel(0, 4, red);
        img.put_pixel(3, 0, green);

        let options = SliceOptions::new()
            .row_marker(red)
            .col_marker(green)
            .transparent_color(Some(Rgb([1, 2, 3])));
        let sheet = SpriteSheet::from_image(&img, &options).unwrap();
        let sprite = &sheet.row(0).unwrap()[0];

        assert_eq!(sprite.dimensions(), (3, 3));
        assert!(sprite.image.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_flips_do_not_touch_sheet() {
        let sheet = SpriteSheet::from_image(&jagged_sheet(), &SliceOptions::new()).unwrap();
        let before = sheet.clone();
        let row = sheet.row(0).unwrap();

        let left = SpriteSheet::flip_y(row, true);
        let upside_down = SpriteSheet::flip_x(row);

        assert_eq!(left.len(), 3);
        assert_eq!(left[0].region, row[2].region);
        assert_eq!(upside_down[0].region, row[0].region);
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = SpriteSheet::from_bytes(b"not an image", &SliceOptions::new());
        assert!(matches!(result, Err(SlicerError::ImageDecode(_))));
    }
}
