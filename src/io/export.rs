// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sprite sheet and screenshot composition.
//!
//! Frames are tiled row-major at their native size. The keyframe sheet uses
//! up to five columns; the slot sheet is always two columns by three rows.

use crate::error::ExportError;
use crate::models::frame::Frame;
use crate::models::slots::{SlotBoard, SLOT_COUNT};
use crate::util::geometry::{cell_origin, grid_dimensions};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Maximum columns of a keyframe sprite sheet.
pub const SHEET_COLUMNS: usize = 5;

/// Columns of the slot sprite sheet (rows follow from the six slots).
pub const SLOT_SHEET_COLUMNS: usize = 2;

pub const SCREENSHOT_FILE_NAME: &str = "screenshot_frame.png";
pub const SLOT_SHEET_FILE_NAME: &str = "sprite_sheet_2x3.png";

/// A composed image and its suggested file name.
#[derive(Debug, Clone)]
pub struct SheetImage {
    pub image: RgbaImage,
    pub file_name: String,
    /// True when the export is a single screenshot rather than a sheet
    pub is_screenshot: bool,
}

/// File name of a multi-frame keyframe sheet.
pub fn sheet_file_name(frame_count: usize, fps: u32) -> String {
    format!("spritesheet_{}frames_{}fps.png", frame_count, fps)
}

/// Tile `images` row-major with at most `max_columns` per row.
///
/// The cell size is taken from the first image.
pub fn compose_grid(images: &[&RgbaImage], max_columns: usize) -> RgbaImage {
    let Some(first) = images.first() else {
        return RgbaImage::new(0, 0);
    };
    let (cell_w, cell_h) = first.dimensions();
    let (columns, rows) = grid_dimensions(images.len(), max_columns);
    let mut sheet = RgbaImage::new(cell_w * columns as u32, cell_h * rows as u32);

    for (i, img) in images.iter().enumerate() {
        let (x, y) = cell_origin(i, max_columns, cell_w, cell_h);
        image::imageops::replace(&mut sheet, *img, x as i64, y as i64);
    }
    sheet
}

/// Compose the rotated keyframe view.
///
/// One frame exports as a plain screenshot; more frames become a sheet
/// named after the frame count and preview rate.
pub fn export_keyframes(view: &[&Frame], fps: u32) -> Result<SheetImage, ExportError> {
    match view {
        [] => Err(ExportError::Empty),
        [only] => Ok(SheetImage {
            image: only.image.clone(),
            file_name: SCREENSHOT_FILE_NAME.to_string(),
            is_screenshot: true,
        }),
        frames => {
            let images: Vec<&RgbaImage> = frames.iter().map(|f| &f.image).collect();
            Ok(SheetImage {
                image: compose_grid(&images, SHEET_COLUMNS),
                file_name: sheet_file_name(frames.len(), fps),
                is_screenshot: false,
            })
        }
    }
}

/// Compose the 2×3 slot sheet. Every slot must be filled.
pub fn export_slots(board: &SlotBoard) -> Result<SheetImage, ExportError> {
    let images = board.slot_images().ok_or(ExportError::IncompleteSlots {
        filled: board.filled_count(),
    })?;
    debug_assert_eq!(images.len(), SLOT_COUNT);

    Ok(SheetImage {
        image: compose_grid(&images, SLOT_SHEET_COLUMNS),
        file_name: SLOT_SHEET_FILE_NAME.to_string(),
        is_screenshot: false,
    })
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write an image to `path` as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, encode_png(image)?)?;
    log::info!("Exported {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::tests::solid;
    use crate::models::sequence::FrameSequence;

    fn tag_at(image: &RgbaImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y)[0]
    }

    #[test]
    fn test_empty_view_is_an_error() {
        assert!(matches!(export_keyframes(&[], 12), Err(ExportError::Empty)));
    }

    #[test]
    fn test_single_frame_is_screenshot() {
        let mut seq = FrameSequence::new();
        seq.push(solid(4, 3, 9, 0.0));
        seq.set_impact(0);

        let sheet = export_keyframes(&seq.ordered_view(), 24).unwrap();
        assert!(sheet.is_screenshot);
        assert_eq!(sheet.file_name, "screenshot_frame.png");
        assert_eq!(sheet.image.dimensions(), (4, 3));
        assert_eq!(tag_at(&sheet.image, 0, 0), 9);
    }

    #[test]
    fn test_sheet_layout_follows_rotated_view() {
        let mut seq = FrameSequence::new();
        seq.extend((0..7).map(|i| solid(4, 3, i, i as f64)));
        seq.set_impact(2);

        let sheet = export_keyframes(&seq.ordered_view(), 12).unwrap();
        assert!(!sheet.is_screenshot);
        assert_eq!(sheet.file_name, "spritesheet_7frames_12fps.png");
        assert_eq!(sheet.image.dimensions(), (20, 6));

        // Row-major: [2, 3, 4, 5, 6] then [0, 1]
        assert_eq!(tag_at(&sheet.image, 0, 0), 2);
        assert_eq!(tag_at(&sheet.image, 16, 0), 6);
        assert_eq!(tag_at(&sheet.image, 0, 3), 0);
        assert_eq!(tag_at(&sheet.image, 4, 3), 1);
        // Unused cells stay transparent
        assert_eq!(sheet.image.get_pixel(8, 3)[3], 0);
    }

    #[test]
    fn test_short_sheet_has_one_row() {
        let frames: Vec<Frame> = (0..3).map(|i| solid(2, 2, i, 0.0)).collect();
        let view: Vec<&Frame> = frames.iter().collect();
        let sheet = export_keyframes(&view, 30).unwrap();
        assert_eq!(sheet.image.dimensions(), (6, 2));
    }

    #[test]
    fn test_incomplete_slots_rejected() {
        let mut board = SlotBoard::new();
        board.load_frames((0..6).map(|i| solid(2, 2, i, 0.0)).collect());
        board.assign(0, 0);
        board.assign(1, 1);

        assert!(matches!(
            export_slots(&board),
            Err(ExportError::IncompleteSlots { filled: 2 })
        ));
    }

    #[test]
    fn test_slot_sheet_is_two_by_three() {
        let mut board = SlotBoard::new();
        board.load_frames((0..6).map(|i| solid(4, 3, i * 10, 0.0)).collect());
        for slot in 0..SLOT_COUNT {
            // Reverse order so slot position, not frame order, drives layout
            board.assign(SLOT_COUNT - 1 - slot, slot);
        }

        let sheet = export_slots(&board).unwrap();
        assert_eq!(sheet.file_name, "sprite_sheet_2x3.png");
        assert_eq!(sheet.image.dimensions(), (8, 9));
        assert_eq!(tag_at(&sheet.image, 0, 0), 50);
        assert_eq!(tag_at(&sheet.image, 4, 0), 40);
        assert_eq!(tag_at(&sheet.image, 0, 6), 10);
        assert_eq!(tag_at(&sheet.image, 4, 6), 0);
    }

    #[test]
    fn test_encode_png_roundtrips_dimensions() {
        let img = RgbaImage::from_pixel(5, 2, image::Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 2));
    }
}
