// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the grid arithmetic shared by sprite sheet export
//! and the aspect-ratio fitting used when drawing frames on screen.

/// Columns and rows of a row-major grid holding `count` cells with at most
/// `max_columns` per row.
pub fn grid_dimensions(count: usize, max_columns: usize) -> (usize, usize) {
    if count == 0 || max_columns == 0 {
        return (0, 0);
    }
    let columns = count.min(max_columns);
    let rows = count.div_ceil(max_columns);
    (columns, rows)
}

/// Pixel origin of cell `index` in a row-major grid of `cell_w`×`cell_h` cells.
pub fn cell_origin(index: usize, columns: usize, cell_w: u32, cell_h: u32) -> (u32, u32) {
    let col = (index % columns) as u32;
    let row = (index / columns) as u32;
    (col * cell_w, row * cell_h)
}

/// Largest size with the image's aspect ratio that fits in the available area.
pub fn fit_size(image_w: u32, image_h: u32, available_w: f32, available_h: f32) -> (f32, f32) {
    if image_w == 0 || image_h == 0 || available_w <= 0.0 || available_h <= 0.0 {
        return (0.0, 0.0);
    }
    let img_aspect = image_w as f32 / image_h as f32;
    let available_aspect = available_w / available_h;

    if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available_w, available_w / img_aspect)
    } else {
        // Image is taller - fit to height
        (available_h * img_aspect, available_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(0, 5), (0, 0));
        assert_eq!(grid_dimensions(3, 5), (3, 1));
        assert_eq!(grid_dimensions(5, 5), (5, 1));
        assert_eq!(grid_dimensions(6, 5), (5, 2));
        assert_eq!(grid_dimensions(11, 5), (5, 3));
        assert_eq!(grid_dimensions(6, 2), (2, 3));
    }

    #[test]
    fn test_cell_origin_row_major() {
        assert_eq!(cell_origin(0, 5, 10, 20), (0, 0));
        assert_eq!(cell_origin(4, 5, 10, 20), (40, 0));
        assert_eq!(cell_origin(5, 5, 10, 20), (0, 20));
        assert_eq!(cell_origin(3, 2, 10, 20), (10, 20));
    }

    #[test]
    fn test_fit_size() {
        // Wide image in a square area
        let (w, h) = fit_size(1920, 1080, 100.0, 100.0);
        assert!((w - 100.0).abs() < 0.001);
        assert!((h - 56.25).abs() < 0.001);

        // Tall image in a wide area
        let (w, h) = fit_size(100, 200, 400.0, 100.0);
        assert!((w - 50.0).abs() < 0.001);
        assert!((h - 100.0).abs() < 0.001);

        assert_eq!(fit_size(0, 10, 100.0, 100.0), (0.0, 0.0));
    }
}
