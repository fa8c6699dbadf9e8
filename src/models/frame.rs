// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Captured video frames.

use image::RgbaImage;

/// A snapshot of the video picture at a point in source time.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Pixels at the video's native resolution
    pub image: RgbaImage,
    /// Source position in seconds
    pub time: f64,
}

impl Frame {
    /// Create a frame from a captured image.
    pub fn new(image: RgbaImage, time: f64) -> Self {
        Self { image, time }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Solid-color test frame whose red channel encodes `tag`.
    pub fn solid(width: u32, height: u32, tag: u8, time: f64) -> Frame {
        Frame::new(
            RgbaImage::from_pixel(width, height, image::Rgba([tag, 0, 0, 255])),
            time,
        )
    }

    #[test]
    fn test_frame_dimensions() {
        let frame = solid(8, 4, 7, 1.5);
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.pixels().len(), 8 * 4 * 4);
        assert_eq!(frame.pixels()[0], 7);
    }
}
