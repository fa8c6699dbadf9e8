// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media file loading (images and videos).
//!
//! This module handles opening video inputs behind the [`VideoSource`]
//! trait and decoding still images for display in egui. Two backends exist:
//! numbered image sequences (always available) and video containers through
//! OpenCV (feature `video-opencv`).

use crate::error::MediaError;
use crate::models::frame::Frame;
use image::{ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

/// Frame rate assumed for image-sequence inputs.
pub const IMAGE_SEQUENCE_FPS: f64 = 24.0;

/// File extensions treated as video containers.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "mkv", "avi"];

/// A seekable video whose current picture can be captured.
///
/// `seek` blocks until the new position is decoded, so a caller never has
/// more than one seek in flight.
pub trait VideoSource: Send {
    /// Total length in seconds.
    fn duration(&self) -> f64;

    /// Native picture size (width, height).
    fn dimensions(&self) -> (u32, u32);

    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Move the playback position, clamped to `[0, duration]`.
    fn seek(&mut self, time: f64) -> Result<(), MediaError>;

    /// Capture the picture at the current position without advancing.
    fn grab(&mut self) -> Result<Frame, MediaError>;
}

/// Decoded still image ready to become an egui texture.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode image bytes into RGBA pixels.
pub fn load_image(bytes: &[u8]) -> Result<LoadedImage, MediaError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    Ok(LoadedImage {
        width: img.width(),
        height: img.height(),
        pixels: img.into_raw(),
    })
}

/// True if the path names something [`open_video`] can handle.
pub fn is_video_input(path: &Path) -> bool {
    path.is_dir() || has_video_extension(path)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Open a video input: a directory of numbered frames or a video file.
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>, MediaError> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::open(path, IMAGE_SEQUENCE_FPS)?));
    }
    if has_video_extension(path) {
        #[cfg(feature = "video-opencv")]
        {
            return Ok(Box::new(opencv_source::OpenCvSource::open(path)?));
        }
    }
    Err(MediaError::Unsupported(path.to_path_buf()))
}

/// Directory of still images played back at a fixed frame rate.
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    fps: f64,
    width: u32,
    height: u32,
    position: f64,
    /// Last decoded picture and its file index
    cached: Option<(usize, RgbaImage)>,
}

impl ImageSequenceSource {
    /// Collect the image files of `dir`, sorted by name.
    pub fn open(dir: &Path, fps: f64) -> Result<Self, MediaError> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && ImageFormat::from_path(p).is_ok())
            .collect();
        files.sort();

        let first = files
            .first()
            .ok_or_else(|| MediaError::Empty(dir.to_path_buf()))?;
        let (width, height) = image::image_dimensions(first)?;

        log::info!(
            "Opened image sequence {} ({} frames, {}x{})",
            dir.display(),
            files.len(),
            width,
            height
        );

        Ok(Self {
            files,
            fps,
            width,
            height,
            position: 0.0,
            cached: None,
        })
    }

    fn index_at(&self, time: f64) -> usize {
        let index = (time * self.fps + 1e-6).floor().max(0.0) as usize;
        index.min(self.files.len().saturating_sub(1))
    }
}

impl VideoSource for ImageSequenceSource {
    fn duration(&self) -> f64 {
        self.files.len() as f64 / self.fps
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, time: f64) -> Result<(), MediaError> {
        if !time.is_finite() {
            return Err(MediaError::Seek(time));
        }
        self.position = time.clamp(0.0, self.duration());
        Ok(())
    }

    fn grab(&mut self) -> Result<Frame, MediaError> {
        let index = self.index_at(self.position);
        let image = match &self.cached {
            Some((cached, image)) if *cached == index => image.clone(),
            _ => {
                let image = image::open(&self.files[index])?.to_rgba8();
                self.cached = Some((index, image.clone()));
                image
            }
        };
        Ok(Frame::new(image, self.position))
    }
}

#[cfg(feature = "video-opencv")]
mod opencv_source {
    use super::VideoSource;
    use crate::error::MediaError;
    use crate::models::frame::Frame;
    use image::RgbaImage;
    use opencv::{core, imgproc, prelude::*, videoio};
    use std::path::Path;

    /// Video container decoded through OpenCV.
    pub struct OpenCvSource {
        capture: videoio::VideoCapture,
        duration: f64,
        width: u32,
        height: u32,
        position: f64,
    }

    impl OpenCvSource {
        pub fn open(path: &Path) -> Result<Self, MediaError> {
            let name = path.to_string_lossy();
            let capture = videoio::VideoCapture::from_file(&name, videoio::CAP_ANY)?;
            if !capture.is_opened()? {
                return Err(MediaError::Unsupported(path.to_path_buf()));
            }

            let fps = capture.get(videoio::CAP_PROP_FPS)?;
            let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?;
            let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
            let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
            let duration = if fps > 0.0 { frame_count / fps } else { 0.0 };

            log::info!(
                "Opened video {} ({:.2}s, {}x{}, {:.2} fps)",
                path.display(),
                duration,
                width,
                height,
                fps
            );

            Ok(Self {
                capture,
                duration,
                width,
                height,
                position: 0.0,
            })
        }
    }

    impl VideoSource for OpenCvSource {
        fn duration(&self) -> f64 {
            self.duration
        }

        fn dimensions(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn position(&self) -> f64 {
            self.position
        }

        fn seek(&mut self, time: f64) -> Result<(), MediaError> {
            let target = time.clamp(0.0, self.duration);
            if !self.capture.set(videoio::CAP_PROP_POS_MSEC, target * 1000.0)? {
                return Err(MediaError::Seek(time));
            }
            self.position = target;
            Ok(())
        }

        fn grab(&mut self) -> Result<Frame, MediaError> {
            // Reading advances the decoder, so rewind to the current position first
            self.capture
                .set(videoio::CAP_PROP_POS_MSEC, self.position * 1000.0)?;

            let mut bgr = core::Mat::default();
            if !self.capture.read(&mut bgr)? || bgr.empty() {
                return Err(MediaError::Grab(self.position));
            }
            let mut rgba = core::Mat::default();
            imgproc::cvt_color(&bgr, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;

            let width = rgba.cols() as u32;
            let height = rgba.rows() as u32;
            let image = RgbaImage::from_raw(width, height, rgba.data_bytes()?.to_vec())
                .ok_or(MediaError::Grab(self.position))?;
            Ok(Frame::new(image, self.position))
        }
    }
}
